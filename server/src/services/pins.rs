//! Pin data source.
//!
//! SYSTEM CONTEXT
//! ==============
//! The viewer loads the full pin list once per refresh and writes back one
//! placement at a time. Reads go through [`PinCache`](super::cache::PinCache);
//! writes bust it.
//!
//! Draw order is the list order: `sort_order`, then `name`, then `id`.

#[cfg(test)]
#[path = "pins_test.rs"]
mod tests;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::state::AppState;

/// One pin row as served to the viewer. `x`/`y` are `null` while unplaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PinRecord {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub status: Option<String>,
    pub description: String,
    pub tags: Vec<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

#[derive(Debug, thiserror::Error)]
pub enum PinError {
    #[error("pin not found: {0}")]
    NotFound(String),
    #[error("coordinates out of range: ({x}, {y})")]
    OutOfRange { x: f64, y: f64 },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Both coordinates must be finite and inside `[0,1]`.
///
/// # Errors
///
/// Returns [`PinError::OutOfRange`] otherwise.
pub fn validate_coords(x: f64, y: f64) -> Result<(), PinError> {
    let in_range = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
    if in_range(x) && in_range(y) { Ok(()) } else { Err(PinError::OutOfRange { x, y }) }
}

/// All pins in draw order, from the cache unless `bust_cache` is set or the
/// cached list has expired.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_pins(state: &AppState, bust_cache: bool) -> Result<Arc<Vec<PinRecord>>, PinError> {
    if !bust_cache {
        if let Some(pins) = state.pin_cache.get() {
            debug!(count = pins.len(), "pin list served from cache");
            return Ok(pins);
        }
    }

    let generation = state.pin_cache.generation();
    let rows = sqlx::query_as::<_, PinRecord>(
        "SELECT id, name, category, status, description, tags, x, y \
         FROM pins ORDER BY sort_order, name, id",
    )
    .fetch_all(&state.pool)
    .await?;

    info!(count = rows.len(), bust_cache, ttl_secs = state.pin_cache.ttl().as_secs(), "pin list loaded");
    Ok(state.pin_cache.store(rows, generation))
}

/// Store a normalized position for pin `id` and invalidate the cache.
///
/// # Errors
///
/// Returns `OutOfRange` before touching the database, `NotFound` when no row
/// matched, or a database error.
pub async fn place_pin(state: &AppState, id: &str, x: f64, y: f64) -> Result<(), PinError> {
    validate_coords(x, y)?;

    let result = sqlx::query("UPDATE pins SET x = $2, y = $3, updated_at = now() WHERE id = $1")
        .bind(id)
        .bind(x)
        .bind(y)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(PinError::NotFound(id.to_owned()));
    }

    state.pin_cache.invalidate();
    info!(pin_id = %id, x, y, "pin placed");
    Ok(())
}
