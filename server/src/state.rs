//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the database pool, the parsed configuration, and the pin list
//! cache that every read goes through and every placement busts.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::services::cache::PinCache;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
    pub pin_cache: PinCache,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        let pin_cache = PinCache::new(config.pin_cache_ttl);
        Self { pool, config: Arc::new(config), pin_cache }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
