//! Editor sessions.
//!
//! ARCHITECTURE
//! ============
//! Editors prove knowledge of the shared editor password once and receive a
//! random session token stored in Postgres. Later writes present the token as
//! an http-only cookie; the session row also remembers the author name the
//! editor chose at login.
//!
//! TRADE-OFFS
//! ==========
//! Password comparison hashes both sides with SHA-256 and compares digests so
//! the comparison length never depends on the supplied input.

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::fmt::Write;

use rand::Rng;
use sha2::{Digest, Sha256};
use sqlx::{PgPool, Row};

pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Compare a supplied password against the configured one.
#[must_use]
pub fn passwords_match(supplied: &str, expected: &str) -> bool {
    Sha256::digest(supplied.as_bytes()) == Sha256::digest(expected.as_bytes())
}

/// Author name recorded for a session: trimmed, or [`ANONYMOUS_AUTHOR`] when blank.
#[must_use]
pub fn author_name(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_owned(),
        _ => ANONYMOUS_AUTHOR.to_owned(),
    }
}

/// Create a session for `author`, valid for `ttl_days`, returning the token.
pub async fn create_session(pool: &PgPool, author: &str, ttl_days: i32) -> Result<String, sqlx::Error> {
    let token = generate_token();
    sqlx::query("INSERT INTO sessions (token, author, expires_at) VALUES ($1, $2, now() + make_interval(days => $3))")
        .bind(&token)
        .bind(author)
        .bind(ttl_days)
        .execute(pool)
        .await?;
    Ok(token)
}

/// Validate a session token and return the author it was created for.
pub async fn validate_session(pool: &PgPool, token: &str) -> Result<Option<String>, sqlx::Error> {
    let row = sqlx::query("SELECT author FROM sessions WHERE token = $1 AND expires_at > now()")
        .bind(token)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.get("author")))
}

/// Delete a session by token.
pub async fn delete_session(pool: &PgPool, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

/// Remove expired sessions, returning how many were deleted.
pub async fn purge_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= now()")
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
