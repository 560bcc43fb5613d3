//! Shared application state.

use sqlx::SqlitePool;

/// State available to all handlers via `State<AppState>`.
///
/// Cheaply cloneable; the pool is internally reference-counted. The
/// search core holds no shared mutable state of its own — one
/// request, one response.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}
