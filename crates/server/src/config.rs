//! Server configuration loaded from environment variables.

/// Configuration for the HTTP server.
///
/// All fields have defaults suitable for local development; override
/// via environment variables in production.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// SQLite connection string (default: `sqlite://vitrine.db?mode=rwc`).
    pub database_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var        | Default           |
    /// |----------------|-------------------|
    /// | `HOST`         | `0.0.0.0`         |
    /// | `PORT`         | `3000`            |
    /// | `DATABASE_URL` | `sqlite://vitrine.db?mode=rwc` |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://vitrine.db?mode=rwc".into());

        Self {
            host,
            port,
            database_url,
        }
    }
}
