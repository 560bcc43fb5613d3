//! HTTP server for the Vitrine catalog.
//!
//! A thin layer over [`vitrine_catalog`]: one GET route that executes
//! the composed search against SQLite and answers either with the
//! full document or, when the `ajax` flag is set, with the three-part
//! JSON fragment body.

pub mod config;
pub mod error;
pub mod render;
pub mod repo;
pub mod routes;
pub mod seed;
pub mod state;

/// Embedded schema migrations.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
