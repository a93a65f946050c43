//! SQLite storage implementation for the papertrade ledger.
//!
//! This crate implements the repository traits defined in `papertrade-core`
//! using Diesel over SQLite. It contains:
//! - Database initialization, connection pooling and embedded migrations
//! - A single-writer actor that runs every write in a `BEGIN IMMEDIATE` transaction
//! - Account and trade repositories
//!
//! ```text
//!        papertrade-core (traits)
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod accounts;
pub mod trades;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from papertrade-core for convenience
pub use papertrade_core::errors::{DatabaseError, Error, Result};
