//! SQLite storage implementation for 2ndBrain.
//!
//! This crate is the only place in the workspace where Diesel dependencies
//! exist. It implements the `StateStorage` trait defined in
//! `secondbrain-core` on top of a single key/value table:
//! - Database connection pooling and management
//! - Embedded Diesel migrations
//! - The document repository
//!
//! ```text
//!   core (Store, StateStorage)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod documents;
pub mod errors;
pub mod schema;

pub use db::{create_pool, get_connection, init, open, run_migrations, DbConnection, DbPool};
pub use documents::DocumentRepository;
pub use errors::StorageError;
