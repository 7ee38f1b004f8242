//! Storage layer
//!
//! Two implementations of the core storage gateway traits: Postgres
//! (sqlx) for deployment and an in-memory dashmap store for tests and
//! database-free local runs.

pub mod db;
pub mod memory;

pub use db::Database;
pub use memory::MemoryStore;
