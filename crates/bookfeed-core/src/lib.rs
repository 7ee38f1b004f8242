//! Bookfeed Core Library
//!
//! Domain types, error taxonomy, and storage port traits for the
//! bookfeed service. This crate is pure: no runtime, no database
//! driver, so any storage backend or boundary layer can build on it.

pub mod error;
pub mod ports;
pub mod types;

pub use error::{CoreError, Result};
pub use types::*;
