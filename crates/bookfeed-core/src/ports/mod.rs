//! Port traits (interfaces) for dependency injection

pub mod storage;

pub use storage::{BookStore, FollowStore, ReviewStore, Storage, UserStore};
