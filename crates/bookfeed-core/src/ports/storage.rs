//! Storage gateway traits
//!
//! Each trait is a narrow CRUD surface over one table. Point lookups
//! return `Ok(None)` for a missing row; only store failures are errors.
//! Every insert is a single atomic statement that returns the created
//! row, generated id and timestamp included.

use crate::types::{Book, FollowEdge, NewReview, Review, User};
use crate::Result;
use async_trait::async_trait;

/// User store
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert_user(&self, name: &str) -> Result<User>;
    async fn get_user(&self, id: i64) -> Result<Option<User>>;
    /// All users, ascending id.
    async fn list_users(&self) -> Result<Vec<User>>;
    async fn user_exists(&self, id: i64) -> Result<bool>;
}

/// Book store
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn insert_book(&self, title: &str, author: &str) -> Result<Book>;
    async fn get_book(&self, id: i64) -> Result<Option<Book>>;
    /// All books, ascending id.
    async fn list_books(&self) -> Result<Vec<Book>>;
    async fn book_exists(&self, id: i64) -> Result<bool>;
}

/// Review store
#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn insert_review(&self, review: &NewReview) -> Result<Review>;
    async fn get_review(&self, id: i64) -> Result<Option<Review>>;
    /// Reviews authored by one user, newest first.
    async fn list_reviews_by_user(&self, user_id: i64) -> Result<Vec<Review>>;
    /// Reviews of one book, newest first.
    async fn list_reviews_by_book(&self, book_id: i64) -> Result<Vec<Review>>;
}

/// Follow edge store
#[async_trait]
pub trait FollowStore: Send + Sync {
    /// Insert the edge unless it already exists. Returns `None` when
    /// the edge was already present (silent no-op, not an error).
    async fn insert_follow(&self, follower_id: i64, followee_id: i64)
        -> Result<Option<FollowEdge>>;
    /// Remove the edge if present; succeeds either way.
    async fn delete_follow(&self, follower_id: i64, followee_id: i64) -> Result<()>;
    /// Set union of reviews by followed users and the user's own
    /// reviews, deduplicated by review id, sorted newest first after
    /// the union. Per-branch order is irrelevant.
    async fn newsfeed(&self, user_id: i64) -> Result<Vec<Review>>;
}

/// Full storage gateway. Blanket-implemented for anything that covers
/// all four stores, so services can be injected with a single handle.
pub trait Storage: UserStore + BookStore + ReviewStore + FollowStore {}

impl<T: UserStore + BookStore + ReviewStore + FollowStore> Storage for T {}
