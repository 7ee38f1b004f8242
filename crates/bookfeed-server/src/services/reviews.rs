//! Review operations

use bookfeed_core::ports::Storage;
use bookfeed_core::{NewReview, Result, Review};
use std::sync::Arc;
use tracing::info;

use super::integrity::{ensure_book_exists, ensure_user_exists};

pub struct ReviewService {
    store: Arc<dyn Storage>,
}

impl ReviewService {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }

    /// Validates the payload and both foreign keys, then inserts.
    /// Nothing is persisted when either check fails.
    pub async fn create(&self, req: NewReview) -> Result<Review> {
        req.validate()?;
        ensure_user_exists(self.store.as_ref(), req.user_id).await?;
        ensure_book_exists(self.store.as_ref(), req.book_id).await?;

        let review = self.store.insert_review(&req).await?;
        info!(
            "Created review: id={}, user={}, book={}, rating={}",
            review.id, review.user_id, review.book_id, review.rating
        );
        Ok(review)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Review>> {
        self.store.get_review(id).await
    }

    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<Review>> {
        self.store.list_reviews_by_user(user_id).await
    }

    pub async fn list_by_book(&self, book_id: i64) -> Result<Vec<Review>> {
        self.store.list_reviews_by_book(book_id).await
    }
}
