//! Follow and newsfeed operations

use bookfeed_core::ports::Storage;
use bookfeed_core::{FollowEdge, Result, Review};
use std::sync::Arc;
use tracing::info;

use super::integrity::ensure_user_exists;

pub struct FollowService {
    store: Arc<dyn Storage>,
}

impl FollowService {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }

    /// Validates both endpoints, then conditionally inserts the edge.
    /// Returns `None` when the edge already existed. A user may follow
    /// themselves; the newsfeed union collapses the duplicate branch.
    pub async fn follow(&self, follower_id: i64, followee_id: i64) -> Result<Option<FollowEdge>> {
        ensure_user_exists(self.store.as_ref(), follower_id).await?;
        ensure_user_exists(self.store.as_ref(), followee_id).await?;

        let edge = self.store.insert_follow(follower_id, followee_id).await?;
        match &edge {
            Some(_) => info!("Created follow: {} -> {}", follower_id, followee_id),
            None => info!("Follow already present: {} -> {}", follower_id, followee_id),
        }
        Ok(edge)
    }

    /// Removes the edge if present; succeeds silently either way.
    pub async fn unfollow(&self, follower_id: i64, followee_id: i64) -> Result<()> {
        self.store.delete_follow(follower_id, followee_id).await?;
        info!("Removed follow: {} -> {}", follower_id, followee_id);
        Ok(())
    }

    /// Deduplicated union of followed users' reviews and the user's
    /// own, newest first.
    pub async fn newsfeed(&self, user_id: i64) -> Result<Vec<Review>> {
        self.store.newsfeed(user_id).await
    }
}
