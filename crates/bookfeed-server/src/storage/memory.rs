//! In-memory storage gateway using DashMap
//!
//! Implements the same port traits as the Postgres gateway, so tests
//! (and local runs without a database) exercise the exact service code
//! paths. Listing order matches the Postgres contracts; `created_at`
//! ties break by descending id to keep ordering deterministic.

use async_trait::async_trait;
use bookfeed_core::ports::{BookStore, FollowStore, ReviewStore, UserStore};
use bookfeed_core::{Book, FollowEdge, NewReview, Result, Review, User};
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

pub struct MemoryStore {
    users: DashMap<i64, User>,
    books: DashMap<i64, Book>,
    reviews: DashMap<i64, Review>,
    follows: DashMap<(i64, i64), FollowEdge>,
    next_user_id: AtomicI64,
    next_book_id: AtomicI64,
    next_review_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            books: DashMap::new(),
            reviews: DashMap::new(),
            follows: DashMap::new(),
            next_user_id: AtomicI64::new(1),
            next_book_id: AtomicI64::new(1),
            next_review_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn sort_newest_first(reviews: &mut [Review]) {
    reviews.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, name: &str) -> Result<User> {
        let id = self.next_user_id.fetch_add(1, Ordering::SeqCst);
        let user = User {
            id,
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.users.insert(id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|e| e.value().clone()).collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn user_exists(&self, id: i64) -> Result<bool> {
        Ok(self.users.contains_key(&id))
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn insert_book(&self, title: &str, author: &str) -> Result<Book> {
        let id = self.next_book_id.fetch_add(1, Ordering::SeqCst);
        let book = Book {
            id,
            title: title.to_string(),
            author: author.to_string(),
            created_at: Utc::now(),
        };
        self.books.insert(id, book.clone());
        Ok(book)
    }

    async fn get_book(&self, id: i64) -> Result<Option<Book>> {
        Ok(self.books.get(&id).map(|b| b.value().clone()))
    }

    async fn list_books(&self) -> Result<Vec<Book>> {
        let mut books: Vec<Book> = self.books.iter().map(|e| e.value().clone()).collect();
        books.sort_by_key(|b| b.id);
        Ok(books)
    }

    async fn book_exists(&self, id: i64) -> Result<bool> {
        Ok(self.books.contains_key(&id))
    }
}

#[async_trait]
impl ReviewStore for MemoryStore {
    async fn insert_review(&self, review: &NewReview) -> Result<Review> {
        let id = self.next_review_id.fetch_add(1, Ordering::SeqCst);
        let review = Review {
            id,
            user_id: review.user_id,
            book_id: review.book_id,
            rating: review.rating,
            content: review.content.clone(),
            created_at: Utc::now(),
        };
        self.reviews.insert(id, review.clone());
        Ok(review)
    }

    async fn get_review(&self, id: i64) -> Result<Option<Review>> {
        Ok(self.reviews.get(&id).map(|r| r.value().clone()))
    }

    async fn list_reviews_by_user(&self, user_id: i64) -> Result<Vec<Review>> {
        let mut reviews: Vec<Review> = self
            .reviews
            .iter()
            .filter(|e| e.value().user_id == user_id)
            .map(|e| e.value().clone())
            .collect();
        sort_newest_first(&mut reviews);
        Ok(reviews)
    }

    async fn list_reviews_by_book(&self, book_id: i64) -> Result<Vec<Review>> {
        let mut reviews: Vec<Review> = self
            .reviews
            .iter()
            .filter(|e| e.value().book_id == book_id)
            .map(|e| e.value().clone())
            .collect();
        sort_newest_first(&mut reviews);
        Ok(reviews)
    }
}

#[async_trait]
impl FollowStore for MemoryStore {
    async fn insert_follow(
        &self,
        follower_id: i64,
        followee_id: i64,
    ) -> Result<Option<FollowEdge>> {
        match self.follows.entry((follower_id, followee_id)) {
            Entry::Occupied(_) => Ok(None),
            Entry::Vacant(slot) => {
                let edge = FollowEdge {
                    follower_id,
                    followee_id,
                    created_at: Utc::now(),
                };
                slot.insert(edge.clone());
                Ok(Some(edge))
            }
        }
    }

    async fn delete_follow(&self, follower_id: i64, followee_id: i64) -> Result<()> {
        self.follows.remove(&(follower_id, followee_id));
        Ok(())
    }

    async fn newsfeed(&self, user_id: i64) -> Result<Vec<Review>> {
        // Reviews are keyed by id, so collecting through the map is
        // already a set union: a review matching both branches (own
        // review plus a self-follow) appears once.
        let mut feed: Vec<Review> = self
            .reviews
            .iter()
            .filter(|e| {
                let author = e.value().user_id;
                author == user_id || self.follows.contains_key(&(user_id, author))
            })
            .map(|e| e.value().clone())
            .collect();
        sort_newest_first(&mut feed);
        Ok(feed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn insert_and_get_user() {
        let store = MemoryStore::new();

        let alice = store.insert_user("Alice").await.unwrap();
        assert_eq!(alice.name, "Alice");

        let fetched = store.get_user(alice.id).await.unwrap();
        assert_eq!(fetched, Some(alice));

        assert_eq!(store.get_user(999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_users_orders_by_id() {
        let store = MemoryStore::new();

        let a = store.insert_user("Alice").await.unwrap();
        let b = store.insert_user("Bob").await.unwrap();
        assert!(a.id < b.id);

        let users = store.list_users().await.unwrap();
        assert_eq!(
            users.iter().map(|u| u.id).collect::<Vec<_>>(),
            vec![a.id, b.id]
        );
    }

    #[tokio::test]
    async fn insert_follow_is_conditional() {
        let store = MemoryStore::new();
        let a = store.insert_user("Alice").await.unwrap();
        let b = store.insert_user("Bob").await.unwrap();

        let first = store.insert_follow(a.id, b.id).await.unwrap();
        assert!(first.is_some());

        let second = store.insert_follow(a.id, b.id).await.unwrap();
        assert!(second.is_none());
    }

    #[tokio::test]
    async fn delete_follow_is_silent_when_absent() {
        let store = MemoryStore::new();
        store.delete_follow(1, 2).await.unwrap();

        let a = store.insert_user("Alice").await.unwrap();
        let b = store.insert_user("Bob").await.unwrap();
        store.insert_follow(a.id, b.id).await.unwrap();
        store.delete_follow(a.id, b.id).await.unwrap();
        store.delete_follow(a.id, b.id).await.unwrap();

        assert!(store.newsfeed(a.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn newsfeed_sorts_after_union() {
        let store = MemoryStore::new();
        let a = store.insert_user("Alice").await.unwrap();
        let b = store.insert_user("Bob").await.unwrap();
        let book = store.insert_book("Clean Code", "Robert C. Martin").await.unwrap();

        store.insert_follow(a.id, b.id).await.unwrap();

        let older = store
            .insert_review(&NewReview {
                user_id: b.id,
                book_id: book.id,
                rating: 4,
                content: "solid".to_string(),
            })
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let own = store
            .insert_review(&NewReview {
                user_id: a.id,
                book_id: book.id,
                rating: 5,
                content: "mine".to_string(),
            })
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let newest = store
            .insert_review(&NewReview {
                user_id: b.id,
                book_id: book.id,
                rating: 5,
                content: "rereading".to_string(),
            })
            .await
            .unwrap();

        let feed = store.newsfeed(a.id).await.unwrap();
        assert_eq!(
            feed.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![newest.id, own.id, older.id]
        );
    }

    #[tokio::test]
    async fn newsfeed_deduplicates_on_self_follow() {
        let store = MemoryStore::new();
        let a = store.insert_user("Alice").await.unwrap();
        let book = store.insert_book("Clean Code", "Robert C. Martin").await.unwrap();

        store.insert_follow(a.id, a.id).await.unwrap();
        let review = store
            .insert_review(&NewReview {
                user_id: a.id,
                book_id: book.id,
                rating: 5,
                content: "Great!".to_string(),
            })
            .await
            .unwrap();

        let feed = store.newsfeed(a.id).await.unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].id, review.id);
    }
}
