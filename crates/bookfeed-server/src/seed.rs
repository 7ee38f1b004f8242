//! Demo data seeding
//!
//! Idempotent bootstrap of a handful of demo rows, built entirely on
//! the domain services: users are keyed by name, books by title,
//! reviews by (user, book), and the follow edge rides on the
//! conditional insert. Running the seeder twice changes nothing.

use bookfeed_core::{NewBook, NewReview, NewUser, Result};
use tracing::info;

use crate::AppState;

const USERS: [&str; 3] = ["Alice", "Bob", "Charlie"];

const BOOKS: [(&str, &str); 2] = [
    ("The Seed Book", "John Seeder"),
    ("Docker Magic", "Tariq Hasan"),
];

const REVIEWS: [(&str, &str, i32, &str); 1] = [(
    "Alice",
    "The Seed Book",
    5,
    "Amazing tutorial seed review!",
)];

const FOLLOWS: [(&str, &str); 1] = [("Alice", "Bob")];

pub async fn run(state: &AppState) -> Result<()> {
    info!("Seeding demo data...");

    let existing = state.users.list().await?;
    for name in USERS {
        if !existing.iter().any(|u| u.name == name) {
            state
                .users
                .create(NewUser {
                    name: name.to_string(),
                })
                .await?;
        }
    }

    let existing = state.books.list().await?;
    for (title, author) in BOOKS {
        if !existing.iter().any(|b| b.title == title) {
            state
                .books
                .create(NewBook {
                    title: title.to_string(),
                    author: author.to_string(),
                })
                .await?;
        }
    }

    let users = state.users.list().await?;
    let books = state.books.list().await?;
    let user_id = |name: &str| users.iter().find(|u| u.name == name).map(|u| u.id);
    let book_id = |title: &str| books.iter().find(|b| b.title == title).map(|b| b.id);

    for (name, title, rating, content) in REVIEWS {
        let (Some(user_id), Some(book_id)) = (user_id(name), book_id(title)) else {
            continue;
        };
        let already = state
            .reviews
            .list_by_user(user_id)
            .await?
            .iter()
            .any(|r| r.book_id == book_id);
        if !already {
            state
                .reviews
                .create(NewReview {
                    user_id,
                    book_id,
                    rating,
                    content: content.to_string(),
                })
                .await?;
        }
    }

    for (follower, followee) in FOLLOWS {
        let (Some(follower_id), Some(followee_id)) = (user_id(follower), user_id(followee)) else {
            continue;
        };
        // Conditional insert: a no-op when the edge already exists.
        state.follows.follow(follower_id, followee_id).await?;
    }

    info!("Demo data seeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn seeding_twice_is_idempotent() {
        let state = AppState::new(Arc::new(MemoryStore::new()));

        run(&state).await.unwrap();
        run(&state).await.unwrap();

        let users = state.users.list().await.unwrap();
        assert_eq!(
            users.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(),
            vec!["Alice", "Bob", "Charlie"]
        );
        assert_eq!(state.books.list().await.unwrap().len(), 2);

        let alice = &users[0];
        let reviews = state.reviews.list_by_user(alice.id).await.unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].content, "Amazing tutorial seed review!");

        // Alice follows Bob, so her feed still carries only her own
        // seed review (Bob has none).
        assert_eq!(state.follows.newsfeed(alice.id).await.unwrap().len(), 1);
    }
}
