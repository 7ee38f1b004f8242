//! Entity and request types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

pub const TITLE_MAX_LEN: usize = 200;
pub const AUTHOR_MAX_LEN: usize = 100;
pub const CONTENT_MAX_LEN: usize = 2000;

/// Reader account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Catalogue entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// A user's review of a book. A user may review the same book more
/// than once; there is no uniqueness constraint on (user_id, book_id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
    pub rating: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Directed follow edge between two users, unique per pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowEdge {
    pub follower_id: i64,
    pub followee_id: i64,
    pub created_at: DateTime<Utc>,
}

/// User creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
}

impl NewUser {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::validation("name must not be empty"));
        }
        Ok(())
    }
}

/// Book creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
}

impl NewBook {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(CoreError::validation("title must not be empty"));
        }
        if self.title.chars().count() > TITLE_MAX_LEN {
            return Err(CoreError::validation(format!(
                "title must be at most {TITLE_MAX_LEN} characters"
            )));
        }
        if self.author.trim().is_empty() {
            return Err(CoreError::validation("author must not be empty"));
        }
        if self.author.chars().count() > AUTHOR_MAX_LEN {
            return Err(CoreError::validation(format!(
                "author must be at most {AUTHOR_MAX_LEN} characters"
            )));
        }
        Ok(())
    }
}

/// Review creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReview {
    pub user_id: i64,
    pub book_id: i64,
    pub rating: i32,
    pub content: String,
}

impl NewReview {
    pub fn validate(&self) -> Result<()> {
        if !(1..=5).contains(&self.rating) {
            return Err(CoreError::validation("rating must be between 1 and 5"));
        }
        if self.content.trim().is_empty() {
            return Err(CoreError::validation("content must not be empty"));
        }
        if self.content.chars().count() > CONTENT_MAX_LEN {
            return Err(CoreError::validation(format!(
                "content must be at most {CONTENT_MAX_LEN} characters"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_rejects_blank_name() {
        let req = NewUser {
            name: "   ".to_string(),
        };
        assert!(matches!(req.validate(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn new_book_enforces_length_limits() {
        let req = NewBook {
            title: "t".repeat(TITLE_MAX_LEN + 1),
            author: "a".to_string(),
        };
        assert!(matches!(req.validate(), Err(CoreError::Validation(_))));

        let req = NewBook {
            title: "t".repeat(TITLE_MAX_LEN),
            author: "a".repeat(AUTHOR_MAX_LEN),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn new_review_enforces_rating_range() {
        for rating in [0, 6, -1] {
            let req = NewReview {
                user_id: 1,
                book_id: 1,
                rating,
                content: "fine".to_string(),
            };
            assert!(matches!(req.validate(), Err(CoreError::Validation(_))));
        }
        for rating in 1..=5 {
            let req = NewReview {
                user_id: 1,
                book_id: 1,
                rating,
                content: "fine".to_string(),
            };
            assert!(req.validate().is_ok());
        }
    }
}
