//! Postgres storage gateway (sqlx)

use anyhow::{Context, Result};
use async_trait::async_trait;
use bookfeed_core::ports::{BookStore, FollowStore, ReviewStore, UserStore};
use bookfeed_core::{Book, CoreError, FollowEdge, NewReview, Review, User};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::time::Duration;

use crate::config::Config;

/// Per-operation bound on waiting for a pool lease; a saturated or
/// unreachable store surfaces as `CoreError::Storage` instead of
/// hanging the request.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn connect(config: &Config) -> Result<Self> {
        tracing::info!(
            "Connecting to Postgres at {}:{}/{}",
            config.db_host,
            config.db_port,
            config.db_name
        );

        let options = PgConnectOptions::new()
            .host(&config.db_host)
            .port(config.db_port)
            .database(&config.db_name)
            .username(&config.db_user)
            .password(&config.db_password);

        let pool = PgPoolOptions::new()
            .min_connections(config.db_min_conn)
            .max_connections(config.db_max_conn)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await
            .with_context(|| {
                format!(
                    "Failed to connect to Postgres at {}:{}",
                    config.db_host, config.db_port
                )
            })?;

        tracing::info!("Postgres connection established, ensuring schema...");

        Self::ensure_schema(&pool)
            .await
            .context("Failed to create database schema")?;

        tracing::info!("Database initialization complete");

        Ok(Self { pool })
    }

    async fn ensure_schema(pool: &PgPool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS books (
                id BIGSERIAL PRIMARY KEY,
                title TEXT NOT NULL,
                author TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS reviews (
                id BIGSERIAL PRIMARY KEY,
                user_id BIGINT NOT NULL REFERENCES users(id),
                book_id BIGINT NOT NULL REFERENCES books(id),
                rating INTEGER NOT NULL,
                content TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS followers (
                follower_id BIGINT NOT NULL REFERENCES users(id),
                followee_id BIGINT NOT NULL REFERENCES users(id),
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                PRIMARY KEY (follower_id, followee_id)
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

fn storage_err(e: sqlx::Error) -> CoreError {
    CoreError::Storage(e.to_string())
}

#[async_trait]
impl UserStore for Database {
    async fn insert_user(&self, name: &str) -> bookfeed_core::Result<User> {
        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (name)
            VALUES ($1)
            RETURNING id, name, created_at
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(row.into())
    }

    async fn get_user(&self, id: i64) -> bookfeed_core::Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, name, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_users(&self) -> bookfeed_core::Result<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT id, name, created_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn user_exists(&self, id: i64) -> bookfeed_core::Result<bool> {
        let hit: Option<i32> = sqlx::query_scalar("SELECT 1 FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err)?;

        Ok(hit.is_some())
    }
}

#[async_trait]
impl BookStore for Database {
    async fn insert_book(&self, title: &str, author: &str) -> bookfeed_core::Result<Book> {
        let row: BookRow = sqlx::query_as(
            r#"
            INSERT INTO books (title, author)
            VALUES ($1, $2)
            RETURNING id, title, author, created_at
            "#,
        )
        .bind(title)
        .bind(author)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(row.into())
    }

    async fn get_book(&self, id: i64) -> bookfeed_core::Result<Option<Book>> {
        let row: Option<BookRow> = sqlx::query_as(
            r#"
            SELECT id, title, author, created_at
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_books(&self) -> bookfeed_core::Result<Vec<Book>> {
        let rows: Vec<BookRow> = sqlx::query_as(
            r#"
            SELECT id, title, author, created_at
            FROM books
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn book_exists(&self, id: i64) -> bookfeed_core::Result<bool> {
        let hit: Option<i32> = sqlx::query_scalar("SELECT 1 FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err)?;

        Ok(hit.is_some())
    }
}

#[async_trait]
impl ReviewStore for Database {
    async fn insert_review(&self, review: &NewReview) -> bookfeed_core::Result<Review> {
        let row: ReviewRow = sqlx::query_as(
            r#"
            INSERT INTO reviews (user_id, book_id, rating, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, book_id, rating, content, created_at
            "#,
        )
        .bind(review.user_id)
        .bind(review.book_id)
        .bind(review.rating)
        .bind(&review.content)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(row.into())
    }

    async fn get_review(&self, id: i64) -> bookfeed_core::Result<Option<Review>> {
        let row: Option<ReviewRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, book_id, rating, content, created_at
            FROM reviews
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_reviews_by_user(&self, user_id: i64) -> bookfeed_core::Result<Vec<Review>> {
        let rows: Vec<ReviewRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, book_id, rating, content, created_at
            FROM reviews
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn list_reviews_by_book(&self, book_id: i64) -> bookfeed_core::Result<Vec<Review>> {
        let rows: Vec<ReviewRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, book_id, rating, content, created_at
            FROM reviews
            WHERE book_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}

#[async_trait]
impl FollowStore for Database {
    async fn insert_follow(
        &self,
        follower_id: i64,
        followee_id: i64,
    ) -> bookfeed_core::Result<Option<FollowEdge>> {
        let row: Option<FollowRow> = sqlx::query_as(
            r#"
            INSERT INTO followers (follower_id, followee_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            RETURNING follower_id, followee_id, created_at
            "#,
        )
        .bind(follower_id)
        .bind(followee_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(row.map(|r| r.into()))
    }

    async fn delete_follow(
        &self,
        follower_id: i64,
        followee_id: i64,
    ) -> bookfeed_core::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM followers
            WHERE follower_id = $1 AND followee_id = $2
            "#,
        )
        .bind(follower_id)
        .bind(followee_id)
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(())
    }

    async fn newsfeed(&self, user_id: i64) -> bookfeed_core::Result<Vec<Review>> {
        // UNION (not UNION ALL) deduplicates by row identity; the
        // ORDER BY applies to the combined result.
        let rows: Vec<ReviewRow> = sqlx::query_as(
            r#"
            SELECT r.id, r.user_id, r.book_id, r.rating, r.content, r.created_at
            FROM reviews r
            JOIN followers f ON r.user_id = f.followee_id
            WHERE f.follower_id = $1
            UNION
            SELECT r.id, r.user_id, r.book_id, r.rating, r.content, r.created_at
            FROM reviews r
            WHERE r.user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}

// Helper structs for sqlx query_as
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User {
            id: r.id,
            name: r.name,
            created_at: r.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: i64,
    title: String,
    author: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<BookRow> for Book {
    fn from(r: BookRow) -> Self {
        Book {
            id: r.id,
            title: r.title,
            author: r.author,
            created_at: r.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: i64,
    user_id: i64,
    book_id: i64,
    rating: i32,
    content: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ReviewRow> for Review {
    fn from(r: ReviewRow) -> Self {
        Review {
            id: r.id,
            user_id: r.user_id,
            book_id: r.book_id,
            rating: r.rating,
            content: r.content,
            created_at: r.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct FollowRow {
    follower_id: i64,
    followee_id: i64,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<FollowRow> for FollowEdge {
    fn from(r: FollowRow) -> Self {
        FollowEdge {
            follower_id: r.follower_id,
            followee_id: r.followee_id,
            created_at: r.created_at,
        }
    }
}
