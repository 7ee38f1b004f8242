//! Bookfeed Server
//!
//! Social reading service: users, books, reviews, follow edges, and a
//! per-user newsfeed aggregating reviews from followed users.

mod config;
mod handlers;
mod seed;
mod services;
mod storage;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use bookfeed_core::ports::Storage;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use config::Config;
use services::{BookService, FollowService, ReviewService, UserService};
use storage::Database;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub books: Arc<BookService>,
    pub reviews: Arc<ReviewService>,
    pub follows: Arc<FollowService>,
}

impl AppState {
    /// Wires every service to one explicitly owned storage gateway.
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self {
            users: Arc::new(UserService::new(store.clone())),
            books: Arc::new(BookService::new(store.clone())),
            reviews: Arc::new(ReviewService::new(store.clone())),
            follows: Arc::new(FollowService::new(store)),
        }
    }
}

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting bookfeed server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = Config::from_env();
    info!(
        "Config loaded: bind={}, db={}:{}/{}",
        config.bind_address, config.db_host, config.db_port, config.db_name
    );

    let db = Arc::new(
        Database::connect(&config)
            .await
            .context("Failed to initialize database")?,
    );

    let state = AppState::new(db);

    if config.seed_demo_data {
        seed::run(&state).await.context("Failed to seed demo data")?;
    }

    let app = router(state);

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Server listening on {}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/users",
            get(handlers::users::list).post(handlers::users::create),
        )
        .route("/users/:id", get(handlers::users::get))
        .route("/users/:id/reviews", get(handlers::reviews::list_by_user))
        .route("/users/:id/newsfeed", get(handlers::follows::newsfeed))
        .route(
            "/books",
            get(handlers::books::list).post(handlers::books::create),
        )
        .route("/books/:id", get(handlers::books::get))
        .route("/books/:id/reviews", get(handlers::reviews::list_by_book))
        .route("/reviews", post(handlers::reviews::create))
        .route("/follow/:followee_id", post(handlers::follows::follow))
        .route("/unfollow/:followee_id", post(handlers::follows::unfollow))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
