//! Business logic services
//!
//! Each service composes validation, integrity checks, and storage
//! gateway calls into one complete operation per business action.
//! Errors from the checker and the gateway propagate unchanged.

pub mod books;
pub mod follows;
pub mod integrity;
pub mod reviews;
pub mod users;

pub use books::BookService;
pub use follows::FollowService;
pub use reviews::ReviewService;
pub use users::UserService;
