//! HTTP layer for scribe.
//!
//! This crate provides the web surface:
//!
//! - **Endpoints**: post listings, post detail, create/edit forms,
//!   comments, profiles, follow/unfollow, about pages
//! - **Extractors**: authentication with login redirect
//! - **Middleware**: bearer-token authentication
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::AppState;
