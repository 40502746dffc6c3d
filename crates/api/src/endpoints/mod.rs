//! HTTP endpoints.

mod about;
mod comments;
mod posts;
mod profiles;

use axum::Router;

use crate::middleware::AppState;

/// Create the application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(posts::router())
        .merge(comments::router())
        .merge(profiles::router())
        .nest("/about", about::router())
}
