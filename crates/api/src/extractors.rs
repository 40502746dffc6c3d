//! Request extractors.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::Redirect,
};
use scribe_db::entities::user;

/// Authenticated user extractor.
///
/// Rejection is a redirect to the login page with the originally
/// requested path and query in the `next` parameter, so the user can
/// come back after signing in.
#[derive(Debug, Clone)]
pub struct AuthUser(pub user::Model);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get user from request extensions (set by auth middleware)
        parts
            .extensions
            .get::<user::Model>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                let next = parts
                    .uri
                    .path_and_query()
                    .map_or_else(|| parts.uri.path().to_string(), ToString::to_string);
                login_redirect(&next)
            })
    }
}

/// Optional authenticated user extractor. Never rejects.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<user::Model>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<user::Model>().cloned()))
    }
}

/// Redirect to the login page, preserving the requested location.
///
/// The value is percent-encoded so a `?` or `&` inside it cannot split
/// the `next` parameter.
#[must_use]
pub fn login_redirect(next: &str) -> Redirect {
    Redirect::to(&format!("/auth/login?next={}", urlencoding::encode(next)))
}
