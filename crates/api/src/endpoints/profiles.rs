//! Profile endpoints: author pages and follow/unfollow.

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use scribe_common::{pagination::parse_page_param, AppResult, Page};
use serde::Serialize;

use crate::{
    endpoints::posts::ListQuery,
    extractors::{AuthUser, MaybeAuthUser},
    middleware::AppState,
    response::{AuthorView, PostView},
};

/// Profile page response.
#[derive(Serialize)]
pub struct ProfileResponse {
    pub author: AuthorView,
    pub post_count: u64,
    pub following: bool,
    pub page: Page<PostView>,
}

/// An author's profile: their posts, post count, and whether the
/// viewer follows them. Anonymous viewers see `following: false`.
async fn profile(
    MaybeAuthUser(viewer): MaybeAuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ProfileResponse>> {
    let requested = parse_page_param(query.page.as_deref());
    let viewer_id = viewer.as_ref().map(|u| u.id.as_str());
    let profile = state
        .post_service
        .profile_page(&username, requested, viewer_id)
        .await?;

    Ok(Json(ProfileResponse {
        author: profile.author.into(),
        post_count: profile.post_count,
        following: profile.following,
        page: profile.page.map(PostView::from),
    }))
}

/// Follow an author, then return to their profile. Following yourself
/// or someone you already follow changes nothing.
async fn follow(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Redirect> {
    let author = state.follow_service.follow(&user, &username).await?;
    Ok(Redirect::to(&format!("/profile/{}/", author.username)))
}

/// Unfollow an author, then return to their profile. Removing a
/// subscription that does not exist changes nothing.
async fn unfollow(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Redirect> {
    let author = state.follow_service.unfollow(&user, &username).await?;
    Ok(Redirect::to(&format!("/profile/{}/", author.username)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile/{username}/", get(profile))
        .route("/profile/{username}/follow/", post(follow))
        .route("/profile/{username}/unfollow/", post(unfollow))
}
