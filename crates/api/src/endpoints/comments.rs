//! Comment endpoints.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::post,
    Form, Router,
};
use scribe_common::AppResult;
use scribe_core::NewComment;
use validator::Validate;

use crate::{
    extractors::AuthUser,
    middleware::AppState,
    response::{form_errors, FormView},
};

/// Add a comment to a post. Success redirects back to the post; an
/// invalid submission re-renders the form with HTTP 200. Unknown posts
/// are a 404 either way.
async fn add_comment(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<NewComment>,
) -> AppResult<Response> {
    if let Err(e) = form.validate() {
        // The post must exist even for an invalid submission.
        state.post_service.get(&id).await?;
        return Ok(FormView::new(form, form_errors(&e)).into_response());
    }

    state.comment_service.add(&id, &user.id, &form).await?;
    Ok(Redirect::to(&format!("/posts/{id}/")).into_response())
}

pub fn router() -> Router<AppState> {
    Router::new().route("/posts/{id}/comment/", post(add_comment))
}
