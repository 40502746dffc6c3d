//! Post endpoints: listings, detail, create and edit forms, the feed.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Json, Router,
};
use scribe_common::{pagination::parse_page_param, AppResult, Page};
use scribe_core::{NewComment, NewPost};
use serde::{Deserialize, Serialize};

use crate::{
    extractors::AuthUser,
    middleware::AppState,
    response::{form_errors, CommentView, FieldErrors, FormView, GroupView, PostView},
};

/// Listing query parameters. The raw `page` value is kept as a string
/// so anything unusable degrades to page 1 instead of a rejection.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
}

/// Index page response.
#[derive(Serialize)]
pub struct IndexResponse {
    pub page: Page<PostView>,
}

/// All posts, newest first.
async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<IndexResponse>> {
    let requested = parse_page_param(query.page.as_deref());
    let page = state.post_service.index_page(requested).await?;

    Ok(Json(IndexResponse {
        page: page.map(PostView::from),
    }))
}

/// Group page response.
#[derive(Serialize)]
pub struct GroupPostsResponse {
    pub group: GroupView,
    pub page: Page<PostView>,
}

/// Posts in one group. Unknown slugs are a 404.
async fn group_posts(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<GroupPostsResponse>> {
    let requested = parse_page_param(query.page.as_deref());
    let group_page = state.post_service.group_page(&slug, requested).await?;

    Ok(Json(GroupPostsResponse {
        group: group_page.group.into(),
        page: group_page.page.map(PostView::from),
    }))
}

/// Post detail response. Carries a blank comment form for rendering.
#[derive(Serialize)]
pub struct PostDetailResponse {
    pub post: PostView,
    pub author_post_count: u64,
    pub comments: Vec<CommentView>,
    pub form: FormView<NewComment>,
}

/// One post with its comments. Unknown IDs are a 404.
async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<PostDetailResponse>> {
    let detail = state.post_service.detail(&id).await?;

    Ok(Json(PostDetailResponse {
        post: detail.post.into(),
        author_post_count: detail.author_post_count,
        comments: detail.comments.into_iter().map(Into::into).collect(),
        form: FormView::blank(NewComment::default()),
    }))
}

/// Validate a submission against the form rules plus the group choice.
async fn post_form_errors(state: &AppState, form: &NewPost) -> AppResult<FieldErrors> {
    use validator::Validate;

    let mut errors = match form.validate() {
        Ok(()) => FieldErrors::new(),
        Err(e) => form_errors(&e),
    };

    if let Some(group_id) = form.group_id() {
        if state.group_service.find_by_id(group_id).await?.is_none() {
            errors
                .entry("group".to_string())
                .or_default()
                .push("Select a valid group".to_string());
        }
    }

    Ok(errors)
}

/// Blank creation form.
async fn create_form(AuthUser(_user): AuthUser) -> FormView<NewPost> {
    FormView::blank(NewPost::default())
}

/// Create a post. Success redirects to the author's profile; an
/// invalid submission re-renders the form with HTTP 200.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Form(form): Form<NewPost>,
) -> AppResult<Response> {
    let errors = post_form_errors(&state, &form).await?;
    if !errors.is_empty() {
        return Ok(FormView::new(form, errors).into_response());
    }

    state.post_service.create(&user.id, &form).await?;
    Ok(Redirect::to(&format!("/profile/{}/", user.username)).into_response())
}

/// Edit form pre-filled with the current values. A non-author lands
/// back on the post detail page.
async fn edit_form(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let post = state.post_service.get(&id).await?;
    if post.author_id != user.id {
        return Ok(Redirect::to(&format!("/posts/{id}/")).into_response());
    }

    let values = NewPost {
        text: post.text,
        group: post.group_id,
        image: post.image,
    };
    Ok(FormView::blank(values).into_response())
}

/// Apply an edit. Author-only; everyone else is redirected to the
/// detail page without an error.
async fn edit(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<NewPost>,
) -> AppResult<Response> {
    let post = state.post_service.get(&id).await?;
    if post.author_id != user.id {
        return Ok(Redirect::to(&format!("/posts/{id}/")).into_response());
    }

    let errors = post_form_errors(&state, &form).await?;
    if !errors.is_empty() {
        return Ok(FormView::new(form, errors).into_response());
    }

    state.post_service.update(post, &form).await?;
    Ok(Redirect::to(&format!("/posts/{id}/")).into_response())
}

/// Feed response.
#[derive(Serialize)]
pub struct FeedResponse {
    pub page: Page<PostView>,
}

/// Posts by authors the current user follows.
async fn feed(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<FeedResponse>> {
    let requested = parse_page_param(query.page.as_deref());
    let page = state.post_service.feed_page(&user.id, requested).await?;

    Ok(Json(FeedResponse {
        page: page.map(PostView::from),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/group/{slug}/", get(group_posts))
        .route("/posts/{id}/", get(detail))
        .route("/create/", get(create_form).post(create))
        .route("/posts/{id}/edit/", get(edit_form).post(edit))
        .route("/follow/", get(feed))
}
