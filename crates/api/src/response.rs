//! View payloads rendered by the handlers.
//!
//! Pages are rendered as JSON views; an HTML templating layer is an
//! external collaborator and consumes these payloads as its context.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use scribe_db::entities::{comment, group, post, user};
use serde::Serialize;
use validator::ValidationErrors;

/// A post, as rendered in listings and detail pages.
#[derive(Debug, Serialize)]
pub struct PostView {
    pub id: String,
    pub author_id: String,
    pub group_id: Option<String>,
    pub text: String,
    pub image: Option<String>,
    pub created_at: String,
}

impl From<post::Model> for PostView {
    fn from(p: post::Model) -> Self {
        Self {
            id: p.id,
            author_id: p.author_id,
            group_id: p.group_id,
            text: p.text,
            image: p.image,
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

/// A comment under a post.
#[derive(Debug, Serialize)]
pub struct CommentView {
    pub id: String,
    pub author_id: String,
    pub text: String,
    pub created_at: String,
}

impl From<comment::Model> for CommentView {
    fn from(c: comment::Model) -> Self {
        Self {
            id: c.id,
            author_id: c.author_id,
            text: c.text,
            created_at: c.created_at.to_rfc3339(),
        }
    }
}

/// A group header for the group listing page.
#[derive(Debug, Serialize)]
pub struct GroupView {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
}

impl From<group::Model> for GroupView {
    fn from(g: group::Model) -> Self {
        Self {
            id: g.id,
            title: g.title,
            slug: g.slug,
            description: g.description,
        }
    }
}

/// A post author. The token never leaves the server.
#[derive(Debug, Serialize)]
pub struct AuthorView {
    pub id: String,
    pub username: String,
    pub name: Option<String>,
}

impl From<user::Model> for AuthorView {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            username: u.username,
            name: u.name,
        }
    }
}

/// Field name to error messages, for form re-renders.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Flatten validation errors into a field→messages map.
#[must_use]
pub fn form_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut map = FieldErrors::new();
    for (field, errs) in errors.field_errors() {
        let messages = errs
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map_or_else(|| e.code.to_string(), ToString::to_string)
            })
            .collect();
        map.insert(field.to_string(), messages);
    }
    map
}

/// A form page: the submitted (or initial) values plus any field errors.
///
/// Rendered with HTTP 200 in every case; an invalid submission is a
/// re-render, not an error status.
#[derive(Debug, Serialize)]
pub struct FormView<T: Serialize> {
    pub values: T,
    pub errors: FieldErrors,
}

impl<T: Serialize> FormView<T> {
    /// A form with the given values and errors.
    #[must_use]
    pub const fn new(values: T, errors: FieldErrors) -> Self {
        Self { values, errors }
    }

    /// A form with values and no errors (initial render).
    #[must_use]
    pub fn blank(values: T) -> Self {
        Self::new(values, FieldErrors::new())
    }
}

impl<T: Serialize> IntoResponse for FormView<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
