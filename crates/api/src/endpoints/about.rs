//! Static informational pages.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::middleware::AppState;

/// A static page payload.
#[derive(Serialize)]
pub struct StaticPage {
    pub title: &'static str,
    pub text: &'static str,
}

/// About the author.
async fn author() -> Json<StaticPage> {
    Json(StaticPage {
        title: "About the author",
        text: "This site is written and maintained by its author.",
    })
}

/// About the technology.
async fn tech() -> Json<StaticPage> {
    Json(StaticPage {
        title: "Technologies",
        text: "Built with Rust, axum and SeaORM on PostgreSQL.",
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/author/", get(author))
        .route("/tech/", get(tech))
}
