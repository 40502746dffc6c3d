//! Comment service.

use scribe_common::{AppResult, IdGenerator};
use scribe_db::{
    entities::comment,
    repositories::{CommentRepository, PostRepository},
};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Input for commenting on a post.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct NewComment {
    /// Comment text.
    #[validate(length(min = 1, message = "Comment text must not be empty"))]
    pub text: String,
}

/// Comment service for business logic.
#[derive(Clone)]
pub struct CommentService {
    comment_repo: CommentRepository,
    post_repo: PostRepository,
    id_gen: IdGenerator,
}

impl CommentService {
    /// Create a new comment service.
    #[must_use]
    pub fn new(comment_repo: CommentRepository, post_repo: PostRepository) -> Self {
        Self {
            comment_repo,
            post_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Attach a comment to a post. Unknown posts are a not-found error.
    pub async fn add(
        &self,
        post_id: &str,
        author_id: &str,
        input: &NewComment,
    ) -> AppResult<comment::Model> {
        let post = self.post_repo.get_by_id(post_id).await?;

        let model = comment::ActiveModel {
            id: Set(self.id_gen.generate()),
            post_id: Set(post.id),
            author_id: Set(author_id.to_string()),
            text: Set(input.text.clone()),
            created_at: Set(chrono::Utc::now().into()),
        };

        let comment = self.comment_repo.create(model).await?;
        tracing::debug!(comment_id = %comment.id, post_id = %comment.post_id, "Added comment");
        Ok(comment)
    }
}
