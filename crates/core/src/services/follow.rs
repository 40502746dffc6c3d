//! Follow service: subscriptions between users.

use scribe_common::{AppResult, IdGenerator};
use scribe_db::{
    entities::{follow, user},
    repositories::{FollowRepository, UserRepository},
};
use sea_orm::Set;

/// Follow service for business logic.
#[derive(Clone)]
pub struct FollowService {
    follow_repo: FollowRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl FollowService {
    /// Create a new follow service.
    #[must_use]
    pub fn new(follow_repo: FollowRepository, user_repo: UserRepository) -> Self {
        Self {
            follow_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Follow an author by username. Unknown usernames are a not-found
    /// error; following yourself or an author you already follow is a
    /// silent no-op. Returns the author either way.
    pub async fn follow(&self, user: &user::Model, username: &str) -> AppResult<user::Model> {
        let author = self.user_repo.get_by_username(username).await?;
        if author.id == user.id {
            return Ok(author);
        }

        let inserted = self
            .follow_repo
            .create_if_absent(follow::ActiveModel {
                id: Set(self.id_gen.generate()),
                user_id: Set(user.id.clone()),
                author_id: Set(author.id.clone()),
                ..Default::default()
            })
            .await?;

        if inserted {
            tracing::debug!(user_id = %user.id, author_id = %author.id, "Followed author");
        }
        Ok(author)
    }

    /// Unfollow an author by username. Unknown usernames are a not-found
    /// error; removing a non-existent subscription is a silent no-op.
    pub async fn unfollow(&self, user: &user::Model, username: &str) -> AppResult<user::Model> {
        let author = self.user_repo.get_by_username(username).await?;
        self.follow_repo.delete_by_pair(&user.id, &author.id).await?;
        Ok(author)
    }

    /// Whether `user_id` follows `author_id`.
    pub async fn is_following(&self, user_id: &str, author_id: &str) -> AppResult<bool> {
        self.follow_repo.is_following(user_id, author_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use scribe_common::AppError;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn service(db: DatabaseConnection) -> FollowService {
        let db = Arc::new(db);
        FollowService::new(
            FollowRepository::new(Arc::clone(&db)),
            UserRepository::new(Arc::clone(&db)),
        )
    }

    fn create_test_user(id: &str, username: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: username.to_string(),
            name: None,
            token: None,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_follow_inserts_edge() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![create_test_user("u2", "mia")]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let user = create_test_user("u1", "leo");
        let author = service(db).follow(&user, "mia").await.unwrap();

        assert_eq!(author.id, "u2");
    }

    #[tokio::test]
    async fn test_follow_self_is_noop() {
        // Only the username lookup runs; no insert is attempted.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![create_test_user("u1", "leo")]])
            .into_connection();

        let user = create_test_user("u1", "leo");
        let author = service(db).follow(&user, "leo").await.unwrap();

        assert_eq!(author.id, user.id);
    }

    #[tokio::test]
    async fn test_follow_unknown_author_is_404() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();

        let user = create_test_user("u1", "leo");
        let result = service(db).follow(&user, "ghost").await;

        match result {
            Err(AppError::UserNotFound(name)) => assert_eq!(name, "ghost"),
            other => panic!("Expected UserNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unfollow_missing_edge_is_noop() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![create_test_user("u2", "mia")]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let user = create_test_user("u1", "leo");
        let result = service(db).unfollow(&user, "mia").await;

        assert!(result.is_ok());
    }
}
