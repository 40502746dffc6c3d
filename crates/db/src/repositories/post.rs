//! Post repository.
//!
//! Every listing returns posts newest first (`created_at` desc, `id`
//! desc as tiebreak); each `find_page_*` has a matching `count_*` for
//! the paginator.

use std::sync::Arc;

use crate::entities::{post, Post};
use scribe_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
};

/// Post repository for database operations.
#[derive(Clone)]
pub struct PostRepository {
    db: Arc<DatabaseConnection>,
}

impl PostRepository {
    /// Create a new post repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn ordered() -> Select<Post> {
        Post::find()
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
    }

    /// Find a post by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<post::Model>> {
        Post::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a post by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<post::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::PostNotFound(id.to_string()))
    }

    /// Count all posts.
    pub async fn count_all(&self) -> AppResult<u64> {
        Post::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// One page of all posts, newest first.
    pub async fn find_page_all(&self, offset: u64, limit: u64) -> AppResult<Vec<post::Model>> {
        Self::ordered()
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count posts in a group.
    pub async fn count_by_group(&self, group_id: &str) -> AppResult<u64> {
        Post::find()
            .filter(post::Column::GroupId.eq(group_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// One page of a group's posts, newest first.
    pub async fn find_page_by_group(
        &self,
        group_id: &str,
        offset: u64,
        limit: u64,
    ) -> AppResult<Vec<post::Model>> {
        Self::ordered()
            .filter(post::Column::GroupId.eq(group_id))
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count posts by an author.
    pub async fn count_by_author(&self, author_id: &str) -> AppResult<u64> {
        Post::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// One page of an author's posts, newest first.
    pub async fn find_page_by_author(
        &self,
        author_id: &str,
        offset: u64,
        limit: u64,
    ) -> AppResult<Vec<post::Model>> {
        Self::ordered()
            .filter(post::Column::AuthorId.eq(author_id))
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count posts by any of the given authors (follow feed).
    pub async fn count_by_authors(&self, author_ids: &[String]) -> AppResult<u64> {
        if author_ids.is_empty() {
            return Ok(0);
        }
        Post::find()
            .filter(post::Column::AuthorId.is_in(author_ids.iter().map(String::as_str)))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// One page of posts by any of the given authors, newest first.
    ///
    /// An empty author list yields an empty page without touching the
    /// database.
    pub async fn find_page_by_authors(
        &self,
        author_ids: &[String],
        offset: u64,
        limit: u64,
    ) -> AppResult<Vec<post::Model>> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }
        Self::ordered()
            .filter(post::Column::AuthorId.is_in(author_ids.iter().map(String::as_str)))
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new post.
    pub async fn create(&self, model: post::ActiveModel) -> AppResult<post::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an existing post.
    pub async fn update(&self, model: post::ActiveModel) -> AppResult<post::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_post(id: &str, author_id: &str, group_id: Option<&str>) -> post::Model {
        post::Model {
            id: id.to_string(),
            author_id: author_id.to_string(),
            group_id: group_id.map(ToString::to_string),
            text: "Hello world".to_string(),
            image: None,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_is_404() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new()])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let result = repo.get_by_id("missing").await;

        match result {
            Err(AppError::PostNotFound(id)) => assert_eq!(id, "missing"),
            other => panic!("Expected PostNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_count_all() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(13))
                }]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let count = repo.count_all().await.unwrap();

        assert_eq!(count, 13);
    }

    #[tokio::test]
    async fn test_find_page_all() {
        let p1 = create_test_post("p2", "u1", None);
        let p2 = create_test_post("p1", "u1", Some("g1"));

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[p1, p2]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let page = repo.find_page_all(0, 10).await.unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(page[0].id, "p2");
    }

    #[tokio::test]
    async fn test_find_page_by_authors_empty_list_skips_query() {
        // No mocked results: a query would panic the mock connection.
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = PostRepository::new(db);
        let page = repo.find_page_by_authors(&[], 0, 10).await.unwrap();
        let count = repo.count_by_authors(&[]).await.unwrap();

        assert!(page.is_empty());
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_find_page_by_group() {
        let p1 = create_test_post("p1", "u1", Some("g1"));

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[p1]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let page = repo.find_page_by_group("g1", 0, 10).await.unwrap();

        assert_eq!(page.len(), 1);
        assert_eq!(page[0].group_id.as_deref(), Some("g1"));
    }
}
