//! Post service: listings, detail, create and edit.

use scribe_common::{AppResult, IdGenerator, Page, Paginator};
use scribe_db::{
    entities::{comment, group, post, user},
    repositories::{CommentRepository, FollowRepository, GroupRepository, PostRepository,
        UserRepository},
};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Input for creating or editing a post.
///
/// The publication date and the author are never part of the input;
/// both are fixed at creation time.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct NewPost {
    /// Post text.
    #[validate(length(min = 1, message = "Post text must not be empty"))]
    pub text: String,

    /// Group ID, optional. An empty form value means no group.
    #[serde(default)]
    pub group: Option<String>,

    /// Attached image path, optional.
    #[serde(default)]
    pub image: Option<String>,
}

impl NewPost {
    /// Group ID with empty form values collapsed to `None`.
    #[must_use]
    pub fn group_id(&self) -> Option<&str> {
        self.group.as_deref().filter(|g| !g.is_empty())
    }

    /// Image path with empty form values collapsed to `None`.
    #[must_use]
    pub fn image_path(&self) -> Option<&str> {
        self.image.as_deref().filter(|i| !i.is_empty())
    }
}

/// A group page: the group and one page of its posts.
#[derive(Debug)]
pub struct GroupPage {
    pub group: group::Model,
    pub page: Page<post::Model>,
}

/// A profile page: the author, one page of their posts, their total
/// post count, and whether the viewer follows them.
pub struct ProfilePage {
    pub author: user::Model,
    pub page: Page<post::Model>,
    pub post_count: u64,
    pub following: bool,
}

/// A post detail view: the post, its comments in insertion order, and
/// the author's total post count.
#[derive(Debug)]
pub struct PostDetail {
    pub post: post::Model,
    pub comments: Vec<comment::Model>,
    pub author_post_count: u64,
}

/// Post service for business logic.
#[derive(Clone)]
pub struct PostService {
    post_repo: PostRepository,
    group_repo: GroupRepository,
    user_repo: UserRepository,
    follow_repo: FollowRepository,
    comment_repo: CommentRepository,
    paginator: Paginator,
    id_gen: IdGenerator,
}

impl PostService {
    /// Create a new post service.
    #[must_use]
    pub fn new(
        post_repo: PostRepository,
        group_repo: GroupRepository,
        user_repo: UserRepository,
        follow_repo: FollowRepository,
        comment_repo: CommentRepository,
        paginator: Paginator,
    ) -> Self {
        Self {
            post_repo,
            group_repo,
            user_repo,
            follow_repo,
            comment_repo,
            paginator,
            id_gen: IdGenerator::new(),
        }
    }

    /// One page of all posts, newest first.
    pub async fn index_page(&self, requested: u64) -> AppResult<Page<post::Model>> {
        let total = self.post_repo.count_all().await?;
        let slice = self.paginator.resolve(total, requested);
        let items = self.post_repo.find_page_all(slice.offset, slice.limit).await?;
        Ok(Page::new(items, slice, total, self.paginator.total_pages(total)))
    }

    /// One page of a group's posts. Unknown slugs are a not-found error.
    pub async fn group_page(&self, slug: &str, requested: u64) -> AppResult<GroupPage> {
        let group = self.group_repo.get_by_slug(slug).await?;
        let total = self.post_repo.count_by_group(&group.id).await?;
        let slice = self.paginator.resolve(total, requested);
        let items = self
            .post_repo
            .find_page_by_group(&group.id, slice.offset, slice.limit)
            .await?;
        let page = Page::new(items, slice, total, self.paginator.total_pages(total));
        Ok(GroupPage { group, page })
    }

    /// One page of an author's posts, with the viewer's follow state.
    /// Unknown usernames are a not-found error.
    pub async fn profile_page(
        &self,
        username: &str,
        requested: u64,
        viewer_id: Option<&str>,
    ) -> AppResult<ProfilePage> {
        let author = self.user_repo.get_by_username(username).await?;
        let total = self.post_repo.count_by_author(&author.id).await?;
        let slice = self.paginator.resolve(total, requested);
        let items = self
            .post_repo
            .find_page_by_author(&author.id, slice.offset, slice.limit)
            .await?;
        let page = Page::new(items, slice, total, self.paginator.total_pages(total));

        let following = match viewer_id {
            Some(viewer) => self.follow_repo.is_following(viewer, &author.id).await?,
            None => false,
        };

        Ok(ProfilePage {
            author,
            page,
            post_count: total,
            following,
        })
    }

    /// One page of posts by authors the user follows, newest first.
    pub async fn feed_page(&self, user_id: &str, requested: u64) -> AppResult<Page<post::Model>> {
        let author_ids = self.follow_repo.find_followed_author_ids(user_id).await?;
        let total = self.post_repo.count_by_authors(&author_ids).await?;
        let slice = self.paginator.resolve(total, requested);
        let items = self
            .post_repo
            .find_page_by_authors(&author_ids, slice.offset, slice.limit)
            .await?;
        Ok(Page::new(items, slice, total, self.paginator.total_pages(total)))
    }

    /// A post with its comments. Unknown IDs are a not-found error.
    pub async fn detail(&self, post_id: &str) -> AppResult<PostDetail> {
        let post = self.post_repo.get_by_id(post_id).await?;
        let comments = self.comment_repo.find_by_post(&post.id).await?;
        let author_post_count = self.post_repo.count_by_author(&post.author_id).await?;
        Ok(PostDetail {
            post,
            comments,
            author_post_count,
        })
    }

    /// Fetch a post by ID. Unknown IDs are a not-found error.
    pub async fn get(&self, post_id: &str) -> AppResult<post::Model> {
        self.post_repo.get_by_id(post_id).await
    }

    /// Create a post authored by `author_id`.
    ///
    /// The input is expected to be validated; the group, if any, must
    /// exist (checked at the form boundary).
    pub async fn create(&self, author_id: &str, input: &NewPost) -> AppResult<post::Model> {
        let model = post::ActiveModel {
            id: Set(self.id_gen.generate()),
            author_id: Set(author_id.to_string()),
            group_id: Set(input.group_id().map(ToString::to_string)),
            text: Set(input.text.clone()),
            image: Set(input.image_path().map(ToString::to_string)),
            created_at: Set(chrono::Utc::now().into()),
        };

        let post = self.post_repo.create(model).await?;
        tracing::debug!(post_id = %post.id, author_id = %author_id, "Created post");
        Ok(post)
    }

    /// Apply an edit to an existing post.
    ///
    /// Only text, group and image change; the author and publication
    /// date are immutable.
    pub async fn update(&self, post: post::Model, input: &NewPost) -> AppResult<post::Model> {
        let mut model: post::ActiveModel = post.into();
        model.text = Set(input.text.clone());
        model.group_id = Set(input.group_id().map(ToString::to_string));
        model.image = Set(input.image_path().map(ToString::to_string));

        let post = self.post_repo.update(model).await?;
        tracing::debug!(post_id = %post.id, "Updated post");
        Ok(post)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use scribe_common::AppError;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use std::sync::Arc;

    fn service(db: DatabaseConnection) -> PostService {
        let db = Arc::new(db);
        PostService::new(
            PostRepository::new(Arc::clone(&db)),
            GroupRepository::new(Arc::clone(&db)),
            UserRepository::new(Arc::clone(&db)),
            FollowRepository::new(Arc::clone(&db)),
            CommentRepository::new(Arc::clone(&db)),
            Paginator::new(10),
        )
    }

    fn create_test_post(id: &str, author_id: &str) -> post::Model {
        post::Model {
            id: id.to_string(),
            author_id: author_id.to_string(),
            group_id: None,
            text: "Hello".to_string(),
            image: None,
            created_at: Utc::now().into(),
        }
    }

    fn count_row(n: i64) -> std::collections::BTreeMap<&'static str, sea_orm::Value> {
        maplit::btreemap! { "num_items" => sea_orm::Value::BigInt(Some(n)) }
    }

    #[tokio::test]
    async fn test_index_page_metadata() {
        let posts: Vec<post::Model> = (0..10)
            .map(|i| create_test_post(&format!("p{i}"), "u1"))
            .collect();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(13)]])
            .append_query_results([posts])
            .into_connection();

        let page = service(db).index_page(1).await.unwrap();

        assert_eq!(page.number, 1);
        assert_eq!(page.total_items, 13);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 10);
        assert!(page.has_next());
    }

    #[tokio::test]
    async fn test_index_page_out_of_range_degrades_to_first() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(13)]])
            .append_query_results([vec![create_test_post("p1", "u1")]])
            .into_connection();

        let page = service(db).index_page(99).await.unwrap();

        assert_eq!(page.number, 1);
    }

    #[tokio::test]
    async fn test_group_page_unknown_slug_is_404() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<group::Model>::new()])
            .into_connection();

        let result = service(db).group_page("ghost", 1).await;

        match result {
            Err(AppError::GroupNotFound(slug)) => assert_eq!(slug, "ghost"),
            other => panic!("Expected GroupNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_feed_page_without_follows_is_empty() {
        // Only the follow-edge query runs; the post queries are skipped
        // for an empty author list.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<scribe_db::entities::follow::Model>::new()])
            .into_connection();

        let page = service(db).feed_page("u1", 1).await.unwrap();

        assert_eq!(page.total_items, 0);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn test_detail_unknown_post_is_404() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<post::Model>::new()])
            .into_connection();

        let result = service(db).detail("missing").await;

        match result {
            Err(AppError::PostNotFound(id)) => assert_eq!(id, "missing"),
            other => panic!("Expected PostNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_new_post_empty_text_fails_validation() {
        let input = NewPost {
            text: String::new(),
            group: None,
            image: None,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_new_post_empty_group_collapses_to_none() {
        let input = NewPost {
            text: "hi".to_string(),
            group: Some(String::new()),
            image: Some(String::new()),
        };
        assert!(input.validate().is_ok());
        assert_eq!(input.group_id(), None);
        assert_eq!(input.image_path(), None);
    }
}
