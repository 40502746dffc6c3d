//! Database integration tests.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test --test db_integration -- --ignored`
//!
//! Environment variables:
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` (default: `scribe_test`)
//!   `TEST_DB_PASSWORD` (default: `scribe_test`)
//!   `TEST_DB_NAME` (default: `scribe_test`)

#![allow(clippy::unwrap_used)]

use scribe_common::IdGenerator;
use scribe_db::entities::{comment, follow, group, post, user};
use scribe_db::repositories::{
    CommentRepository, FollowRepository, GroupRepository, PostRepository, UserRepository,
};
use scribe_db::test_utils::{TestDatabase, TestDbConfig};
use sea_orm::Set;
use std::sync::Arc;

struct Fixture {
    db: TestDatabase,
    ids: IdGenerator,
}

impl Fixture {
    async fn new() -> Self {
        let db = TestDatabase::create_unique().await.unwrap();
        scribe_db::migrate(db.connection()).await.unwrap();
        Self {
            db,
            ids: IdGenerator::new(),
        }
    }

    fn conn(&self) -> Arc<sea_orm::DatabaseConnection> {
        Arc::clone(&self.db.conn)
    }

    async fn create_user(&self, username: &str) -> user::Model {
        UserRepository::new(self.conn())
            .create(user::ActiveModel {
                id: Set(self.ids.generate()),
                username: Set(username.to_string()),
                name: Set(None),
                token: Set(Some(self.ids.generate_token())),
                ..Default::default()
            })
            .await
            .unwrap()
    }

    async fn create_group(&self, slug: &str) -> group::Model {
        GroupRepository::new(self.conn())
            .create(group::ActiveModel {
                id: Set(self.ids.generate()),
                title: Set(format!("Group {slug}")),
                slug: Set(slug.to_string()),
                description: Set("integration fixture".to_string()),
            })
            .await
            .unwrap()
    }

    async fn create_post(&self, author: &user::Model, group_id: Option<String>) -> post::Model {
        PostRepository::new(self.conn())
            .create(post::ActiveModel {
                id: Set(self.ids.generate()),
                author_id: Set(author.id.clone()),
                group_id: Set(group_id),
                text: Set("integration post".to_string()),
                image: Set(None),
                ..Default::default()
            })
            .await
            .unwrap()
    }
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_database_connection() {
    let config = TestDbConfig::default();
    let result = TestDatabase::with_config(config).await;
    assert!(result.is_ok(), "Failed to connect: {:?}", result.err());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_group_delete_clears_post_reference() {
    let fx = Fixture::new().await;
    let author = fx.create_user("leo").await;
    let group = fx.create_group("cats").await;
    let post = fx.create_post(&author, Some(group.id.clone())).await;

    GroupRepository::new(fx.conn()).delete(&group.id).await.unwrap();

    // The post survives with its group reference cleared.
    let survivor = PostRepository::new(fx.conn())
        .get_by_id(&post.id)
        .await
        .unwrap();
    assert_eq!(survivor.group_id, None);

    fx.db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_user_delete_cascades() {
    let fx = Fixture::new().await;
    let ids = IdGenerator::new();
    let author = fx.create_user("mia").await;
    let commenter = fx.create_user("noa").await;
    let post = fx.create_post(&author, None).await;

    CommentRepository::new(fx.conn())
        .create(comment::ActiveModel {
            id: Set(ids.generate()),
            post_id: Set(post.id.clone()),
            author_id: Set(commenter.id.clone()),
            text: Set("hello".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let follow_repo = FollowRepository::new(fx.conn());
    follow_repo
        .create_if_absent(follow::ActiveModel {
            id: Set(ids.generate()),
            user_id: Set(commenter.id.clone()),
            author_id: Set(author.id.clone()),
            ..Default::default()
        })
        .await
        .unwrap();

    UserRepository::new(fx.conn()).delete(&author.id).await.unwrap();

    // Posts, comments under them, and follow edges in either direction
    // are gone with the user.
    let post_repo = PostRepository::new(fx.conn());
    assert_eq!(post_repo.count_by_author(&author.id).await.unwrap(), 0);
    assert!(post_repo.find_by_id(&post.id).await.unwrap().is_none());
    let comments = CommentRepository::new(fx.conn())
        .find_by_post(&post.id)
        .await
        .unwrap();
    assert!(comments.is_empty());
    assert_eq!(
        follow_repo
            .count_by_pair(&commenter.id, &author.id)
            .await
            .unwrap(),
        0
    );

    fx.db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_follow_twice_keeps_single_edge() {
    let fx = Fixture::new().await;
    let ids = IdGenerator::new();
    let follower = fx.create_user("pat").await;
    let author = fx.create_user("quinn").await;

    let repo = FollowRepository::new(fx.conn());
    let first = repo
        .create_if_absent(follow::ActiveModel {
            id: Set(ids.generate()),
            user_id: Set(follower.id.clone()),
            author_id: Set(author.id.clone()),
            ..Default::default()
        })
        .await
        .unwrap();
    let second = repo
        .create_if_absent(follow::ActiveModel {
            id: Set(ids.generate()),
            user_id: Set(follower.id.clone()),
            author_id: Set(author.id.clone()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(first);
    assert!(!second);
    assert_eq!(
        repo.count_by_pair(&follower.id, &author.id).await.unwrap(),
        1
    );

    // Follow then unfollow leaves the pair count at 0.
    repo.delete_by_pair(&follower.id, &author.id).await.unwrap();
    assert_eq!(
        repo.count_by_pair(&follower.id, &author.id).await.unwrap(),
        0
    );

    fx.db.drop_database().await.unwrap();
}

#[test]
fn test_config_from_env() {
    // Test that default config is valid
    let config = TestDbConfig::default();
    assert!(!config.host.is_empty());
    assert!(config.port > 0);
    assert!(!config.username.is_empty());
}
