//! Business logic services.

#![allow(missing_docs)]

pub mod comment;
pub mod follow;
pub mod group;
pub mod post;
pub mod user;

pub use comment::{CommentService, NewComment};
pub use follow::FollowService;
pub use group::GroupService;
pub use post::{GroupPage, NewPost, PostDetail, PostService, ProfilePage};
pub use user::UserService;
