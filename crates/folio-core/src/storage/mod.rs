//! Persistence for users, comments and the visitor counter.
//!
//! Handlers depend on the [`Storage`] trait; [`MemStorage`] is the only
//! backend shipped, and keeps everything in process memory.

mod memory;

pub use memory::MemStorage;

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::model::{Comment, NewComment, NewUser, User};

#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_user(&self, id: &str) -> CoreResult<Option<User>>;

    async fn get_user_by_username(&self, username: &str) -> CoreResult<Option<User>>;

    /// Fails with [`CoreError::Conflict`](crate::CoreError::Conflict) if the
    /// username is already taken.
    async fn create_user(&self, user: NewUser) -> CoreResult<User>;

    /// Stores a new, unapproved comment.
    async fn create_comment(&self, comment: NewComment) -> CoreResult<Comment>;

    /// Approved comments, newest first.
    async fn get_approved_comments(&self) -> CoreResult<Vec<Comment>>;

    /// Every comment regardless of approval, newest first.
    async fn get_all_comments(&self) -> CoreResult<Vec<Comment>>;

    /// Returns `false` if no comment has this id.
    async fn approve_comment(&self, id: &str) -> CoreResult<bool>;

    /// Returns `false` if no comment has this id.
    async fn delete_comment(&self, id: &str) -> CoreResult<bool>;

    /// Increments the visitor counter and returns the new value.
    async fn record_visit(&self) -> CoreResult<u64>;

    async fn visitor_count(&self) -> CoreResult<u64>;
}
