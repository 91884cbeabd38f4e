use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use super::Storage;
use crate::error::{CoreError, CoreResult};
use crate::model::{Comment, NewComment, NewUser, User};

/// In-memory [`Storage`]. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemStorage {
    users: DashMap<String, User>,
    comments: DashMap<String, Comment>,
    visitors: AtomicU64,
}

impl MemStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted_comments(&self, filter: impl Fn(&Comment) -> bool) -> Vec<Comment> {
        let mut comments: Vec<Comment> = self
            .comments
            .iter()
            .filter(|c| filter(c.value()))
            .map(|c| c.value().clone())
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        comments
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn get_user(&self, id: &str) -> CoreResult<Option<User>> {
        Ok(self.users.get(id).map(|u| u.value().clone()))
    }

    async fn get_user_by_username(&self, username: &str) -> CoreResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.value().clone()))
    }

    async fn create_user(&self, user: NewUser) -> CoreResult<User> {
        if self.users.iter().any(|u| u.username == user.username) {
            return Err(CoreError::Conflict(format!(
                "username already exists: {}",
                user.username
            )));
        }

        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            username: user.username,
            password: user.password,
        };
        self.users.insert(user.id.clone(), user.clone());
        tracing::debug!(username = %user.username, "user created");
        Ok(user)
    }

    async fn create_comment(&self, comment: NewComment) -> CoreResult<Comment> {
        comment.validate()?;

        let comment = Comment {
            id: uuid::Uuid::new_v4().to_string(),
            content: comment.content,
            approved: false,
            created_at: Utc::now(),
        };
        self.comments.insert(comment.id.clone(), comment.clone());
        Ok(comment)
    }

    async fn get_approved_comments(&self) -> CoreResult<Vec<Comment>> {
        Ok(self.sorted_comments(|c| c.approved))
    }

    async fn get_all_comments(&self) -> CoreResult<Vec<Comment>> {
        Ok(self.sorted_comments(|_| true))
    }

    async fn approve_comment(&self, id: &str) -> CoreResult<bool> {
        match self.comments.get_mut(id) {
            Some(mut comment) => {
                comment.approved = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_comment(&self, id: &str) -> CoreResult<bool> {
        Ok(self.comments.remove(id).is_some())
    }

    async fn record_visit(&self) -> CoreResult<u64> {
        Ok(self.visitors.fetch_add(1, Ordering::Relaxed) + 1)
    }

    async fn visitor_count(&self) -> CoreResult<u64> {
        Ok(self.visitors.load(Ordering::Relaxed))
    }
}
