//! Domain records stored by the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A user account. Only the site admin exists in practice.
///
/// `password` holds an argon2 PHC string and is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// Input for [`Storage::create_user`](crate::storage::Storage::create_user).
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    /// Argon2 PHC hash, not a plaintext password.
    pub password: String,
}

/// A guestbook comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub content: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

/// A comment as submitted by a visitor.
#[derive(Debug, Clone, Deserialize)]
pub struct NewComment {
    #[serde(default)]
    pub content: String,
}

impl NewComment {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Rejects comments with no content.
    pub fn validate(&self) -> CoreResult<()> {
        if self.content.is_empty() {
            return Err(CoreError::Validation("Comment cannot be empty".to_string()));
        }
        Ok(())
    }
}
