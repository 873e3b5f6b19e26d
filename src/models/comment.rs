//! Post comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Comment row joined with its author's name.
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithAuthor {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub username: String,
}

/// Comment as listed under a post.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CommentView {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub username: String,
    /// Whether the requesting user wrote this comment.
    pub user_is_creator: bool,
}

impl CommentView {
    pub fn for_viewer(row: CommentWithAuthor, viewer_id: Uuid) -> Self {
        Self {
            id: row.id,
            content: row.content,
            created_at: row.created_at,
            username: row.username,
            user_is_creator: row.user_id == viewer_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateComment {
    #[validate(length(min = 1, max = 2000, message = "must be between 1 and 2000 characters"))]
    #[validate(custom(function = "not_blank"))]
    pub content: String,
}
