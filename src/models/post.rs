//! Communication feed: posts, likes and saved posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::not_blank;
use crate::models::user::AuthorInfo;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post as shown in feed listings, with author and engagement counts.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PostSummary {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author: AuthorInfo,
    pub likes: i64,
    pub comments: i64,
}

/// Single post view with the caller's relationship to it.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub summary: PostSummary,
    pub updated_at: DateTime<Utc>,
    pub is_author: bool,
    pub saved_by_user: bool,
    pub liked_by_user: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePost {
    #[validate(length(min = 1, max = 5000, message = "must be between 1 and 5000 characters"))]
    #[validate(custom(function = "not_blank"))]
    pub content: String,
}

pub type UpdatePost = CreatePost;

/// Like count for a post and whether the caller is among the likers.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct LikeSummary {
    pub likes: i64,
    pub liked_by_user: bool,
}
