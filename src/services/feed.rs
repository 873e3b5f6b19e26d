//! Per-post enrichment for feed listings.
//!
//! Every post on a page needs its author card plus like and comment counts.
//! The three reads are independent, so they run concurrently per post and
//! all posts of a page are enriched concurrently. Any failed read fails the
//! whole page.

use std::future::Future;

use futures::future::try_join_all;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::pagination::PageResult;
use crate::models::post::{Post, PostSummary};
use crate::models::user::AuthorInfo;

/// The reads needed to turn a [`Post`] into a [`PostSummary`].
pub trait PostLookups {
    fn author_info(&self, user_id: Uuid)
        -> impl Future<Output = Result<AuthorInfo, AppError>> + Send;
    fn count_likes(&self, post_id: Uuid) -> impl Future<Output = Result<i64, AppError>> + Send;
    fn count_comments(&self, post_id: Uuid)
        -> impl Future<Output = Result<i64, AppError>> + Send;
}

impl PostLookups for PgPool {
    async fn author_info(&self, user_id: Uuid) -> Result<AuthorInfo, AppError> {
        let author = sqlx::query_as::<_, AuthorInfo>(
            "SELECT id, name, profile_picture FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_one(self)
        .await?;
        Ok(author)
    }

    async fn count_likes(&self, post_id: Uuid) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM likes WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(self)
            .await?;
        Ok(count)
    }

    async fn count_comments(&self, post_id: Uuid) -> Result<i64, AppError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE post_id = $1")
                .bind(post_id)
                .fetch_one(self)
                .await?;
        Ok(count)
    }
}

/// Enrich one post. Either all three lookups succeed or none is used.
pub async fn enrich_one<L: PostLookups>(lookups: &L, post: Post) -> Result<PostSummary, AppError> {
    let (author, likes, comments) = tokio::try_join!(
        lookups.author_info(post.user_id),
        lookups.count_likes(post.id),
        lookups.count_comments(post.id),
    )?;

    Ok(PostSummary {
        id: post.id,
        content: post.content,
        created_at: post.created_at,
        author,
        likes,
        comments,
    })
}

/// Enrich a page of posts, preserving their order.
pub async fn enrich<L: PostLookups>(
    lookups: &L,
    posts: Vec<Post>,
) -> Result<Vec<PostSummary>, AppError> {
    try_join_all(posts.into_iter().map(|post| enrich_one(lookups, post))).await
}

/// Enrich the posts of an already paginated window, keeping its markers.
pub async fn enrich_page<L: PostLookups>(
    lookups: &L,
    page: PageResult<Post>,
) -> Result<PageResult<PostSummary>, AppError> {
    let PageResult {
        items,
        prev_page,
        next_page,
    } = page;
    Ok(PageResult {
        items: enrich(lookups, items).await?,
        prev_page,
        next_page,
    })
}
