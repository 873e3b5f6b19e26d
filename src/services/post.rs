//! Post service: feed listings, authoring and bookmarks.
//!
//! Listings over-fetch one row and run through the shared paginator before
//! the surviving posts are enriched.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::pagination::{PageResult, Pagination};
use crate::models::post::{CreatePost, Post, PostDetail, PostSummary, UpdatePost};
use crate::services::feed;

const NOT_FOUND: &str = "Post not found";

/// Posts written by everyone except the caller, newest first.
pub async fn feed(
    pool: &PgPool,
    user_id: Uuid,
    pagination: &Pagination,
) -> Result<PageResult<PostSummary>, AppError> {
    let window = sqlx::query_as::<_, Post>(
        r#"
        SELECT * FROM posts
        WHERE user_id <> $1
        ORDER BY created_at DESC, id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(pagination.fetch_limit())
    .bind(pagination.offset())
    .fetch_all(pool)
    .await?;

    feed::enrich_page(pool, pagination.page_of(window)).await
}

/// The caller's own posts, newest first.
pub async fn mine(
    pool: &PgPool,
    user_id: Uuid,
    pagination: &Pagination,
) -> Result<PageResult<PostSummary>, AppError> {
    let window = sqlx::query_as::<_, Post>(
        r#"
        SELECT * FROM posts
        WHERE user_id = $1
        ORDER BY created_at DESC, id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(pagination.fetch_limit())
    .bind(pagination.offset())
    .fetch_all(pool)
    .await?;

    feed::enrich_page(pool, pagination.page_of(window)).await
}

/// Posts the caller bookmarked, most recently saved first.
pub async fn saved(
    pool: &PgPool,
    user_id: Uuid,
    pagination: &Pagination,
) -> Result<PageResult<PostSummary>, AppError> {
    let window = sqlx::query_as::<_, Post>(
        r#"
        SELECT p.* FROM posts p
        JOIN saved_posts s ON s.post_id = p.id
        WHERE s.user_id = $1
        ORDER BY s.created_at DESC, p.id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(pagination.fetch_limit())
    .bind(pagination.offset())
    .fetch_all(pool)
    .await?;

    feed::enrich_page(pool, pagination.page_of(window)).await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Post, AppError> {
    sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
}

async fn is_saved_by(pool: &PgPool, post_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
    let saved = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM saved_posts WHERE post_id = $1 AND user_id = $2)",
    )
    .bind(post_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(saved)
}

async fn is_liked_by(pool: &PgPool, post_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
    let liked = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM likes WHERE post_id = $1 AND user_id = $2)",
    )
    .bind(post_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(liked)
}

/// A single post with the caller's relationship to it.
pub async fn get(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<PostDetail, AppError> {
    let post = find_by_id(pool, id).await?;
    let updated_at = post.updated_at;
    let is_author = post.user_id == user_id;

    let (summary, saved_by_user, liked_by_user) = tokio::try_join!(
        feed::enrich_one(pool, post),
        is_saved_by(pool, id, user_id),
        is_liked_by(pool, id, user_id),
    )?;

    Ok(PostDetail {
        summary,
        updated_at,
        is_author,
        saved_by_user,
        liked_by_user,
    })
}

pub async fn create(pool: &PgPool, user_id: Uuid, input: &CreatePost) -> Result<Post, AppError> {
    let post = sqlx::query_as::<_, Post>(
        "INSERT INTO posts (user_id, content) VALUES ($1, $2) RETURNING *",
    )
    .bind(user_id)
    .bind(input.content.trim())
    .fetch_one(pool)
    .await?;

    tracing::info!(user_id = %user_id, post_id = %post.id, "Post created");
    Ok(post)
}

/// Edit a post. Posts of other users are reported as not found.
pub async fn update(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    input: &UpdatePost,
) -> Result<Post, AppError> {
    sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts SET content = $3, updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(input.content.trim())
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
}

pub async fn delete(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(NOT_FOUND.to_string()));
    }
    tracing::info!(user_id = %user_id, post_id = %id, "Post deleted");
    Ok(())
}

/// Bookmark another user's post.
pub async fn save(pool: &PgPool, user_id: Uuid, post_id: Uuid) -> Result<(), AppError> {
    let post = find_by_id(pool, post_id).await?;
    if post.user_id == user_id {
        return Err(AppError::Validation("You cannot save your own post".to_string()));
    }

    sqlx::query("INSERT INTO saved_posts (post_id, user_id) VALUES ($1, $2)")
        .bind(post_id)
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Post already saved".to_string())
            }
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::NotFound(NOT_FOUND.to_string())
            }
            _ => AppError::Database(e),
        })?;

    Ok(())
}

pub async fn unsave(pool: &PgPool, user_id: Uuid, post_id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM saved_posts WHERE post_id = $1 AND user_id = $2")
        .bind(post_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Saved post not found".to_string()));
    }
    Ok(())
}
