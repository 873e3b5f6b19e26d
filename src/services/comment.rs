use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::comment::{Comment, CommentView, CommentWithAuthor, CreateComment};
use crate::models::pagination::{PageResult, Pagination};
use crate::services::post;

/// Comments on a post, oldest first.
pub async fn list(
    pool: &PgPool,
    viewer_id: Uuid,
    post_id: Uuid,
    pagination: &Pagination,
) -> Result<PageResult<CommentView>, AppError> {
    let window = sqlx::query_as::<_, CommentWithAuthor>(
        r#"
        SELECT c.id, c.user_id, c.content, c.created_at, u.name AS username
        FROM comments c
        JOIN users u ON u.id = c.user_id
        WHERE c.post_id = $1
        ORDER BY c.created_at ASC, c.id ASC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(post_id)
    .bind(pagination.fetch_limit())
    .bind(pagination.offset())
    .fetch_all(pool)
    .await?;

    Ok(pagination
        .page_of(window)
        .map(|row| CommentView::for_viewer(row, viewer_id)))
}

pub async fn add(
    pool: &PgPool,
    user_id: Uuid,
    post_id: Uuid,
    input: &CreateComment,
) -> Result<Comment, AppError> {
    post::find_by_id(pool, post_id).await?;

    let comment = sqlx::query_as::<_, Comment>(
        "INSERT INTO comments (post_id, user_id, content) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(post_id)
    .bind(user_id)
    .bind(input.content.trim())
    .fetch_one(pool)
    .await?;

    tracing::debug!(post_id = %post_id, comment_id = %comment.id, "Comment added");
    Ok(comment)
}

/// Remove one of the caller's comments from a post.
pub async fn delete(
    pool: &PgPool,
    user_id: Uuid,
    post_id: Uuid,
    comment_id: Uuid,
) -> Result<(), AppError> {
    let result =
        sqlx::query("DELETE FROM comments WHERE id = $1 AND post_id = $2 AND user_id = $3")
            .bind(comment_id)
            .bind(post_id)
            .bind(user_id)
            .execute(pool)
            .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Comment not found".to_string()));
    }
    Ok(())
}
