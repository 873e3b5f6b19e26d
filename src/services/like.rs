use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::post::LikeSummary;
use crate::services::post;

pub async fn summary(pool: &PgPool, user_id: Uuid, post_id: Uuid) -> Result<LikeSummary, AppError> {
    post::find_by_id(pool, post_id).await?;

    let summary = sqlx::query_as::<_, LikeSummary>(
        r#"
        SELECT COUNT(*) AS likes,
               COALESCE(BOOL_OR(user_id = $2), false) AS liked_by_user
        FROM likes
        WHERE post_id = $1
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(summary)
}

pub async fn like(pool: &PgPool, user_id: Uuid, post_id: Uuid) -> Result<(), AppError> {
    post::find_by_id(pool, post_id).await?;

    sqlx::query("INSERT INTO likes (post_id, user_id) VALUES ($1, $2)")
        .bind(post_id)
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Post already liked".to_string())
            }
            _ => AppError::Database(e),
        })?;

    Ok(())
}

/// Withdraw the caller's like. Other users' likes are untouched.
pub async fn unlike(pool: &PgPool, user_id: Uuid, post_id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM likes WHERE post_id = $1 AND user_id = $2")
        .bind(post_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Like not found".to_string()));
    }
    Ok(())
}
