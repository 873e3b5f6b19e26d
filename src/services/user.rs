//! User profile service.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{ChangePassword, UpdateUser, User, UserProfile};
use crate::services::{auth, todo};

/// Profile with the live count of unchecked todos.
pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<UserProfile, AppError> {
    let (user, left_todos) = tokio::try_join!(
        auth::find_user_by_id(pool, user_id),
        todo::count_active(pool, user_id),
    )?;
    Ok(UserProfile::new(user, left_todos))
}

pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    input: &UpdateUser,
) -> Result<User, AppError> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users SET
            name = COALESCE($2, name),
            country = COALESCE($3, country),
            phone_num = COALESCE($4, phone_num),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(input.name.as_deref().map(str::trim))
    .bind(&input.country)
    .bind(&input.phone_num)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Replace the password after checking the current one. Existing refresh
/// tokens stop working.
pub async fn change_password(
    pool: &PgPool,
    user_id: Uuid,
    input: &ChangePassword,
) -> Result<(), AppError> {
    let user = auth::find_user_by_id(pool, user_id).await?;

    if !auth::verify_password(&input.current_password, &user.password_hash)? {
        return Err(AppError::Validation("Current password is incorrect".to_string()));
    }

    let new_hash = auth::hash_password(&input.new_password)?;
    sqlx::query(
        "UPDATE users SET password_hash = $1, refresh_token_hash = NULL, updated_at = NOW() \
         WHERE id = $2",
    )
    .bind(&new_hash)
    .bind(user_id)
    .execute(pool)
    .await?;

    tracing::info!(user_id = %user_id, "Password changed");
    Ok(())
}

/// Delete the account and everything it owns. Returns the stored profile
/// picture path so the caller can remove the file.
pub async fn delete_account(pool: &PgPool, user_id: Uuid) -> Result<Option<String>, AppError> {
    let picture = sqlx::query_scalar::<_, Option<String>>(
        "DELETE FROM users WHERE id = $1 RETURNING profile_picture",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    tracing::info!(user_id = %user_id, "Account deleted");
    Ok(picture)
}

/// Point the profile at a newly stored image. Returns the previous path.
pub async fn set_profile_picture(
    pool: &PgPool,
    user_id: Uuid,
    path: &str,
) -> Result<Option<String>, AppError> {
    let previous = sqlx::query_scalar::<_, Option<String>>(
        r#"
        UPDATE users u SET profile_picture = $2, updated_at = NOW()
        FROM (SELECT id, profile_picture FROM users WHERE id = $1 FOR UPDATE) old
        WHERE u.id = old.id
        RETURNING old.profile_picture
        "#,
    )
    .bind(user_id)
    .bind(path)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(previous)
}
