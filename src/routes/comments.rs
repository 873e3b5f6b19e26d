use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::middleware::json::ValidatedJson;
use crate::middleware::params::{ValidatedPath, ValidatedQuery};
use crate::models::comment::{Comment, CommentView, CreateComment};
use crate::models::pagination::{PageResult, Pagination};
use crate::services::comment as comment_service;
use crate::AppState;

/// GET /api/v1/posts/{id}/comments. Oldest first.
pub async fn list(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedPath(post_id): ValidatedPath<Uuid>,
    ValidatedQuery(pagination): ValidatedQuery<Pagination>,
) -> Result<PageResult<CommentView>, AppError> {
    comment_service::list(&state.db, current_user.id, post_id, &pagination).await
}

/// POST /api/v1/posts/{id}/comments
pub async fn add(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedPath(post_id): ValidatedPath<Uuid>,
    ValidatedJson(body): ValidatedJson<CreateComment>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    let comment = comment_service::add(&state.db, current_user.id, post_id, &body).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// DELETE /api/v1/posts/{id}/comments/{comment_id}
pub async fn delete(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedPath((post_id, comment_id)): ValidatedPath<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    comment_service::delete(&state.db, current_user.id, post_id, comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
