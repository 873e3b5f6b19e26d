use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::middleware::params::ValidatedPath;
use crate::models::post::LikeSummary;
use crate::services::like as like_service;
use crate::AppState;

/// GET /api/v1/posts/{id}/likes
pub async fn summary(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedPath(post_id): ValidatedPath<Uuid>,
) -> Result<Json<LikeSummary>, AppError> {
    let summary = like_service::summary(&state.db, current_user.id, post_id).await?;
    Ok(Json(summary))
}

/// POST /api/v1/posts/{id}/likes
pub async fn like(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedPath(post_id): ValidatedPath<Uuid>,
) -> Result<StatusCode, AppError> {
    like_service::like(&state.db, current_user.id, post_id).await?;
    Ok(StatusCode::CREATED)
}

/// DELETE /api/v1/posts/{id}/likes
pub async fn unlike(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedPath(post_id): ValidatedPath<Uuid>,
) -> Result<StatusCode, AppError> {
    like_service::unlike(&state.db, current_user.id, post_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
