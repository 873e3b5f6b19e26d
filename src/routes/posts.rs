//! Feed routes: posts and bookmarks.

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
use crate::models::pagination::{PageResult, Pagination};
use crate::models::post::{CreatePost, Post, PostDetail, PostSummary, UpdatePost};
use crate::services::post as post_service;
use crate::AppState;

/// GET /api/v1/posts. Other users' posts, newest first.
pub async fn feed(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedQuery(pagination): ValidatedQuery<Pagination>,
) -> Result<PageResult<PostSummary>, AppError> {
    post_service::feed(&state.db, current_user.id, &pagination).await
}

/// GET /api/v1/posts/mine
pub async fn mine(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedQuery(pagination): ValidatedQuery<Pagination>,
) -> Result<PageResult<PostSummary>, AppError> {
    post_service::mine(&state.db, current_user.id, &pagination).await
}

/// GET /api/v1/posts/saved
pub async fn saved(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedQuery(pagination): ValidatedQuery<Pagination>,
) -> Result<PageResult<PostSummary>, AppError> {
    post_service::saved(&state.db, current_user.id, &pagination).await
}

/// GET /api/v1/posts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<PostDetail>, AppError> {
    let post = post_service::get(&state.db, current_user.id, id).await?;
    Ok(Json(post))
}

/// POST /api/v1/posts
pub async fn create(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedJson(body): ValidatedJson<CreatePost>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    let post = post_service::create(&state.db, current_user.id, &body).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// PUT /api/v1/posts/{id}
pub async fn update(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(body): ValidatedJson<UpdatePost>,
) -> Result<Json<Post>, AppError> {
    let post = post_service::update(&state.db, current_user.id, id, &body).await?;
    Ok(Json(post))
}

/// DELETE /api/v1/posts/{id}
pub async fn delete(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<StatusCode, AppError> {
    post_service::delete(&state.db, current_user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/posts/{id}/save
pub async fn save(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<StatusCode, AppError> {
    post_service::save(&state.db, current_user.id, id).await?;
    Ok(StatusCode::CREATED)
}

/// DELETE /api/v1/posts/{id}/save
pub async fn unsave(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<StatusCode, AppError> {
    post_service::unsave(&state.db, current_user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
