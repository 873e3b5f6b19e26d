//! Todo routes.

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
use crate::models::pagination::PageResult;
use crate::models::todo::{CreateTodo, Todo, TodoListQuery, UpdateTodo};
use crate::services::todo as todo_service;
use crate::AppState;

/// GET /api/v1/todos?page=&limit=&sort=name|date&filter=all|active|completed
///
/// Responds 204 when the page is empty.
pub async fn list(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedQuery(query): ValidatedQuery<TodoListQuery>,
) -> Result<PageResult<Todo>, AppError> {
    todo_service::list(&state.db, current_user.id, &query).await
}

/// POST /api/v1/todos
pub async fn create(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedJson(body): ValidatedJson<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), AppError> {
    let todo = todo_service::create(&state.db, current_user.id, &body).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// PUT /api/v1/todos/{id}
pub async fn update(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(body): ValidatedJson<UpdateTodo>,
) -> Result<Json<Todo>, AppError> {
    if body.is_empty() {
        return Err(AppError::Validation("Nothing to update".to_string()));
    }
    let todo = todo_service::update(&state.db, current_user.id, id, &body).await?;
    Ok(Json(todo))
}

/// DELETE /api/v1/todos/{id}
pub async fn delete(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<StatusCode, AppError> {
    todo_service::delete(&state.db, current_user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
