//! Weekly schedule routes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::middleware::json::ValidatedJson;
use crate::middleware::params::{ValidatedPath, ValidatedQuery};
use crate::models::activity::{Activity, CreateActivity, ScheduleQuery, UpdateActivity};
use crate::services::schedule as schedule_service;
use crate::AppState;

/// GET /api/v1/schedule. Whole week grouped by day, or one day with `?day=`.
/// Responds 204 when nothing is scheduled.
pub async fn list(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedQuery(query): ValidatedQuery<ScheduleQuery>,
) -> Result<Response, AppError> {
    let response = match query.day {
        Some(day) => {
            let activities = schedule_service::list_day(&state.db, current_user.id, day).await?;
            if activities.is_empty() {
                StatusCode::NO_CONTENT.into_response()
            } else {
                Json(activities).into_response()
            }
        }
        None => {
            let week = schedule_service::list_week(&state.db, current_user.id).await?;
            if week.values().all(Vec::is_empty) {
                StatusCode::NO_CONTENT.into_response()
            } else {
                Json(week).into_response()
            }
        }
    };
    Ok(response)
}

/// POST /api/v1/schedule
pub async fn add(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedJson(body): ValidatedJson<CreateActivity>,
) -> Result<(StatusCode, Json<Activity>), AppError> {
    let activity = schedule_service::add(&state.db, current_user.id, &body).await?;
    Ok((StatusCode::CREATED, Json(activity)))
}

/// PUT /api/v1/schedule/{id}
pub async fn update(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(body): ValidatedJson<UpdateActivity>,
) -> Result<Json<Activity>, AppError> {
    let activity = schedule_service::update(&state.db, current_user.id, id, &body).await?;
    Ok(Json(activity))
}

/// DELETE /api/v1/schedule/{id}
pub async fn delete(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<StatusCode, AppError> {
    schedule_service::delete(&state.db, current_user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
