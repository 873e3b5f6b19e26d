//! Profile routes for the signed-in user.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Serialize;

use crate::errors::{AppError, MessageResponse};
use crate::middleware::auth::CurrentUser;
use crate::middleware::json::ValidatedJson;
use crate::models::user::{ChangePassword, UpdateUser, UserProfile};
use crate::routes::auth::REFRESH_COOKIE;
use crate::services::user as user_service;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileImage {
    pub profile_picture: String,
}

/// GET /api/v1/user
pub async fn get_profile(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<UserProfile>, AppError> {
    let profile = user_service::get_profile(&state.db, current_user.id).await?;
    Ok(Json(profile))
}

/// PUT /api/v1/user
pub async fn update_profile(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedJson(body): ValidatedJson<UpdateUser>,
) -> Result<Json<UserProfile>, AppError> {
    user_service::update_profile(&state.db, current_user.id, &body).await?;
    let profile = user_service::get_profile(&state.db, current_user.id).await?;
    Ok(Json(profile))
}

/// PUT /api/v1/user/password
pub async fn change_password(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedJson(body): ValidatedJson<ChangePassword>,
) -> Result<Json<MessageResponse>, AppError> {
    user_service::change_password(&state.db, current_user.id, &body).await?;
    Ok(MessageResponse::success())
}

/// DELETE /api/v1/user. Removes the account and everything it owns.
pub async fn delete_account(
    State(state): State<AppState>,
    current_user: CurrentUser,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode), AppError> {
    let picture = user_service::delete_account(&state.db, current_user.id).await?;
    if let Some(path) = picture {
        state.image_store().remove(&path).await;
    }
    let jar = jar.remove(Cookie::build(REFRESH_COOKIE).path("/"));
    Ok((jar, StatusCode::NO_CONTENT))
}

/// POST /api/v1/user/profile-image. Multipart upload, field `image`.
pub async fn upload_profile_image(
    State(state): State<AppState>,
    current_user: CurrentUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ProfileImage>, AppError> {
    let mut multipart = multipart.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("image") {
            continue;
        }
        let content_type = field.content_type().unwrap_or("").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read image: {e}")))?;
        upload = Some((content_type, bytes.to_vec()));
    }

    let (content_type, bytes) = upload.ok_or_else(|| {
        AppError::Validation("Missing 'image' field in multipart request".to_string())
    })?;

    let store = state.image_store();
    let path = store
        .save_profile_image(current_user.id, &content_type, &bytes)
        .await?;
    match user_service::set_profile_picture(&state.db, current_user.id, &path).await {
        Ok(Some(old)) => store.remove(&old).await,
        Ok(None) => {}
        Err(e) => {
            store.remove(&path).await;
            return Err(e);
        }
    }

    Ok(Json(ProfileImage {
        profile_picture: path,
    }))
}
