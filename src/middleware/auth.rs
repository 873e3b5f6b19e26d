//! JWT authentication extractor for Axum handlers.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::services::auth::{self as auth_service, ACCESS_TOKEN};
use crate::AppState;

/// Authenticated user extracted from a JWT Bearer token.
///
/// A missing or non-Bearer `Authorization` header is rejected with 401, a
/// token that fails verification with 403.
/// ```ignore
/// async fn handler(current_user: CurrentUser) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub id: Uuid,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::Unauthorized)?;

        let id = auth_service::validate_token_of_type(
            bearer.token(),
            &state.config.jwt_secret,
            ACCESS_TOKEN,
        )?;

        Ok(CurrentUser { id })
    }
}
