//! Authentication routes: register, login, refresh, logout.
//!
//! The refresh token lives in an HTTP-only cookie; only the access token is
//! returned in the body.

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::errors::AppError;
use crate::middleware::json::ValidatedJson;
use crate::models::user::{LoginUser, RegisterUser, UserProfile};
use crate::services::auth::{self as auth_service, AccessTokenResponse, TokenPair};
use crate::AppState;

pub const REFRESH_COOKIE: &str = "refreshToken";

fn refresh_cookie(token: String) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .build()
}

fn with_tokens(jar: CookieJar, tokens: &TokenPair) -> (CookieJar, Json<AccessTokenResponse>) {
    (
        jar.add(refresh_cookie(tokens.refresh_token.clone())),
        Json(AccessTokenResponse::from(tokens)),
    )
}

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RegisterUser>,
) -> Result<(StatusCode, Json<UserProfile>), AppError> {
    let user = auth_service::register(&state.db, &body).await?;
    Ok((StatusCode::CREATED, Json(UserProfile::new(user, 0))))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(body): ValidatedJson<LoginUser>,
) -> Result<(CookieJar, Json<AccessTokenResponse>), AppError> {
    let tokens = auth_service::login(
        &state.db,
        &body.email,
        &body.password,
        &state.config.jwt_secret,
        state.config.jwt_access_token_expiry_secs,
        state.config.jwt_refresh_token_expiry_secs,
    )
    .await?;

    Ok(with_tokens(jar, &tokens))
}

/// POST /api/v1/auth/refresh. Rotate the refresh cookie and issue a new access token.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<AccessTokenResponse>), AppError> {
    let current = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or(AppError::Unauthorized)?;

    let tokens = auth_service::refresh_token(
        &state.db,
        &current,
        &state.config.jwt_secret,
        state.config.jwt_access_token_expiry_secs,
        state.config.jwt_refresh_token_expiry_secs,
    )
    .await?;

    Ok(with_tokens(jar, &tokens))
}

/// POST /api/v1/auth/logout. Always succeeds and clears the cookie.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode), AppError> {
    if let Some(cookie) = jar.get(REFRESH_COOKIE) {
        auth_service::logout(&state.db, cookie.value()).await?;
    }
    let jar = jar.remove(Cookie::build(REFRESH_COOKIE).path("/"));
    Ok((jar, StatusCode::NO_CONTENT))
}
