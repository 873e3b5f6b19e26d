//! Route definitions for the dayboard API.

pub mod auth;
pub mod comments;
pub mod health;
pub mod likes;
pub mod posts;
pub mod schedule;
pub mod todos;
pub mod user;

use axum::routing::{get, post, put};
use axum::Router;

use crate::AppState;

/// Liveness and readiness probes, mounted outside `/api/v1`.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
}

/// Everything under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/logout", post(auth::logout))
        .route(
            "/user",
            get(user::get_profile)
                .put(user::update_profile)
                .delete(user::delete_account),
        )
        .route("/user/password", put(user::change_password))
        .route("/user/profile-image", post(user::upload_profile_image))
        .route("/todos", get(todos::list).post(todos::create))
        .route("/todos/{id}", put(todos::update).delete(todos::delete))
        .route("/schedule", get(schedule::list).post(schedule::add))
        .route("/schedule/{id}", put(schedule::update).delete(schedule::delete))
        .route("/posts", get(posts::feed).post(posts::create))
        .route("/posts/mine", get(posts::mine))
        .route("/posts/saved", get(posts::saved))
        .route(
            "/posts/{id}",
            get(posts::get_by_id)
                .put(posts::update)
                .delete(posts::delete),
        )
        .route("/posts/{id}/save", post(posts::save).delete(posts::unsave))
        .route("/posts/{id}/comments", get(comments::list).post(comments::add))
        .route("/posts/{id}/comments/{comment_id}", axum::routing::delete(comments::delete))
        .route(
            "/posts/{id}/likes",
            get(likes::summary).post(likes::like).delete(likes::unlike),
        )
}
