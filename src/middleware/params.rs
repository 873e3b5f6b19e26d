//! Query-string and path-segment extractors with JSON rejections.

use axum::{
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// Like [`Query`], but a query string that fails to deserialize is rejected
/// as [`AppError::Validation`] (400).
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Like [`Path`], but malformed segments (a non-UUID id) are rejected as
/// [`AppError::Validation`] (400).
#[derive(Debug, Clone, Copy)]
pub struct ValidatedPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                if rejection.status().is_server_error() {
                    AppError::Internal(rejection.body_text())
                } else {
                    AppError::Validation(rejection.body_text())
                }
            })?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get, Router};
    use serde::Deserialize;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::services::sorting::SortKey;

    #[derive(Debug, Deserialize)]
    struct SortQuery {
        #[serde(default)]
        sort: SortKey,
    }

    fn query_parts(uri: &str) -> Parts {
        let (parts, _) = Request::get(uri).body(()).unwrap().into_parts();
        parts
    }

    #[tokio::test]
    async fn accepts_known_query_value() {
        let mut parts = query_parts("/todos?sort=date");
        let ValidatedQuery(query) = ValidatedQuery::<SortQuery>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(query.sort, SortKey::Date);
    }

    #[tokio::test]
    async fn unknown_query_value_is_a_validation_error() {
        let mut parts = query_parts("/todos?sort=priority");
        let err = ValidatedQuery::<SortQuery>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("priority")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    async fn echo(ValidatedPath(id): ValidatedPath<Uuid>) -> String {
        id.to_string()
    }

    #[tokio::test]
    async fn malformed_uuid_segment_is_bad_request() {
        let app = Router::new().route("/items/{id}", get(echo));
        let response = app
            .oneshot(Request::get("/items/not-a-uuid").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn well_formed_uuid_segment_is_extracted() {
        let id = Uuid::new_v4();
        let app = Router::new().route("/items/{id}", get(echo));
        let response = app
            .oneshot(Request::get(format!("/items/{id}")).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), axum::http::StatusCode::OK);
    }
}
