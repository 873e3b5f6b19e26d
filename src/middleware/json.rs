//! JSON body extractor that validates before the handler runs.

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::AppError;

/// Like [`Json`], but malformed bodies and failed `validator` rules are both
/// rejected as [`AppError::Validation`] (400).
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Named {
        #[validate(length(min = 1, message = "is required"))]
        name: String,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn accepts_valid_body() {
        let ValidatedJson(named) = ValidatedJson::<Named>::from_request(json_request(r#"{"name":"x"}"#), &())
            .await
            .unwrap();
        assert_eq!(named.name, "x");
    }

    #[tokio::test]
    async fn missing_field_is_a_validation_error() {
        let err = ValidatedJson::<Named>::from_request(json_request("{}"), &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn failed_rule_is_a_validation_error() {
        let err = ValidatedJson::<Named>::from_request(json_request(r#"{"name":""}"#), &())
            .await
            .unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("name")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
