//! User model, registration and profile DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::not_blank;

/// Full user row from database. Holds credentials, never serialize to the API.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub country: Option<String>,
    pub phone_num: Option<String>,
    pub profile_picture: Option<String>,
    pub completed_todos: i32,
    pub refresh_token_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile returned by `GET /user`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub country: Option<String>,
    pub phone_num: Option<String>,
    pub profile_picture: Option<String>,
    pub completed_todos: i32,
    pub left_todos: i64,
}

impl UserProfile {
    pub fn new(user: User, left_todos: i64) -> Self {
        Self {
            name: user.name,
            email: user.email,
            country: user.country,
            phone_num: user.phone_num,
            profile_picture: user.profile_picture,
            completed_todos: user.completed_todos,
            left_todos,
        }
    }
}

/// Author display info attached to posts.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct AuthorInfo {
    pub id: Uuid,
    pub name: String,
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUser {
    #[validate(length(min = 1, max = 100, message = "is required"))]
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub password: String,
    pub country: Option<String>,
    pub phone_num: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginUser {
    #[validate(length(min = 1, message = "is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Default, Validate)]
pub struct UpdateUser {
    #[validate(length(min = 1, max = 100, message = "must not be empty"))]
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
    pub country: Option<String>,
    pub phone_num: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePassword {
    #[validate(length(min = 1, message = "is required"))]
    pub current_password: String,
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::nil(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "secret_hash".to_string(),
            country: Some("UK".to_string()),
            phone_num: None,
            profile_picture: None,
            completed_todos: 4,
            refresh_token_hash: Some("digest".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn profile_excludes_credentials() {
        let json = serde_json::to_string(&UserProfile::new(sample_user(), 2)).unwrap();
        assert!(!json.contains("hash"));
        assert!(!json.contains("digest"));
        assert!(json.contains("\"left_todos\":2"));
        assert!(json.contains("\"completed_todos\":4"));
    }

    #[test]
    fn register_rejects_bad_email_and_short_password() {
        let input = RegisterUser {
            name: "Ada".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            country: None,
            phone_num: None,
        };
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn register_accepts_valid_input() {
        let input = RegisterUser {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "long-enough".to_string(),
            country: None,
            phone_num: None,
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn blank_names_are_rejected() {
        let input = RegisterUser {
            name: "   ".to_string(),
            email: "ada@example.com".to_string(),
            password: "long-enough".to_string(),
            country: None,
            phone_num: None,
        };
        assert!(input.validate().unwrap_err().field_errors().contains_key("name"));

        let update = UpdateUser {
            name: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
