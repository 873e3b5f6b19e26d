//! Todo model and the list query accepted by the todos endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::not_blank;
use crate::models::pagination::Pagination;
use crate::services::sorting::{SortKey, TodoFilter};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Todo {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub name: String,
    pub checked: bool,
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTodo {
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    pub deadline: Option<DateTime<Utc>>,
}

/// Partial update. `deadline: null` in the body leaves the deadline untouched;
/// send `clear_deadline: true` to remove it.
#[derive(Debug, Clone, Deserialize, Default, Validate)]
pub struct UpdateTodo {
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
    pub checked: Option<bool>,
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub clear_deadline: bool,
}

impl UpdateTodo {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.checked.is_none() && self.deadline.is_none() && !self.clear_deadline
    }
}

/// `GET /todos?page=&limit=&sort=&filter=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    #[serde(default)]
    pub sort: SortKey,
    #[serde(default)]
    pub filter: TodoFilter,
}

impl TodoListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            limit: self.limit,
        }
    }
}
