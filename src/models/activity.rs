//! Weekly schedule activity model.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::not_blank;

/// Day of week an activity recurs on. Declaration order is calendar order
/// (Monday first), which `Ord` and the schedule grouping rely on.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[sqlx(type_name = "week_day")]
pub enum WeekDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl WeekDay {
    pub const ALL: [WeekDay; 7] = [
        WeekDay::Monday,
        WeekDay::Tuesday,
        WeekDay::Wednesday,
        WeekDay::Thursday,
        WeekDay::Friday,
        WeekDay::Saturday,
        WeekDay::Sunday,
    ];
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Activity {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub name: String,
    pub url: Option<String>,
    pub week_day: WeekDay,
    pub time: NaiveTime,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateActivity {
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(url(message = "must be a valid URL"))]
    pub url: Option<String>,
    pub week_day: WeekDay,
    pub time: NaiveTime,
}

#[derive(Debug, Clone, Deserialize, Default, Validate)]
pub struct UpdateActivity {
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub url: Option<String>,
    pub week_day: Option<WeekDay>,
    pub time: Option<NaiveTime>,
}

/// `GET /schedule?day=Monday`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleQuery {
    pub day: Option<WeekDay>,
}
