//! Weekly schedule service.

use std::collections::BTreeMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::activity::{Activity, CreateActivity, UpdateActivity, WeekDay};

const NOT_FOUND: &str = "Activity not found";

/// Bucket activities by day. Every day is present, Monday first, and each
/// bucket keeps the input order.
pub fn group_by_day(activities: Vec<Activity>) -> BTreeMap<WeekDay, Vec<Activity>> {
    let mut week: BTreeMap<WeekDay, Vec<Activity>> =
        WeekDay::ALL.iter().map(|day| (*day, Vec::new())).collect();
    for activity in activities {
        week.entry(activity.week_day).or_default().push(activity);
    }
    week
}

/// The whole week, each day ordered by time.
pub async fn list_week(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<BTreeMap<WeekDay, Vec<Activity>>, AppError> {
    let activities = sqlx::query_as::<_, Activity>(
        "SELECT * FROM activities WHERE user_id = $1 ORDER BY time ASC, id ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(group_by_day(activities))
}

pub async fn list_day(
    pool: &PgPool,
    user_id: Uuid,
    day: WeekDay,
) -> Result<Vec<Activity>, AppError> {
    let activities = sqlx::query_as::<_, Activity>(
        "SELECT * FROM activities WHERE user_id = $1 AND week_day = $2 ORDER BY time ASC, id ASC",
    )
    .bind(user_id)
    .bind(day)
    .fetch_all(pool)
    .await?;
    Ok(activities)
}

pub async fn add(
    pool: &PgPool,
    user_id: Uuid,
    input: &CreateActivity,
) -> Result<Activity, AppError> {
    let activity = sqlx::query_as::<_, Activity>(
        r#"
        INSERT INTO activities (user_id, name, url, week_day, time)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(input.name.trim())
    .bind(&input.url)
    .bind(input.week_day)
    .bind(input.time)
    .fetch_one(pool)
    .await?;

    tracing::debug!(user_id = %user_id, activity_id = %activity.id, "Activity added");
    Ok(activity)
}

pub async fn update(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    input: &UpdateActivity,
) -> Result<Activity, AppError> {
    sqlx::query_as::<_, Activity>(
        r#"
        UPDATE activities SET
            name = COALESCE($3, name),
            url = COALESCE($4, url),
            week_day = COALESCE($5, week_day),
            time = COALESCE($6, time)
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(input.name.as_deref().map(str::trim))
    .bind(&input.url)
    .bind(input.week_day)
    .bind(input.time)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
}

pub async fn delete(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM activities WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(NOT_FOUND.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Utc};

    fn activity(n: u128, day: WeekDay, hour: u32) -> Activity {
        Activity {
            id: Uuid::from_u128(n),
            user_id: Uuid::nil(),
            name: format!("activity {n}"),
            url: None,
            week_day: day,
            time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_schedule_has_every_day() {
        let week = group_by_day(Vec::new());
        assert_eq!(week.len(), 7);
        assert!(week.values().all(Vec::is_empty));
        assert_eq!(week.keys().next(), Some(&WeekDay::Monday));
        assert_eq!(week.keys().last(), Some(&WeekDay::Sunday));
    }

    #[test]
    fn activities_land_in_their_day_in_input_order() {
        let week = group_by_day(vec![
            activity(1, WeekDay::Friday, 8),
            activity(2, WeekDay::Monday, 9),
            activity(3, WeekDay::Friday, 18),
        ]);
        let friday: Vec<Uuid> = week[&WeekDay::Friday].iter().map(|a| a.id).collect();
        assert_eq!(friday, vec![Uuid::from_u128(1), Uuid::from_u128(3)]);
        assert_eq!(week[&WeekDay::Monday].len(), 1);
        assert!(week[&WeekDay::Sunday].is_empty());
    }

    #[test]
    fn week_serializes_with_day_keys() {
        let week = group_by_day(vec![activity(1, WeekDay::Tuesday, 7)]);
        let json = serde_json::to_value(&week).unwrap();
        assert_eq!(json["Tuesday"][0]["name"], "activity 1");
        assert_eq!(json["Monday"].as_array().map(Vec::len), Some(0));
    }
}
