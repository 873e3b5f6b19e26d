//! Seed script for development. Populates a fresh database with sample data.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires `DATABASE_URL` (reads .env). Running it twice is harmless: users
//! that already exist are left alone.

use anyhow::Context;
use chrono::{Duration, NaiveTime, Utc};
use dayboard::models::activity::WeekDay;
use dayboard::services::auth::hash_password;
use sqlx::PgPool;
use uuid::Uuid;

const DEMO_PASSWORD: &str = "Test1234!";

struct DemoUser {
    name: &'static str,
    email: &'static str,
    country: &'static str,
}

const USERS: [DemoUser; 3] = [
    DemoUser {
        name: "Ada Lovelace",
        email: "ada@dayboard.local",
        country: "UK",
    },
    DemoUser {
        name: "Grace Hopper",
        email: "grace@dayboard.local",
        country: "US",
    },
    DemoUser {
        name: "Linus Torvalds",
        email: "linus@dayboard.local",
        country: "FI",
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    println!("=== dayboard seed ===");

    let mut ids = Vec::with_capacity(USERS.len());
    for user in &USERS {
        let (id, created) = seed_user(&pool, user).await?;
        if created {
            seed_todos(&pool, id).await?;
            seed_schedule(&pool, id).await?;
        }
        ids.push((id, created));
    }

    if ids.iter().any(|(_, created)| *created) {
        let user_ids: Vec<Uuid> = ids.iter().map(|(id, _)| *id).collect();
        seed_feed(&pool, &user_ids).await?;
    }

    println!("\n=== Seed complete! ===");
    for user in &USERS {
        println!("Login: {} / {DEMO_PASSWORD}", user.email);
    }
    Ok(())
}

async fn seed_user(pool: &PgPool, user: &DemoUser) -> anyhow::Result<(Uuid, bool)> {
    let existing: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(user.email)
        .fetch_optional(pool)
        .await?;
    if let Some(id) = existing {
        println!("[skip] {} already exists", user.email);
        return Ok((id, false));
    }

    let hash = hash_password(DEMO_PASSWORD)?;
    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO users (name, email, password_hash, country) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(user.name)
    .bind(user.email)
    .bind(&hash)
    .bind(user.country)
    .fetch_one(pool)
    .await?;

    println!("[done] Created user {}", user.email);
    Ok((id, true))
}

async fn seed_todos(pool: &PgPool, user_id: Uuid) -> anyhow::Result<()> {
    let now = Utc::now();
    let todos = [
        ("Buy groceries", false, Some(now + Duration::days(1))),
        ("Write weekly report", true, Some(now - Duration::days(2))),
        ("Call the dentist", false, None),
        ("Renew passport", false, Some(now + Duration::days(30))),
        ("Clean the garage", true, None),
        ("Plan team offsite", false, Some(now + Duration::days(7))),
        ("Read a chapter", false, None),
        ("Pay electricity bill", true, Some(now - Duration::days(5))),
        ("Fix bike brakes", false, Some(now + Duration::days(3))),
        ("Backup laptop", false, None),
        ("Water the plants", true, Some(now)),
        ("Book flights", false, Some(now + Duration::days(14))),
    ];

    let completed = todos.iter().filter(|(_, checked, _)| *checked).count();
    for (name, checked, deadline) in todos {
        sqlx::query("INSERT INTO todos (user_id, name, checked, deadline) VALUES ($1, $2, $3, $4)")
            .bind(user_id)
            .bind(name)
            .bind(checked)
            .bind(deadline)
            .execute(pool)
            .await?;
    }
    sqlx::query("UPDATE users SET completed_todos = $1 WHERE id = $2")
        .bind(i32::try_from(completed)?)
        .bind(user_id)
        .execute(pool)
        .await?;

    println!("[done] Seeded {} todos", todos.len());
    Ok(())
}

async fn seed_schedule(pool: &PgPool, user_id: Uuid) -> anyhow::Result<()> {
    let activities = [
        ("Stand-up", Some("https://meet.example.com/standup"), WeekDay::Monday, (9, 30)),
        ("Gym", None, WeekDay::Monday, (18, 0)),
        ("Piano lesson", None, WeekDay::Wednesday, (17, 15)),
        ("Sprint review", Some("https://meet.example.com/review"), WeekDay::Friday, (14, 0)),
        ("Long run", None, WeekDay::Sunday, (8, 0)),
    ];

    for (name, url, day, (hour, minute)) in activities {
        let time = NaiveTime::from_hms_opt(hour, minute, 0).context("invalid seed time")?;
        sqlx::query(
            "INSERT INTO activities (user_id, name, url, week_day, time) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user_id)
        .bind(name)
        .bind(url)
        .bind(day)
        .bind(time)
        .execute(pool)
        .await?;
    }

    println!("[done] Seeded {} activities", activities.len());
    Ok(())
}

async fn seed_feed(pool: &PgPool, user_ids: &[Uuid]) -> anyhow::Result<()> {
    let contents = [
        "Finally cleared my inbox. Small wins!",
        "Anyone have a good recipe for lentil soup?",
        "Three todos down before lunch.",
        "Trying a new morning routine this week.",
        "Reminder: back up your files.",
        "The weekly schedule view is a lifesaver.",
    ];

    let mut post_count = 0;
    for (i, content) in contents.iter().enumerate() {
        let author = user_ids[i % user_ids.len()];
        let post_id: Uuid = sqlx::query_scalar(
            "INSERT INTO posts (user_id, content, created_at, updated_at) \
             VALUES ($1, $2, NOW() - make_interval(hours => $3), NOW() - make_interval(hours => $3)) \
             RETURNING id",
        )
        .bind(author)
        .bind(content)
        .bind(i32::try_from(contents.len() - i)?)
        .fetch_one(pool)
        .await?;
        post_count += 1;

        for other in user_ids.iter().filter(|id| **id != author) {
            sqlx::query("INSERT INTO likes (post_id, user_id) VALUES ($1, $2)")
                .bind(post_id)
                .bind(other)
                .execute(pool)
                .await?;
            sqlx::query("INSERT INTO comments (post_id, user_id, content) VALUES ($1, $2, $3)")
                .bind(post_id)
                .bind(other)
                .bind("Nice one!")
                .execute(pool)
                .await?;
        }

        if i % 2 == 0 {
            let saver = user_ids[(i + 1) % user_ids.len()];
            sqlx::query("INSERT INTO saved_posts (post_id, user_id) VALUES ($1, $2)")
                .bind(post_id)
                .bind(saver)
                .execute(pool)
                .await?;
        }
    }

    println!("[done] Seeded {post_count} posts with likes and comments");
    Ok(())
}
