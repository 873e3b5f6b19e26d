//! Todo service: owner-scoped CRUD and the sorted, filtered listing.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::pagination::{slice_page, PageResult};
use crate::models::todo::{CreateTodo, Todo, TodoListQuery, UpdateTodo};
use crate::services::sorting::SortingStrategy;

const NOT_FOUND: &str = "Todo not found";

/// List a user's todos.
///
/// The whole set is loaded, filtered and ordered in memory, then paged, so
/// page boundaries follow the requested order rather than storage order.
pub async fn list(
    pool: &PgPool,
    user_id: Uuid,
    query: &TodoListQuery,
) -> Result<PageResult<Todo>, AppError> {
    let todos = find_all_by_owner(pool, user_id).await?;
    let page = page_todos(todos, query);
    tracing::debug!(
        user_id = %user_id,
        sort = ?query.sort,
        filter = ?query.filter,
        returned = page.items.len(),
        "Listed todos"
    );
    Ok(page)
}

/// Filter, order and page an already-loaded set of todos.
pub fn page_todos(todos: Vec<Todo>, query: &TodoListQuery) -> PageResult<Todo> {
    let strategy = SortingStrategy::new(query.sort).with_filter(query.filter);
    slice_page(strategy.sort(todos), &query.pagination())
}

pub async fn find_all_by_owner(pool: &PgPool, user_id: Uuid) -> Result<Vec<Todo>, AppError> {
    let todos = sqlx::query_as::<_, Todo>("SELECT * FROM todos WHERE user_id = $1")
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(todos)
}

/// Count a user's unchecked todos.
pub async fn count_active(pool: &PgPool, user_id: Uuid) -> Result<i64, AppError> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM todos WHERE user_id = $1 AND checked = false",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

pub async fn create(pool: &PgPool, user_id: Uuid, input: &CreateTodo) -> Result<Todo, AppError> {
    let todo = sqlx::query_as::<_, Todo>(
        "INSERT INTO todos (user_id, name, deadline) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(user_id)
    .bind(input.name.trim())
    .bind(input.deadline)
    .fetch_one(pool)
    .await?;

    tracing::info!(user_id = %user_id, todo_id = %todo.id, "Todo created");
    Ok(todo)
}

/// Change to `users.completed_todos` when a todo's checked flag is updated.
fn completed_delta(previous: bool, requested: Option<bool>) -> i32 {
    match requested {
        Some(true) if !previous => 1,
        Some(false) if previous => -1,
        _ => 0,
    }
}

/// Update a todo owned by `user_id`. Toggling `checked` moves the user's
/// completed counter in the same transaction.
pub async fn update(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    input: &UpdateTodo,
) -> Result<Todo, AppError> {
    let mut tx = pool.begin().await?;

    let previous = sqlx::query_scalar::<_, bool>(
        "SELECT checked FROM todos WHERE id = $1 AND user_id = $2 FOR UPDATE",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    let todo = sqlx::query_as::<_, Todo>(
        r#"
        UPDATE todos SET
            name = COALESCE($3, name),
            checked = COALESCE($4, checked),
            deadline = CASE WHEN $5 THEN NULL ELSE COALESCE($6, deadline) END,
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(input.name.as_deref().map(str::trim))
    .bind(input.checked)
    .bind(input.clear_deadline)
    .bind(input.deadline)
    .fetch_one(&mut *tx)
    .await?;

    let delta = completed_delta(previous, input.checked);
    if delta != 0 {
        sqlx::query(
            "UPDATE users SET completed_todos = GREATEST(completed_todos + $1, 0) WHERE id = $2",
        )
        .bind(delta)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(todo)
}

pub async fn delete(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(NOT_FOUND.to_string()));
    }
    tracing::info!(user_id = %user_id, todo_id = %id, "Todo deleted");
    Ok(())
}
