use sqlx::{Result, SqlitePool};

use super::{ListTodosQuery, Todo, TodoRecord};

pub async fn list_todos(pool: &SqlitePool, filter: &ListTodosQuery) -> Result<Vec<Todo>> {
    sqlx::query_as::<_, Todo>(
        r#"
        SELECT id, todo, priority, status, category, due_date
        FROM todo
        WHERE
            todo LIKE '%' || ?1 || '%' AND
            category LIKE '%' || ?2 || '%' AND
            priority LIKE '%' || ?3 || '%' AND
            status LIKE '%' || ?4 || '%'
        "#,
    )
    .bind(filter.search_q.as_deref().unwrap_or_default())
    .bind(filter.category.as_deref().unwrap_or_default())
    .bind(filter.priority.as_deref().unwrap_or_default())
    .bind(filter.status.as_deref().unwrap_or_default())
    .fetch_all(pool)
    .await
}

pub async fn get_todo(pool: &SqlitePool, id: i64) -> Result<Option<Todo>> {
    sqlx::query_as::<_, Todo>(
        r#"
        SELECT id, todo, priority, status, category, due_date
        FROM todo
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn get_record(pool: &SqlitePool, id: i64) -> Result<Option<TodoRecord>> {
    sqlx::query_as::<_, TodoRecord>(
        r#"
        SELECT id, todo, priority, status, category, due_date
        FROM todo
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// `due_date` is the normalized `yyyy-MM-dd` form of the requested day.
pub async fn agenda(pool: &SqlitePool, due_date: &str) -> Result<Vec<TodoRecord>> {
    sqlx::query_as::<_, TodoRecord>(
        r#"
        SELECT id, todo, priority, status, category, due_date
        FROM todo
        WHERE due_date LIKE ?1
        "#,
    )
    .bind(due_date)
    .fetch_all(pool)
    .await
}

pub async fn create_todo(pool: &SqlitePool, record: &TodoRecord) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO todo (id, todo, category, priority, status, due_date)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(record.id)
    .bind(record.todo.as_deref())
    .bind(record.category.as_deref())
    .bind(record.priority.as_deref())
    .bind(record.status.as_deref())
    .bind(record.due_date.as_deref())
    .execute(pool)
    .await?;

    Ok(())
}

/// Rewrites every mutable column of the row.
pub async fn update_todo(pool: &SqlitePool, record: &TodoRecord) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE todo
        SET
            status = ?1,
            priority = ?2,
            todo = ?3,
            category = ?4,
            due_date = ?5
        WHERE id = ?6
        "#,
    )
    .bind(record.status.as_deref())
    .bind(record.priority.as_deref())
    .bind(record.todo.as_deref())
    .bind(record.category.as_deref())
    .bind(record.due_date.as_deref())
    .bind(record.id)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn delete_todo(pool: &SqlitePool, id: i64) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM todo
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
