use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{ServiceError, ServiceResult, ValidationError};
use crate::state::AppState;
use super::{
    format_agenda_date, parse_agenda_date, queries, updated_column, AgendaQuery,
    CreateTodoRequest, ListTodosQuery, UpdateTodoRequest,
};

/// List todos matching the search text and filters. Runs after the list
/// query validator.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListTodosQuery>,
) -> ServiceResult<impl IntoResponse> {
    let todos = queries::list_todos(&state.db, &query).await?;
    Ok(Json(todos))
}

/// Get a single todo. An unknown id answers 200 with an empty body.
pub async fn get(
    State(state): State<AppState>,
    Path(todo_id): Path<i64>,
) -> ServiceResult<Response> {
    match queries::get_todo(&state.db, todo_id).await? {
        Some(todo) => Ok(Json(todo).into_response()),
        None => Ok(StatusCode::OK.into_response()),
    }
}

/// Full rows of the todos due on the requested day. The date is normalized
/// to `yyyy-MM-dd` before matching.
pub async fn agenda(
    State(state): State<AppState>,
    Query(query): Query<AgendaQuery>,
) -> ServiceResult<impl IntoResponse> {
    let date = query
        .date
        .as_deref()
        .and_then(parse_agenda_date)
        .ok_or(ValidationError::DueDate)?;
    let due_date = format_agenda_date(date);
    tracing::debug!(%due_date, "agenda lookup");

    let todos = queries::agenda(&state.db, &due_date).await?;
    Ok(Json(todos))
}

/// Insert a todo with the caller's id; absent enum fields and due date take
/// their defaults. Runs after the write-body validator.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateTodoRequest>,
) -> ServiceResult<impl IntoResponse> {
    let record = body.into_record();
    queries::create_todo(&state.db, &record).await?;
    tracing::info!(id = record.id, "todo added");

    Ok("Todo Successfully Added")
}

/// Partial update: absent fields keep their stored values, then the whole row
/// is rewritten.
pub async fn update(
    State(state): State<AppState>,
    Path(todo_id): Path<i64>,
    Json(body): Json<UpdateTodoRequest>,
) -> ServiceResult<impl IntoResponse> {
    let existing = queries::get_record(&state.db, todo_id)
        .await?
        .ok_or(ServiceError::TodoNotFound)?;

    let column = updated_column(&body);
    let merged = body.merge_into(existing);
    queries::update_todo(&state.db, &merged).await?;

    Ok(format!("{} Updated", column))
}

/// Delete by id. Succeeds whether or not a row matched.
pub async fn delete(
    State(state): State<AppState>,
    Path(todo_id): Path<i64>,
) -> ServiceResult<impl IntoResponse> {
    let deleted = queries::delete_todo(&state.db, todo_id).await?;
    if deleted == 0 {
        tracing::debug!(id = todo_id, "delete matched no row");
    }

    Ok("Todo Deleted")
}
