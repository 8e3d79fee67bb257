mod iso_date;
pub mod queries;
pub mod routes;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub use iso_date::parse_due_date;

// MODELS

/// Projection returned by the list and get-by-id endpoints.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    pub id: i64,
    pub todo: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "dueDate")]
    pub due_date: Option<String>,
}

/// Full stored row, serialized with the raw column names. Text columns are
/// nullable in the pre-existing table, so NULL is served as `null`.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct TodoRecord {
    pub id: i64,
    pub todo: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub due_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListTodosQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub search_q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AgendaQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub id: i64,
    pub todo: String,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "dueDate")]
    pub due_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub todo: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "dueDate")]
    pub due_date: Option<String>,
}

/// The subset of a write body the validator looks at.
#[derive(Debug, Default, Deserialize)]
pub struct WriteFields {
    pub priority: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "dueDate")]
    pub due_date: Option<String>,
}

// ENUMERATIONS

pub const PRIORITIES: [&str; 3] = ["HIGH", "MEDIUM", "LOW"];
pub const STATUSES: [&str; 3] = ["TO DO", "IN PROGRESS", "DONE"];
pub const CATEGORIES: [&str; 3] = ["WORK", "HOME", "LEARNING"];

pub const DEFAULT_PRIORITY: &str = "MEDIUM";
pub const DEFAULT_STATUS: &str = "DONE";
pub const DEFAULT_CATEGORY: &str = "WORK";
pub const DEFAULT_DUE_DATE: &str = "2021-01-21";

const AGENDA_DATE_FORMAT: &str = "%Y-%m-%d";

// HELPER FUNCTIONS

/// Checks enum membership for the three enumerated fields. Every check runs;
/// when several fail the last failure is the one reported.
pub fn validate_enums(priority: &str, status: &str, category: &str) -> Result<(), ValidationError> {
    let mut outcome = Ok(());

    if !PRIORITIES.contains(&priority) {
        outcome = Err(ValidationError::Priority);
    }
    if !STATUSES.contains(&status) {
        outcome = Err(ValidationError::Status);
    }
    if !CATEGORIES.contains(&category) {
        outcome = Err(ValidationError::Category);
    }

    outcome
}

/// Applies the list-query defaults, then checks enum membership.
pub fn validate_list_query(query: &ListTodosQuery) -> Result<(), ValidationError> {
    validate_enums(
        query.priority.as_deref().unwrap_or(DEFAULT_PRIORITY),
        query.status.as_deref().unwrap_or(DEFAULT_STATUS),
        query.category.as_deref().unwrap_or(DEFAULT_CATEGORY),
    )
}

/// Applies the write-body defaults, then checks enum membership and that the
/// due date parses. A bad due date is checked last, so it wins.
pub fn validate_write_fields(fields: &WriteFields) -> Result<(), ValidationError> {
    let enums = validate_enums(
        fields.priority.as_deref().unwrap_or(DEFAULT_PRIORITY),
        fields.status.as_deref().unwrap_or(DEFAULT_STATUS),
        fields.category.as_deref().unwrap_or(DEFAULT_CATEGORY),
    );

    let due_date = fields.due_date.as_deref().unwrap_or(DEFAULT_DUE_DATE);
    if parse_due_date(due_date).is_none() {
        return Err(ValidationError::DueDate);
    }

    enums
}

/// Parses the agenda `date` parameter. More lenient than `parse_due_date`:
/// surrounding whitespace, one-digit months and days, and slash-separated
/// dates are accepted.
pub fn parse_agenda_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    for format in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(datetime.date());
        }
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.date_naive());
    }

    parse_due_date(raw)
}

/// Normalizes an agenda date to the stored `yyyy-MM-dd` form.
pub fn format_agenda_date(date: NaiveDate) -> String {
    date.format(AGENDA_DATE_FORMAT).to_string()
}

fn is_present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|v| !v.is_empty())
}

/// Names the field reported in the update response: the last one present in
/// the body, checked in a fixed order.
pub fn updated_column(body: &UpdateTodoRequest) -> &'static str {
    let mut column = "";

    if is_present(&body.status) {
        column = "Status";
    }
    if is_present(&body.priority) {
        column = "Priority";
    }
    if is_present(&body.todo) {
        column = "Todo";
    }
    if is_present(&body.category) {
        column = "Category";
    }
    if is_present(&body.due_date) {
        column = "Due Date";
    }

    column
}

impl UpdateTodoRequest {
    /// Fills every absent field from the stored row.
    pub fn merge_into(self, existing: TodoRecord) -> TodoRecord {
        TodoRecord {
            id: existing.id,
            todo: self.todo.or(existing.todo),
            priority: self.priority.or(existing.priority),
            status: self.status.or(existing.status),
            category: self.category.or(existing.category),
            due_date: self.due_date.or(existing.due_date),
        }
    }
}

impl CreateTodoRequest {
    pub fn into_record(self) -> TodoRecord {
        TodoRecord {
            id: self.id,
            todo: Some(self.todo),
            priority: self.priority.or_else(|| Some(DEFAULT_PRIORITY.to_string())),
            status: self.status.or_else(|| Some(DEFAULT_STATUS.to_string())),
            category: self.category.or_else(|| Some(DEFAULT_CATEGORY.to_string())),
            due_date: self.due_date.or_else(|| Some(DEFAULT_DUE_DATE.to_string())),
        }
    }
}
