use axum::{
    body::{to_bytes, Body},
    extract::{Query, Request},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ServiceError;
use crate::routes::todos::{validate_list_query, validate_write_fields, ListTodosQuery, WriteFields};

// Same ceiling axum applies to `Json` bodies.
const BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Defaults and validates the enum filters of a list query. On failure the
/// handler is not run.
pub async fn require_valid_query(req: Request, next: Next) -> Result<Response, Response> {
    let Query(query) = Query::<ListTodosQuery>::try_from_uri(req.uri())
        .map_err(|rejection| rejection.into_response())?;

    validate_list_query(&query).map_err(|e| ServiceError::from(e).into_response())?;

    Ok(next.run(req).await)
}

/// Defaults and validates the enum fields and due date of a create/update
/// body. The body is buffered and handed on unchanged; a body that is not a
/// JSON object is left for the handler's extractor to reject.
pub async fn require_valid_body(req: Request, next: Next) -> Result<Response, Response> {
    let (parts, body) = req.into_parts();
    let bytes = to_bytes(body, BODY_LIMIT)
        .await
        .map_err(|_| (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response())?;

    if let Ok(fields) = serde_json::from_slice::<WriteFields>(&bytes) {
        validate_write_fields(&fields).map_err(|e| ServiceError::from(e).into_response())?;
    }

    let req = Request::from_parts(parts, Body::from(bytes));
    Ok(next.run(req).await)
}
