use axum::{
    middleware,
    routing::{get, post, put, MethodRouter},
    Router,
};

mod health;
mod middleware_validate;
pub mod todos;

pub use health::health;

use crate::routes::middleware_validate::{require_valid_body, require_valid_query};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let todo_collection: MethodRouter<AppState> = get(todos::routes::list)
        .layer(middleware::from_fn(require_valid_query))
        .merge(post(todos::routes::create).layer(middleware::from_fn(require_valid_body)));

    let todo_item: MethodRouter<AppState> = get(todos::routes::get)
        .delete(todos::routes::delete)
        .merge(put(todos::routes::update).layer(middleware::from_fn(require_valid_body)));

    let agenda: MethodRouter<AppState> = get(todos::routes::agenda);

    // every path answers with and without the trailing slash
    Router::new()
        .route("/health", get(health))
        .route("/todos", todo_collection.clone())
        .route("/todos/", todo_collection)
        .route("/todos/{todo_id}", todo_item.clone())
        .route("/todos/{todo_id}/", todo_item)
        .route("/agenda", agenda.clone())
        .route("/agenda/", agenda)
}
