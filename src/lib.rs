pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Builds the full application router over an already opened pool.
pub fn app(state: AppState) -> Router {
    routes::routes()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Opens the storage pool. The `todo` table is expected to exist.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new().connect(database_url).await
}
