use axum::Router;
use axum::http::Uri;
use axum::response::Redirect;
use axum::routing::{any, get};

use crate::presentation::AppState;
use crate::presentation::http::app_error::AppError;
use crate::presentation::http::handlers::{health_handler, index};

pub(crate) mod categories;
pub(crate) mod posts;

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/api/", get(index))
        .merge(posts::router())
        .merge(categories::router())
        .route("/api", any(add_trailing_slash))
        .route("/api/posts", any(add_trailing_slash))
        .route("/api/posts/{id}", any(add_trailing_slash))
        .route("/api/categories", any(add_trailing_slash))
        .route("/api/categories/{id}", any(add_trailing_slash))
        .fallback(not_found)
        .with_state(state)
}

/// Collection and item paths are canonical with a trailing slash; 308 keeps the method and body.
async fn add_trailing_slash(uri: Uri) -> Redirect {
    let target = match uri.query() {
        Some(query) => format!("{}/?{query}", uri.path()),
        None => format!("{}/", uri.path()),
    };
    Redirect::permanent(&target)
}

async fn not_found() -> AppError {
    AppError::NotFound
}
