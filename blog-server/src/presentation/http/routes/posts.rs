use axum::Router;
use axum::routing::get;

use crate::presentation::AppState;
use crate::presentation::http::handlers::posts::{
    create_post, delete_post, get_post, list_posts, update_post,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/api/posts/", get(list_posts).post(create_post))
        .route("/api/posts/{id}/", get(get_post).patch(update_post).delete(delete_post))
}
