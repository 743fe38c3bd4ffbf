use std::sync::Arc;

use sqlx::SqlitePool;

use crate::application::blog_service::BlogService;
use crate::data::repositories::sqlite::category_repository::SqliteCategoryRepository;
use crate::data::repositories::sqlite::post_repository::SqlitePostRepository;

pub(crate) mod http;

pub(crate) type SqliteBlogService = BlogService<SqlitePostRepository, SqliteCategoryRepository>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) blog_service: Arc<SqliteBlogService>,
}

impl AppState {
    pub(crate) fn new(blog_service: Arc<SqliteBlogService>) -> Self {
        Self { blog_service }
    }

    /// Wires the SQLite repositories and the service around one pool.
    pub(crate) fn from_pool(pool: SqlitePool) -> Self {
        let posts = SqlitePostRepository::new(pool.clone());
        let categories = SqliteCategoryRepository::new(pool);
        Self::new(Arc::new(BlogService::new(posts, categories)))
    }
}
