use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::error::DomainError;

/// A stored category row, without its derived posts.
#[derive(Debug, Clone)]
pub(crate) struct CategoryRecord {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub(crate) struct NewCategory {
    pub(crate) title: String,
}

#[async_trait]
pub(crate) trait CategoryRepository: Send + Sync {
    async fn create_category(&self, input: NewCategory) -> Result<CategoryRecord, DomainError>;
    async fn get_category(&self, id: i64) -> Result<Option<CategoryRecord>, DomainError>;
    async fn update_category_title(&self, id: i64, title: String) -> Result<bool, DomainError>;
    async fn delete_category(&self, id: i64) -> Result<bool, DomainError>;
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, DomainError>;
}
