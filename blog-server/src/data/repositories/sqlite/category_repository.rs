use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::warn;

use crate::data::category_repository::{CategoryRecord, CategoryRepository, NewCategory};
use crate::domain::error::DomainError;

use super::is_foreign_key_error;

#[derive(Debug, Clone)]
pub(crate) struct SqliteCategoryRepository {
    pool: SqlitePool,
}

impl SqliteCategoryRepository {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    title: String,
    created_at: DateTime<Utc>,
}

impl From<CategoryRow> for CategoryRecord {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl CategoryRepository for SqliteCategoryRepository {
    async fn create_category(&self, input: NewCategory) -> Result<CategoryRecord, DomainError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (title)
            VALUES (?1)
            RETURNING id, title, created_at
            "#,
        )
        .bind(&input.title)
        .fetch_one(&self.pool)
        .await
        .map_err(map_category_db_error)?;

        Ok(row.into())
    }

    async fn get_category(&self, id: i64) -> Result<Option<CategoryRecord>, DomainError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT
            id,
            title,
            created_at
            FROM categories
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_category_db_error)?;

        Ok(row.map(CategoryRecord::from))
    }

    async fn update_category_title(&self, id: i64, title: String) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE categories
            SET title = ?2
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(title)
        .execute(&self.pool)
        .await
        .map_err(map_category_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_category(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM categories
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|err| map_category_delete_error(id, err))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, DomainError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT
                id,
                title,
                created_at
            FROM categories
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_category_db_error)?;

        Ok(rows.into_iter().map(CategoryRecord::from).collect())
    }
}

fn map_category_delete_error(id: i64, err: sqlx::Error) -> DomainError {
    if is_foreign_key_error(&err) {
        warn!(category_id = id, "refusing to delete category with posts");
        return DomainError::Conflict(format!("category id: {id} still has posts"));
    }
    map_category_db_error(err)
}

fn map_category_db_error(err: sqlx::Error) -> DomainError {
    DomainError::Unexpected(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::SqliteCategoryRepository;
    use crate::data::category_repository::{CategoryRepository, NewCategory};
    use crate::domain::error::DomainError;
    use crate::infrastructure::database::{create_memory_pool, run_migrations};

    async fn repository() -> (SqliteCategoryRepository, sqlx::SqlitePool) {
        let pool = create_memory_pool().await.expect("pool must open");
        run_migrations(&pool).await.expect("migrations must run");
        (SqliteCategoryRepository::new(pool.clone()), pool)
    }

    #[tokio::test]
    async fn delete_blocked_by_posts_is_a_conflict() {
        let (repo, pool) = repository().await;
        let category = repo
            .create_category(NewCategory {
                title: "Tech".to_string(),
            })
            .await
            .expect("category must be created");
        sqlx::query("INSERT INTO posts (title, body, category_id) VALUES ('t', 'b', ?1)")
            .bind(category.id)
            .execute(&pool)
            .await
            .expect("post must be inserted");

        let err = repo
            .delete_category(category.id)
            .await
            .expect_err("referenced category must not be deleted");
        assert!(matches!(err, DomainError::Conflict(_)));

        let still_there = repo
            .get_category(category.id)
            .await
            .expect("lookup must succeed");
        assert!(still_there.is_some());
    }

    #[tokio::test]
    async fn delete_of_unknown_category_reports_no_rows() {
        let (repo, _pool) = repository().await;
        let deleted = repo.delete_category(9).await.expect("delete must succeed");
        assert!(!deleted);
    }

    #[tokio::test]
    async fn blank_stored_title_is_still_listed() {
        let (repo, pool) = repository().await;
        sqlx::query("INSERT INTO categories (title) VALUES ('')")
            .execute(&pool)
            .await
            .expect("row must be inserted");

        let listed = repo.list_categories().await.expect("list must succeed");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "");
    }
}
