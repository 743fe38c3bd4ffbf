use crate::data::category_repository::{CategoryRecord, CategoryRepository, NewCategory};
use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::category::{Category, CreateCategoryRequest, UpdateCategoryRequest};
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, Post, UpdatePostRequest};

pub(crate) struct BlogService<P: PostRepository, C: CategoryRepository> {
    posts: P,
    categories: C,
}

impl<P: PostRepository, C: CategoryRepository> BlogService<P, C> {
    pub(crate) fn new(posts: P, categories: C) -> Self {
        Self { posts, categories }
    }

    pub(crate) async fn create_post(&self, req: CreatePostRequest) -> Result<Post, DomainError> {
        let req = req.validate()?;

        let new_post = NewPost {
            title: req.title,
            body: req.body,
            category_id: req.category_id,
        };
        self.posts.create_post(new_post).await
    }

    pub(crate) async fn get_post(&self, id: i64) -> Result<Post, DomainError> {
        self.posts
            .get_post(id)
            .await?
            .ok_or(DomainError::NotFound(format!("post id: {id}")))
    }

    /// Applies the non-empty fields of `req`. A missing post is not an error.
    pub(crate) async fn update_post(
        &self,
        post_id: i64,
        req: UpdatePostRequest,
    ) -> Result<(), DomainError> {
        let req = req.validate()?;
        let patch = PostPatch {
            title: req.title,
            body: req.body,
            category_id: req.category_id,
        };
        self.posts.update_post(post_id, patch).await?;
        Ok(())
    }

    pub(crate) async fn delete_post(&self, post_id: i64) -> Result<(), DomainError> {
        self.posts.delete_post(post_id).await?;
        Ok(())
    }

    pub(crate) async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.posts.list_posts().await
    }

    pub(crate) async fn create_category(
        &self,
        req: CreateCategoryRequest,
    ) -> Result<Category, DomainError> {
        let req = req.validate()?;
        let record = self
            .categories
            .create_category(NewCategory { title: req.title })
            .await?;

        Category::new(record.id, record.title, Vec::new(), record.created_at)
            .map_err(|err| DomainError::Unexpected(err.to_string()))
    }

    pub(crate) async fn get_category(&self, id: i64) -> Result<Category, DomainError> {
        let record = self
            .categories
            .get_category(id)
            .await?
            .ok_or(DomainError::NotFound(format!("category id: {id}")))?;

        self.with_posts(record).await
    }

    pub(crate) async fn update_category(
        &self,
        category_id: i64,
        req: UpdateCategoryRequest,
    ) -> Result<(), DomainError> {
        let req = req.validate()?;
        self.categories
            .update_category_title(category_id, req.title)
            .await?;
        Ok(())
    }

    pub(crate) async fn delete_category(&self, category_id: i64) -> Result<(), DomainError> {
        self.categories.delete_category(category_id).await?;
        Ok(())
    }

    pub(crate) async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        let records = self.categories.list_categories().await?;

        let mut categories = Vec::with_capacity(records.len());
        for record in records {
            categories.push(self.with_posts(record).await?);
        }
        Ok(categories)
    }

    async fn with_posts(&self, record: CategoryRecord) -> Result<Category, DomainError> {
        let posts = self.posts.list_posts_by_category(record.id).await?;

        Category::new(record.id, record.title, posts, record.created_at)
            .map_err(|err| DomainError::Unexpected(err.to_string()))
    }
}
