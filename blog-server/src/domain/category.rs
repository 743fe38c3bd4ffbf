use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::post::{Post, require_title, validate_positive_i64};

/// A category together with the posts that reference it, newest first.
///
/// `posts` is derived at read time and never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Category {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) posts: Vec<Post>,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreateCategoryRequest {
    pub(crate) title: String,
}

impl CreateCategoryRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: require_title(self.title)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UpdateCategoryRequest {
    pub(crate) title: String,
}

impl UpdateCategoryRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: require_title(self.title)?,
        })
    }
}

impl Category {
    /// Assembles a stored category; its title is not re-validated.
    pub(crate) fn new(
        id: i64,
        title: impl Into<String>,
        posts: Vec<Post>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_positive_i64("id", id)?;

        if posts.iter().any(|post| post.category_id != Some(id)) {
            return Err(DomainError::Validation {
                field: "posts",
                message: "must all belong to the category",
            });
        }

        Ok(Self {
            id,
            title: title.into(),
            posts,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{Category, CreateCategoryRequest, DomainError, UpdateCategoryRequest};
    use crate::domain::post::Post;

    fn post_in(id: i64, category_id: i64) -> Post {
        Post {
            id,
            title: "Hi".to_string(),
            body: "World".to_string(),
            category_id: Some(category_id),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn create_category_request_validate_keeps_title_verbatim() {
        let req = CreateCategoryRequest {
            title: "  Tech ".to_string(),
        };

        let validated = req.validate().expect("must validate");
        assert_eq!(validated.title, "  Tech ");
    }

    #[test]
    fn update_category_request_validate_rejects_blank_title() {
        let req = UpdateCategoryRequest {
            title: " \t ".to_string(),
        };

        let err = req.validate().expect_err("blank title must be rejected");
        assert!(matches!(err, DomainError::Validation { field: "title", .. }));
    }

    #[test]
    fn category_new_accepts_own_posts() {
        let post = post_in(5, 2);

        let category =
            Category::new(2, "Tech", vec![post], Utc::now()).expect("category must be built");
        assert_eq!(category.posts.len(), 1);
        assert_eq!(category.title, "Tech");
    }

    #[test]
    fn category_new_rejects_foreign_posts() {
        let post = post_in(5, 3);

        let err = Category::new(2, "Tech", vec![post], Utc::now())
            .expect_err("post of another category must be rejected");
        assert!(matches!(err, DomainError::Validation { field: "posts", .. }));
    }

    #[test]
    fn category_new_accepts_blank_stored_title() {
        let category = Category::new(4, "", Vec::new(), Utc::now())
            .expect("stored rows are taken as they are");
        assert_eq!(category.title, "");
    }
}
