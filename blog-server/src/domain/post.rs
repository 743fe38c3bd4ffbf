use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) body: String,
    pub(crate) category_id: Option<i64>,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: String,
    pub(crate) body: String,
    pub(crate) category_id: i64,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: require_title(self.title)?,
            body: require_body(self.body)?,
            category_id: validate_positive_i64("category_id", self.category_id)?,
        })
    }
}

/// Partial update: `None`, blank strings and a zero `category_id` mean
/// "leave the column as it is". Supplied text is kept verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct UpdatePostRequest {
    pub(crate) title: Option<String>,
    pub(crate) body: Option<String>,
    pub(crate) category_id: Option<i64>,
}

impl UpdatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let title = self.title.filter(|t| !is_blank(t));
        let body = self.body.filter(|b| !is_blank(b));
        let category_id = self.category_id.filter(|id| *id != 0);

        if title.is_none() && body.is_none() && category_id.is_none() {
            return Err(DomainError::Validation {
                field: "post",
                message: "at least one of title, body, category_id is required",
            });
        }

        Ok(Self {
            title,
            body,
            category_id: category_id
                .map(|id| validate_positive_i64("category_id", id))
                .transpose()?,
        })
    }
}

pub(crate) fn validate_positive_i64(field: &'static str, value: i64) -> Result<i64, DomainError> {
    if value <= 0 {
        return Err(DomainError::Validation {
            field,
            message: "must be > 0",
        });
    }
    Ok(value)
}

/// Blank text is rejected; accepted text is stored exactly as sent.
pub(crate) fn require_title(title: String) -> Result<String, DomainError> {
    if is_blank(&title) {
        return Err(DomainError::Validation {
            field: "title",
            message: "must not be empty",
        });
    }
    Ok(title)
}

fn require_body(body: String) -> Result<String, DomainError> {
    if is_blank(&body) {
        return Err(DomainError::Validation {
            field: "body",
            message: "must not be empty",
        });
    }
    Ok(body)
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::{CreatePostRequest, DomainError, UpdatePostRequest};

    #[test]
    fn create_post_request_validate_rejects_empty_title() {
        let req = CreatePostRequest {
            title: "   ".to_string(),
            body: "valid body".to_string(),
            category_id: 1,
        };

        let err = req.validate().expect_err("title must be rejected");
        assert_validation_field(err, "title");
    }

    #[test]
    fn create_post_request_validate_rejects_missing_category() {
        let req = CreatePostRequest {
            title: "title".to_string(),
            body: "body".to_string(),
            category_id: 0,
        };

        let err = req.validate().expect_err("category_id must be rejected");
        assert_validation_field(err, "category_id");
    }

    #[test]
    fn create_post_request_validate_keeps_text_verbatim() {
        let req = CreatePostRequest {
            title: " Hi".to_string(),
            body: "line one\n".to_string(),
            category_id: 3,
        };

        let validated = req.validate().expect("must validate");
        assert_eq!(validated.title, " Hi");
        assert_eq!(validated.body, "line one\n");
        assert_eq!(validated.category_id, 3);
    }

    #[test]
    fn update_post_request_validate_rejects_all_empty() {
        let req = UpdatePostRequest {
            title: Some("  ".to_string()),
            body: Some(String::new()),
            category_id: Some(0),
        };

        let err = req.validate().expect_err("empty patch must be rejected");
        assert_validation_field(err, "post");

        let err = UpdatePostRequest::default()
            .validate()
            .expect_err("missing fields must be rejected");
        assert_validation_field(err, "post");
    }

    #[test]
    fn update_post_request_validate_drops_empty_fields() {
        let req = UpdatePostRequest {
            title: Some("  new title ".to_string()),
            body: Some("   ".to_string()),
            category_id: Some(0),
        };

        let validated = req.validate().expect("title alone is a valid patch");
        assert_eq!(validated.title.as_deref(), Some("  new title "));
        assert!(validated.body.is_none());
        assert!(validated.category_id.is_none());
    }

    #[test]
    fn update_post_request_validate_rejects_negative_category() {
        let req = UpdatePostRequest {
            category_id: Some(-4),
            ..UpdatePostRequest::default()
        };

        let err = req.validate().expect_err("negative id must be rejected");
        assert_validation_field(err, "category_id");
    }

    fn assert_validation_field(err: DomainError, expected_field: &'static str) {
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, expected_field),
            _ => panic!("expected DomainError::Validation"),
        }
    }
}
