use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::category::{Category, CreateCategoryRequest, UpdateCategoryRequest};
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppError, AppResult};
use crate::presentation::http::extract::{ItemId, LenientJson};
use crate::presentation::http::handlers::posts::PostDto;
use crate::presentation::http::handlers::{allowed_methods, request_host};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CategoryTitleDto {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub(crate) title: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CategoryDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) posts: Vec<PostDto>,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CategoryCollectionDto {
    pub(crate) uri: String,
    pub(crate) methods: Vec<String>,
    pub(crate) data: Vec<CategoryDto>,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            title: category.title,
            posts: category.posts.into_iter().map(PostDto::from).collect(),
            created_at: category.created_at,
        }
    }
}

pub(crate) fn category_location(id: i64) -> String {
    format!("/api/categories/{id}/")
}

#[utoipa::path(
    get,
    path = "/api/categories/",
    tag = "categories",
    responses(
        (status = 200, description = "Categories listed with their posts", body = CategoryCollectionDto),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_categories(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<(StatusCode, Json<CategoryCollectionDto>)> {
    let categories = state.blog_service.list_categories().await?;

    let body = CategoryCollectionDto {
        uri: format!("{}/api/categories/", request_host(&headers)),
        methods: allowed_methods(),
        data: categories.into_iter().map(CategoryDto::from).collect(),
    };
    Ok((StatusCode::OK, Json(body)))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}/",
    tag = "categories",
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryDto),
        (status = 404, description = "Category not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_category(
    State(state): State<AppState>,
    ItemId(id): ItemId,
) -> AppResult<(StatusCode, Json<CategoryDto>)> {
    let id = id.ok_or(AppError::NotFound)?;
    let category = state.blog_service.get_category(id).await?;

    Ok((StatusCode::OK, Json(CategoryDto::from(category))))
}

#[utoipa::path(
    post,
    path = "/api/categories/",
    tag = "categories",
    request_body = CategoryTitleDto,
    responses(
        (status = 201, description = "Category created, empty body"),
        (status = 422, description = "Missing title"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_category(
    State(state): State<AppState>,
    LenientJson(dto): LenientJson<CategoryTitleDto>,
) -> AppResult<(StatusCode, [(header::HeaderName, String); 1])> {
    dto.validate()?;

    let created = state
        .blog_service
        .create_category(CreateCategoryRequest { title: dto.title })
        .await?;
    info!(category_id = created.id, "category created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, category_location(created.id))],
    ))
}

#[utoipa::path(
    patch,
    path = "/api/categories/{id}/",
    tag = "categories",
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    request_body = CategoryTitleDto,
    responses(
        (status = 204, description = "Title updated (also for unknown ids)"),
        (status = 422, description = "Missing title"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_category(
    State(state): State<AppState>,
    ItemId(id): ItemId,
    LenientJson(dto): LenientJson<CategoryTitleDto>,
) -> AppResult<StatusCode> {
    dto.validate()?;
    let req = UpdateCategoryRequest { title: dto.title };

    match id {
        Some(id) => state.blog_service.update_category(id, req).await?,
        None => {
            req.validate()?;
        }
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}/",
    tag = "categories",
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 204, description = "Category deleted (also for unknown ids)"),
        (status = 409, description = "Posts still reference the category"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_category(
    State(state): State<AppState>,
    ItemId(id): ItemId,
) -> AppResult<StatusCode> {
    if let Some(id) = id {
        state.blog_service.delete_category(id).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}
