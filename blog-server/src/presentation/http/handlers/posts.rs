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

use crate::domain::post::{CreatePostRequest, Post, UpdatePostRequest};
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppError, AppResult};
use crate::presentation::http::extract::{ItemId, LenientJson};
use crate::presentation::http::handlers::{allowed_methods, request_host};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreatePostDto {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub(crate) title: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub(crate) body: String,
    #[serde(default)]
    #[validate(range(min = 1))]
    pub(crate) category_id: i64,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub(crate) struct UpdatePostDto {
    pub(crate) title: Option<String>,
    pub(crate) body: Option<String>,
    pub(crate) category_id: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) body: String,
    pub(crate) category_id: Option<i64>,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostCollectionDto {
    pub(crate) uri: String,
    pub(crate) methods: Vec<String>,
    pub(crate) data: Vec<PostDto>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            body: post.body,
            category_id: post.category_id,
            created_at: post.created_at,
        }
    }
}

pub(crate) fn post_location(id: i64) -> String {
    format!("/api/posts/{id}/")
}

#[utoipa::path(
    get,
    path = "/api/posts/",
    tag = "posts",
    responses(
        (status = 200, description = "Posts listed, newest first", body = PostCollectionDto),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<(StatusCode, Json<PostCollectionDto>)> {
    let posts = state.blog_service.list_posts().await?;

    let body = PostCollectionDto {
        uri: format!("{}/api/posts/", request_host(&headers)),
        methods: allowed_methods(),
        data: posts.into_iter().map(PostDto::from).collect(),
    };
    Ok((StatusCode::OK, Json(body)))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}/",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post found", body = PostDto),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    ItemId(id): ItemId,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let id = id.ok_or(AppError::NotFound)?;
    let result = state.blog_service.get_post(id).await?;

    Ok((StatusCode::OK, Json(PostDto::from(result))))
}

#[utoipa::path(
    post,
    path = "/api/posts/",
    tag = "posts",
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created, empty body"),
        (status = 422, description = "Missing title, body or category_id, or unknown category"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    LenientJson(dto): LenientJson<CreatePostDto>,
) -> AppResult<(StatusCode, [(header::HeaderName, String); 1])> {
    dto.validate()?;
    let req = CreatePostRequest {
        title: dto.title,
        body: dto.body,
        category_id: dto.category_id,
    };

    let created = state.blog_service.create_post(req).await?;
    info!(post_id = created.id, "post created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, post_location(created.id))],
    ))
}

#[utoipa::path(
    patch,
    path = "/api/posts/{id}/",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body = UpdatePostDto,
    responses(
        (status = 204, description = "Supplied fields updated (also for unknown ids)"),
        (status = 422, description = "No field supplied, or unknown category"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    ItemId(id): ItemId,
    LenientJson(dto): LenientJson<UpdatePostDto>,
) -> AppResult<StatusCode> {
    let req = UpdatePostRequest {
        title: dto.title,
        body: dto.body,
        category_id: dto.category_id,
    };

    match id {
        Some(id) => state.blog_service.update_post(id, req).await?,
        None => {
            req.validate()?;
        }
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}/",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 204, description = "Post deleted (also for unknown ids)"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    ItemId(id): ItemId,
) -> AppResult<StatusCode> {
    if let Some(id) = id {
        state.blog_service.delete_post(id).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}
