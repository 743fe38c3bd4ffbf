use reqwest::{Client, Method, RequestBuilder, Response, header};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;

use crate::error::{BlogClientError, BlogClientResult};
use crate::models::{Category, Collection, Endpoints, Post, PostPatch};

#[derive(Debug, Serialize)]
struct CreatePostRequestDto<'a> {
    title: &'a str,
    body: &'a str,
    category_id: i64,
}

#[derive(Debug, Serialize)]
struct CategoryTitleDto<'a> {
    title: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    message: Option<String>,
}

#[derive(Debug, Clone)]
/// HTTP-клиент для работы с REST API `blog-server`.
pub struct BlogClient {
    base_url: String,
    client: Client,
}

impl BlogClient {
    /// Создаёт клиент с базовым URL сервера, например `http://127.0.0.1:8000`.
    pub fn new(base_url: impl Into<String>) -> BlogClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Базовый URL, с которым работает клиент.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.endpoint(path))
    }

    async fn decode_error(response: Response) -> BlogClientError {
        let status = response.status();
        let message = response
            .json::<ErrorResponseDto>()
            .await
            .ok()
            .and_then(|body| body.message);
        BlogClientError::from_http_status(status, message)
    }

    /// Отправляет запрос и превращает неуспешный статус в `BlogClientError`.
    async fn execute(request: RequestBuilder) -> BlogClientResult<Response> {
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> BlogClientResult<T> {
        let response = Self::execute(self.request(Method::GET, path)).await?;
        Ok(response.json::<T>().await?)
    }

    /// Возвращает адреса коллекций (`GET /api/`).
    pub async fn endpoints(&self) -> BlogClientResult<Endpoints> {
        self.get_json("/api/").await
    }

    /// Список всех постов, новые первыми.
    pub async fn list_posts(&self) -> BlogClientResult<Collection<Post>> {
        self.get_json("/api/posts/").await
    }

    /// Получает пост по идентификатору.
    pub async fn get_post(&self, id: i64) -> BlogClientResult<Post> {
        self.get_json(&post_path(id)).await
    }

    /// Создаёт пост в существующей категории.
    ///
    /// Сервер отвечает пустым телом, поэтому возвращается только id из
    /// заголовка `Location` (если он есть).
    pub async fn create_post(
        &self,
        title: &str,
        body: &str,
        category_id: i64,
    ) -> BlogClientResult<Option<i64>> {
        let payload = CreatePostRequestDto {
            title,
            body,
            category_id,
        };
        let response =
            Self::execute(self.request(Method::POST, "/api/posts/").json(&payload)).await?;
        Ok(location_id(&response))
    }

    /// Обновляет только заданные в `patch` поля поста.
    pub async fn update_post(&self, id: i64, patch: &PostPatch) -> BlogClientResult<()> {
        Self::execute(self.request(Method::PATCH, &post_path(id)).json(patch)).await?;
        Ok(())
    }

    /// Удаляет пост. Удаление несуществующего поста тоже успешно.
    pub async fn delete_post(&self, id: i64) -> BlogClientResult<()> {
        Self::execute(self.request(Method::DELETE, &post_path(id))).await?;
        Ok(())
    }

    /// Список категорий вместе с их постами.
    pub async fn list_categories(&self) -> BlogClientResult<Collection<Category>> {
        self.get_json("/api/categories/").await
    }

    /// Получает категорию по идентификатору.
    pub async fn get_category(&self, id: i64) -> BlogClientResult<Category> {
        self.get_json(&category_path(id)).await
    }

    /// Создаёт категорию и возвращает её id из заголовка `Location`.
    pub async fn create_category(&self, title: &str) -> BlogClientResult<Option<i64>> {
        let payload = CategoryTitleDto { title };
        let response =
            Self::execute(self.request(Method::POST, "/api/categories/").json(&payload)).await?;
        Ok(location_id(&response))
    }

    /// Переименовывает категорию.
    pub async fn update_category(&self, id: i64, title: &str) -> BlogClientResult<()> {
        let payload = CategoryTitleDto { title };
        Self::execute(self.request(Method::PATCH, &category_path(id)).json(&payload)).await?;
        Ok(())
    }

    /// Удаляет категорию.
    ///
    /// Если в категории остались посты, сервер отвечает `409` и метод
    /// возвращает `BlogClientError::Conflict`.
    pub async fn delete_category(&self, id: i64) -> BlogClientResult<()> {
        Self::execute(self.request(Method::DELETE, &category_path(id))).await?;
        Ok(())
    }
}

fn post_path(id: i64) -> String {
    format!("/api/posts/{id}/")
}

fn category_path(id: i64) -> String {
    format!("/api/categories/{id}/")
}

fn location_id(response: &Response) -> Option<i64> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_location_id)
}

/// Последний сегмент пути вида `/api/posts/7/`.
fn parse_location_id(location: &str) -> Option<i64> {
    location
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
}
