use axum::{
    Json,
    http::{HeaderMap, header},
};
use serde::Serialize;
use utoipa::ToSchema;

pub(crate) mod categories;
pub(crate) mod posts;

const ALLOWED_METHODS: [&str; 4] = ["GET", "POST", "PATCH", "DELETE"];

pub(crate) fn allowed_methods() -> Vec<String> {
    ALLOWED_METHODS.iter().map(|method| method.to_string()).collect()
}

/// Value of the `Host` header, empty when the client sent none.
pub(crate) fn request_host(headers: &HeaderMap) -> &str {
    headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct EndpointsDto {
    pub(crate) posts: String,
    pub(crate) categories: String,
}

#[utoipa::path(
    get,
    path = "/api/",
    tag = "index",
    responses(
        (status = 200, description = "Collection URIs", body = EndpointsDto)
    )
)]
pub(crate) async fn index(headers: HeaderMap) -> Json<EndpointsDto> {
    let host = request_host(&headers);
    Json(EndpointsDto {
        posts: format!("{host}/api/posts/"),
        categories: format!("{host}/api/categories/"),
    })
}

#[derive(Debug, Serialize)]
pub(crate) struct HealthzResponse {
    status: &'static str,
}

pub(crate) async fn health_handler() -> Json<HealthzResponse> {
    Json(HealthzResponse { status: "ok" })
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, header};

    use super::{allowed_methods, request_host};

    #[test]
    fn request_host_reads_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("blog.test:8000"));
        assert_eq!(request_host(&headers), "blog.test:8000");
    }

    #[test]
    fn request_host_is_empty_without_header() {
        assert_eq!(request_host(&HeaderMap::new()), "");
    }

    #[test]
    fn envelope_advertises_all_verbs() {
        assert_eq!(allowed_methods(), vec!["GET", "POST", "PATCH", "DELETE"]);
    }
}
