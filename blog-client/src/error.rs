use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `blog-client`.
pub enum BlogClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Запрошенный ресурс не найден.
    #[error("not found")]
    NotFound,

    /// Сервер отклонил запрос (отсутствуют поля, неизвестная категория и т.п.).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Операция конфликтует с текущими данными (категория ещё содержит посты).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Сбой на стороне сервера (статус 5xx).
    #[error("server error: {0}")]
    Server(String),
}

/// Результат операций `blog-client`.
pub type BlogClientResult<T> = Result<T, BlogClientError>;

impl BlogClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| format!("http status {status}"));
        match status {
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            reqwest::StatusCode::CONFLICT => Self::Conflict(message),
            _ if status.is_server_error() => Self::Server(message),
            _ => Self::InvalidRequest(message),
        }
    }
}
