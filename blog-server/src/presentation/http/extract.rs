use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{StatusCode, request::Parts},
};
use serde::de::DeserializeOwned;

use crate::presentation::http::app_error::AppError;

/// JSON body that does not insist on a `Content-Type` header.
///
/// Any body that fails to parse is reported as unprocessable, like a body
/// with missing fields.
#[derive(Debug)]
pub(crate) struct LenientJson<T>(pub(crate) T);

impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge
            } else {
                AppError::MalformedBody(rejection.body_text())
            }
        })?;

        serde_json::from_slice(&bytes)
            .map(LenientJson)
            .map_err(|err| AppError::MalformedBody(err.to_string()))
    }
}

/// `{id}` path segment. A segment that is not an integer cannot match any
/// row, so it is carried as `None` and treated like an unknown id.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ItemId(pub(crate) Option<i64>);

impl<S> FromRequestParts<S> for ItemId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let id = Path::<i64>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|Path(id)| id);
        Ok(Self(id))
    }
}
