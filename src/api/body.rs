use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON request body that does not insist on a `Content-Type` header.
///
/// Any read or decode failure rejects the request with a single
/// `ApiError` envelope, so a handler only ever runs with a decoded body.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::payload_too_large(rejection.body_text())
            } else {
                ApiError::bad_request(rejection.body_text())
            }
        })?;

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| ApiError::invalid_json(format!("Invalid request body: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::envelope::UserNameOperation;
    use axum::body::Body;

    async fn decode(body: &'static str) -> Result<JsonBody<UserNameOperation>, ApiError> {
        let req = axum::http::Request::builder().uri("/").body(Body::from(body)).unwrap();
        JsonBody::<UserNameOperation>::from_request(req, &()).await
    }

    #[tokio::test]
    async fn decodes_without_content_type() {
        let JsonBody(op) = decode(r#"{"UserName":"Alfie"}"#).await.unwrap();
        assert_eq!(op.user_name, "Alfie");
    }

    #[tokio::test]
    async fn rejects_malformed_json() {
        let err = decode("{not json").await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.message().starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn rejects_empty_body() {
        let err = decode("").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidJson(_)));
    }
}
