use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::shopify::ShopifyError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// Remote order/page API call failed. The upstream message is surfaced
    /// verbatim so the caller can diagnose; retrying is the caller's call.
    #[error("Upstream failure: {0}")]
    Upstream(String),

    /// The shipping id could not be barcode-encoded. A local data problem,
    /// deliberately distinct from the upstream class.
    #[error("Render failure: {0}")]
    Render(String),

    /// The page lookup succeeded but the following write did not. The whole
    /// upsert is safe to re-invoke.
    #[error("Publish incomplete: {0}")]
    PublishIncomplete(String),

    #[error("Database error")]
    DbError(#[from] sqlx::Error),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl From<ShopifyError> for AppError {
    fn from(err: ShopifyError) -> Self {
        match err {
            ShopifyError::Unauthorized(msg) => AppError::Unauthenticated(msg),
            other => AppError::Upstream(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Render(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::PublishIncomplete(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DbError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = self.to_string();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %message, "request failed");
        } else {
            tracing::warn!(status = %status, error = %message, "request rejected");
        }

        (status, message).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shopify_unauthorized_maps_to_unauthenticated() {
        let err: AppError = ShopifyError::Unauthorized("bad token".into()).into();
        assert!(matches!(err, AppError::Unauthenticated(_)));
    }

    #[test]
    fn shopify_status_maps_to_upstream_with_message() {
        let err: AppError = ShopifyError::Status {
            status: 502,
            message: "bad gateway".into(),
        }
        .into();
        match err {
            AppError::Upstream(msg) => assert!(msg.contains("bad gateway")),
            other => panic!("expected Upstream, got {other:?}"),
        }
    }
}
