//! Mapping of request outcomes that are not a plain `200 OK`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::process::ProcessError;

/// Errors a webhook request can end in.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Signature missing or wrong. Expected traffic, not an application error.
    #[error("authentication required")]
    Unauthorized,

    /// Authenticated body that does not match the payload schema.
    #[error(transparent)]
    Malformed(#[from] ProcessError),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl WebhookError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::Unauthorized => StatusCode::UNAUTHORIZED,
            WebhookError::Malformed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            WebhookError::Unauthorized => "Authentication Required",
            WebhookError::Malformed(_) => "Malformed payload",
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(MessageResponse {
                message: self.message(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            WebhookError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            WebhookError::Malformed(ProcessError::NoTickets).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unauthorized_body() {
        let json = serde_json::to_string(&MessageResponse {
            message: WebhookError::Unauthorized.message(),
        })
        .unwrap();
        assert_eq!(json, r#"{"message":"Authentication Required"}"#);
    }
}
