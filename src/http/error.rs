//! Maps core errors onto HTTP responses.
//!
//! Every error body has the shape `{"error": "<message>"}`. Infrastructure failures are
//! logged here and answered with a generic message.

use crate::errors::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Response-side wrapper around [`Error`].
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status code for the wrapped error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match &self.0 {
            Error::InvalidRequest { .. }
            | Error::SelfTransfer
            | Error::InsufficientFunds { .. }
            | Error::Duplicate { .. }
            | Error::SelfLookup => StatusCode::BAD_REQUEST,
            Error::RecipientNotFound { .. } | Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Unauthenticated | Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Error::TransferFailed { .. }
            | Error::Config { .. }
            | Error::PasswordHash(_)
            | Error::Token(_)
            | Error::Database(_)
            | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match &self.0 {
            Error::InsufficientFunds { .. } => "insufficient points".to_string(),
            Error::TransferFailed { .. } => self.0.to_string(),
            _ if self.status() == StatusCode::INTERNAL_SERVER_ERROR => {
                "internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = ?self.0, "Request failed");
        } else {
            tracing::debug!(error = %self.0, %status, "Request rejected");
        }
        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}
