//! Unified error type for mockimg.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Errors that can occur while serving requests.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A submitted bounding box violates the coordinate invariant.
    #[error("Invalid bounding box coordinates.")]
    InvalidBoundingBox,

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The canvas could not be encoded as PNG.
    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    /// A response header could not be constructed.
    #[error("Invalid header value: {0}")]
    Header(#[from] axum::http::header::InvalidHeaderValue),
}

impl ApiError {
    /// The HTTP status this error maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidBoundingBox => StatusCode::BAD_REQUEST,
            Self::Config(_) | Self::Io(_) | Self::Encode(_) | Self::Header(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(serde_json::json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}
