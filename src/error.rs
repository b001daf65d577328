use axum::{
    response::{IntoResponse, Response},
    Json,
    http::StatusCode,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

/// Hard failures of the scrape pipeline and the endpoints around it.
///
/// Selector problems are not here: a page that was fetched but did not match
/// is reported in the result body (see [`crate::extract::SelectorError`]).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Upstream responded with {status} {reason}")]
    UpstreamHttp { status: u16, reason: String },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Upstream did not respond in time")]
    Timeout,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Artifact not found: {0}")]
    ArtifactNotFound(String),

    #[error("Failed to read artifact: {0}")]
    ArtifactUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub const GENERIC_SCRAPE_FAILURE: &str = "An unexpected error occurred while scraping the webpage";

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingParameter(_)
            | AppError::InvalidUrl { .. }
            | AppError::UnsupportedScheme(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamHttp { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::NetworkError(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
            AppError::ArtifactNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConfigError(_)
            | AppError::ArtifactUnavailable(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the caller. Never carries internal detail.
    pub fn public_message(&self) -> String {
        match self {
            AppError::MissingParameter(_) => "URL parameter is required".to_string(),
            AppError::InvalidUrl { .. } => "Invalid URL format".to_string(),
            AppError::UnsupportedScheme(_) => "Only HTTP and HTTPS URLs are allowed".to_string(),
            AppError::UpstreamHttp { status, reason } => {
                format!("Failed to fetch the webpage: {} {}", status, reason)
                    .trim_end()
                    .to_string()
            }
            AppError::NetworkError(_) => "Network error: Unable to reach the specified URL".to_string(),
            AppError::Timeout => "Request timeout: The webpage took too long to respond".to_string(),
            AppError::ArtifactNotFound(_) => "Excel file not found".to_string(),
            AppError::ArtifactUnavailable(_) => "Failed to serve Excel file".to_string(),
            AppError::ConfigError(_) | AppError::Internal(_) => GENERIC_SCRAPE_FAILURE.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            AppError::MissingParameter(_)
            | AppError::InvalidUrl { .. }
            | AppError::UnsupportedScheme(_)
            | AppError::ArtifactNotFound(_) => {
                tracing::warn!(error = %self, status = status.as_u16(), "request rejected");
            }
            AppError::UpstreamHttp { .. } | AppError::NetworkError(_) | AppError::Timeout => {
                tracing::warn!(error = %self, status = status.as_u16(), "upstream fetch failed");
            }
            AppError::ConfigError(_) | AppError::ArtifactUnavailable(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "request failed");
            }
        }

        let body = Json(ErrorResponse {
            error: self.public_message(),
            status: match self {
                AppError::UpstreamHttp { status, .. } => Some(status),
                _ => None,
            },
        });

        (status, body).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout
        } else if err.is_connect() || err.is_request() || err.is_redirect() || err.is_body() {
            AppError::NetworkError(err.to_string())
        } else {
            AppError::Internal(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
