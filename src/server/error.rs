use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::media::MediaType;

/// Request failure at one of the pipeline stages, each with a fixed status
/// code and a `{"detail": ...}` body.
#[derive(Debug)]
pub enum ApiError {
    InvalidApiKey,
    Validation(String),
    RateLimited,
    Extraction(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidApiKey => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Extraction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            ApiError::InvalidApiKey => "Invalid API Key".to_string(),
            ApiError::Validation(token) => {
                let allowed = MediaType::ALL
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("Invalid media_type '{token}'. Allowed: [{allowed}]")
            }
            ApiError::RateLimited => "Rate limit exceeded. Try again later.".to_string(),
            ApiError::Extraction(message) => message.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.detail() }))).into_response()
    }
}
