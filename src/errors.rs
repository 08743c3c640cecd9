// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for the Graph mirror

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: One enum for fetch, parse, storage and HTTP failures
/// Each variant maps to an HTTP status code and a JSON error body
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid Graph resource: {0}")]
    InvalidResource(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Forbidden access")]
    Forbidden,

    #[error("External API error: {0}")]
    ExternalApiError(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

impl GraphError {
    fn error_code(&self) -> &'static str {
        match self {
            GraphError::NotFound(_) => "NOT_FOUND",
            GraphError::DatabaseError(_) => "DATABASE_ERROR",
            GraphError::InvalidInput(_) => "INVALID_INPUT",
            GraphError::InvalidResource(_) => "INVALID_RESOURCE",
            GraphError::ValidationError(_) => "VALIDATION_ERROR",
            GraphError::Unauthorized => "UNAUTHORIZED",
            GraphError::Forbidden => "FORBIDDEN",
            GraphError::ExternalApiError(_) => "EXTERNAL_API_ERROR",
            GraphError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
        }
    }
}

impl From<sqlx::Error> for GraphError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => GraphError::NotFound("row not found".to_string()),
            other => GraphError::DatabaseError(other.to_string()),
        }
    }
}

/// Convert GraphError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for GraphError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            GraphError::NotFound(_) => StatusCode::NOT_FOUND,
            GraphError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GraphError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            GraphError::InvalidResource(_) => StatusCode::BAD_GATEWAY,
            GraphError::ValidationError(_) => StatusCode::BAD_REQUEST,
            GraphError::Unauthorized => StatusCode::UNAUTHORIZED,
            GraphError::Forbidden => StatusCode::FORBIDDEN,
            GraphError::ExternalApiError(_) => StatusCode::BAD_GATEWAY,
            GraphError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            GraphError::InvalidInput("since".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GraphError::NotFound("album 1".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            GraphError::RateLimitExceeded.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            GraphError::InvalidResource("no id".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: GraphError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, GraphError::NotFound(_)));
    }

    #[test]
    fn test_error_response_body() {
        let response = GraphError::Forbidden.error_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
