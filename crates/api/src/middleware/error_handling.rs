//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the TutorDesk API.
//! It maps domain-specific errors to appropriate HTTP status codes and JSON
//! error responses, ensuring a consistent error handling experience across
//! the entire API.
//!
//! Scheduling conflicts get their own mapping: they are ordinary rejected
//! outcomes (HTTP 409) and carry a stable machine-readable `code` alongside
//! the human-readable message, so the operator UI can branch on the reason.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tutordesk_core::errors::DeskError;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps domain-specific `DeskError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
#[derive(Debug)]
pub struct AppError(pub DeskError);

/// Converts application errors to HTTP responses
///
/// This implementation maps each error type to the appropriate HTTP status code
/// and formats the error message into a JSON response body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            DeskError::NotFound(_) => StatusCode::NOT_FOUND,
            DeskError::Validation(_) => StatusCode::BAD_REQUEST,
            DeskError::Conflict(_) => StatusCode::CONFLICT,
            DeskError::Authentication(_) => StatusCode::UNAUTHORIZED,
            DeskError::Authorization(_) => StatusCode::FORBIDDEN,
            DeskError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DeskError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Get the error message and format as JSON
        let message = self.0.to_string();
        let body = match &self.0 {
            DeskError::Conflict(reason) => {
                Json(json!({ "error": message, "code": reason.code() }))
            }
            _ => Json(json!({ "error": message })),
        };

        // Combine status code and JSON body into a response
        (status, body).into_response()
    }
}

/// Automatic conversion from DeskError to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, DeskError>` in handler functions that return `Result<T, AppError>`.
impl From<DeskError> for AppError {
    fn from(err: DeskError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, eyre::Report>` in handler functions that return `Result<T, AppError>`.
/// It wraps the eyre error in a DeskError::Database variant.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(DeskError::Database(err))
    }
}
