use crate::api::models::errors::{DetailResponse, HttpValidationError, ValidationError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Request did not satisfy the declared body schema
    #[error("Request validation failed: {}", summarize(.errors))]
    Validation { errors: Vec<ValidationError> },

    /// Body could not be decoded at all
    #[error("{message}")]
    BadRequest { message: String },

    /// Body exceeded the configured upload limit
    #[error("{message}")]
    PayloadTooLarge { message: String },

    /// No route matches the request path
    #[error("No route for {path}")]
    NotFound { path: String },

    /// Path matched but the method is not served there
    #[error("Method {method} not allowed for {path}")]
    MethodNotAllowed { method: String, path: String },

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{} at {}", e.msg, e.location()))
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// The legacy "field required" error for a missing body field.
    pub fn missing_body_field(field: &str) -> Self {
        Error::Validation {
            errors: vec![ValidationError::missing(["body", field])],
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation { errors } => summarize(errors),
            Error::BadRequest { message } | Error::PayloadTooLarge { message } => message.clone(),
            Error::NotFound { .. } => "Not Found".to_string(),
            Error::MethodNotAllowed { .. } => "Method Not Allowed".to_string(),
            Error::Other(_) => "Internal Server Error".to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Error::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::PayloadTooLarge { .. } => {
                tracing::warn!("Rejected oversized request: {}", self);
            }
            Error::Validation { .. } | Error::BadRequest { .. } | Error::NotFound { .. } | Error::MethodNotAllowed { .. } => {
                tracing::debug!("Client error: {}", self);
            }
        }

        let status = self.status_code();

        match self {
            // Validation failures carry the structured detail list
            Error::Validation { errors } => (status, Json(HttpValidationError { detail: errors })).into_response(),
            other => {
                let detail = other.user_message();
                (status, Json(DetailResponse { detail })).into_response()
            }
        }
    }
}

/// Type alias for handler results
pub type Result<T> = std::result::Result<T, Error>;
