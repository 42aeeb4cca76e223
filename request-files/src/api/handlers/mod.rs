//! HTTP request handlers.
//!
//! - [`files`]: the two multipart upload endpoints
//! - [`form`]: HTML page with upload forms
//! - [`schema`]: the legacy OpenAPI document
//! - [`fallback`]: 404/405 responses and trailing-slash redirects
//!
//! Handlers return [`crate::errors::Error`], which renders as a `{"detail": ...}` JSON document.

pub mod fallback;
pub mod files;
pub mod form;
pub mod schema;
