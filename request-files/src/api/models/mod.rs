//! API request and response data models.
//!
//! These structures define the JSON contract of the upload endpoints and of the error
//! documents. All models are annotated with `utoipa` so the interactive docs stay in sync.
//!
//! - [`files`]: Upload results returned by the file endpoints
//! - [`errors`]: Validation and generic error documents

pub mod errors;
pub mod files;
