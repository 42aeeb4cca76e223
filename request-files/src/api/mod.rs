//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers
//! - **[`extractors`]**: Multipart body extraction shared by the upload endpoints
//! - **[`models`]**: Request/response data structures
//!
//! # API Structure
//!
//! - `GET /`: upload forms
//! - `POST /files/`: sizes of the uploaded `files` parts
//! - `POST /uploadfiles/`: filenames of the uploaded `files` parts
//! - `GET /openapi.json`: legacy OpenAPI document
//! - `GET /docs`: interactive API documentation

pub mod extractors;
pub mod handlers;
pub mod models;
