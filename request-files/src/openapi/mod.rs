//! OpenAPI documentation.
//!
//! Two renderings of the same API are served:
//! - [`compat`]: the legacy OpenAPI 3.0 document at the configured schema URL (`/openapi.json`)
//! - [`docs::ApiDoc`]: the utoipa-derived document backing the interactive docs page

pub mod compat;
pub mod docs;

pub use docs::ApiDoc;
