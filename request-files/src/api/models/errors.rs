//! Error documents returned by the service.
//!
//! Validation failures keep the legacy `{"detail": [{"loc", "msg", "type"}]}` shape; every
//! other failure is a `{"detail": "<message>"}` object.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// One segment of an error location: a field name or a position in a repeated field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocSegment {
    Field(String),
    Index(usize),
}

impl From<&str> for LocSegment {
    fn from(value: &str) -> Self {
        LocSegment::Field(value.to_string())
    }
}

impl From<usize> for LocSegment {
    fn from(value: usize) -> Self {
        LocSegment::Index(value)
    }
}

impl fmt::Display for LocSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocSegment::Field(name) => f.write_str(name),
            LocSegment::Index(i) => write!(f, "{i}"),
        }
    }
}

/// A single request validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationError {
    /// Where the failure occurred, starting with the request part (`body`)
    #[schema(value_type = Vec<String>)]
    pub loc: Vec<LocSegment>,
    /// Human readable message
    pub msg: String,
    /// Machine readable error type
    #[serde(rename = "type")]
    pub error_type: String,
}

impl ValidationError {
    /// Legacy "field required" error for a location.
    pub fn missing<I, S>(loc: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<LocSegment>,
    {
        Self {
            loc: loc.into_iter().map(Into::into).collect(),
            msg: "field required".to_string(),
            error_type: "value_error.missing".to_string(),
        }
    }

    /// Generic value error with a custom message.
    pub fn value_error(loc: Vec<LocSegment>, msg: impl Into<String>) -> Self {
        Self {
            loc,
            msg: msg.into(),
            error_type: "value_error".to_string(),
        }
    }

    /// Location rendered as `body.files.0`
    pub fn location(&self) -> String {
        self.loc.iter().map(ToString::to_string).collect::<Vec<_>>().join(".")
    }
}

/// Body of a 422 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HttpValidationError {
    pub detail: Vec<ValidationError>,
}

/// Body of every non-validation error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DetailResponse {
    pub detail: String,
}
