//! Request extractors for multipart uploads.
//!
//! [`FilesForm`] collects every part named `files` from a `multipart/form-data` body. A request
//! that is not multipart at all (no body, JSON, urlencoded) is read as a form without fields, so
//! it fails with the same "field required" validation error as a multipart body without `files`.

use crate::errors::{Error, Result};
use axum::{
    extract::{FromRequest, Multipart, Request, multipart::MultipartError},
    http::StatusCode,
};
use bytes::Bytes;
use tracing::{debug, instrument, trace};

/// Name of the repeated multipart field read by the upload endpoints.
pub const FILES_FIELD: &str = "files";

/// One part of a multipart body.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Filename from the part's `Content-Disposition`, absent for plain form values
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// All `files` parts of a multipart body, in submission order. Never empty.
#[derive(Debug)]
pub struct FilesForm(pub Vec<UploadedFile>);

fn multipart_error(err: MultipartError) -> Error {
    debug!(status = %err.status(), "Failed to read multipart body: {}", err.body_text());
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::PayloadTooLarge {
            message: "Request body is too large".to_string(),
        }
    } else {
        Error::BadRequest {
            message: "There was an error parsing the body".to_string(),
        }
    }
}

/// Read every part named `field`, skipping the others.
///
/// Fails with a "field required" validation error when no part carries that name.
pub async fn collect_parts(multipart: &mut Multipart, field: &str) -> Result<Vec<UploadedFile>> {
    let mut parts = Vec::new();

    while let Some(part) = multipart.next_field().await.map_err(multipart_error)? {
        if part.name() != Some(field) {
            trace!(name = ?part.name(), "Skipping unrelated multipart field");
            continue;
        }

        let filename = part.file_name().map(str::to_owned);
        let content_type = part.content_type().map(str::to_owned);
        let data = part.bytes().await.map_err(multipart_error)?;

        debug!(
            field = field,
            index = parts.len(),
            filename = ?filename,
            size = data.len(),
            "Received multipart part"
        );

        parts.push(UploadedFile {
            filename,
            content_type,
            data,
        });
    }

    if parts.is_empty() {
        return Err(Error::missing_body_field(field));
    }

    Ok(parts)
}

impl<S> FromRequest<S> for FilesForm
where
    S: Send + Sync,
{
    type Rejection = Error;

    #[instrument(skip_all)]
    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let mut multipart = match Multipart::from_request(req, state).await {
            Ok(multipart) => multipart,
            Err(rejection) => {
                debug!("Request is not multipart, treating as empty form: {}", rejection);
                return Err(Error::missing_body_field(FILES_FIELD));
            }
        };

        collect_parts(&mut multipart, FILES_FIELD).await.map(FilesForm)
    }
}
