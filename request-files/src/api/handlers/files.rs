use crate::api::extractors::{FILES_FIELD, FilesForm};
use crate::api::models::errors::{HttpValidationError, ValidationError};
use crate::api::models::files::{FileSizesResponse, FilenamesResponse, FilesUpload};
use crate::errors::{Error, Result};
use axum::Json;
use tracing::{info, instrument};

#[utoipa::path(
    post,
    path = "/files/",
    tag = "files",
    summary = "Create Files",
    operation_id = "create_files_files__post",
    description = "Read every `files` part into memory and report its size in bytes.",
    request_body(content = FilesUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Successful Response", body = FileSizesResponse),
        (status = 422, description = "Validation Error", body = HttpValidationError),
    )
)]
#[instrument(skip_all)]
pub async fn create_files(FilesForm(files): FilesForm) -> Json<FileSizesResponse> {
    let file_sizes: Vec<usize> = files.iter().map(|f| f.size()).collect();

    info!(count = file_sizes.len(), total_bytes = file_sizes.iter().sum::<usize>(), "Measured uploaded files");

    Json(FileSizesResponse { file_sizes })
}

#[utoipa::path(
    post,
    path = "/uploadfiles/",
    tag = "files",
    summary = "Create Upload Files",
    operation_id = "create_upload_files_uploadfiles__post",
    description = "Report the original filename of every `files` part. Every part must be a file upload: \
                   plain form values are rejected.",
    request_body(content = FilesUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Successful Response", body = FilenamesResponse),
        (status = 422, description = "Validation Error", body = HttpValidationError),
    )
)]
#[instrument(skip_all)]
pub async fn create_upload_files(FilesForm(files): FilesForm) -> Result<Json<FilenamesResponse>> {
    let mut filenames = Vec::with_capacity(files.len());
    let mut errors = Vec::new();

    for (index, file) in files.into_iter().enumerate() {
        match file.filename {
            Some(name) => filenames.push(name),
            // A part without a filename is a plain form value, not an upload
            None => errors.push(ValidationError::value_error(
                vec!["body".into(), FILES_FIELD.into(), index.into()],
                "Expected UploadFile, received: <class 'str'>",
            )),
        }
    }

    if !errors.is_empty() {
        return Err(Error::Validation { errors });
    }

    info!(count = filenames.len(), "Received uploaded files");

    Ok(Json(FilenamesResponse { filenames }))
}
