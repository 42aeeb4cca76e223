use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Sizes of the uploaded `files` parts, in submission order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"file_sizes": [14, 15]}))]
pub struct FileSizesResponse {
    pub file_sizes: Vec<usize>,
}

/// Original filenames of the uploaded `files` parts, in submission order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"filenames": ["test.txt", "test2.txt"]}))]
pub struct FilenamesResponse {
    pub filenames: Vec<String>,
}

/// Multipart body accepted by both upload endpoints (documentation only)
#[derive(Debug, ToSchema)]
#[allow(unused)]
pub struct FilesUpload {
    #[schema(value_type = Vec<String>, format = Binary)]
    pub files: Vec<Vec<u8>>,
}
