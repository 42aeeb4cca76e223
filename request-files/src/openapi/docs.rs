//! utoipa document for the interactive docs page.

use utoipa::OpenApi;

use crate::api;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::form::upload_form,
        api::handlers::files::create_files,
        api::handlers::files::create_upload_files,
    ),
    components(
        schemas(
            api::models::files::FilesUpload,
            api::models::files::FileSizesResponse,
            api::models::files::FilenamesResponse,
            api::models::errors::ValidationError,
            api::models::errors::HttpValidationError,
            api::models::errors::DetailResponse,
        )
    ),
    tags(
        (name = "files", description = "Upload one or more files as repeated `files` parts of a `multipart/form-data` body.

Both endpoints read every part in submission order:
- `POST /files/` answers with the byte size of each part
- `POST /uploadfiles/` answers with the original filename of each part"),
        (name = "pages", description = "HTML pages for trying the upload endpoints from a browser."),
    ),
    info(
        title = "Request Files",
        description = "Multipart file upload endpoints.

## Errors

A request without any `files` part is rejected with `422` and a validation document:

```json
{\"detail\": [{\"loc\": [\"body\", \"files\"], \"msg\": \"field required\", \"type\": \"value_error.missing\"}]}
```",
    ),
)]
pub struct ApiDoc;
