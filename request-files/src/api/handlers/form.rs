//! HTML page with upload forms for both file endpoints.

use axum::response::Html;

const UPLOAD_FORM: &str = include_str!("upload_form.html");

#[utoipa::path(
    get,
    path = "/",
    tag = "pages",
    summary = "Main",
    operation_id = "main__get",
    responses(
        (status = 200, description = "Successful Response", content_type = "text/html", body = String),
    )
)]
pub async fn upload_form() -> Html<&'static str> {
    Html(UPLOAD_FORM)
}
