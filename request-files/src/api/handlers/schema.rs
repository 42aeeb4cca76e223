use crate::AppState;
use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};

/// Serve the pre-rendered legacy OpenAPI document.
pub async fn openapi_json(State(state): State<AppState>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], state.openapi_document.clone())
}
