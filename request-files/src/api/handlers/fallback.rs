//! Responses for requests that match no route.

use crate::errors::Error;
use crate::openapi::compat::is_known_path;
use axum::{
    http::{Method, Uri, header},
    response::{IntoResponse, Redirect, Response},
};
use tracing::{debug, instrument};

/// Unknown path. When adding a trailing slash yields a known route, redirect there with 307 so
/// the method and body are replayed; otherwise answer 404.
#[instrument(skip_all, fields(path = %uri.path()))]
pub async fn not_found(uri: Uri) -> Response {
    let path = uri.path();

    if !path.ends_with('/') {
        let slashed = format!("{path}/");
        if is_known_path(&slashed) {
            let location = match uri.query() {
                Some(query) => format!("{slashed}?{query}"),
                None => slashed,
            };
            debug!(location = %location, "Redirecting to slash-terminated route");
            return Redirect::temporary(&location).into_response();
        }
    }

    Error::NotFound { path: path.to_string() }.into_response()
}

/// Known path requested with a method it does not serve.
pub async fn method_not_allowed(method: Method, uri: Uri) -> Response {
    let mut response = Error::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
    .into_response();

    if let Some(allow) = allowed_methods(uri.path()) {
        response.headers_mut().insert(header::ALLOW, allow);
    }
    response
}

fn allowed_methods(path: &str) -> Option<header::HeaderValue> {
    let methods: Vec<&str> = crate::openapi::compat::ROUTES
        .iter()
        .filter(|route| route.path == path)
        .map(|route| route.method.as_lowercase())
        .collect();

    if methods.is_empty() {
        return None;
    }
    header::HeaderValue::from_str(&methods.join(", ").to_uppercase()).ok()
}
