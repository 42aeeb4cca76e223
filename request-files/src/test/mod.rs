
use crate::Config;
use axum::http::{StatusCode, header};
use axum_test::multipart::{MultipartForm, Part};
use serde_json::{Value, json};
use utils::{
    create_test_server, create_test_server_with_config, expected_openapi_schema, file_required, files_form, write_fixture,
    write_standard_fixtures,
};

#[test_log::test(tokio::test)]
async fn test_openapi_schema() {
    let server = create_test_server();

    let response = server.get("/openapi.json").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), expected_openapi_schema());
}

#[test_log::test(tokio::test)]
async fn test_post_form_no_body() {
    let server = create_test_server();

    let response = server.post("/files/").await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>(), file_required());
}

#[test_log::test(tokio::test)]
async fn test_post_body_json() {
    let server = create_test_server();

    let response = server.post("/files/").json(&json!({"file": "Foo"})).await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>(), file_required());
}

#[test_log::test(tokio::test)]
async fn test_post_files() {
    let tmpdir = tempfile::tempdir().expect("Failed to create temp dir");
    let fixtures = write_standard_fixtures(tmpdir.path());
    let server = create_test_server();

    let response = server.post("/files/").multipart(files_form(&fixtures)).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({"file_sizes": [14, 15]}));
}

#[test_log::test(tokio::test)]
async fn test_post_upload_file() {
    let tmpdir = tempfile::tempdir().expect("Failed to create temp dir");
    let fixtures = write_standard_fixtures(tmpdir.path());
    let server = create_test_server();

    let response = server.post("/uploadfiles/").multipart(files_form(&fixtures)).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({"filenames": ["test.txt", "test2.txt"]}));
}

#[test_log::test(tokio::test)]
async fn test_get_root() {
    let server = create_test_server();

    let response = server.get("/").await;

    response.assert_status_ok();
    assert!(response.as_bytes().windows(5).any(|w| w == b"<form"));
}

// ============================================================================
// Properties
// ============================================================================

#[test_log::test(tokio::test)]
async fn test_sizes_and_names_follow_submission_order() {
    let tmpdir = tempfile::tempdir().expect("Failed to create temp dir");
    let sizes = [1usize, 1024, 7, 33];
    let fixtures: Vec<_> = sizes
        .iter()
        .enumerate()
        .map(|(i, size)| write_fixture(tmpdir.path(), &format!("part-{i}.bin"), &vec![b'x'; *size]))
        .collect();
    let server = create_test_server();

    let response = server.post("/files/").multipart(files_form(&fixtures)).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({"file_sizes": sizes}));

    let response = server.post("/uploadfiles/").multipart(files_form(&fixtures)).await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({"filenames": ["part-0.bin", "part-1.bin", "part-2.bin", "part-3.bin"]})
    );
}

#[test_log::test(tokio::test)]
async fn test_get_requests_are_byte_identical() {
    let server = create_test_server();

    for path in ["/", "/openapi.json"] {
        let first = server.get(path).await;
        let second = server.get(path).await;
        assert_eq!(first.as_bytes(), second.as_bytes(), "{path} changed between calls");
    }
}

#[test_log::test(tokio::test)]
async fn test_openapi_schema_stable_across_restarts() {
    let first = create_test_server().get("/openapi.json").await;
    let second = create_test_server().get("/openapi.json").await;

    assert_eq!(first.as_bytes(), second.as_bytes());
    assert_eq!(
        first.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
}

#[test_log::test(tokio::test)]
async fn test_missing_field_on_upload_files_route() {
    let server = create_test_server();

    let no_body = server.post("/uploadfiles/").await;
    let json_body = server.post("/uploadfiles/").json(&json!({"file": "Foo"})).await;

    no_body.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    json_body.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(no_body.json::<Value>(), file_required());
    assert_eq!(json_body.json::<Value>(), file_required());
}

#[test_log::test(tokio::test)]
async fn test_multipart_without_files_part_is_missing_field() {
    let server = create_test_server();
    let form = MultipartForm::new().add_text("name", "not a file");

    let response = server.post("/files/").multipart(form).await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>(), file_required());
}

// ============================================================================
// Endpoint-specific validation
// ============================================================================

#[test_log::test(tokio::test)]
async fn test_files_accepts_plain_form_values() {
    let server = create_test_server();
    let form = MultipartForm::new().add_text("files", "twelve bytes");

    let response = server.post("/files/").multipart(form).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({"file_sizes": [12]}));
}

#[test_log::test(tokio::test)]
async fn test_upload_files_rejects_plain_form_values() {
    let server = create_test_server();
    let form = MultipartForm::new()
        .add_part("files", Part::bytes(b"data".to_vec()).file_name("ok.txt"))
        .add_text("files", "not an upload");

    let response = server.post("/uploadfiles/").multipart(form).await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "detail": [{
                "loc": ["body", "files", 1],
                "msg": "Expected UploadFile, received: <class 'str'>",
                "type": "value_error"
            }]
        })
    );
}

#[test_log::test(tokio::test)]
async fn test_upload_larger_than_limit_is_rejected() {
    let tmpdir = tempfile::tempdir().expect("Failed to create temp dir");
    let fixtures = vec![write_fixture(tmpdir.path(), "big.bin", &vec![0u8; 4096])];
    let server = create_test_server_with_config(Config {
        max_upload_size: 1024,
        ..Config::default()
    });

    let response = server.post("/files/").multipart(files_form(&fixtures)).await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.json::<Value>(), json!({"detail": "Request body is too large"}));
}

// ============================================================================
// Routing
// ============================================================================

#[test_log::test(tokio::test)]
async fn test_unknown_path_is_not_found() {
    let server = create_test_server();

    let response = server.get("/does-not-exist").await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>(), json!({"detail": "Not Found"}));
}

#[test_log::test(tokio::test)]
async fn test_wrong_method_is_not_allowed() {
    let server = create_test_server();

    let response = server.get("/files/").await;

    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.json::<Value>(), json!({"detail": "Method Not Allowed"}));
    assert_eq!(
        response.headers().get(header::ALLOW).and_then(|v| v.to_str().ok()),
        Some("POST")
    );
}

#[test_log::test(tokio::test)]
async fn test_missing_trailing_slash_redirects() {
    let server = create_test_server();

    let response = server.post("/uploadfiles").add_query_param("dry_run", "1").await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
        Some("/uploadfiles/?dry_run=1")
    );
}

#[test_log::test(tokio::test)]
async fn test_docs_page_served() {
    let server = create_test_server();

    let response = server.get("/docs").await;

    response.assert_status_ok();
    let content_type = response.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok());
    assert!(content_type.is_some_and(|ct| ct.starts_with("text/html")), "unexpected content type {content_type:?}");
}

#[test_log::test(tokio::test)]
async fn test_disabled_documentation_routes() {
    let server = create_test_server_with_config(Config {
        openapi_url: None,
        docs_url: None,
        ..Config::default()
    });

    server.get("/openapi.json").await.assert_status_not_found();
    server.get("/docs").await.assert_status_not_found();
    server.get("/").await.assert_status_ok();
}

#[test_log::test(tokio::test)]
async fn test_custom_openapi_location_and_info() {
    let server = create_test_server_with_config(Config {
        title: "Uploads".to_string(),
        version: "2.1.0".to_string(),
        openapi_url: Some("/schema.json".to_string()),
        ..Config::default()
    });

    let response = server.get("/schema.json").await;

    response.assert_status_ok();
    let schema = response.json::<Value>();
    assert_eq!(schema["info"], json!({"title": "Uploads", "version": "2.1.0"}));
    assert_eq!(schema["paths"], expected_openapi_schema()["paths"]);
    server.get("/openapi.json").await.assert_status_not_found();
}
