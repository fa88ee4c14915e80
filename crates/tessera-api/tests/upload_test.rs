//! Upload endpoint integration tests.
//!
//! Run with: `cargo test -p tessera-api --test upload_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestResponse;
use bytes::Bytes;
use sha2::{Digest, Sha256};
use tessera_core::models::UploadResponse;

use helpers::auth::{admin_bearer, member_bearer};
use helpers::stores::InMemoryFileStore;
use helpers::{setup_test_app, setup_test_app_with, TestApp};

const UPLOAD_PATH: &str = "/admin/upload";

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn file_form(filename: &str, data: &[u8]) -> MultipartForm {
    let part = Part::bytes(Bytes::copy_from_slice(data))
        .file_name(filename.to_string())
        .mime_type("application/octet-stream");
    MultipartForm::new().add_part("file", part)
}

async fn upload(app: &TestApp, form: MultipartForm) -> TestResponse {
    app.client()
        .post(UPLOAD_PATH)
        .add_header("Authorization", admin_bearer())
        .multipart(form)
        .await
}

fn assert_failed(response: &TestResponse, status: u16) -> UploadResponse {
    assert_eq!(response.status_code(), status);
    let body: UploadResponse = response.json();
    assert_eq!(body.id, -1);
    assert!(!body.success);
    body
}

#[tokio::test]
async fn test_upload_stores_file_under_content_hash() {
    let app = setup_test_app().await;
    let data = b"\x89PNG\r\n\x1a\nnot really an image";

    let response = upload(&app, file_form("cat.png", data)).await;

    assert_eq!(response.status_code(), 200);
    let body: UploadResponse = response.json();
    assert!(body.success);
    assert!(body.id > 0);
    assert_eq!(body.message, "Successfully uploaded");

    let expected_name = format!("{}.png", sha256_hex(data));
    assert_eq!(
        std::fs::read(app.stored_file(&expected_name)).unwrap(),
        data.to_vec()
    );

    let records = app.files.records();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.id, body.id);
    assert_eq!(record.name, expected_name);
    assert_eq!(record.original, "cat.png");
    assert_eq!(record.hash, sha256_hex(data));
    assert_eq!(record.extension, ".png");
    assert_eq!(record.size, data.len() as i64);
    assert_eq!(record.location, "/uploads/");
    assert_eq!(record.path, format!("/uploads/{}", expected_name));
    assert_eq!(record.type_id, 1);
}

#[tokio::test]
async fn test_same_content_gets_same_name() {
    let app = setup_test_app().await;
    let data = b"identical bytes";

    let first = upload(&app, file_form("first.jpg", data)).await;
    let second = upload(&app, file_form("second.jpg", data)).await;

    assert_eq!(first.status_code(), 200);
    assert_eq!(second.status_code(), 200);

    let records = app.files.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, records[1].name);
    assert_ne!(records[0].id, records[1].id);
    assert_eq!(app.stored_names(), vec![format!("{}.jpg", sha256_hex(data))]);
}

#[tokio::test]
async fn test_different_content_gets_different_names() {
    let app = setup_test_app().await;

    let _ = upload(&app, file_form("a.png", b"one")).await;
    let _ = upload(&app, file_form("a.png", b"two")).await;

    assert_eq!(app.stored_names().len(), 2);
}

#[tokio::test]
async fn test_extension_is_matched_case_insensitively() {
    let app = setup_test_app().await;
    let data = b"shouting extension";

    let response = upload(&app, file_form("PHOTO.PNG", data)).await;

    assert_eq!(response.status_code(), 200);
    let name = format!("{}.PNG", sha256_hex(data));
    assert_eq!(app.stored_names(), vec![name.clone()]);

    let record = &app.files.records()[0];
    assert_eq!(record.name, name);
    assert_eq!(record.extension, ".PNG");
    assert_eq!(record.type_id, 1);
}

#[tokio::test]
async fn test_missing_file_field_is_rejected() {
    let app = setup_test_app().await;
    let form = MultipartForm::new().add_text("note", "no file here");

    let response = upload(&app, form).await;

    let body = assert_failed(&response, 400);
    assert_eq!(body.message, "Error retrieving file from form data");
    assert!(app.files.records().is_empty());
}

#[tokio::test]
async fn test_file_field_without_filename_is_rejected() {
    let app = setup_test_app().await;
    let form = MultipartForm::new().add_part("file", Part::text("just text"));

    let response = upload(&app, form).await;

    assert_failed(&response, 400);
}

#[tokio::test]
async fn test_empty_file_is_rejected() {
    let app = setup_test_app().await;

    let response = upload(&app, file_form("empty.png", b"")).await;

    assert_failed(&response, 400);
    assert!(app.stored_names().is_empty());
}

#[tokio::test]
async fn test_non_multipart_body_is_rejected() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(UPLOAD_PATH)
        .add_header("Authorization", admin_bearer())
        .json(&serde_json::json!({ "file": "cat.png" }))
        .await;

    assert_failed(&response, 400);
}

#[tokio::test]
async fn test_unlisted_extension_is_rejected_and_removed() {
    let app = setup_test_app().await;

    let response = upload(&app, file_form("setup.exe", b"MZ\x90\x00")).await;

    let body = assert_failed(&response, 400);
    assert_eq!(body.message, "Server can't accept .exe type files");
    assert!(app.stored_names().is_empty());
    assert!(app.files.records().is_empty());
}

#[tokio::test]
async fn test_missing_extension_is_rejected_before_writing() {
    let app = setup_test_app().await;

    for filename in ["README", "trailing-dot."] {
        let response = upload(&app, file_form(filename, b"plain text")).await;
        let body = assert_failed(&response, 400);
        assert!(body.message.ends_with("has a problem"), "{}", body.message);
    }

    assert!(app.stored_names().is_empty());
}

#[tokio::test]
async fn test_insert_failure_returns_not_acceptable_and_removes_file() {
    let files = InMemoryFileStore::new();
    files.reject_inserts(true);
    let app = setup_test_app_with(files, |_| {}).await;

    let response = upload(&app, file_form("cat.png", b"never recorded")).await;

    let body = assert_failed(&response, 406);
    assert_eq!(body.message, "File uploaded but was not saved in database");
    assert!(app.stored_names().is_empty());
}

#[tokio::test]
async fn test_failed_upload_keeps_existing_file() {
    let app = setup_test_app().await;
    let data = b"shared content";

    let first = upload(&app, file_form("first.png", data)).await;
    assert_eq!(first.status_code(), 200);

    app.files.reject_inserts(true);
    let second = upload(&app, file_form("second.png", data)).await;
    assert_failed(&second, 406);

    let name = format!("{}.png", sha256_hex(data));
    assert!(app.stored_file(&name).exists());
    assert_eq!(app.files.records().len(), 1);
}

#[tokio::test]
async fn test_concurrent_failed_upload_keeps_file_of_recorded_upload() {
    let files = InMemoryFileStore::with_insert_gate(2);
    files.reject_next_insert();
    let app = setup_test_app_with(files, |_| {}).await;
    let data = b"raced content";

    let (first, second) = tokio::join!(
        upload(&app, file_form("first.png", data)),
        upload(&app, file_form("second.png", data)),
    );

    let mut statuses = vec![first.status_code().as_u16(), second.status_code().as_u16()];
    statuses.sort();
    assert_eq!(statuses, vec![200, 406]);

    let name = format!("{}.png", sha256_hex(data));
    assert_eq!(app.stored_names(), vec![name.clone()]);

    let records = app.files.records();
    assert_eq!(records.len(), 1);
    let response = app.client().get(&records[0].path).await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.as_bytes().to_vec(), data.to_vec());
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let app = setup_test_app_with(InMemoryFileStore::new(), |config| {
        config.max_upload_size_bytes = 1024;
    })
    .await;

    let response = upload(&app, file_form("big.png", &vec![7u8; 16 * 1024])).await;

    assert_failed(&response, 400);
    assert!(app.stored_names().is_empty());
}

#[tokio::test]
async fn test_upload_requires_authentication() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(UPLOAD_PATH)
        .multipart(file_form("cat.png", b"anonymous"))
        .await;

    assert_eq!(response.status_code(), 401);
    assert!(app.stored_names().is_empty());
}

#[tokio::test]
async fn test_upload_requires_administrator() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(UPLOAD_PATH)
        .add_header("Authorization", member_bearer())
        .multipart(file_form("cat.png", b"member"))
        .await;

    assert_eq!(response.status_code(), 403);
}

#[tokio::test]
async fn test_uploaded_file_is_served() {
    let app = setup_test_app().await;
    let data = b"served back";

    let _ = upload(&app, file_form("served.png", data)).await;
    let path = app.files.records()[0].path.clone();

    let response = app.client().get(&path).await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.as_bytes().to_vec(), data.to_vec());
}
