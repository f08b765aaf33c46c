// tests/upload_tests.rs

mod common;

use common::spawn_app;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnot-really-a-png";

fn image_form(field: &str, file_name: &str, mime: &str, bytes: &[u8]) -> Form {
    let part = Part::bytes(bytes.to_vec())
        .file_name(file_name.to_string())
        .mime_str(mime)
        .unwrap();
    Form::new().part(field.to_string(), part)
}

#[tokio::test]
async fn uploaded_image_is_served_back() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app
        .client
        .post(app.url("/api/admin/upload-image"))
        .multipart(image_form("image", "q1.png", "image/png", PNG_BYTES))
        .send()
        .await
        .expect("Upload failed");

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);

    let image_url = body["imageUrl"].as_str().unwrap();
    assert!(image_url.starts_with("/uploads/"));
    assert!(image_url.ends_with(".png"));

    let served = app.client.get(app.url(image_url)).send().await.unwrap();
    assert_eq!(served.status().as_u16(), 200);
    assert_eq!(served.bytes().await.unwrap().as_ref(), PNG_BYTES);

    let stored = std::fs::read_dir(app.upload_dir.path()).unwrap().count();
    assert_eq!(stored, 1);
}

#[tokio::test]
async fn non_image_upload_is_rejected() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/api/admin/upload-image"))
        .multipart(image_form("image", "notes.txt", "text/plain", b"hello"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(std::fs::read_dir(app.upload_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn missing_image_field_is_rejected() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/api/admin/upload-image"))
        .multipart(image_form("file", "q1.png", "image/png", PNG_BYTES))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn oversized_image_is_rejected() {
    // The test app allows 1 KiB per file.
    let app = spawn_app().await;
    let big = vec![0u8; 4 * 1024];

    let response = app
        .client
        .post(app.url("/api/admin/upload-image"))
        .multipart(image_form("image", "big.gif", "image/gif", &big))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(std::fs::read_dir(app.upload_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn body_over_route_limit_is_rejected() {
    // Well past the 1 KiB file limit plus 64 KiB of multipart allowance.
    let app = spawn_app().await;
    let huge = vec![0u8; 200 * 1024];

    let response = app
        .client
        .post(app.url("/api/admin/upload-image"))
        .multipart(image_form("image", "huge.png", "image/png", &huge))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(std::fs::read_dir(app.upload_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn unknown_upload_is_404() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/uploads/does-not-exist.png"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
}
