mod common;

use axum::http::{header, StatusCode};
use common::fixtures::{spawn_app, token_for};
use newsroom_admin_service::domain::value_objects::RoleName;

const JPEG_BYTES: &[u8] = b"\xFF\xD8\xFF\xE0fake jpeg payload";

#[tokio::test]
async fn test_upload_then_fetch_image() {
    let ctx = spawn_app(vec![]).await;
    let token = token_for(5, RoleName::Journalist);

    let response = ctx
        .app
        .post_multipart("/api/uploads/image", Some(&token), "file", "portada.jpg", "image/jpeg", JPEG_BYTES)
        .await;
    response.assert_status(StatusCode::CREATED);

    let body = response.json();
    let filename = body["filename"].as_str().unwrap().to_string();
    let (millis, name) = filename.split_once('-').unwrap();
    assert!(millis.parse::<u64>().is_ok());
    assert_eq!(name, "portada.jpg");
    assert_eq!(body["url"], format!("/api/uploads/{filename}"));
    assert!(ctx.uploads_dir.path().join(&filename).exists());

    let fetched = ctx.app.get(&format!("/api/uploads/{filename}"), None).await;
    fetched.assert_status(StatusCode::OK);
    assert_eq!(fetched.body, JPEG_BYTES);
    assert_eq!(fetched.headers[header::CONTENT_TYPE], "image/jpeg");
    assert_eq!(fetched.headers[header::CACHE_CONTROL], "public, max-age=3600");
}

#[tokio::test]
async fn test_upload_requires_token() {
    let ctx = spawn_app(vec![]).await;

    let response = ctx
        .app
        .post_multipart("/api/uploads/image", None, "file", "portada.jpg", "image/jpeg", JPEG_BYTES)
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json()["error"]["type"], "authentication");
}

#[tokio::test]
async fn test_upload_rejects_non_image() {
    let ctx = spawn_app(vec![]).await;
    let token = token_for(5, RoleName::Journalist);

    let response = ctx
        .app
        .post_multipart("/api/uploads/image", Some(&token), "file", "notes.txt", "text/plain", b"hola")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(std::fs::read_dir(ctx.uploads_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let ctx = spawn_app(vec![]).await;
    let token = token_for(5, RoleName::Journalist);

    let response = ctx
        .app
        .post_multipart("/api/uploads/image", Some(&token), "image", "a.png", "image/png", b"\x89PNG")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_fetch_missing_image_is_not_found() {
    let ctx = spawn_app(vec![]).await;

    let response = ctx.app.get("/api/uploads/1700000000000-missing.jpg", None).await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json()["error"]["message"], "Imagen no encontrada");
}

#[tokio::test]
async fn test_fetch_rejects_traversal_names() {
    let ctx = spawn_app(vec![]).await;

    let response = ctx.app.get("/api/uploads/..%2Fsecret.jpg", None).await;

    assert!(response.status.is_client_error());
    assert_ne!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_returned_url_fetches_names_with_reserved_characters() {
    let ctx = spawn_app(vec![]).await;
    let token = token_for(5, RoleName::Journalist);

    let response = ctx
        .app
        .post_multipart("/api/uploads/image", Some(&token), "file", "mi foto #1?.jpg", "image/jpeg", JPEG_BYTES)
        .await;
    response.assert_status(StatusCode::CREATED);

    let body = response.json();
    let url = body["url"].as_str().unwrap();
    assert!(url.ends_with("-mi%20foto%20%231%3F.jpg"));
    assert!(body["filename"].as_str().unwrap().ends_with("-mi foto #1?.jpg"));

    let fetched = ctx.app.get(url, None).await;
    fetched.assert_status(StatusCode::OK);
    assert_eq!(fetched.body, JPEG_BYTES);
}
