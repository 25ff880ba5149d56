//! HTTP-level integration tests for the `media` collection, backed by local
//! disk storage.

mod common;

use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use common::{
    body_bytes, body_json, delete_auth, get, multipart_body, patch_json_auth,
    post_multipart_auth, TEST_MAX_UPLOAD_BYTES,
};
use lughat_db::models::word::CreateWord;
use lughat_db::repositories::WordRepo;
use serde_json::json;
use sqlx::PgPool;

const AUDIO: &[u8] = b"ID3-fake-mp3-bytes";

async fn upload(app: axum::Router, token: &str) -> serde_json::Value {
    let body = multipart_body(
        Some("Pronunciation of salam"),
        Some(("my salam (1).mp3", "audio/mpeg", AUDIO)),
    );
    let response = post_multipart_auth(app, "/api/media", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_stores_file_and_metadata(pool: PgPool) {
    let (_user, token) = common::create_user_with_token(&pool, "editor@lughat.test").await;
    let app = common::build_test_app(pool).await;

    let json = upload(app, &token).await;
    let media = &json["data"];

    assert_eq!(media["alt"], "Pronunciation of salam");
    assert_eq!(media["filename"], "my-salam-1.mp3");
    assert_eq!(media["mime_type"], "audio/mpeg");
    assert_eq!(media["filesize"], AUDIO.len());
    assert_eq!(media["storage_backend"], "local");
    let key = media["storage_key"].as_str().unwrap();
    assert!(key.ends_with("-my-salam-1.mp3"), "key = {key}");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_requires_authentication(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let body = multipart_body(Some("alt"), Some(("a.mp3", "audio/mpeg", AUDIO)));
    let response = post_multipart_auth(app, "/api/media", body, "not-a-token").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_without_file_part_is_400(pool: PgPool) {
    let (_user, token) = common::create_user_with_token(&pool, "editor@lughat.test").await;
    let app = common::build_test_app(pool).await;

    let body = multipart_body(Some("alt only"), None);
    let response = post_multipart_auth(app, "/api/media", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_without_alt_is_400(pool: PgPool) {
    let (_user, token) = common::create_user_with_token(&pool, "editor@lughat.test").await;
    let app = common::build_test_app(pool).await;

    let body = multipart_body(None, Some(("a.mp3", "audio/mpeg", AUDIO)));
    let response = post_multipart_auth(app, "/api/media", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_over_cap_is_413(pool: PgPool) {
    let (_user, token) = common::create_user_with_token(&pool, "editor@lughat.test").await;
    let app = common::build_test_app(pool).await;

    let big = vec![0u8; TEST_MAX_UPLOAD_BYTES + 1];
    let body = multipart_body(Some("too big"), Some(("big.bin", "application/octet-stream", &big)));
    let response = post_multipart_auth(app, "/api/media", body, &token).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn file_is_served_with_stored_content_type(pool: PgPool) {
    let (_user, token) = common::create_user_with_token(&pool, "editor@lughat.test").await;
    let app = common::build_test_app(pool).await;

    let id = upload(app.clone(), &token).await["data"]["id"].as_i64().unwrap();

    let response = get(app.clone(), &format!("/api/media/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["id"], id);

    let response = get(app, &format!("/api/media/{id}/file")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "audio/mpeg");
    assert_eq!(body_bytes(response).await, AUDIO);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_is_public_and_paginated(pool: PgPool) {
    let (_user, token) = common::create_user_with_token(&pool, "editor@lughat.test").await;
    let app = common::build_test_app(pool).await;

    upload(app.clone(), &token).await;
    upload(app.clone(), &token).await;

    let response = get(app, "/api/media?limit=1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["totalDocs"], 2);
    assert_eq!(json["totalPages"], 2);
    assert_eq!(json["docs"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_media_is_404(pool: PgPool) {
    let app = common::build_test_app(pool).await;

    let response = get(app.clone(), "/api/media/31337").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app, "/api/media/31337/file").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn patch_updates_alt(pool: PgPool) {
    let (_user, token) = common::create_user_with_token(&pool, "editor@lughat.test").await;
    let app = common::build_test_app(pool).await;

    let id = upload(app.clone(), &token).await["data"]["id"].as_i64().unwrap();

    let response = patch_json_auth(
        app.clone(),
        &format!("/api/media/{id}"),
        json!({ "alt": " Salam, spoken " }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["alt"], "Salam, spoken");

    let response =
        patch_json_auth(app, &format!("/api/media/{id}"), json!({ "alt": "  " }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_removes_row_file_and_word_link(pool: PgPool) {
    let (_user, token) = common::create_user_with_token(&pool, "editor@lughat.test").await;
    let app = common::build_test_app(pool.clone()).await;

    let id = upload(app.clone(), &token).await["data"]["id"].as_i64().unwrap();
    let word = WordRepo::create(
        &pool,
        &CreateWord {
            word_uyghur: "salam".to_string(),
            word_english: "hello".to_string(),
            word_turkish: None,
            pronunciation: Some(id),
        },
    )
    .await
    .unwrap();

    let response = delete_auth(app.clone(), &format!("/api/media/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.clone(), &format!("/api/media/{id}/file")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let word = WordRepo::find_by_id(&pool, word.id).await.unwrap().unwrap();
    assert_eq!(word.pronunciation_id, None);

    let response = delete_auth(app, &format!("/api/media/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
