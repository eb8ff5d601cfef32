//! HTTP-level integration tests for the sections API.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_multipart, seed_section, seed_type, MultipartBody};
use http_body_util::BodyExt;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Section creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_section_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = MultipartBody::new()
        .text("name", "Kitchen")
        .file("thumbnail", "kitchen.png", b"fake png bytes");

    let response = post_multipart(app, "/sections", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Kitchen");
    assert!(json["id"].is_number());

    // The stored thumbnail lives under uploads/ with a uuid-prefixed name.
    let thumbnail = json["thumbnail"].as_str().unwrap();
    assert!(
        thumbnail.starts_with("uploads/"),
        "Thumbnail should be an uploads/ reference, got: {thumbnail}"
    );
    assert!(thumbnail.ends_with("kitchen.png"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_section_without_name_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = MultipartBody::new().file("thumbnail", "thumb.png", b"fake png bytes");

    let response = post_multipart(app, "/sections", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_section_without_thumbnail_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = MultipartBody::new().text("name", "No Thumbnail");

    let response = post_multipart(app, "/sections", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rejected_section_create_leaves_no_stored_files(pool: PgPool) {
    let config = common::test_config();

    // The thumbnail is written during multipart collection, but the
    // missing name rejects the request; the file must not be orphaned.
    let app = common::build_test_app_with_config(pool, config.clone());
    let body = MultipartBody::new().file("thumbnail", "orphan.png", b"fake png bytes");

    let response = post_multipart(app, "/sections", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let leftover = std::fs::read_dir(&config.upload_dir).unwrap().count();
    assert_eq!(leftover, 0, "Rejected upload must not leave files behind");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_section_with_blank_name_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = MultipartBody::new()
        .text("name", "   ")
        .file("thumbnail", "thumb.png", b"fake png bytes");

    let response = post_multipart(app, "/sections", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Section listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_sections_returns_created_sections_in_order(pool: PgPool) {
    let config = common::test_config();
    seed_section(&pool, &config, "First").await;
    seed_section(&pool, &config, "Second").await;

    let app = common::build_test_app_with_config(pool, config);
    let response = get(app, "/sections").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let sections = json.as_array().unwrap();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0]["name"], "First");
    assert_eq!(sections[1]["name"], "Second");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_sections_empty_returns_empty_array(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/sections").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!([]));
}

// ---------------------------------------------------------------------------
// Types under a section
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_types_under_section(pool: PgPool) {
    let config = common::test_config();
    let section = seed_section(&pool, &config, "Furniture").await;
    let section_id = section["id"].as_i64().unwrap();
    seed_type(&pool, &config, section_id, "Chairs").await;
    seed_type(&pool, &config, section_id, "Tables").await;

    // Another section's types must not leak in.
    let other = seed_section(&pool, &config, "Garden").await;
    seed_type(&pool, &config, other["id"].as_i64().unwrap(), "Hoses").await;

    let app = common::build_test_app_with_config(pool, config);
    let response = get(app, &format!("/sections/{section_id}/types")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let types = json.as_array().unwrap();
    assert_eq!(types.len(), 2);
    assert_eq!(types[0]["name"], "Chairs");
    assert_eq!(types[1]["name"], "Tables");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_types_for_unknown_section_returns_empty_array(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/sections/999999/types").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!([]));
}

// ---------------------------------------------------------------------------
// Static file serving
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn uploaded_thumbnail_is_served_from_uploads(pool: PgPool) {
    let config = common::test_config();
    let section = seed_section(&pool, &config, "Served").await;
    let thumbnail = section["thumbnail"].as_str().unwrap();

    let app = common::build_test_app_with_config(pool, config);
    let response = get(app, &format!("/{thumbnail}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"fake png bytes");
}
