//! HTTP-level integration tests for the featured-products sampling
//! endpoint.

mod common;

use std::collections::HashSet;

use axum::http::StatusCode;
use common::{body_json, get, seed_product, seed_section, seed_type};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn random_products_on_empty_catalog_returns_empty_array(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/sections/random-products").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn random_products_pads_a_single_product_to_the_target(pool: PgPool) {
    let config = common::test_config();
    let section = seed_section(&pool, &config, "Lonely").await;
    let product_type = seed_type(&pool, &config, section["id"].as_i64().unwrap(), "Solo").await;
    let product =
        seed_product(&pool, &config, product_type["id"].as_i64().unwrap(), "Only One").await;
    let product_id = product["id"].as_i64().unwrap();

    let app = common::build_test_app_with_config(pool, config);
    let response = get(app, "/sections/random-products").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let featured = json.as_array().unwrap();

    // Padding duplicates the one available product up to the target.
    assert_eq!(featured.len(), 6);
    for item in featured {
        assert_eq!(item["id"], product_id);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn random_products_returns_exactly_the_target_when_more_exist(pool: PgPool) {
    let config = common::test_config();
    let section = seed_section(&pool, &config, "Crowded").await;
    let product_type = seed_type(&pool, &config, section["id"].as_i64().unwrap(), "Many").await;
    let type_id = product_type["id"].as_i64().unwrap();

    let mut seeded = HashSet::new();
    for i in 0..8 {
        let product = seed_product(&pool, &config, type_id, &format!("Product {i}")).await;
        seeded.insert(product["id"].as_i64().unwrap());
    }

    let app = common::build_test_app_with_config(pool, config);
    let response = get(app, "/sections/random-products").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let featured = json.as_array().unwrap();
    assert_eq!(featured.len(), 6);

    // With a pool larger than the target there is no padding, so every
    // pick is distinct and comes from the seeded set.
    let picked: HashSet<i64> = featured
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect();
    assert_eq!(picked.len(), 6);
    assert!(picked.is_subset(&seeded));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn random_products_respects_the_configured_count(pool: PgPool) {
    let mut config = common::test_config();
    config.featured_product_count = 3;

    let section = seed_section(&pool, &config, "Configured").await;
    let product_type = seed_type(&pool, &config, section["id"].as_i64().unwrap(), "Sized").await;
    let type_id = product_type["id"].as_i64().unwrap();
    for i in 0..5 {
        seed_product(&pool, &config, type_id, &format!("Sized {i}")).await;
    }

    let app = common::build_test_app_with_config(pool, config);
    let response = get(app, "/sections/random-products").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn random_products_draws_from_multiple_sections(pool: PgPool) {
    let config = common::test_config();

    // Two sections with two products each; four in total, below the
    // target of six, so every product must appear at least once.
    let mut seeded = HashSet::new();
    for section_name in ["North", "South"] {
        let section = seed_section(&pool, &config, section_name).await;
        let product_type = seed_type(
            &pool,
            &config,
            section["id"].as_i64().unwrap(),
            &format!("{section_name} Type"),
        )
        .await;
        let type_id = product_type["id"].as_i64().unwrap();
        for i in 0..2 {
            let product =
                seed_product(&pool, &config, type_id, &format!("{section_name} {i}")).await;
            seeded.insert(product["id"].as_i64().unwrap());
        }
    }

    let app = common::build_test_app_with_config(pool, config);
    let response = get(app, "/sections/random-products").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let featured = json.as_array().unwrap();
    assert_eq!(featured.len(), 6);

    let picked: HashSet<i64> = featured
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect();
    assert_eq!(picked, seeded);
}
