//! Handlers for the `/sections` resource, including the featured-products
//! sampling endpoint.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use vitrine_core::catalog::require_field;
use vitrine_core::sampling;
use vitrine_core::types::DbId;
use vitrine_db::models::product::Product;
use vitrine_db::models::product_type::ProductType;
use vitrine_db::models::section::{CreateSection, Section};
use vitrine_db::repositories::{ProductRepo, ProductTypeRepo, SectionRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::upload;

/// GET /sections
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Section>>> {
    let sections = SectionRepo::list(&state.pool).await?;
    Ok(Json(sections))
}

/// POST /sections
///
/// Multipart form: `name` text field plus a `thumbnail` file.
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Section>)> {
    let form = upload::collect(multipart, &state.config.upload_dir).await?;

    let parsed = require_field(form.text("name"), "name")
        .and_then(|name| {
            let thumbnail = require_field(form.thumbnail.as_deref(), "thumbnail")?;
            Ok(CreateSection { name, thumbnail })
        })
        .map_err(AppError::from);
    let input = upload::or_discard(&state.config.upload_dir, &form, parsed).await?;

    let section = SectionRepo::create(&state.pool, &input).await?;

    tracing::info!(section_id = section.id, name = %section.name, "Section created");

    Ok((StatusCode::CREATED, Json(section)))
}

/// GET /sections/{id}/types
///
/// An unknown section id yields an empty list, not an error.
pub async fn list_types(
    State(state): State<AppState>,
    Path(section_id): Path<DbId>,
) -> AppResult<Json<Vec<ProductType>>> {
    let types = ProductTypeRepo::list_by_section(&state.pool, section_id).await?;
    Ok(Json(types))
}

/// GET /sections/random-products
///
/// Walk sections in store order collecting every product under their
/// types; stop querying once enough have accumulated, then pad and
/// shuffle to exactly `featured_product_count` items. An empty catalog
/// returns an empty list.
pub async fn random_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let target = state.config.featured_product_count;
    let sections = SectionRepo::list(&state.pool).await?;

    let mut groups: Vec<Vec<Product>> = Vec::new();
    let mut collected = 0;

    for section in &sections {
        let types = ProductTypeRepo::list_by_section(&state.pool, section.id).await?;
        if types.is_empty() {
            tracing::debug!(section_id = section.id, name = %section.name, "Section has no types, skipping");
            continue;
        }

        let mut group = Vec::new();
        for product_type in &types {
            group.extend(ProductRepo::list_by_type(&state.pool, product_type.id).await?);
        }

        collected += group.len();
        groups.push(group);

        // Mirrors the take_until_target cutoff so sections past the
        // target are not queried at all.
        if collected >= target {
            break;
        }
    }

    let picked = sampling::take_until_target(groups, target);
    let featured = sampling::pad_and_shuffle(picked, target, &mut rand::rng());

    Ok(Json(featured))
}
