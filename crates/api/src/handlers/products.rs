//! Handlers for the `/products` resource, plus the type-scoped product
//! routes mounted under `/types/{id}/products`.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use sqlx::PgPool;
use vitrine_core::catalog::{non_empty, parse_characteristics, parse_quantity, require_field};
use vitrine_core::error::CoreError;
use vitrine_core::types::DbId;
use vitrine_db::models::product::{CreateProduct, Product, ProductWithTypeName, UpdateProduct};
use vitrine_db::repositories::{ProductRepo, ProductTypeRepo};

use crate::error::{AppError, AppResult};
use crate::response::{Deleted, ProductWithType};
use crate::state::AppState;
use crate::upload::{self, UploadForm};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Resolve a product type or fail with NotFound.
async fn ensure_type_exists(pool: &PgPool, type_id: DbId) -> AppResult<()> {
    ProductTypeRepo::find_by_id(pool, type_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProductType",
            id: type_id,
        }))?;
    Ok(())
}

/// Build a [`CreateProduct`] from a collected multipart form.
///
/// All text fields are required; `characteristics` must be a JSON array of
/// name/value pairs; a `thumbnail` file must have been uploaded. Gallery
/// images are optional.
fn parse_create_form(type_id: DbId, form: &UploadForm) -> AppResult<CreateProduct> {
    let characteristics =
        parse_characteristics(&require_field(form.text("characteristics"), "characteristics")?)?;
    let quantity = parse_quantity(&require_field(form.text("quantity"), "quantity")?)?;

    Ok(CreateProduct {
        name: require_field(form.text("name"), "name")?,
        price: require_field(form.text("price"), "price")?,
        quantity,
        images: form.images.clone(),
        thumbnail: require_field(form.thumbnail.as_deref(), "thumbnail")?,
        type_id,
        characteristics,
        descriptions: require_field(form.text("descriptions"), "descriptions")?,
    })
}

/// Gather removed-image references from a patch form.
///
/// `deleted_images` may appear several times, carry a single path, or
/// carry a JSON array of paths in one value; all three forms are accepted.
fn removed_image_refs(form: &UploadForm) -> Vec<String> {
    let mut refs = Vec::new();
    for raw in form.all("deleted_images") {
        let value = raw.trim();
        if value.is_empty() {
            continue;
        }
        if value.starts_with('[') {
            if let Ok(list) = serde_json::from_str::<Vec<String>>(value) {
                refs.extend(list);
                continue;
            }
        }
        refs.push(value.to_string());
    }
    refs
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /products
///
/// All products with their type names.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ProductWithTypeName>>> {
    let products = ProductRepo::list_with_type_name(&state.pool).await?;
    Ok(Json(products))
}

/// GET /products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProductWithTypeName>> {
    let product = ProductRepo::find_with_type_name(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    Ok(Json(product))
}

/// GET /types/{id}/products
///
/// An unknown type id yields an empty list, not an error.
pub async fn list_by_type(
    State(state): State<AppState>,
    Path(type_id): Path<DbId>,
) -> AppResult<Json<Vec<Product>>> {
    let products = ProductRepo::list_by_type(&state.pool, type_id).await?;
    Ok(Json(products))
}

/// POST /products
///
/// Multipart form with a `type_id` text field naming the owning type.
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Product>)> {
    let form = upload::collect(multipart, &state.config.upload_dir).await?;

    let checked = async {
        let type_id: DbId = require_field(form.text("type_id"), "type_id")?
            .trim()
            .parse()
            .map_err(|_| CoreError::Validation("Invalid type_id".into()))?;
        ensure_type_exists(&state.pool, type_id).await?;
        parse_create_form(type_id, &form)
    }
    .await;
    let input = upload::or_discard(&state.config.upload_dir, &form, checked).await?;

    let product = ProductRepo::create(&state.pool, &input).await?;

    tracing::info!(
        product_id = product.id,
        type_id = input.type_id,
        name = %product.name,
        "Product created",
    );

    Ok((StatusCode::CREATED, Json(product)))
}

/// POST /types/{id}/products
///
/// Same as `POST /products` with the owning type taken from the path;
/// responds with both the created product and its type.
pub async fn create_under_type(
    State(state): State<AppState>,
    Path(type_id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ProductWithType>)> {
    let form = upload::collect(multipart, &state.config.upload_dir).await?;

    let checked = async {
        let product_type = ProductTypeRepo::find_by_id(&state.pool, type_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "ProductType",
                id: type_id,
            }))?;
        let input = parse_create_form(type_id, &form)?;
        Ok((product_type, input))
    }
    .await;
    let (product_type, input) = upload::or_discard(&state.config.upload_dir, &form, checked).await?;

    let product = ProductRepo::create(&state.pool, &input).await?;

    tracing::info!(product_id = product.id, type_id, name = %product.name, "Product created");

    Ok((
        StatusCode::CREATED,
        Json(ProductWithType {
            product,
            product_type,
        }),
    ))
}

/// PATCH /products/{id}
///
/// Multipart patch. Text fields that are absent or empty leave the stored
/// value unchanged. New `images` files are appended to the gallery and a
/// new `thumbnail` file replaces the old one. Paths listed in
/// `deleted_images` are removed from the gallery; their files are deleted
/// from storage when present (a path with no file is a no-op).
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<Product>> {
    let form = upload::collect(multipart, &state.config.upload_dir).await?;

    // The whole patch runs inside the discard guard: a failure at any
    // point (unknown product, bad field, unknown target type) must not
    // leave this request's fresh uploads orphaned on disk.
    let applied = async {
        let product = ProductRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Product",
                id,
            }))?;

        let quantity = match non_empty(form.text("quantity").map(str::to_string)) {
            Some(raw) => Some(parse_quantity(&raw)?),
            None => None,
        };
        let characteristics = match non_empty(form.text("characteristics").map(str::to_string)) {
            Some(raw) => Some(parse_characteristics(&raw)?),
            None => None,
        };
        let type_id = match non_empty(form.text("type_id").map(str::to_string)) {
            Some(raw) => {
                let type_id: DbId = raw
                    .trim()
                    .parse()
                    .map_err(|_| CoreError::Validation("Invalid type_id".into()))?;
                ensure_type_exists(&state.pool, type_id).await?;
                Some(type_id)
            }
            None => None,
        };

        // Recompute the gallery: drop removed references, append new uploads.
        let removed = removed_image_refs(&form);
        for reference in &removed {
            upload::remove_stored_file(&state.config.upload_dir, reference).await?;
        }
        let mut images = product.images.clone();
        images.retain(|image| !removed.contains(image));
        images.extend(form.images.iter().cloned());

        let patch = UpdateProduct {
            name: non_empty(form.text("name").map(str::to_string)),
            price: non_empty(form.text("price").map(str::to_string)),
            quantity,
            images: Some(images),
            thumbnail: form.thumbnail.clone(),
            type_id,
            characteristics,
            descriptions: non_empty(form.text("descriptions").map(str::to_string)),
        };

        ProductRepo::update(&state.pool, id, &patch)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Product",
                id,
            }))
    }
    .await;
    let updated = upload::or_discard(&state.config.upload_dir, &form, applied).await?;

    tracing::info!(product_id = id, "Product updated");

    Ok(Json(updated))
}

/// DELETE /products/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Deleted>> {
    let deleted = ProductRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }));
    }

    tracing::info!(product_id = id, "Product deleted");

    Ok(Json(Deleted { deleted: true }))
}
