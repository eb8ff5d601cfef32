//! Handlers for the `/types` resource.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use vitrine_core::catalog::{non_empty, require_field};
use vitrine_core::error::CoreError;
use vitrine_core::types::DbId;
use vitrine_db::models::product_type::{
    CreateProductType, ProductType, ProductTypeDetail, UpdateProductType,
};
use vitrine_db::repositories::{ProductRepo, ProductTypeRepo, SectionRepo};

use crate::error::{AppError, AppResult};
use crate::response::CascadeDeleted;
use crate::state::AppState;
use crate::upload;

/// GET /types
///
/// All types with their section names and product summaries.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ProductTypeDetail>>> {
    let types = ProductTypeRepo::list_with_section(&state.pool).await?;

    let mut details = Vec::with_capacity(types.len());
    for product_type in types {
        let products = ProductRepo::summaries_by_type(&state.pool, product_type.id).await?;
        details.push(ProductTypeDetail {
            product_type,
            products,
        });
    }

    Ok(Json(details))
}

/// GET /types/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProductTypeDetail>> {
    let product_type = ProductTypeRepo::find_with_section(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProductType",
            id,
        }))?;

    let products = ProductRepo::summaries_by_type(&state.pool, id).await?;

    Ok(Json(ProductTypeDetail {
        product_type,
        products,
    }))
}

/// POST /types
///
/// Multipart form: `name` and `section_id` text fields plus a `thumbnail`
/// file. The section must already exist.
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ProductType>)> {
    let form = upload::collect(multipart, &state.config.upload_dir).await?;

    let checked = async {
        let name = require_field(form.text("name"), "name")?;
        let thumbnail = require_field(form.thumbnail.as_deref(), "thumbnail")?;
        let section_id: DbId = require_field(form.text("section_id"), "section_id")?
            .trim()
            .parse()
            .map_err(|_| CoreError::Validation("Invalid section_id".into()))?;

        SectionRepo::find_by_id(&state.pool, section_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Section",
                id: section_id,
            }))?;

        Ok(CreateProductType {
            name,
            thumbnail,
            section_id,
        })
    }
    .await;
    let input = upload::or_discard(&state.config.upload_dir, &form, checked).await?;

    let product_type = ProductTypeRepo::create(&state.pool, &input).await?;

    tracing::info!(
        type_id = product_type.id,
        section_id = input.section_id,
        name = %product_type.name,
        "Product type created",
    );

    Ok((StatusCode::CREATED, Json(product_type)))
}

/// PATCH /types/{id}
///
/// Only `name` and `descriptions` are mutable. Absent or empty fields
/// leave the stored value unchanged.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProductType>,
) -> AppResult<Json<ProductType>> {
    let patch = UpdateProductType {
        name: non_empty(input.name),
        descriptions: non_empty(input.descriptions),
    };

    let product_type = ProductTypeRepo::update(&state.pool, id, &patch)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProductType",
            id,
        }))?;

    tracing::info!(type_id = id, "Product type updated");

    Ok(Json(product_type))
}

/// DELETE /types/{id}
///
/// Cascades: every product under the type is deleted in the same
/// transaction as the type itself.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CascadeDeleted>> {
    let deleted_products = ProductTypeRepo::delete_cascade(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProductType",
            id,
        }))?;

    tracing::info!(type_id = id, deleted_products, "Product type deleted with cascade");

    Ok(Json(CascadeDeleted {
        deleted: true,
        deleted_products,
    }))
}
