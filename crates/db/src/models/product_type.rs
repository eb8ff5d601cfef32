//! Product type entity model and DTOs.
//!
//! A product type belongs to exactly one section. Its products are never
//! stored as a list on the row; they are always computed by querying
//! `products.type_id`, which keeps the two sides of the relationship from
//! drifting.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `product_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductType {
    pub id: DbId,
    pub name: String,
    /// Relative path to the stored thumbnail image.
    pub thumbnail: String,
    pub section_id: DbId,
    /// Free-text blurb shown on category pages. Patchable, may be unset.
    pub descriptions: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new product type. Built from a validated multipart form.
#[derive(Debug, Clone)]
pub struct CreateProductType {
    pub name: String,
    pub thumbnail: String,
    pub section_id: DbId,
}

/// DTO for `PATCH /types/{id}`. Only `name` and `descriptions` are mutable.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProductType {
    pub name: Option<String>,
    pub descriptions: Option<String>,
}

/// A product type joined with its owning section's name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductTypeWithSection {
    pub id: DbId,
    pub name: String,
    pub thumbnail: String,
    pub section_id: DbId,
    pub section_name: String,
    pub descriptions: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Abbreviated product row embedded in type listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductSummary {
    pub id: DbId,
    pub name: String,
    pub descriptions: String,
    pub images: Vec<String>,
    pub thumbnail: String,
    pub type_id: DbId,
}

/// Full type detail: the joined row plus its product summaries.
#[derive(Debug, Clone, Serialize)]
pub struct ProductTypeDetail {
    #[serde(flatten)]
    pub product_type: ProductTypeWithSection,
    pub products: Vec<ProductSummary>,
}
