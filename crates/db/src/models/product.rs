//! Product entity model and DTOs.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use vitrine_core::catalog::Characteristic;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    /// Decimal-as-text, stored exactly as entered by the admin.
    pub price: String,
    pub quantity: i32,
    /// Relative paths of stored gallery images. May be empty after removals.
    pub images: Vec<String>,
    pub thumbnail: String,
    pub type_id: DbId,
    /// Ordered name/value pairs, stored as a JSONB array.
    pub characteristics: Json<Vec<Characteristic>>,
    pub descriptions: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A product joined with its owning type's name, for the flat listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductWithTypeName {
    pub id: DbId,
    pub name: String,
    pub price: String,
    pub quantity: i32,
    pub images: Vec<String>,
    pub thumbnail: String,
    pub type_id: DbId,
    pub type_name: String,
    pub characteristics: Json<Vec<Characteristic>>,
    pub descriptions: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new product. Built from a validated multipart form.
#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub name: String,
    pub price: String,
    pub quantity: i32,
    pub images: Vec<String>,
    pub thumbnail: String,
    pub type_id: DbId,
    pub characteristics: Vec<Characteristic>,
    pub descriptions: String,
}

/// DTO for patching a product. `None` fields are left unchanged.
///
/// `images` carries the fully recomputed gallery (existing plus newly
/// uploaded minus removed); the handler owns that computation.
#[derive(Debug, Clone, Default)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub price: Option<String>,
    pub quantity: Option<i32>,
    pub images: Option<Vec<String>>,
    pub thumbnail: Option<String>,
    pub type_id: Option<DbId>,
    pub characteristics: Option<Vec<Characteristic>>,
    pub descriptions: Option<String>,
}
