//! Shared response body types for API handlers.
//!
//! Typed structs instead of ad-hoc `serde_json::json!` calls, so response
//! shapes stay consistent and compile-checked.

use serde::Serialize;
use vitrine_db::models::product::Product;
use vitrine_db::models::product_type::ProductType;

/// Body for a successful single-entity delete.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub deleted: bool,
}

/// Body for a type delete, which cascades to the products under it.
#[derive(Debug, Serialize)]
pub struct CascadeDeleted {
    pub deleted: bool,
    /// How many products were removed along with the type.
    pub deleted_products: u64,
}

/// Body for `POST /types/{type_id}/products`: the created product together
/// with its owning type, matching what the storefront admin UI consumes.
#[derive(Debug, Serialize)]
pub struct ProductWithType {
    pub product: Product,
    #[serde(rename = "type")]
    pub product_type: ProductType,
}
