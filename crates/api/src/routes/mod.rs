//! Route tree assembly.
//!
//! Each submodule exposes a `router()` for one resource; [`app_routes`]
//! merges them. Static upload serving and the middleware stack are added
//! by the binary entrypoint (and mirrored by the integration test
//! harness).

pub mod auth;
pub mod health;
pub mod product_types;
pub mod products;
pub mod sections;

use axum::Router;

use crate::state::AppState;

/// Build the complete API route tree.
///
/// ```text
/// GET    /health                      liveness + db check
///
/// POST   /auth/login                  authenticate, returns JWT
///
/// GET    /sections                    list sections
/// POST   /sections                    create section (multipart)
/// GET    /sections/random-products    featured-product sampling
/// GET    /sections/{id}/types         types under a section
///
/// GET    /types                       types with section + product summaries
/// POST   /types                       create type (multipart)
/// GET    /types/{id}                  single type with details
/// PATCH  /types/{id}                  update name/descriptions
/// DELETE /types/{id}                  delete type + cascade products
/// GET    /types/{id}/products         products under a type
/// POST   /types/{id}/products         create product under a type (multipart)
///
/// GET    /products                    products with type names
/// POST   /products                    create product (multipart)
/// GET    /products/{id}               single product
/// PATCH  /products/{id}               partial update (multipart)
/// DELETE /products/{id}               delete product
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(sections::router())
        .merge(product_types::router())
        .merge(products::router())
}
