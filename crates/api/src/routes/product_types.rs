use axum::routing::get;
use axum::Router;

use crate::handlers::{product_types, products};
use crate::state::AppState;

/// Routes mounted at `/types`.
///
/// The type-scoped product routes live here too; their handlers are in
/// the products module.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/types",
            get(product_types::list).post(product_types::create),
        )
        .route(
            "/types/{id}",
            get(product_types::get_by_id)
                .patch(product_types::update)
                .delete(product_types::delete),
        )
        .route(
            "/types/{id}/products",
            get(products::list_by_type).post(products::create_under_type),
        )
}
