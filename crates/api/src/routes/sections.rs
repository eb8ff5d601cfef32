use axum::routing::get;
use axum::Router;

use crate::handlers::sections;
use crate::state::AppState;

/// Routes mounted at `/sections`.
///
/// `random-products` is a literal segment, so it never shadows the
/// `{id}/types` route.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sections", get(sections::list).post(sections::create))
        .route("/sections/random-products", get(sections::random_products))
        .route("/sections/{id}/types", get(sections::list_types))
}
