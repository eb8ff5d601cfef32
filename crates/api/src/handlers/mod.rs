//! HTTP handler functions, grouped per resource.

pub mod auth;
pub mod health;
pub mod product_types;
pub mod products;
pub mod sections;
