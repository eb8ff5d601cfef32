//! Domain logic for the vitrine catalog backend.
//!
//! Everything in this crate is pure: no database access, no web types.
//! The api and db crates depend on it for the shared error taxonomy,
//! id/timestamp aliases, catalog field validation, upload-path safety,
//! and the featured-product sampling algorithm.

pub mod catalog;
pub mod error;
pub mod sampling;
pub mod storage;
pub mod types;
