//! Section entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `sections` table. Top-level catalog grouping.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Section {
    pub id: DbId,
    pub name: String,
    /// Relative path to the stored thumbnail image.
    pub thumbnail: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new section. Built from a validated multipart form.
#[derive(Debug, Clone)]
pub struct CreateSection {
    pub name: String,
    pub thumbnail: String,
}
