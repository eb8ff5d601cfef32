//! Repository for the `sections` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::section::{CreateSection, Section};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, thumbnail, created_at, updated_at";

/// Provides CRUD operations for sections.
pub struct SectionRepo;

impl SectionRepo {
    /// Insert a new section, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSection) -> Result<Section, sqlx::Error> {
        let query = format!(
            "INSERT INTO sections (name, thumbnail)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Section>(&query)
            .bind(&input.name)
            .bind(&input.thumbnail)
            .fetch_one(pool)
            .await
    }

    /// Find a section by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Section>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sections WHERE id = $1");
        sqlx::query_as::<_, Section>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all sections in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Section>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sections ORDER BY id");
        sqlx::query_as::<_, Section>(&query).fetch_all(pool).await
    }
}
