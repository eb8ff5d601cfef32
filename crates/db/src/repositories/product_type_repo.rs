//! Repository for the `product_types` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::product_type::{
    CreateProductType, ProductType, ProductTypeWithSection, UpdateProductType,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, thumbnail, section_id, descriptions, created_at, updated_at";

/// Joined column list for queries that carry the owning section's name.
const JOINED_COLUMNS: &str = "t.id, t.name, t.thumbnail, t.section_id, \
    s.name AS section_name, t.descriptions, t.created_at, t.updated_at";

/// Provides CRUD operations for product types.
pub struct ProductTypeRepo;

impl ProductTypeRepo {
    /// Insert a new product type, returning the created row.
    ///
    /// `section_id` is enforced by a foreign key; callers resolve the
    /// section first so a missing one surfaces as a domain not-found
    /// instead of a constraint violation.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProductType,
    ) -> Result<ProductType, sqlx::Error> {
        let query = format!(
            "INSERT INTO product_types (name, thumbnail, section_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductType>(&query)
            .bind(&input.name)
            .bind(&input.thumbnail)
            .bind(input.section_id)
            .fetch_one(pool)
            .await
    }

    /// Find a product type by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProductType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM product_types WHERE id = $1");
        sqlx::query_as::<_, ProductType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a product type together with its section's name.
    pub async fn find_with_section(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProductTypeWithSection>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM product_types t
             JOIN sections s ON s.id = t.section_id
             WHERE t.id = $1"
        );
        sqlx::query_as::<_, ProductTypeWithSection>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all product types with their section names, in insertion order.
    pub async fn list_with_section(
        pool: &PgPool,
    ) -> Result<Vec<ProductTypeWithSection>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM product_types t
             JOIN sections s ON s.id = t.section_id
             ORDER BY t.id"
        );
        sqlx::query_as::<_, ProductTypeWithSection>(&query)
            .fetch_all(pool)
            .await
    }

    /// List the product types under one section. Empty is a valid result.
    pub async fn list_by_section(
        pool: &PgPool,
        section_id: DbId,
    ) -> Result<Vec<ProductType>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM product_types WHERE section_id = $1 ORDER BY id");
        sqlx::query_as::<_, ProductType>(&query)
            .bind(section_id)
            .fetch_all(pool)
            .await
    }

    /// Update a product type. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProductType,
    ) -> Result<Option<ProductType>, sqlx::Error> {
        let query = format!(
            "UPDATE product_types SET
                name = COALESCE($2, name),
                descriptions = COALESCE($3, descriptions),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductType>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.descriptions)
            .fetch_optional(pool)
            .await
    }

    /// Delete a product type and every product under it, atomically.
    ///
    /// Returns `None` if the type does not exist (nothing is deleted),
    /// otherwise the number of cascade-deleted products. Running both
    /// deletes in one transaction means a failure partway leaves the
    /// catalog untouched rather than silently half-cleaned.
    pub async fn delete_cascade(pool: &PgPool, id: DbId) -> Result<Option<u64>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let products = sqlx::query("DELETE FROM products WHERE type_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let types = sqlx::query("DELETE FROM product_types WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if types.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        Ok(Some(products.rows_affected()))
    }
}
