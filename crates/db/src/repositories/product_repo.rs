//! Repository for the `products` table.

use sqlx::types::Json;
use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::product::{CreateProduct, Product, ProductWithTypeName, UpdateProduct};
use crate::models::product_type::ProductSummary;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, price, quantity, images, thumbnail, type_id, \
    characteristics, descriptions, created_at, updated_at";

/// Joined column list for queries that carry the owning type's name.
const JOINED_COLUMNS: &str = "p.id, p.name, p.price, p.quantity, p.images, p.thumbnail, \
    p.type_id, t.name AS type_name, p.characteristics, p.descriptions, \
    p.created_at, p.updated_at";

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products
                (name, price, quantity, images, thumbnail, type_id,
                 characteristics, descriptions)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(&input.price)
            .bind(input.quantity)
            .bind(&input.images)
            .bind(&input.thumbnail)
            .bind(input.type_id)
            .bind(Json(&input.characteristics))
            .bind(&input.descriptions)
            .fetch_one(pool)
            .await
    }

    /// Find a product by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a product together with its type's name.
    pub async fn find_with_type_name(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProductWithTypeName>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM products p
             JOIN product_types t ON t.id = p.type_id
             WHERE p.id = $1"
        );
        sqlx::query_as::<_, ProductWithTypeName>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all products with their type names, in insertion order.
    pub async fn list_with_type_name(
        pool: &PgPool,
    ) -> Result<Vec<ProductWithTypeName>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM products p
             JOIN product_types t ON t.id = p.type_id
             ORDER BY p.id"
        );
        sqlx::query_as::<_, ProductWithTypeName>(&query)
            .fetch_all(pool)
            .await
    }

    /// List the products under one type. Empty is a valid result.
    ///
    /// This query is the single source of truth for the type→products
    /// relationship; there is no stored product list to fall out of sync.
    pub async fn list_by_type(pool: &PgPool, type_id: DbId) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE type_id = $1 ORDER BY id");
        sqlx::query_as::<_, Product>(&query)
            .bind(type_id)
            .fetch_all(pool)
            .await
    }

    /// List abbreviated product rows for a set of type listings.
    pub async fn summaries_by_type(
        pool: &PgPool,
        type_id: DbId,
    ) -> Result<Vec<ProductSummary>, sqlx::Error> {
        sqlx::query_as::<_, ProductSummary>(
            "SELECT id, name, descriptions, images, thumbnail, type_id
             FROM products WHERE type_id = $1 ORDER BY id",
        )
        .bind(type_id)
        .fetch_all(pool)
        .await
    }

    /// Update a product. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                name = COALESCE($2, name),
                price = COALESCE($3, price),
                quantity = COALESCE($4, quantity),
                images = COALESCE($5, images),
                thumbnail = COALESCE($6, thumbnail),
                type_id = COALESCE($7, type_id),
                characteristics = COALESCE($8, characteristics),
                descriptions = COALESCE($9, descriptions),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.price)
            .bind(input.quantity)
            .bind(&input.images)
            .bind(&input.thumbnail)
            .bind(input.type_id)
            .bind(input.characteristics.as_ref().map(Json))
            .bind(&input.descriptions)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a product by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
