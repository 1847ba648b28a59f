//! Repository for the `productos` table.

use comercio_core::types::DbId;
use sqlx::PgPool;

use crate::models::producto::{CreateProducto, Producto, UpdateProducto};

const COLUMNS: &str = "id, nombre, descripcion, precio, stock, fecha_creacion, activo";

/// Provides CRUD operations for products.
pub struct ProductoRepo;

impl ProductoRepo {
    pub async fn create(pool: &PgPool, input: &CreateProducto) -> Result<Producto, sqlx::Error> {
        let query = format!(
            "INSERT INTO productos (nombre, descripcion, precio, stock, activo)
             VALUES ($1, $2, $3, COALESCE($4, 0), COALESCE($5, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Producto>(&query)
            .bind(&input.nombre)
            .bind(&input.descripcion)
            .bind(input.precio)
            .bind(input.stock)
            .bind(input.activo)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Producto>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM productos WHERE id = $1");
        sqlx::query_as::<_, Producto>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all products ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Producto>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM productos ORDER BY nombre, id");
        sqlx::query_as::<_, Producto>(&query).fetch_all(pool).await
    }

    /// Update a product. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProducto,
    ) -> Result<Option<Producto>, sqlx::Error> {
        let query = format!(
            "UPDATE productos SET
                nombre = COALESCE($2, nombre),
                descripcion = COALESCE($3, descripcion),
                precio = COALESCE($4, precio),
                stock = COALESCE($5, stock),
                activo = COALESCE($6, activo)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Producto>(&query)
            .bind(id)
            .bind(&input.nombre)
            .bind(&input.descripcion)
            .bind(input.precio)
            .bind(input.stock)
            .bind(input.activo)
            .fetch_optional(pool)
            .await
    }

    /// Delete a product. Fails with a foreign-key violation while any order
    /// line or return still references it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM productos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
