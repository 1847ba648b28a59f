//! Repository for the `devoluciones` table.

use comercio_core::types::DbId;
use sqlx::PgPool;

use crate::models::devolucion::{CreateDevolucion, Devolucion, UpdateDevolucion};

/// Projection shared by every read; `dv` must alias a `devoluciones`-shaped row.
const PROJECTION: &str = "dv.id, dv.pedido_id, dv.producto_id, pr.nombre AS producto_nombre, \
                          dv.cantidad, dv.fecha_devolucion, dv.motivo, dv.estado";

/// Provides CRUD operations for product returns.
pub struct DevolucionRepo;

impl DevolucionRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateDevolucion,
    ) -> Result<Devolucion, sqlx::Error> {
        let query = format!(
            "WITH dv AS (
                INSERT INTO devoluciones (pedido_id, producto_id, cantidad, motivo, estado)
                VALUES ($1, $2, $3, $4, COALESCE($5, 'solicitada'))
                RETURNING *
             )
             SELECT {PROJECTION} FROM dv JOIN productos pr ON pr.id = dv.producto_id"
        );
        sqlx::query_as::<_, Devolucion>(&query)
            .bind(input.pedido_id)
            .bind(input.producto_id)
            .bind(input.cantidad)
            .bind(&input.motivo)
            .bind(&input.estado)
            .fetch_one(pool)
            .await
    }

    /// Find a return by ID, optionally restricted to returns on one client's orders.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        cliente_id: Option<DbId>,
    ) -> Result<Option<Devolucion>, sqlx::Error> {
        let query = format!(
            "SELECT {PROJECTION} FROM devoluciones dv
             JOIN productos pr ON pr.id = dv.producto_id
             JOIN pedidos p ON p.id = dv.pedido_id
             WHERE dv.id = $1 AND ($2::BIGINT IS NULL OR p.cliente_id = $2)"
        );
        sqlx::query_as::<_, Devolucion>(&query)
            .bind(id)
            .bind(cliente_id)
            .fetch_optional(pool)
            .await
    }

    /// List returns newest first, optionally restricted to one client's orders.
    pub async fn list(
        pool: &PgPool,
        cliente_id: Option<DbId>,
    ) -> Result<Vec<Devolucion>, sqlx::Error> {
        let query = format!(
            "SELECT {PROJECTION} FROM devoluciones dv
             JOIN productos pr ON pr.id = dv.producto_id
             JOIN pedidos p ON p.id = dv.pedido_id
             WHERE ($1::BIGINT IS NULL OR p.cliente_id = $1)
             ORDER BY dv.fecha_devolucion DESC, dv.id DESC"
        );
        sqlx::query_as::<_, Devolucion>(&query)
            .bind(cliente_id)
            .fetch_all(pool)
            .await
    }

    /// Update a return. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDevolucion,
    ) -> Result<Option<Devolucion>, sqlx::Error> {
        let query = format!(
            "WITH dv AS (
                UPDATE devoluciones SET
                    producto_id = COALESCE($2, producto_id),
                    cantidad = COALESCE($3, cantidad),
                    motivo = COALESCE($4, motivo),
                    estado = COALESCE($5, estado)
                WHERE id = $1
                RETURNING *
             )
             SELECT {PROJECTION} FROM dv JOIN productos pr ON pr.id = dv.producto_id"
        );
        sqlx::query_as::<_, Devolucion>(&query)
            .bind(id)
            .bind(input.producto_id)
            .bind(input.cantidad)
            .bind(&input.motivo)
            .bind(&input.estado)
            .fetch_optional(pool)
            .await
    }

    /// Set a return's status. Approval restocks the product via trigger.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        estado: &str,
    ) -> Result<Option<Devolucion>, sqlx::Error> {
        let query = format!(
            "WITH dv AS (
                UPDATE devoluciones SET estado = $2 WHERE id = $1 RETURNING *
             )
             SELECT {PROJECTION} FROM dv JOIN productos pr ON pr.id = dv.producto_id"
        );
        sqlx::query_as::<_, Devolucion>(&query)
            .bind(id)
            .bind(estado)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM devoluciones WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
