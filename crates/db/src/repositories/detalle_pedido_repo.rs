//! Repository for the `detalle_pedidos` table.
//!
//! Every write recomputes the owning order's total in the same transaction.

use comercio_core::types::{DbId, Money};
use sqlx::PgPool;

use crate::models::detalle_pedido::{CreateDetallePedido, DetallePedido, UpdateDetallePedido};
use crate::repositories::PedidoRepo;

const SELECT: &str = "SELECT d.id, d.pedido_id, d.producto_id, pr.nombre AS producto_nombre, \
                      d.cantidad, d.precio_unitario, d.subtotal \
                      FROM detalle_pedidos d JOIN productos pr ON pr.id = d.producto_id";

/// Provides CRUD operations for order lines.
pub struct DetallePedidoRepo;

impl DetallePedidoRepo {
    /// Insert a line with its precomputed subtotal, then refresh the order total.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDetallePedido,
        subtotal: Money,
    ) -> Result<DetallePedido, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO detalle_pedidos
                (pedido_id, producto_id, cantidad, precio_unitario, subtotal)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(input.pedido_id)
        .bind(input.producto_id)
        .bind(input.cantidad)
        .bind(input.precio_unitario)
        .bind(subtotal)
        .fetch_one(&mut *tx)
        .await?;

        PedidoRepo::recalculate_total(&mut tx, input.pedido_id).await?;

        let query = format!("{SELECT} WHERE d.id = $1");
        let line = sqlx::query_as::<_, DetallePedido>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(line)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<DetallePedido>, sqlx::Error> {
        let query = format!("{SELECT} WHERE d.id = $1");
        sqlx::query_as::<_, DetallePedido>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<DetallePedido>, sqlx::Error> {
        let query = format!("{SELECT} ORDER BY d.pedido_id, d.id");
        sqlx::query_as::<_, DetallePedido>(&query)
            .fetch_all(pool)
            .await
    }

    /// Lines belonging to any of the given orders, in insertion order.
    pub async fn list_by_pedidos(
        pool: &PgPool,
        pedido_ids: &[DbId],
    ) -> Result<Vec<DetallePedido>, sqlx::Error> {
        if pedido_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("{SELECT} WHERE d.pedido_id = ANY($1) ORDER BY d.id");
        sqlx::query_as::<_, DetallePedido>(&query)
            .bind(pedido_ids)
            .fetch_all(pool)
            .await
    }

    /// Update a line, recomputing its subtotal and the order total.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDetallePedido,
    ) -> Result<Option<DetallePedido>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        // Right-hand sides see the pre-update row, so the subtotal uses the
        // new value where given and the stored one otherwise.
        let pedido_id: Option<DbId> = sqlx::query_scalar(
            "UPDATE detalle_pedidos SET
                producto_id = COALESCE($2, producto_id),
                cantidad = COALESCE($3, cantidad),
                precio_unitario = COALESCE($4, precio_unitario),
                subtotal = COALESCE($3, cantidad) * COALESCE($4, precio_unitario)
             WHERE id = $1
             RETURNING pedido_id",
        )
        .bind(id)
        .bind(input.producto_id)
        .bind(input.cantidad)
        .bind(input.precio_unitario)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(pedido_id) = pedido_id else {
            return Ok(None);
        };

        PedidoRepo::recalculate_total(&mut tx, pedido_id).await?;

        let query = format!("{SELECT} WHERE d.id = $1");
        let line = sqlx::query_as::<_, DetallePedido>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(Some(line))
    }

    /// Delete a line and refresh the order total. Returns `true` if removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let pedido_id: Option<DbId> =
            sqlx::query_scalar("DELETE FROM detalle_pedidos WHERE id = $1 RETURNING pedido_id")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(pedido_id) = pedido_id else {
            return Ok(false);
        };

        PedidoRepo::recalculate_total(&mut tx, pedido_id).await?;
        tx.commit().await?;
        Ok(true)
    }
}
