//! Repository for the `pedidos` table.

use comercio_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::pedido::{CreatePedido, Pedido, UpdatePedido};

/// Projection shared by every read; `p` must alias a `pedidos`-shaped row.
const PROJECTION: &str = "p.id, p.cliente_id, c.nombre || ' ' || c.apellido AS cliente_nombre, \
                          p.fecha_pedido, p.estado, p.total";

/// Provides CRUD operations for orders.
pub struct PedidoRepo;

impl PedidoRepo {
    /// Insert a bare order (no lines, total 0).
    pub async fn create(pool: &PgPool, input: &CreatePedido) -> Result<Pedido, sqlx::Error> {
        let query = format!(
            "WITH p AS (
                INSERT INTO pedidos (cliente_id, estado)
                VALUES ($1, COALESCE($2, 'pendiente'))
                RETURNING *
             )
             SELECT {PROJECTION} FROM p LEFT JOIN clientes c ON c.id = p.cliente_id"
        );
        sqlx::query_as::<_, Pedido>(&query)
            .bind(input.cliente_id)
            .bind(&input.estado)
            .fetch_one(pool)
            .await
    }

    /// Find an order by ID, optionally restricted to one client's orders.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        cliente_id: Option<DbId>,
    ) -> Result<Option<Pedido>, sqlx::Error> {
        let query = format!(
            "SELECT {PROJECTION} FROM pedidos p
             LEFT JOIN clientes c ON c.id = p.cliente_id
             WHERE p.id = $1 AND ($2::BIGINT IS NULL OR p.cliente_id = $2)"
        );
        sqlx::query_as::<_, Pedido>(&query)
            .bind(id)
            .bind(cliente_id)
            .fetch_optional(pool)
            .await
    }

    /// List orders newest first, optionally restricted to one client's orders.
    pub async fn list(pool: &PgPool, cliente_id: Option<DbId>) -> Result<Vec<Pedido>, sqlx::Error> {
        let query = format!(
            "SELECT {PROJECTION} FROM pedidos p
             LEFT JOIN clientes c ON c.id = p.cliente_id
             WHERE ($1::BIGINT IS NULL OR p.cliente_id = $1)
             ORDER BY p.fecha_pedido DESC, p.id DESC"
        );
        sqlx::query_as::<_, Pedido>(&query)
            .bind(cliente_id)
            .fetch_all(pool)
            .await
    }

    /// Update an order's client or status. The total is never touched here.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePedido,
    ) -> Result<Option<Pedido>, sqlx::Error> {
        let query = format!(
            "WITH p AS (
                UPDATE pedidos SET
                    cliente_id = COALESCE($2, cliente_id),
                    estado = COALESCE($3, estado)
                WHERE id = $1
                RETURNING *
             )
             SELECT {PROJECTION} FROM p LEFT JOIN clientes c ON c.id = p.cliente_id"
        );
        sqlx::query_as::<_, Pedido>(&query)
            .bind(id)
            .bind(input.cliente_id)
            .bind(&input.estado)
            .fetch_optional(pool)
            .await
    }

    /// Delete an order together with its lines and returns.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pedidos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Recompute an order's total from its lines.
    ///
    /// Takes a connection so callers can run it inside the transaction that
    /// changed the lines.
    pub async fn recalculate_total(
        conn: &mut PgConnection,
        pedido_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE pedidos SET total = COALESCE(
                (SELECT SUM(subtotal) FROM detalle_pedidos WHERE pedido_id = $1), 0)
             WHERE id = $1",
        )
        .bind(pedido_id)
        .execute(conn)
        .await?;
        Ok(())
    }
}
