//! Postgres implementation of [`OrderRoutines`].
//!
//! Both operations run inside the database: `registrar_pedido` is a stored
//! procedure and `ventas_totales` a stored function, created by the
//! `20250101000007_create_order_routines.sql` migration.

use async_trait::async_trait;
use comercio_core::error::CoreError;
use comercio_core::pedido::NewOrderRegistration;
use comercio_core::routines::OrderRoutines;
use comercio_core::types::Money;

use crate::DbPool;

/// Calls the order routines through a connection pool.
#[derive(Clone)]
pub struct PgOrderRoutines {
    pool: DbPool,
}

impl PgOrderRoutines {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRoutines for PgOrderRoutines {
    async fn register_order(&self, order: &NewOrderRegistration) -> Result<(), CoreError> {
        sqlx::query("CALL registrar_pedido($1, $2, $3, $4, $5)")
            .bind(order.cliente_id)
            .bind(&order.estado)
            .bind(&order.productos[..])
            .bind(&order.cantidades[..])
            .bind(&order.precios[..])
            .execute(&self.pool)
            .await
            .map_err(routine_error)?;

        tracing::debug!(
            cliente_id = order.cliente_id,
            lines = order.productos.len(),
            "registrar_pedido completed"
        );
        Ok(())
    }

    async fn sales_total(&self) -> Result<Money, CoreError> {
        sqlx::query_scalar::<_, Money>("SELECT ventas_totales()")
            .fetch_one(&self.pool)
            .await
            .map_err(routine_error)
    }
}

/// Surface the database's own message; callers see it verbatim.
fn routine_error(err: sqlx::Error) -> CoreError {
    let message = match &err {
        sqlx::Error::Database(db_err) => db_err.message().to_string(),
        other => other.to_string(),
    };
    tracing::error!(error = %err, "Order routine failed");
    CoreError::Operation(message)
}
