pub mod auth;
pub mod clientes;
pub mod detalle_pedidos;
pub mod devoluciones;
pub mod pedidos;
pub mod productos;
pub mod usuarios;

use comercio_core::error::CoreError;
use comercio_core::types::DbId;
use comercio_db::repositories::{ClienteRepo, ProductoRepo};
use comercio_db::DbPool;

use crate::error::AppResult;

/// Reject a `cliente_id` that names no client as a field error.
pub(crate) async fn ensure_cliente_exists(pool: &DbPool, cliente_id: DbId) -> AppResult<()> {
    if ClienteRepo::find_by_id(pool, cliente_id).await?.is_none() {
        return Err(CoreError::invalid_field(
            "cliente_id",
            format!("Cliente {cliente_id} does not exist"),
        )
        .into());
    }
    Ok(())
}

/// Reject a `producto_id` that names no product as a field error.
pub(crate) async fn ensure_producto_exists(pool: &DbPool, producto_id: DbId) -> AppResult<()> {
    if ProductoRepo::find_by_id(pool, producto_id).await?.is_none() {
        return Err(CoreError::invalid_field(
            "producto_id",
            format!("Producto {producto_id} does not exist"),
        )
        .into());
    }
    Ok(())
}
