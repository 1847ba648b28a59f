//! Order line model and DTOs.

use comercio_core::types::{DbId, Money};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An order line joined with its product's name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DetallePedido {
    pub id: DbId,
    pub pedido_id: DbId,
    pub producto_id: DbId,
    pub producto_nombre: String,
    pub cantidad: i32,
    pub precio_unitario: Money,
    /// Always `cantidad * precio_unitario`.
    pub subtotal: Money,
}

/// DTO for creating an order line. The subtotal is computed server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDetallePedido {
    pub pedido_id: DbId,
    pub producto_id: DbId,
    pub cantidad: i32,
    pub precio_unitario: Money,
}

/// DTO for updating an order line. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDetallePedido {
    pub producto_id: Option<DbId>,
    pub cantidad: Option<i32>,
    pub precio_unitario: Option<Money>,
}
