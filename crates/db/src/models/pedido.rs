//! Order model and DTOs.

use comercio_core::types::{DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::detalle_pedido::DetallePedido;

/// An order row joined with its client's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Pedido {
    pub id: DbId,
    pub cliente_id: Option<DbId>,
    /// `"nombre apellido"` of the linked client, if any.
    pub cliente_nombre: Option<String>,
    pub fecha_pedido: Timestamp,
    pub estado: String,
    /// Derived from the order's lines; never client-settable.
    pub total: Money,
}

/// An order with its lines nested, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct PedidoConDetalle {
    #[serde(flatten)]
    pub pedido: Pedido,
    pub detalle_pedidos: Vec<DetallePedido>,
}

/// DTO for creating a bare order (no lines, total 0).
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePedido {
    pub cliente_id: Option<DbId>,
    /// Defaults to `pendiente` if omitted.
    pub estado: Option<String>,
}

/// DTO for updating an existing order. `total` is not client-settable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePedido {
    pub cliente_id: Option<DbId>,
    pub estado: Option<String>,
}
