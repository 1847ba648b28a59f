//! Product return model and DTOs.

use comercio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A return row joined with its product's name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Devolucion {
    pub id: DbId,
    pub pedido_id: DbId,
    pub producto_id: DbId,
    pub producto_nombre: String,
    pub cantidad: i32,
    pub fecha_devolucion: Timestamp,
    pub motivo: Option<String>,
    pub estado: String,
}

/// DTO for creating a return.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDevolucion {
    pub pedido_id: DbId,
    pub producto_id: DbId,
    pub cantidad: i32,
    pub motivo: Option<String>,
    /// Defaults to `solicitada` if omitted.
    pub estado: Option<String>,
}

/// DTO for updating a return. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDevolucion {
    pub producto_id: Option<DbId>,
    pub cantidad: Option<i32>,
    pub motivo: Option<String>,
    pub estado: Option<String>,
}
