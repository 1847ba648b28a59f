//! Client model and DTOs.

use comercio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A client row from the `clientes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Cliente {
    pub id: DbId,
    /// Linked login account, if any. Nulled when the account is deleted.
    pub usuario_id: Option<DbId>,
    pub nombre: String,
    pub apellido: String,
    pub direccion: Option<String>,
    pub telefono: Option<String>,
    pub email: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new client.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCliente {
    pub usuario_id: Option<DbId>,
    pub nombre: String,
    pub apellido: String,
    pub direccion: Option<String>,
    pub telefono: Option<String>,
    pub email: String,
}

/// DTO for updating an existing client. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCliente {
    pub usuario_id: Option<DbId>,
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub direccion: Option<String>,
    pub telefono: Option<String>,
    pub email: Option<String>,
}
