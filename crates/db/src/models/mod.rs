//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod cliente;
pub mod detalle_pedido;
pub mod devolucion;
pub mod pedido;
pub mod producto;
pub mod session;
pub mod usuario;
