//! Product model and DTOs.

use comercio_core::types::{DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A product row from the `productos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Producto {
    pub id: DbId,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub precio: Money,
    pub stock: i32,
    pub fecha_creacion: Timestamp,
    pub activo: bool,
}

/// DTO for creating a new product.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProducto {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub precio: Money,
    /// Defaults to 0 if omitted.
    pub stock: Option<i32>,
    /// Defaults to `true` if omitted.
    pub activo: Option<bool>,
}

/// DTO for updating an existing product. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProducto {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub precio: Option<Money>,
    pub stock: Option<i32>,
    pub activo: Option<bool>,
}
