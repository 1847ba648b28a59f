//! Order status constants and the order-registration input.

use serde::Deserialize;

use crate::error::CoreError;
use crate::types::{DbId, Money};
use crate::validation::{line_subtotal, validate_quantity, validate_unit_price};

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Order created, nothing shipped yet. Default for new orders.
pub const ORDER_STATUS_PENDIENTE: &str = "pendiente";

/// Order is being prepared.
pub const ORDER_STATUS_PROCESANDO: &str = "procesando";

/// Order has left the warehouse.
pub const ORDER_STATUS_ENVIADO: &str = "enviado";

/// Order reached the client.
pub const ORDER_STATUS_ENTREGADO: &str = "entregado";

/// Order was cancelled; excluded from the sales total.
pub const ORDER_STATUS_CANCELADO: &str = "cancelado";

/// All valid order status values.
pub const VALID_ORDER_STATUSES: &[&str] = &[
    ORDER_STATUS_PENDIENTE,
    ORDER_STATUS_PROCESANDO,
    ORDER_STATUS_ENVIADO,
    ORDER_STATUS_ENTREGADO,
    ORDER_STATUS_CANCELADO,
];

/// Validate that an order status string is one of the accepted values.
pub fn validate_order_status(estado: &str) -> Result<(), CoreError> {
    if VALID_ORDER_STATUSES.contains(&estado) {
        Ok(())
    } else {
        Err(CoreError::invalid_field(
            "estado",
            format!(
                "Invalid order status '{estado}'. Must be one of: {}",
                VALID_ORDER_STATUSES.join(", ")
            ),
        ))
    }
}

/* --------------------------------------------------------------------------
Order registration
-------------------------------------------------------------------------- */

/// One requested line of a new order.
#[derive(Debug, Clone, Deserialize)]
pub struct LineaPedido {
    pub producto_id: DbId,
    pub cantidad: i32,
    pub precio_unitario: Money,
}

/// Body of `POST /pedidos/registrar-nuevo-pedido/`.
///
/// Fields are optional on the wire so that missing values surface as
/// validation errors rather than deserialization failures.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistroPedidoRequest {
    pub cliente_id: Option<DbId>,
    pub estado: Option<String>,
    #[serde(default)]
    pub productos: Vec<LineaPedido>,
}

/// A validated order registration, ready for the database routine.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderRegistration {
    pub cliente_id: DbId,
    pub estado: String,
    pub productos: Vec<DbId>,
    pub cantidades: Vec<i32>,
    pub precios: Vec<Money>,
}

impl NewOrderRegistration {
    /// Validate a request and split its lines into the three parallel arrays
    /// the registration routine takes.
    pub fn from_request(req: RegistroPedidoRequest) -> Result<Self, CoreError> {
        let cliente_id = req
            .cliente_id
            .ok_or_else(|| CoreError::invalid_field("cliente_id", "Client id is required"))?;

        if req.productos.is_empty() {
            return Err(CoreError::invalid_field(
                "productos",
                "At least one product line is required",
            ));
        }

        let estado = req
            .estado
            .unwrap_or_else(|| ORDER_STATUS_PENDIENTE.to_string());
        validate_order_status(&estado)?;

        let mut productos = Vec::with_capacity(req.productos.len());
        let mut cantidades = Vec::with_capacity(req.productos.len());
        let mut precios = Vec::with_capacity(req.productos.len());

        for linea in req.productos {
            validate_quantity(linea.cantidad)?;
            validate_unit_price(linea.precio_unitario)?;
            line_subtotal(linea.cantidad, linea.precio_unitario)?;
            productos.push(linea.producto_id);
            cantidades.push(linea.cantidad);
            precios.push(linea.precio_unitario);
        }

        Ok(Self {
            cliente_id,
            estado,
            productos,
            cantidades,
            precios,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use rust_decimal::Decimal;

    use super::*;

    fn linea(producto_id: DbId, cantidad: i32, cents: i64) -> LineaPedido {
        LineaPedido {
            producto_id,
            cantidad,
            precio_unitario: Decimal::new(cents, 2),
        }
    }

    #[test]
    fn order_status_set() {
        for estado in VALID_ORDER_STATUSES {
            assert!(validate_order_status(estado).is_ok());
        }
        assert_matches!(
            validate_order_status("pending"),
            Err(CoreError::InvalidField { field: "estado", .. })
        );
    }

    #[test]
    fn registration_splits_lines_into_parallel_arrays() {
        let req = RegistroPedidoRequest {
            cliente_id: Some(7),
            estado: None,
            productos: vec![linea(1, 2, 1050), linea(3, 1, 999)],
        };

        let reg = NewOrderRegistration::from_request(req).unwrap();
        assert_eq!(reg.cliente_id, 7);
        assert_eq!(reg.estado, ORDER_STATUS_PENDIENTE);
        assert_eq!(reg.productos, vec![1, 3]);
        assert_eq!(reg.cantidades, vec![2, 1]);
        assert_eq!(reg.precios, vec![Decimal::new(1050, 2), Decimal::new(999, 2)]);
    }

    #[test]
    fn registration_requires_client() {
        let req = RegistroPedidoRequest {
            cliente_id: None,
            estado: None,
            productos: vec![linea(1, 1, 100)],
        };
        assert_matches!(
            NewOrderRegistration::from_request(req),
            Err(CoreError::InvalidField { field: "cliente_id", .. })
        );
    }

    #[test]
    fn registration_requires_lines() {
        let req = RegistroPedidoRequest {
            cliente_id: Some(1),
            estado: None,
            productos: vec![],
        };
        assert_matches!(
            NewOrderRegistration::from_request(req),
            Err(CoreError::InvalidField { field: "productos", .. })
        );
    }

    #[test]
    fn registration_rejects_bad_line() {
        let req = RegistroPedidoRequest {
            cliente_id: Some(1),
            estado: Some(ORDER_STATUS_PROCESANDO.into()),
            productos: vec![linea(1, 0, 100)],
        };
        assert_matches!(
            NewOrderRegistration::from_request(req),
            Err(CoreError::InvalidField { field: "cantidad", .. })
        );
    }

    #[test]
    fn request_deserializes_without_optional_fields() {
        let req: RegistroPedidoRequest = serde_json::from_str(
            r#"{"cliente_id": 4, "productos": [{"producto_id": 2, "cantidad": 3, "precio_unitario": "4.50"}]}"#,
        )
        .unwrap();
        assert_eq!(req.cliente_id, Some(4));
        assert!(req.estado.is_none());
        assert_eq!(req.productos[0].precio_unitario, Decimal::new(450, 2));
    }
}
