//! Route definitions for the `/pedidos` resource and its database routines.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::pedidos;
use crate::state::AppState;

/// ```text
/// GET, POST                   /pedidos/
/// POST                        /pedidos/registrar-nuevo-pedido/
/// GET                         /pedidos/ventas-totales/
/// GET, PUT, PATCH, DELETE     /pedidos/{id}/
/// ```
///
/// The static segments take priority over `{id}`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pedidos/", get(pedidos::list).post(pedidos::create))
        .route(
            "/pedidos/registrar-nuevo-pedido/",
            post(pedidos::registrar),
        )
        .route("/pedidos/ventas-totales/", get(pedidos::ventas_totales))
        .route(
            "/pedidos/{id}/",
            get(pedidos::retrieve)
                .put(pedidos::update)
                .patch(pedidos::update)
                .delete(pedidos::delete),
        )
}
