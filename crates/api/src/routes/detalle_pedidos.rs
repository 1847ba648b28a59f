//! Route definitions for the `/detalle-pedidos` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::detalle_pedidos;
use crate::state::AppState;

/// ```text
/// GET, POST                   /detalle-pedidos/
/// GET, PUT, PATCH, DELETE     /detalle-pedidos/{id}/
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/detalle-pedidos/",
            get(detalle_pedidos::list).post(detalle_pedidos::create),
        )
        .route(
            "/detalle-pedidos/{id}/",
            get(detalle_pedidos::retrieve)
                .put(detalle_pedidos::update)
                .patch(detalle_pedidos::update)
                .delete(detalle_pedidos::delete),
        )
}
