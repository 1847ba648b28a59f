//! Route definitions for the `/devoluciones` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::devoluciones;
use crate::state::AppState;

/// ```text
/// GET, POST                   /devoluciones/
/// GET, PUT, PATCH, DELETE     /devoluciones/{id}/
/// PATCH                       /devoluciones/{id}/cambiar-estado/
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/devoluciones/",
            get(devoluciones::list).post(devoluciones::create),
        )
        .route(
            "/devoluciones/{id}/",
            get(devoluciones::retrieve)
                .put(devoluciones::update)
                .patch(devoluciones::update)
                .delete(devoluciones::delete),
        )
        .route(
            "/devoluciones/{id}/cambiar-estado/",
            patch(devoluciones::cambiar_estado),
        )
}
