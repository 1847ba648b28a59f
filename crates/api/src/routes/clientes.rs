//! Route definitions for the `/clientes` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::clientes;
use crate::state::AppState;

/// ```text
/// GET, POST                   /clientes/
/// GET, PUT, PATCH, DELETE     /clientes/{id}/
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/clientes/", get(clientes::list).post(clientes::create))
        .route(
            "/clientes/{id}/",
            get(clientes::retrieve)
                .put(clientes::update)
                .patch(clientes::update)
                .delete(clientes::delete),
        )
}
