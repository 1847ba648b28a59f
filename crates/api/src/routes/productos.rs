//! Route definitions for the `/productos` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::productos;
use crate::state::AppState;

/// ```text
/// GET, POST                   /productos/
/// GET, PUT, PATCH, DELETE     /productos/{id}/
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/productos/", get(productos::list).post(productos::create))
        .route(
            "/productos/{id}/",
            get(productos::retrieve)
                .put(productos::update)
                .patch(productos::update)
                .delete(productos::delete),
        )
}
