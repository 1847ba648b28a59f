//! Route definitions for the `/usuarios` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::usuarios;
use crate::state::AppState;

/// ```text
/// GET, POST                   /usuarios/
/// GET, PUT, PATCH, DELETE     /usuarios/{id}/
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/usuarios/", get(usuarios::list).post(usuarios::create))
        .route(
            "/usuarios/{id}/",
            get(usuarios::retrieve)
                .put(usuarios::update)
                .patch(usuarios::update)
                .delete(usuarios::delete),
        )
}
