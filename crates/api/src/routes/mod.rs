pub mod auth;
pub mod clientes;
pub mod detalle_pedidos;
pub mod devoluciones;
pub mod health;
pub mod pedidos;
pub mod productos;
pub mod usuarios;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy (every path keeps its trailing slash):
///
/// ```text
/// /register/                                     self-registration (public)
/// /token/                                        login (public)
/// /token/refresh/                                refresh (public)
/// /token/logout/                                 logout (requires auth)
///
/// /usuarios/                                     list, create (admin)
/// /usuarios/{id}/                                get, update, delete (admin)
///
/// /clientes/                                     list, create (staff)
/// /clientes/{id}/                                get, update, delete (staff)
///
/// /productos/                                    list (any), create (admin)
/// /productos/{id}/                               get (any), update, delete (admin)
///
/// /pedidos/                                      list, create (client-scoped)
/// /pedidos/{id}/                                 get (client-scoped), update, delete (staff)
/// /pedidos/registrar-nuevo-pedido/               register via stored procedure (POST)
/// /pedidos/ventas-totales/                       sales total (GET, staff)
///
/// /detalle-pedidos/                              list, create (staff)
/// /detalle-pedidos/{id}/                         get, update, delete (staff)
///
/// /devoluciones/                                 list, create (client-scoped)
/// /devoluciones/{id}/                            get (client-scoped), update, delete (staff)
/// /devoluciones/{id}/cambiar-estado/             change status (PATCH, staff)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(usuarios::router())
        .merge(clientes::router())
        .merge(productos::router())
        .merge(pedidos::router())
        .merge(detalle_pedidos::router())
        .merge(devoluciones::router())
}
