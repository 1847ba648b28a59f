//! Handlers for the `/pedidos` resource, order registration, and the sales report.
//!
//! Client-role callers only ever see or create orders linked to their own
//! client record; the filter is applied in SQL.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use comercio_core::error::CoreError;
use comercio_core::pedido::{validate_order_status, NewOrderRegistration, RegistroPedidoRequest};
use comercio_core::permissions::{Action, Resource};
use comercio_core::types::{DbId, Money};
use comercio_db::models::detalle_pedido::DetallePedido;
use comercio_db::models::pedido::{CreatePedido, Pedido, PedidoConDetalle, UpdatePedido};
use comercio_db::repositories::{DetallePedidoRepo, PedidoRepo};
use comercio_db::DbPool;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::handlers::ensure_cliente_exists;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{authorize, Visibility};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Response body for a successful order registration.
#[derive(Debug, Serialize)]
pub struct RegistroPedidoResponse {
    pub message: &'static str,
}

/// Response body for `GET /pedidos/ventas-totales/`.
#[derive(Debug, Serialize)]
pub struct VentasTotalesResponse {
    pub ventas_totales: Money,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Pedido",
        id,
    })
}

/// Attach each order's lines, loading all of them in one query.
async fn with_lines(
    pool: &DbPool,
    pedidos: Vec<Pedido>,
) -> Result<Vec<PedidoConDetalle>, sqlx::Error> {
    let ids: Vec<DbId> = pedidos.iter().map(|p| p.id).collect();
    let lines = DetallePedidoRepo::list_by_pedidos(pool, &ids).await?;

    let mut by_pedido: HashMap<DbId, Vec<DetallePedido>> = HashMap::new();
    for line in lines {
        by_pedido.entry(line.pedido_id).or_default().push(line);
    }

    Ok(pedidos
        .into_iter()
        .map(|pedido| {
            let detalle_pedidos = by_pedido.remove(&pedido.id).unwrap_or_default();
            PedidoConDetalle {
                pedido,
                detalle_pedidos,
            }
        })
        .collect())
}

async fn single_with_lines(pool: &DbPool, pedido: Pedido) -> AppResult<PedidoConDetalle> {
    let id = pedido.id;
    with_lines(pool, vec![pedido])
        .await?
        .pop()
        .ok_or_else(|| not_found(id))
}

/// A client-role caller that names no client acts for their own record.
fn default_to_own_client(visibility: Visibility, cliente_id: &mut Option<DbId>) {
    if let Visibility::Client(own) = visibility {
        cliente_id.get_or_insert(own);
    }
}

// ---------------------------------------------------------------------------
// CRUD handlers
// ---------------------------------------------------------------------------

/// GET /api/pedidos/
///
/// Newest first. A client-role caller without a linked client gets `[]`.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<PedidoConDetalle>>> {
    let visibility = authorize(&state, &user, Resource::Pedidos, Action::List).await?;
    if visibility == Visibility::Nothing {
        return Ok(Json(Vec::new()));
    }

    let pedidos = PedidoRepo::list(&state.pool, visibility.cliente_id()).await?;
    Ok(Json(with_lines(&state.pool, pedidos).await?))
}

/// GET /api/pedidos/{id}/
pub async fn retrieve(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<PedidoConDetalle>> {
    let visibility = authorize(&state, &user, Resource::Pedidos, Action::Retrieve).await?;
    if visibility == Visibility::Nothing {
        return Err(not_found(id));
    }

    let pedido = PedidoRepo::find_by_id(&state.pool, id, visibility.cliente_id())
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(single_with_lines(&state.pool, pedido).await?))
}

/// POST /api/pedidos/
///
/// Creates an order without lines; its total stays 0 until lines are added
/// through `/detalle-pedidos/`.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(mut input): JsonBody<CreatePedido>,
) -> AppResult<(StatusCode, Json<PedidoConDetalle>)> {
    let visibility = authorize(&state, &user, Resource::Pedidos, Action::Create).await?;
    default_to_own_client(visibility, &mut input.cliente_id);
    visibility.ensure_client(input.cliente_id)?;

    if let Some(estado) = &input.estado {
        validate_order_status(estado)?;
    }
    if let Some(cliente_id) = input.cliente_id {
        ensure_cliente_exists(&state.pool, cliente_id).await?;
    }

    let pedido = PedidoRepo::create(&state.pool, &input).await?;
    tracing::info!(user_id = user.user_id, pedido_id = pedido.id, "Pedido created");

    Ok((
        StatusCode::CREATED,
        Json(PedidoConDetalle {
            pedido,
            detalle_pedidos: Vec::new(),
        }),
    ))
}

/// PUT/PATCH /api/pedidos/{id}/
///
/// Only `cliente_id` and `estado` are writable; `total` is derived.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<UpdatePedido>,
) -> AppResult<Json<PedidoConDetalle>> {
    authorize(&state, &user, Resource::Pedidos, Action::Update).await?;

    if let Some(estado) = &input.estado {
        validate_order_status(estado)?;
    }
    if let Some(cliente_id) = input.cliente_id {
        ensure_cliente_exists(&state.pool, cliente_id).await?;
    }

    let pedido = PedidoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(
        user_id = user.user_id,
        pedido_id = id,
        estado = %pedido.estado,
        "Pedido updated"
    );

    Ok(Json(single_with_lines(&state.pool, pedido).await?))
}

/// DELETE /api/pedidos/{id}/
///
/// Cascades to the order's lines and returns.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    authorize(&state, &user, Resource::Pedidos, Action::Delete).await?;
    if !PedidoRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(user_id = user.user_id, pedido_id = id, "Pedido deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Database routines
// ---------------------------------------------------------------------------

/// POST /api/pedidos/registrar-nuevo-pedido/
///
/// Validates the request, then hands the order and all its lines to the
/// `registrar_pedido` procedure in one call.
pub async fn registrar(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(mut input): JsonBody<RegistroPedidoRequest>,
) -> AppResult<(StatusCode, Json<RegistroPedidoResponse>)> {
    let visibility = authorize(&state, &user, Resource::Pedidos, Action::Create).await?;
    default_to_own_client(visibility, &mut input.cliente_id);
    visibility.ensure_client(input.cliente_id)?;

    let order = NewOrderRegistration::from_request(input)?;
    state.routines.register_order(&order).await?;

    tracing::info!(
        user_id = user.user_id,
        cliente_id = order.cliente_id,
        lines = order.productos.len(),
        "Pedido registered"
    );

    Ok((
        StatusCode::CREATED,
        Json(RegistroPedidoResponse {
            message: "Pedido registrado correctamente",
        }),
    ))
}

/// GET /api/pedidos/ventas-totales/
///
/// Sum of all non-cancelled order totals. Staff only; the routine is never
/// called for other roles.
pub async fn ventas_totales(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<VentasTotalesResponse>> {
    authorize(&state, &user, Resource::Ventas, Action::Retrieve).await?;
    let ventas_totales = state.routines.sales_total().await?;
    Ok(Json(VentasTotalesResponse { ventas_totales }))
}
