//! Handlers for the `/detalle-pedidos` resource (order lines). Staff only.
//!
//! Subtotals are computed server-side and every write refreshes the owning
//! order's total in the same transaction.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use comercio_core::error::CoreError;
use comercio_core::permissions::{Action, Resource};
use comercio_core::types::DbId;
use comercio_core::validation::{line_subtotal, validate_quantity, validate_unit_price};
use comercio_db::models::detalle_pedido::{
    CreateDetallePedido, DetallePedido, UpdateDetallePedido,
};
use comercio_db::repositories::{DetallePedidoRepo, PedidoRepo};

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::handlers::ensure_producto_exists;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::authorize;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "DetallePedido",
        id,
    })
}

/// GET /api/detalle-pedidos/
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<DetallePedido>>> {
    authorize(&state, &user, Resource::DetallePedidos, Action::List).await?;
    let lines = DetallePedidoRepo::list(&state.pool).await?;
    Ok(Json(lines))
}

/// GET /api/detalle-pedidos/{id}/
pub async fn retrieve(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DetallePedido>> {
    authorize(&state, &user, Resource::DetallePedidos, Action::Retrieve).await?;
    let line = DetallePedidoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(line))
}

/// POST /api/detalle-pedidos/
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(input): JsonBody<CreateDetallePedido>,
) -> AppResult<(StatusCode, Json<DetallePedido>)> {
    authorize(&state, &user, Resource::DetallePedidos, Action::Create).await?;

    validate_quantity(input.cantidad)?;
    validate_unit_price(input.precio_unitario)?;
    let subtotal = line_subtotal(input.cantidad, input.precio_unitario)?;

    if PedidoRepo::find_by_id(&state.pool, input.pedido_id, None)
        .await?
        .is_none()
    {
        return Err(CoreError::invalid_field(
            "pedido_id",
            format!("Pedido {} does not exist", input.pedido_id),
        )
        .into());
    }
    ensure_producto_exists(&state.pool, input.producto_id).await?;

    let line = DetallePedidoRepo::create(&state.pool, &input, subtotal).await?;
    tracing::info!(
        user_id = user.user_id,
        pedido_id = line.pedido_id,
        detalle_id = line.id,
        subtotal = %line.subtotal,
        "DetallePedido created"
    );

    Ok((StatusCode::CREATED, Json(line)))
}

/// PUT/PATCH /api/detalle-pedidos/{id}/
///
/// A line cannot move to another order.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<UpdateDetallePedido>,
) -> AppResult<Json<DetallePedido>> {
    authorize(&state, &user, Resource::DetallePedidos, Action::Update).await?;

    if let Some(cantidad) = input.cantidad {
        validate_quantity(cantidad)?;
    }
    if let Some(precio_unitario) = input.precio_unitario {
        validate_unit_price(precio_unitario)?;
    }
    if let Some(producto_id) = input.producto_id {
        ensure_producto_exists(&state.pool, producto_id).await?;
    }
    if input.cantidad.is_some() || input.precio_unitario.is_some() {
        let current = DetallePedidoRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or_else(|| not_found(id))?;
        line_subtotal(
            input.cantidad.unwrap_or(current.cantidad),
            input.precio_unitario.unwrap_or(current.precio_unitario),
        )?;
    }

    let line = DetallePedidoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(user_id = user.user_id, detalle_id = id, "DetallePedido updated");

    Ok(Json(line))
}

/// DELETE /api/detalle-pedidos/{id}/
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    authorize(&state, &user, Resource::DetallePedidos, Action::Delete).await?;
    if !DetallePedidoRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(user_id = user.user_id, detalle_id = id, "DetallePedido deleted");
    Ok(StatusCode::NO_CONTENT)
}
