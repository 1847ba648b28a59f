//! Handlers for the `/devoluciones` resource (product returns).
//!
//! Clients see and open returns on their own orders only. Status changes
//! go through `cambiar-estado`, which is staff only; approving a return
//! restocks the product in the database.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use comercio_core::devolucion::ReturnStatus;
use comercio_core::error::CoreError;
use comercio_core::permissions::{Action, Resource};
use comercio_core::types::DbId;
use comercio_core::validation::validate_quantity;
use comercio_db::models::devolucion::{CreateDevolucion, Devolucion, UpdateDevolucion};
use comercio_db::repositories::{DevolucionRepo, PedidoRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::handlers::ensure_producto_exists;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{authorize, Visibility};
use crate::state::AppState;

/// Request body for `PATCH /devoluciones/{id}/cambiar-estado/`.
#[derive(Debug, Deserialize)]
pub struct CambiarEstadoRequest {
    pub estado: Option<String>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Devolucion",
        id,
    })
}

/// GET /api/devoluciones/
///
/// Newest first. A client-role caller without a linked client gets `[]`.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Devolucion>>> {
    let visibility = authorize(&state, &user, Resource::Devoluciones, Action::List).await?;
    if visibility == Visibility::Nothing {
        return Ok(Json(Vec::new()));
    }

    let devoluciones = DevolucionRepo::list(&state.pool, visibility.cliente_id()).await?;
    Ok(Json(devoluciones))
}

/// GET /api/devoluciones/{id}/
pub async fn retrieve(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Devolucion>> {
    let visibility = authorize(&state, &user, Resource::Devoluciones, Action::Retrieve).await?;
    if visibility == Visibility::Nothing {
        return Err(not_found(id));
    }

    let devolucion = DevolucionRepo::find_by_id(&state.pool, id, visibility.cliente_id())
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(devolucion))
}

/// POST /api/devoluciones/
///
/// Clients may only open returns on their own orders, in status `solicitada`.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(input): JsonBody<CreateDevolucion>,
) -> AppResult<(StatusCode, Json<Devolucion>)> {
    let visibility = authorize(&state, &user, Resource::Devoluciones, Action::Create).await?;

    validate_quantity(input.cantidad)?;
    let estado = match &input.estado {
        Some(estado) => estado.parse::<ReturnStatus>()?,
        None => ReturnStatus::default(),
    };

    let pedido = PedidoRepo::find_by_id(&state.pool, input.pedido_id, None)
        .await?
        .ok_or_else(|| {
            CoreError::invalid_field(
                "pedido_id",
                format!("Pedido {} does not exist", input.pedido_id),
            )
        })?;
    visibility.ensure_client(pedido.cliente_id)?;

    if visibility != Visibility::All && estado != ReturnStatus::default() {
        return Err(CoreError::Forbidden(format!(
            "Clients may not open a return in status '{estado}'"
        ))
        .into());
    }

    ensure_producto_exists(&state.pool, input.producto_id).await?;

    let devolucion = DevolucionRepo::create(&state.pool, &input).await?;
    tracing::info!(
        user_id = user.user_id,
        devolucion_id = devolucion.id,
        pedido_id = devolucion.pedido_id,
        estado = %devolucion.estado,
        "Devolucion created"
    );

    Ok((StatusCode::CREATED, Json(devolucion)))
}

/// PUT/PATCH /api/devoluciones/{id}/
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<UpdateDevolucion>,
) -> AppResult<Json<Devolucion>> {
    authorize(&state, &user, Resource::Devoluciones, Action::Update).await?;

    if let Some(cantidad) = input.cantidad {
        validate_quantity(cantidad)?;
    }
    if let Some(estado) = &input.estado {
        estado.parse::<ReturnStatus>()?;
    }
    if let Some(producto_id) = input.producto_id {
        ensure_producto_exists(&state.pool, producto_id).await?;
    }

    let devolucion = DevolucionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(user_id = user.user_id, devolucion_id = id, "Devolucion updated");

    Ok(Json(devolucion))
}

/// DELETE /api/devoluciones/{id}/
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    authorize(&state, &user, Resource::Devoluciones, Action::Delete).await?;
    if !DevolucionRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(user_id = user.user_id, devolucion_id = id, "Devolucion deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/devoluciones/{id}/cambiar-estado/
///
/// Any status in the return status set is accepted. Changes outside the
/// documented lifecycle are logged at WARN and still applied.
pub async fn cambiar_estado(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<CambiarEstadoRequest>,
) -> AppResult<Json<Devolucion>> {
    authorize(&state, &user, Resource::Devoluciones, Action::ChangeStatus).await?;

    let next: ReturnStatus = input
        .estado
        .as_deref()
        .ok_or_else(|| CoreError::invalid_field("estado", "This field is required"))?
        .parse()?;

    let current = DevolucionRepo::find_by_id(&state.pool, id, None)
        .await?
        .ok_or_else(|| not_found(id))?;

    match current.estado.parse::<ReturnStatus>() {
        Ok(previous) if previous != next && !previous.is_documented_transition(next) => {
            tracing::warn!(
                devolucion_id = id,
                from = %previous,
                to = %next,
                "Return status change outside the documented lifecycle"
            );
        }
        _ => {}
    }

    let devolucion = DevolucionRepo::update_status(&state.pool, id, next.as_str())
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(
        user_id = user.user_id,
        devolucion_id = id,
        estado = %devolucion.estado,
        "Devolucion status changed"
    );

    Ok(Json(devolucion))
}
