//! Handlers for the `/clientes` resource. Staff only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use comercio_core::error::CoreError;
use comercio_core::permissions::{Action, Resource};
use comercio_core::types::DbId;
use comercio_core::validation::{
    validate_email, validate_max_length, validate_required_text, MAX_ADDRESS_LENGTH,
    MAX_PERSON_NAME_LENGTH, MAX_PHONE_LENGTH,
};
use comercio_db::models::cliente::{Cliente, CreateCliente, UpdateCliente};
use comercio_db::repositories::ClienteRepo;

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::authorize;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Cliente",
        id,
    })
}

/// Length checks for the optional contact fields.
fn validate_contact(direccion: Option<&str>, telefono: Option<&str>) -> Result<(), CoreError> {
    if let Some(direccion) = direccion {
        validate_max_length("direccion", direccion, MAX_ADDRESS_LENGTH)?;
    }
    if let Some(telefono) = telefono {
        validate_max_length("telefono", telefono, MAX_PHONE_LENGTH)?;
    }
    Ok(())
}

/// GET /api/clientes/
pub async fn list(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<Vec<Cliente>>> {
    authorize(&state, &user, Resource::Clientes, Action::List).await?;
    let clientes = ClienteRepo::list(&state.pool).await?;
    Ok(Json(clientes))
}

/// GET /api/clientes/{id}/
pub async fn retrieve(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Cliente>> {
    authorize(&state, &user, Resource::Clientes, Action::Retrieve).await?;
    let cliente = ClienteRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(cliente))
}

/// POST /api/clientes/
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(input): JsonBody<CreateCliente>,
) -> AppResult<(StatusCode, Json<Cliente>)> {
    authorize(&state, &user, Resource::Clientes, Action::Create).await?;

    validate_required_text("nombre", &input.nombre, MAX_PERSON_NAME_LENGTH)?;
    validate_required_text("apellido", &input.apellido, MAX_PERSON_NAME_LENGTH)?;
    validate_email(&input.email)?;
    validate_contact(input.direccion.as_deref(), input.telefono.as_deref())?;

    let cliente = ClienteRepo::create(&state.pool, &input).await?;
    tracing::info!(user_id = user.user_id, cliente_id = cliente.id, "Cliente created");

    Ok((StatusCode::CREATED, Json(cliente)))
}

/// PUT/PATCH /api/clientes/{id}/
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<UpdateCliente>,
) -> AppResult<Json<Cliente>> {
    authorize(&state, &user, Resource::Clientes, Action::Update).await?;

    if let Some(nombre) = &input.nombre {
        validate_required_text("nombre", nombre, MAX_PERSON_NAME_LENGTH)?;
    }
    if let Some(apellido) = &input.apellido {
        validate_required_text("apellido", apellido, MAX_PERSON_NAME_LENGTH)?;
    }
    if let Some(email) = &input.email {
        validate_email(email)?;
    }
    validate_contact(input.direccion.as_deref(), input.telefono.as_deref())?;

    let cliente = ClienteRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(user_id = user.user_id, cliente_id = id, "Cliente updated");

    Ok(Json(cliente))
}

/// DELETE /api/clientes/{id}/
///
/// The client's orders are kept with `cliente_id` cleared.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    authorize(&state, &user, Resource::Clientes, Action::Delete).await?;
    if !ClienteRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(user_id = user.user_id, cliente_id = id, "Cliente deleted");
    Ok(StatusCode::NO_CONTENT)
}
