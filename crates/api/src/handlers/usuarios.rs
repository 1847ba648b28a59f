//! Handlers for the `/usuarios` resource (account management).
//!
//! Administrator only; every handler authorizes against [`Resource::Usuarios`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use comercio_core::error::CoreError;
use comercio_core::permissions::{Action, Resource};
use comercio_core::roles::Role;
use comercio_core::types::DbId;
use comercio_core::validation::{
    validate_email, validate_max_length, validate_required_text, MAX_PERSON_NAME_LENGTH,
    MAX_USERNAME_LENGTH,
};
use comercio_db::models::usuario::{CreateUsuario, UpdateUsuario, UsuarioResponse};
use comercio_db::repositories::{SessionRepo, UsuarioRepo};
use serde::Deserialize;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::authorize;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /usuarios/`.
#[derive(Debug, Deserialize)]
pub struct CreateUsuarioRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Defaults to `cliente`.
    pub rol: Option<Role>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Request body for `PUT`/`PATCH /usuarios/{id}/`. All fields optional.
#[derive(Debug, Deserialize)]
pub struct UpdateUsuarioRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub rol: Option<Role>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: Option<bool>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/usuarios/
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<UsuarioResponse>>> {
    authorize(&state, &user, Resource::Usuarios, Action::List).await?;
    let usuarios = UsuarioRepo::list(&state.pool).await?;
    Ok(Json(usuarios.into_iter().map(Into::into).collect()))
}

/// GET /api/usuarios/{id}/
pub async fn retrieve(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<UsuarioResponse>> {
    authorize(&state, &user, Resource::Usuarios, Action::Retrieve).await?;
    let usuario = UsuarioRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Usuario",
            id,
        }))?;
    Ok(Json(usuario.into()))
}

/// POST /api/usuarios/
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(input): JsonBody<CreateUsuarioRequest>,
) -> AppResult<(StatusCode, Json<UsuarioResponse>)> {
    authorize(&state, &user, Resource::Usuarios, Action::Create).await?;

    validate_required_text("username", &input.username, MAX_USERNAME_LENGTH)?;
    validate_email(&input.email)?;
    validate_password_strength(&input.password)?;
    validate_max_length("first_name", &input.first_name, MAX_PERSON_NAME_LENGTH)?;
    validate_max_length("last_name", &input.last_name, MAX_PERSON_NAME_LENGTH)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUsuario {
        username: input.username,
        email: input.email,
        password_hash,
        rol: input.rol.unwrap_or_default().to_string(),
        first_name: input.first_name,
        last_name: input.last_name,
    };
    let usuario = UsuarioRepo::create(&state.pool, &create_dto).await?;

    tracing::info!(
        user_id = user.user_id,
        created_id = usuario.id,
        rol = %usuario.rol,
        "Usuario created"
    );

    Ok((StatusCode::CREATED, Json(usuario.into())))
}

/// PUT/PATCH /api/usuarios/{id}/
///
/// Changing the password also revokes the account's refresh sessions.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<UpdateUsuarioRequest>,
) -> AppResult<Json<UsuarioResponse>> {
    authorize(&state, &user, Resource::Usuarios, Action::Update).await?;

    if let Some(username) = &input.username {
        validate_required_text("username", username, MAX_USERNAME_LENGTH)?;
    }
    if let Some(email) = &input.email {
        validate_email(email)?;
    }
    if let Some(first_name) = &input.first_name {
        validate_max_length("first_name", first_name, MAX_PERSON_NAME_LENGTH)?;
    }
    if let Some(last_name) = &input.last_name {
        validate_max_length("last_name", last_name, MAX_PERSON_NAME_LENGTH)?;
    }
    if let Some(password) = &input.password {
        validate_password_strength(password)?;
    }

    let password_hash = input
        .password
        .as_deref()
        .map(hash_password)
        .transpose()
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let update_dto = UpdateUsuario {
        username: input.username,
        email: input.email,
        rol: input.rol.map(|r| r.to_string()),
        first_name: input.first_name,
        last_name: input.last_name,
        is_active: input.is_active,
    };

    let mut tx = state.pool.begin().await?;
    let usuario = UsuarioRepo::update(&mut *tx, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Usuario",
            id,
        }))?;
    if let Some(password_hash) = &password_hash {
        UsuarioRepo::update_password(&mut *tx, id, password_hash).await?;
        SessionRepo::revoke_all_for_user(&mut *tx, id).await?;
    }
    tx.commit().await?;

    tracing::info!(user_id = user.user_id, updated_id = id, "Usuario updated");

    Ok(Json(usuario.into()))
}

/// DELETE /api/usuarios/{id}/
///
/// A linked client record survives, unlinked.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    authorize(&state, &user, Resource::Usuarios, Action::Delete).await?;

    if !UsuarioRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Usuario",
            id,
        }));
    }

    tracing::info!(user_id = user.user_id, deleted_id = id, "Usuario deleted");

    Ok(StatusCode::NO_CONTENT)
}
