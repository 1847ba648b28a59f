//! Handlers for the `/productos` resource.
//!
//! Reads are open to every authenticated role; writes are administrator only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use comercio_core::error::CoreError;
use comercio_core::permissions::{Action, Resource};
use comercio_core::types::DbId;
use comercio_core::validation::{
    validate_price, validate_required_text, validate_stock, MAX_PRODUCT_NAME_LENGTH,
};
use comercio_db::models::producto::{CreateProducto, Producto, UpdateProducto};
use comercio_db::repositories::ProductoRepo;

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::authorize;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Producto",
        id,
    })
}

/// GET /api/productos/
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Producto>>> {
    authorize(&state, &user, Resource::Productos, Action::List).await?;
    let productos = ProductoRepo::list(&state.pool).await?;
    Ok(Json(productos))
}

/// GET /api/productos/{id}/
pub async fn retrieve(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Producto>> {
    authorize(&state, &user, Resource::Productos, Action::Retrieve).await?;
    let producto = ProductoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(producto))
}

/// POST /api/productos/
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(input): JsonBody<CreateProducto>,
) -> AppResult<(StatusCode, Json<Producto>)> {
    authorize(&state, &user, Resource::Productos, Action::Create).await?;

    validate_required_text("nombre", &input.nombre, MAX_PRODUCT_NAME_LENGTH)?;
    validate_price(input.precio)?;
    if let Some(stock) = input.stock {
        validate_stock(stock)?;
    }

    let producto = ProductoRepo::create(&state.pool, &input).await?;
    tracing::info!(user_id = user.user_id, producto_id = producto.id, "Producto created");

    Ok((StatusCode::CREATED, Json(producto)))
}

/// PUT/PATCH /api/productos/{id}/
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<UpdateProducto>,
) -> AppResult<Json<Producto>> {
    authorize(&state, &user, Resource::Productos, Action::Update).await?;

    if let Some(nombre) = &input.nombre {
        validate_required_text("nombre", nombre, MAX_PRODUCT_NAME_LENGTH)?;
    }
    if let Some(precio) = input.precio {
        validate_price(precio)?;
    }
    if let Some(stock) = input.stock {
        validate_stock(stock)?;
    }

    let producto = ProductoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(user_id = user.user_id, producto_id = id, "Producto updated");

    Ok(Json(producto))
}

/// DELETE /api/productos/{id}/
///
/// Refused with 409 while order lines or returns reference the product.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    authorize(&state, &user, Resource::Productos, Action::Delete).await?;
    if !ProductoRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(user_id = user.user_id, producto_id = id, "Producto deleted");
    Ok(StatusCode::NO_CONTENT)
}
