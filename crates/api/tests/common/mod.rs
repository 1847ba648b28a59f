//! Shared helpers for the HTTP integration tests.
//!
//! Each test file pulls in only part of this module.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use comercio_api::auth::jwt::{generate_access_token, JwtConfig};
use comercio_api::auth::password::hash_password;
use comercio_api::config::ServerConfig;
use comercio_api::router::build_app_router;
use comercio_api::state::AppState;
use comercio_core::roles::Role;
use comercio_core::routines::OrderRoutines;
use comercio_core::types::{DbId, Money};
use comercio_db::models::cliente::{Cliente, CreateCliente};
use comercio_db::models::pedido::{CreatePedido, Pedido};
use comercio_db::models::producto::{CreateProducto, Producto};
use comercio_db::models::usuario::{CreateUsuario, Usuario};
use comercio_db::repositories::{ClienteRepo, PedidoRepo, ProductoRepo, UsuarioRepo};
use comercio_db::routines::PgOrderRoutines;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Password given to every user created by [`create_user`].
pub const TEST_PASSWORD: &str = "test_password_123";

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router backed by the real database routines.
pub fn build_test_app(pool: PgPool) -> Router {
    let routines = Arc::new(PgOrderRoutines::new(pool.clone()));
    build_test_app_with_routines(pool, routines)
}

/// Build the full application router with a substitute [`OrderRoutines`].
pub fn build_test_app_with_routines(pool: PgPool, routines: Arc<dyn OrderRoutines>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        routines,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user with [`TEST_PASSWORD`] and the given role.
pub async fn create_user(pool: &PgPool, username: &str, role: Role) -> Usuario {
    let input = CreateUsuario {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        rol: role.to_string(),
        first_name: String::new(),
        last_name: String::new(),
    };
    UsuarioRepo::create(pool, &input).await.unwrap()
}

/// Sign an access token for `user` without going through login.
pub fn token_for(user: &Usuario) -> String {
    let role: Role = user.rol.parse().unwrap();
    generate_access_token(user.id, role, &test_config().jwt).unwrap()
}

/// Insert a user and return it together with an access token.
pub async fn user_with_token(pool: &PgPool, username: &str, role: Role) -> (Usuario, String) {
    let user = create_user(pool, username, role).await;
    let token = token_for(&user);
    (user, token)
}

pub async fn create_cliente(pool: &PgPool, nombre: &str, usuario_id: Option<DbId>) -> Cliente {
    let input = CreateCliente {
        usuario_id,
        nombre: nombre.to_string(),
        apellido: "Prueba".to_string(),
        direccion: None,
        telefono: None,
        email: format!("{}@clientes.example.com", nombre.to_lowercase()),
    };
    ClienteRepo::create(pool, &input).await.unwrap()
}

pub async fn create_producto(pool: &PgPool, nombre: &str, precio: &str, stock: i32) -> Producto {
    let input = CreateProducto {
        nombre: nombre.to_string(),
        descripcion: None,
        precio: precio.parse::<Money>().unwrap(),
        stock: Some(stock),
        activo: None,
    };
    ProductoRepo::create(pool, &input).await.unwrap()
}

pub async fn create_pedido(pool: &PgPool, cliente_id: Option<DbId>) -> Pedido {
    let input = CreatePedido {
        cliente_id,
        estado: None,
    };
    PedidoRepo::create(pool, &input).await.unwrap()
}

/// Count rows in a table.
pub async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}
