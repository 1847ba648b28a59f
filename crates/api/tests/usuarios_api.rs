//! Integration tests for `/api/usuarios/`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_cliente, delete_auth, get_auth, patch_json_auth, post_json,
    post_json_auth, user_with_token, TEST_PASSWORD,
};
use comercio_core::roles::Role;
use comercio_db::repositories::ClienteRepo;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_creates_user_with_role(pool: PgPool) {
    let (_user, token) = user_with_token(&pool, "admin", Role::Administrador).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/usuarios/",
        json!({
            "username": "marta",
            "email": "marta@example.com",
            "password": "una_clave_segura",
            "rol": "empleado",
        }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["rol"], "empleado");
    assert!(json.get("password_hash").is_none());

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/token/",
        json!({ "username": "marta", "password": "una_clave_segura" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["user"]["rol"], "empleado");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_role_is_rejected(pool: PgPool) {
    let (_user, token) = user_with_token(&pool, "admin", Role::Administrador).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/usuarios/",
        json!({
            "username": "marta",
            "email": "marta@example.com",
            "password": "una_clave_segura",
            "rol": "gerente",
        }),
        &token,
    )
    .await;

    assert!(response.status().is_client_error());
    assert_eq!(common::count_rows(&pool, "usuarios").await, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn short_password_names_the_field(pool: PgPool) {
    let (_user, token) = user_with_token(&pool, "admin", Role::Administrador).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/usuarios/",
        json!({ "username": "marta", "email": "marta@example.com", "password": "corta" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["field"], "password");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn employees_and_clients_cannot_manage_users(pool: PgPool) {
    let (_e, employee_token) = user_with_token(&pool, "empleado", Role::Empleado).await;
    let (_c, client_token) = user_with_token(&pool, "ana", Role::Cliente).await;

    for token in [&employee_token, &client_token] {
        let app = common::build_test_app(pool.clone());
        let response = get_auth(app, "/api/usuarios/", token).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_user_unlinks_client(pool: PgPool) {
    let (_admin, token) = user_with_token(&pool, "admin", Role::Administrador).await;
    let (ana_user, _) = user_with_token(&pool, "ana", Role::Cliente).await;
    let ana = create_cliente(&pool, "Ana", Some(ana_user.id)).await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/usuarios/{}/", ana_user.id), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let ana = ClienteRepo::find_by_id(&pool, ana.id)
        .await
        .unwrap()
        .expect("client survives its account");
    assert_eq!(ana.usuario_id, None);

    let app = common::build_test_app(pool);
    let response = delete_auth(app, &format!("/api/usuarios/{}/", ana_user.id), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deactivated_user_cannot_log_in(pool: PgPool) {
    let (_admin, token) = user_with_token(&pool, "admin", Role::Administrador).await;
    let (marta, _) = user_with_token(&pool, "marta", Role::Empleado).await;

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/usuarios/{}/", marta.id);
    let response = patch_json_auth(app, &uri, json!({ "is_active": false }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["is_active"], false);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/token/",
        json!({ "username": "marta", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn password_change_takes_effect_and_ends_sessions(pool: PgPool) {
    let (_admin, token) = user_with_token(&pool, "admin", Role::Administrador).await;
    let (marta, _) = user_with_token(&pool, "marta", Role::Empleado).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/token/",
        json!({ "username": "marta", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let refresh_token = body_json(response).await["refresh_token"].clone();

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/usuarios/{}/", marta.id);
    let response =
        patch_json_auth(app, &uri, json!({ "password": "otra_clave_segura" }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/token/refresh/",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/token/",
        json!({ "username": "marta", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/token/",
        json!({ "username": "marta", "password": "otra_clave_segura" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn failed_update_leaves_password_and_sessions_alone(pool: PgPool) {
    let (_admin, token) = user_with_token(&pool, "admin", Role::Administrador).await;
    let (marta, _) = user_with_token(&pool, "marta", Role::Empleado).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/token/",
        json!({ "username": "marta", "password": TEST_PASSWORD }),
    )
    .await;
    let refresh_token = body_json(response).await["refresh_token"].clone();

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/usuarios/{}/", marta.id);
    let body = json!({ "username": "ADMIN", "password": "otra_clave_segura" });
    let response = patch_json_auth(app, &uri, body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/token/refresh/",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}
