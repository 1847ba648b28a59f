//! Route definitions for registration and tokens.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// ```text
/// POST /register/        -> register
/// POST /token/           -> login
/// POST /token/refresh/   -> refresh
/// POST /token/logout/    -> logout (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register/", post(auth::register))
        .route("/token/", post(auth::login))
        .route("/token/refresh/", post(auth::refresh))
        .route("/token/logout/", post(auth::logout))
}
