//! Request body extractor with the API's own error shape.

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON request body. Malformed JSON, missing required fields, and
/// wrong-typed values are rejected as `400 VALIDATION_ERROR`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
