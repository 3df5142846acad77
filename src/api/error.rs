/*
 * Responsibility
 * - GET /error (version 外, 認証 gate の exempt 対象)
 * - 共通の generic error body をそのまま返す
 */
use axum::response::{IntoResponse, Response};

use crate::error::AppError;

pub async fn error() -> Response {
    AppError::Internal.into_response()
}
