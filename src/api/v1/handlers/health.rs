/*
 * Responsibility
 * - GET /health (疎通用)
 * - token なしでも通る (gate は匿名 request をそのまま流す)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::api::v1::extractors::AuthCtxExtractor;

pub async fn health(auth: Option<AuthCtxExtractor>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({"status": "ok", "authenticated": auth.is_some()})),
    )
}
