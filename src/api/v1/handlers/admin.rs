/*
 * Responsibility
 * - ROLE_ADMIN 限定の操作 (route_layer で require_admin 済み)
 */
use axum::Json;
use serde_json::{Value, json};

use crate::api::v1::extractors::AuthCtxExtractor;

pub async fn ping(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<Value> {
    Json(json!({"status": "ok", "admin_id": ctx.user.user_id}))
}
