/*
 * Responsibility
 * - GET /me: gate が組み立てた identity をそのまま返す
 * - identity が無ければ extractor が 401
 */
use axum::Json;

use crate::api::v1::extractors::{AuthCtxExtractor, AuthCtxResponse};

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<AuthCtxResponse> {
    Json(ctx.into())
}
