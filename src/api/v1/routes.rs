/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - 認証 (token 検証) は app 全体の gate で済んでいる前提
 * - 認可 (ROLE_ADMIN など) は route_layer でここで掛ける
 */
use axum::{Router, middleware, routing::get};

use crate::middleware::auth::authority::require_admin;
use crate::state::AppState;

use crate::api::v1::handlers::{admin, health::health, me::me};

pub fn routes() -> Router<AppState> {
    let admin = Router::new()
        .route("/admin/ping", get(admin::ping))
        .route_layer(middleware::from_fn(require_admin));

    Router::new()
        .route("/health", get(health))
        .route("/me", get(me))
        .merge(admin)
}
