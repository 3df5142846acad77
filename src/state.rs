/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - auth: token verifier (HMAC secret / leeway), exemptions: 認証除外 path prefix
 * - 起動時に一度だけ組み立て、以降は read-only
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::middleware::auth::RouteExemptions;
use crate::services::auth::AuthService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub exemptions: Arc<RouteExemptions>,
}

impl AppState {
    pub fn new(auth: Arc<AuthService>, exemptions: Arc<RouteExemptions>) -> Self {
        Self { auth, exemptions }
    }
}
