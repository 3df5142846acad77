//! access token（HS256 JWT）検証 → AuthCtx を extensions に入れる
//!
//! 1 request につき 1 回だけ評価する:
//! - exempt path (`/auth`, `/error` など) は何もせず通す
//! - `Authorization` が無い / `Bearer ` で始まらない → 匿名のまま通す（認可は下流の責務）
//! - `Bearer ` の後ろが空 → 401 "invalid Authorization header"
//! - token 検証失敗 → VerifyError の種類ごとに 401 / 400 / 500
//! - 成功 → AuthCtx を extensions に格納して下流へ

use axum::{
    Router,
    body::Body,
    extract::{OriginalUri, State},
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::auth::{VerifyError, build_identity};
use crate::state::AppState;

/// Case-exact scheme prefix, including the separating space.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Marks a request the gate has already evaluated.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GateApplied;

/// Router 全体に認証 gate を掛ける。
///
/// nest 前の full path で exempt 判定したいので、`with_state` 済みの最上位 Router に適用する。
///
/// 例：
/// ```ignore
/// let app = Router::new().nest("/api/v1", api::v1::routes()).with_state(state.clone());
/// let app = middleware::auth::access::apply(app, state);
/// ```
pub fn apply(router: Router, state: AppState) -> Router {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    OriginalUri(original_uri): OriginalUri,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if req.extensions().get::<GateApplied>().is_some() {
        return Ok(next.run(req).await);
    }
    req.extensions_mut().insert(GateApplied);

    let path = original_uri.path();
    if state.exemptions.is_exempt(path) {
        tracing::debug!(path, "auth exempt path, skipping token check");
        return Ok(next.run(req).await);
    }

    let token = match extract_bearer(req.headers()) {
        Ok(token) => token,
        Err(err) => {
            tracing::warn!(path, "malformed Authorization header");
            return Err(err);
        }
    };
    let Some(token) = token else {
        tracing::debug!(path, "no bearer token, continuing unauthenticated");
        return Ok(next.run(req).await);
    };

    let claims = match state.auth.verify(token) {
        Ok(claims) => claims,
        Err(err) => {
            log_rejection(path, &err);
            return Err(err.into());
        }
    };

    let auth_ctx = build_identity(claims);
    tracing::debug!(
        path,
        user_id = auth_ctx.user.user_id,
        authority = %auth_ctx.authority,
        "request authenticated"
    );

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(auth_ctx);

    Ok(next.run(req).await)
}

/// `Ok(None)`: no bearer credential at all (header missing or another scheme).
/// `Err`: the `Bearer ` prefix is there but the value after it is unusable.
fn extract_bearer(headers: &HeaderMap) -> Result<Option<&str>, AppError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    if !value.as_bytes().starts_with(BEARER_PREFIX.as_bytes()) {
        return Ok(None);
    }

    let token = value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
        .ok_or_else(AppError::invalid_authorization_header)?;

    if token.trim().is_empty() {
        return Err(AppError::invalid_authorization_header());
    }

    Ok(Some(token))
}

fn log_rejection(path: &str, err: &VerifyError) {
    match err {
        VerifyError::InvalidSignature(e) => {
            tracing::warn!(path, error = %e, "invalid JWT signature");
        }
        VerifyError::Expired => tracing::warn!(path, "expired JWT token"),
        VerifyError::Unsupported(reason) => {
            tracing::warn!(path, %reason, "unsupported JWT token");
        }
        VerifyError::Decode(e) => {
            tracing::error!(path, error = ?e, "failed to decode JWT claims");
        }
    }
}
