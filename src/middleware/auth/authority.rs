//! Coarse-grained authorization on top of the identity installed by `access`.
//!
//! The gate lets anonymous requests through; routes that need a caller (or a
//! particular authority) put one of these in a `route_layer`.

use axum::{body::Body, http::Request, middleware::Next, response::Response};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;

pub const ADMIN_AUTHORITY: &str = "ROLE_ADMIN";

/// 401 without an identity, 403 when the identity is not an admin.
pub async fn require_admin(req: Request<Body>, next: Next) -> Result<Response, AppError> {
    require_authority(&req, ADMIN_AUTHORITY)?;
    Ok(next.run(req).await)
}

fn require_authority(req: &Request<Body>, authority: &str) -> Result<(), AppError> {
    match req.extensions().get::<AuthCtx>() {
        None => Err(AppError::authentication_required()),
        Some(ctx) if ctx.has_authority(authority) => Ok(()),
        Some(ctx) => {
            tracing::warn!(
                user_id = ctx.user.user_id,
                have = %ctx.authority,
                need = authority,
                "insufficient authority"
            );
            Err(AppError::Forbidden)
        }
    }
}
