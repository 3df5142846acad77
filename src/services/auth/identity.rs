use crate::api::v1::extractors::{AuthCtx, AuthUser};
use crate::services::auth::claims::ClaimSet;

/// Prefix for authority strings derived from a role (`USER` -> `ROLE_USER`).
pub const ROLE_PREFIX: &str = "ROLE_";

/// Turn verified claims into the identity that rides on the request.
pub fn build_identity(claims: ClaimSet) -> AuthCtx {
    let authority = format!("{ROLE_PREFIX}{}", claims.role.as_str());

    AuthCtx {
        user: AuthUser {
            user_id: claims.subject,
            nickname: claims.nickname,
            email: claims.email,
            role: claims.role,
        },
        authority,
    }
}
