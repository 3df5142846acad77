/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - JWT の検証ロジックは middleware/services 側の責務
 * - extensions は request ごとに独立しているので、他の request から見えることはない
 */
use serde::Serialize;

use crate::services::auth::UserRole;

/// Token owner as reconstructed from verified claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
    pub nickname: String,
    pub email: String,
    pub role: UserRole,
}

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user` は token の claims から組み立てた主体
/// - `authority` は coarse-grained な権限 (`ROLE_USER` / `ROLE_ADMIN`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub user: AuthUser,
    pub authority: String,
}

impl AuthCtx {
    pub fn has_authority(&self, authority: &str) -> bool {
        self.authority == authority
    }
}

/// Wire view of an `AuthCtx`, used by `/me`.
#[derive(Debug, Serialize)]
pub struct AuthCtxResponse {
    pub user_id: i64,
    pub nickname: String,
    pub email: String,
    pub role: &'static str,
    pub authority: String,
}

impl From<AuthCtx> for AuthCtxResponse {
    fn from(ctx: AuthCtx) -> Self {
        Self {
            user_id: ctx.user.user_id,
            nickname: ctx.user.nickname,
            email: ctx.user.email,
            role: ctx.user.role.as_str(),
            authority: ctx.authority,
        }
    }
}
