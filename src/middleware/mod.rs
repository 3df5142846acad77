/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: Bearer token の gate と authority チェック
 * - http: request id / trace / body limit / timeout
 */
pub mod auth;
pub mod http;
