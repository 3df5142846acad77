/*
 * Responsibility
 * - HTTP に依存しない処理 (token 検証, identity 組み立て)
 */
pub mod auth;
