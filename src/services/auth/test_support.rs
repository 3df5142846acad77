//! Token minting helpers shared by the unit tests.

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};

use crate::services::auth::AuthService;

pub const TEST_SECRET: &[u8] = b"test-secret-key-with-at-least-32-bytes!!";

pub fn test_service() -> AuthService {
    AuthService::new(TEST_SECRET, 0)
}

/// Claims for the canonical test user: id 42, `alice`, role `USER`, valid for an hour.
pub fn alice_claims() -> Value {
    json!({
        "sub": "42",
        "nickname": "alice",
        "email": "a@x.com",
        "userRole": "USER",
        "iat": chrono::Utc::now().timestamp(),
        "exp": chrono::Utc::now().timestamp() + 3600,
    })
}

pub fn admin_claims() -> Value {
    let mut claims = alice_claims();
    claims["sub"] = json!("1");
    claims["nickname"] = json!("root");
    claims["userRole"] = json!("ADMIN");
    claims
}

pub fn mint(claims: &Value) -> String {
    mint_with(Algorithm::HS256, TEST_SECRET, claims)
}

pub fn mint_with(alg: Algorithm, secret: &[u8], claims: &Value) -> String {
    let mut header = Header::new(alg);
    header.typ = Some("JWT".to_string());
    jsonwebtoken::encode(&header, claims, &EncodingKey::from_secret(secret)).unwrap()
}
