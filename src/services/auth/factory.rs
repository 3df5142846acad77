/// Factory: build `AuthService` from application `Config`.
use base64::{Engine, engine::general_purpose::STANDARD};
use std::sync::Arc;

use crate::config::{Config, ConfigError};
use crate::services::auth::AuthService;

/// HS256 wants at least 256 bits of key material.
const MIN_SECRET_BYTES: usize = 32;

pub fn build_auth_service(config: &Config) -> Result<Arc<AuthService>, ConfigError> {
    let secret = decode_secret(&config.jwt_secret_key)?;
    let auth = AuthService::new(&secret, config.jwt_leeway_seconds);

    Ok(Arc::new(auth))
}

fn decode_secret(encoded: &str) -> Result<Vec<u8>, ConfigError> {
    let secret = STANDARD
        .decode(encoded)
        .map_err(|_| ConfigError::Invalid("JWT_SECRET_KEY"))?;

    if secret.len() < MIN_SECRET_BYTES {
        return Err(ConfigError::Invalid("JWT_SECRET_KEY"));
    }

    Ok(secret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::test_support::{TEST_SECRET, alice_claims, mint};

    #[test]
    fn decodes_standard_base64_secret() {
        let encoded = STANDARD.encode(TEST_SECRET);
        assert_eq!(decode_secret(&encoded).unwrap(), TEST_SECRET);
    }

    #[test]
    fn short_secret_is_rejected() {
        let encoded = STANDARD.encode(b"too-short");
        assert!(matches!(
            decode_secret(&encoded),
            Err(ConfigError::Invalid("JWT_SECRET_KEY"))
        ));
    }

    #[test]
    fn non_base64_secret_is_rejected() {
        assert!(decode_secret("not base64 !!").is_err());
    }

    #[test]
    fn decoded_secret_verifies_tokens() {
        let secret = decode_secret(&STANDARD.encode(TEST_SECRET)).unwrap();
        let auth = AuthService::new(&secret, 0);
        assert!(auth.verify(&mint(&alice_claims())).is_ok());
    }
}
