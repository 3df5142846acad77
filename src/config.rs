/*
 * Responsibility
 * - 環境変数や設定の読み込み (JWT secret, 認証除外パス, HTTP limits など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Paths that bypass the authentication gate unless `AUTH_EXEMPT_PREFIXES` says otherwise.
pub const DEFAULT_EXEMPT_PREFIXES: &str = "/auth,/error";

pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    /// Base64 (standard alphabet) HMAC secret shared with the token issuer.
    pub jwt_secret_key: String,
    pub jwt_leeway_seconds: u64,
    pub auth_exempt_prefixes: Vec<String>,

    pub request_timeout_seconds: u64,
    pub request_body_limit_bytes: usize,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the signing secret
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("jwt_leeway_seconds", &self.jwt_leeway_seconds)
            .field("auth_exempt_prefixes", &self.auth_exempt_prefixes)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("request_body_limit_bytes", &self.request_body_limit_bytes)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let jwt_secret_key = std::env::var("JWT_SECRET_KEY")
            .map_err(|_| ConfigError::Missing("JWT_SECRET_KEY"))?
            .trim()
            .to_string();
        if jwt_secret_key.is_empty() {
            return Err(ConfigError::Missing("JWT_SECRET_KEY"));
        }

        let jwt_leeway_seconds = std::env::var("JWT_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        let auth_exempt_prefixes = parse_prefixes(
            &std::env::var("AUTH_EXEMPT_PREFIXES")
                .unwrap_or_else(|_| DEFAULT_EXEMPT_PREFIXES.to_string()),
        )?;

        let request_timeout_seconds = std::env::var("REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(30);

        let request_body_limit_bytes = std::env::var("REQUEST_BODY_LIMIT_BYTES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(1024 * 1024);

        Ok(Self {
            addr,
            app_env,
            jwt_secret_key,
            jwt_leeway_seconds,
            auth_exempt_prefixes,
            request_timeout_seconds,
            request_body_limit_bytes,
        })
    }
}

/// Split a comma-separated prefix list. Every prefix must be an absolute path.
fn parse_prefixes(raw: &str) -> Result<Vec<String>, ConfigError> {
    let prefixes = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>();

    if prefixes.iter().any(|p| !p.starts_with('/')) {
        return Err(ConfigError::Invalid("AUTH_EXEMPT_PREFIXES"));
    }

    Ok(prefixes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prefixes_cover_auth_and_error() {
        let prefixes = parse_prefixes(DEFAULT_EXEMPT_PREFIXES).unwrap();
        assert_eq!(prefixes, vec!["/auth".to_string(), "/error".to_string()]);
    }

    #[test]
    fn prefixes_are_trimmed_and_blanks_dropped() {
        let prefixes = parse_prefixes(" /auth , ,/public/,").unwrap();
        assert_eq!(prefixes, vec!["/auth".to_string(), "/public/".to_string()]);
    }

    #[test]
    fn empty_prefix_list_is_allowed() {
        assert!(parse_prefixes("").unwrap().is_empty());
    }

    #[test]
    fn relative_prefix_is_rejected() {
        let err = parse_prefixes("/auth,error").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("AUTH_EXEMPT_PREFIXES")));
    }

    #[test]
    fn app_env_parsing() {
        assert_eq!(AppEnv::parse("PROD"), AppEnv::Production);
        assert_eq!(AppEnv::parse("production"), AppEnv::Production);
        assert_eq!(AppEnv::parse("staging"), AppEnv::Development);
        assert!(!AppEnv::parse("").is_production());
    }
}
