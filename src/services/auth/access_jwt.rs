use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde::Deserialize;
use std::{error::Error as StdError, fmt, str::FromStr};

use crate::services::auth::claims::{ClaimSet, DecodeError, RawClaims};

/// The only algorithm access tokens are signed with.
pub const SUPPORTED_ALGORITHM: Algorithm = Algorithm::HS256;

/// Why a token was classified as unsupported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsupportedReason {
    /// `alg: none` or an empty signature segment.
    Unsigned,
    MissingAlgorithm,
    UnknownAlgorithm(String),
    /// A real JWS algorithm, but not the one this service verifies.
    ForeignAlgorithm,
}

impl fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsigned => write!(f, "unsigned token"),
            Self::MissingAlgorithm => write!(f, "missing 'alg' header"),
            Self::UnknownAlgorithm(alg) => write!(f, "unknown algorithm {:?}", alg),
            Self::ForeignAlgorithm => write!(f, "algorithm is not {:?}", SUPPORTED_ALGORITHM),
        }
    }
}

// Errors returned by access-token verification.
#[derive(Debug)]
pub enum VerifyError {
    InvalidSignature(jsonwebtoken::errors::Error),
    Expired,
    Unsupported(UnsupportedReason),
    Decode(DecodeError),
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSignature(e) => write!(f, "invalid token signature: {}", e),
            Self::Expired => write!(f, "expired token"),
            Self::Unsupported(reason) => write!(f, "unsupported token: {}", reason),
            Self::Decode(e) => write!(f, "claim decoding failed: {}", e),
        }
    }
}

impl StdError for VerifyError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::InvalidSignature(e) => Some(e),
            Self::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DecodeError> for VerifyError {
    fn from(e: DecodeError) -> Self {
        Self::Decode(e)
    }
}

impl From<jsonwebtoken::errors::Error> for VerifyError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidAlgorithm => Self::Unsupported(UnsupportedReason::ForeignAlgorithm),
            ErrorKind::InvalidToken
            | ErrorKind::InvalidSignature
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => Self::InvalidSignature(e),
            // e.g. ImmatureSignature, MissingAlgorithm (empty Validation), key/crypto provider failures
            _ => Self::Decode(DecodeError::Unexpected(e)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawHeader {
    #[serde(default)]
    alg: Option<String>,
}

/// Look at the JOSE header before handing the token to `jsonwebtoken`.
///
/// `jsonwebtoken` rejects `alg: none` and unknown algorithm names as JSON errors,
/// which would read as a bad signature. Anything this function cannot parse is
/// left for the decoder to reject.
fn check_structure(token: &str) -> Result<(), UnsupportedReason> {
    let mut segments = token.split('.');
    let (Some(header), Some(_payload), Some(signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Ok(());
    };

    let Some(raw) = URL_SAFE_NO_PAD
        .decode(header)
        .ok()
        .and_then(|bytes| serde_json::from_slice::<RawHeader>(&bytes).ok())
    else {
        return Ok(());
    };

    match raw.alg.as_deref() {
        None => Err(UnsupportedReason::MissingAlgorithm),
        Some(alg) if alg.eq_ignore_ascii_case("none") => Err(UnsupportedReason::Unsigned),
        Some(alg) if Algorithm::from_str(alg).is_err() => {
            Err(UnsupportedReason::UnknownAlgorithm(alg.to_string()))
        }
        Some(_) if signature.is_empty() => Err(UnsupportedReason::Unsigned),
        Some(_) => Ok(()),
    }
}

/// HS256 access-token verifier.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AuthService")
            .field("validation", &self.validation)
            .finish()
    }
}

impl AuthService {
    pub fn new(secret: &[u8], leeway_seconds: u64) -> Self {
        let decoding_key = DecodingKey::from_secret(secret);

        let mut validation = Validation::new(SUPPORTED_ALGORITHM);
        validation.leeway = leeway_seconds;
        // `exp` is checked when present; the issuer always sets it but it is not mandatory.
        validation.required_spec_claims.clear();
        validation.validate_nbf = true;
        validation.validate_aud = false;

        Self {
            decoding_key,
            validation,
        }
    }

    /// Verify a raw token (the `Bearer ` prefix already removed) and decode its claims.
    ///
    /// Unsigned or unknown-algorithm tokens are turned away before any crypto runs.
    /// `jsonwebtoken` then checks the algorithm, the signature and `exp`/`nbf`;
    /// only a token that passes all of those is decoded into a `ClaimSet`.
    pub fn verify(&self, token: &str) -> Result<ClaimSet, VerifyError> {
        check_structure(token).map_err(VerifyError::Unsupported)?;

        let data =
            jsonwebtoken::decode::<RawClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(ClaimSet::try_from(data.claims)?)
    }
}
