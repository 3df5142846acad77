use serde::Deserialize;
use serde_json::Value;
use std::{error::Error as StdError, fmt, str::FromStr};

/// Closed set of roles the issuer may put in the `userRole` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = DecodeError;

    // Case-sensitive: "user" is not a role.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(UserRole::User),
            "ADMIN" => Ok(UserRole::Admin),
            other => Err(DecodeError::UnknownRole(other.to_string())),
        }
    }
}

/// Failures while turning a verified payload into a `ClaimSet`,
/// plus verification failures that fit none of the named kinds.
#[derive(Debug)]
pub enum DecodeError {
    MissingClaim(&'static str),
    InvalidClaimType(&'static str),
    InvalidSubject(String),
    UnknownRole(String),
    Unexpected(jsonwebtoken::errors::Error),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingClaim(name) => write!(f, "missing '{}' claim", name),
            Self::InvalidClaimType(name) => write!(f, "'{}' claim has an unexpected type", name),
            Self::InvalidSubject(sub) => write!(f, "invalid 'sub' (expected integer): {:?}", sub),
            Self::UnknownRole(role) => write!(f, "unknown role: {:?}", role),
            Self::Unexpected(e) => write!(f, "unexpected verification failure: {}", e),
        }
    }
}

impl StdError for DecodeError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Unexpected(e) => Some(e),
            _ => None,
        }
    }
}

/// Payload as it comes off the wire.
///
/// Every field is kept loose so that a wrong type shows up as a `DecodeError`
/// instead of a JSON error from the JWT decoder.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawClaims {
    #[serde(default)]
    sub: Option<Value>,
    #[serde(default)]
    nickname: Option<Value>,
    #[serde(default)]
    email: Option<Value>,
    #[serde(default, rename = "userRole")]
    user_role: Option<Value>,
}

/// Decoded, typed token payload. Lives for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimSet {
    pub subject: i64,
    pub nickname: String,
    pub email: String,
    pub role: UserRole,
}

impl TryFrom<RawClaims> for ClaimSet {
    type Error = DecodeError;

    fn try_from(raw: RawClaims) -> Result<Self, Self::Error> {
        let subject = parse_subject(raw.sub)?;
        let nickname = required_string("nickname", raw.nickname)?;
        let email = required_string("email", raw.email)?;
        let role = required_string("userRole", raw.user_role)?.parse::<UserRole>()?;

        Ok(Self {
            subject,
            nickname,
            email,
            role,
        })
    }
}

// Issuers write `sub` as a decimal string; a bare JSON integer is accepted too.
fn parse_subject(sub: Option<Value>) -> Result<i64, DecodeError> {
    match sub {
        None => Err(DecodeError::MissingClaim("sub")),
        Some(Value::String(s)) => s.parse::<i64>().map_err(|_| DecodeError::InvalidSubject(s)),
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| DecodeError::InvalidSubject(n.to_string())),
        Some(other) => Err(DecodeError::InvalidSubject(other.to_string())),
    }
}

fn required_string(name: &'static str, value: Option<Value>) -> Result<String, DecodeError> {
    match value {
        None => Err(DecodeError::MissingClaim(name)),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(DecodeError::InvalidClaimType(name)),
    }
}
