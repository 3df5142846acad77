/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - token 検証エラー (VerifyError) を HTTP status/message へ変換
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::VerifyError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("unauthorized: {message}")]
    Unauthorized { message: &'static str },
    #[error("forbidden")]
    Forbidden,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: &'static str) -> Self {
        Self::Unauthorized { message }
    }

    /// No identity on a route whose handler needs one.
    pub fn authentication_required() -> Self {
        Self::unauthorized("authentication required")
    }

    /// Credential present with the `Bearer ` prefix, but nothing usable after it.
    pub fn invalid_authorization_header() -> Self {
        Self::unauthorized("invalid Authorization header")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            AppError::Unauthorized { message } => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message.into())
            }
            AppError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN", "forbidden".into()),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<VerifyError> for AppError {
    fn from(e: VerifyError) -> Self {
        match e {
            VerifyError::InvalidSignature(_) => AppError::unauthorized("invalid token signature"),
            VerifyError::Expired => AppError::unauthorized("expired token"),
            // Client/protocol mismatch rather than a rejected credential
            VerifyError::Unsupported(_) => {
                AppError::bad_request("UNSUPPORTED_TOKEN", "unsupported token")
            }
            // Never surface decode details to the caller
            VerifyError::Decode(_) => AppError::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::access_jwt::UnsupportedReason;
    use crate::services::auth::claims::DecodeError;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn unauthorized_renders_message() {
        let resp = AppError::invalid_authorization_header().into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(resp).await;
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
        assert_eq!(body["error"]["message"], "invalid Authorization header");
    }

    #[test]
    fn verify_errors_map_to_distinct_statuses() {
        let cases = [
            (VerifyError::Expired, StatusCode::UNAUTHORIZED),
            (
                VerifyError::Unsupported(UnsupportedReason::Unsigned),
                StatusCode::BAD_REQUEST,
            ),
            (
                VerifyError::Decode(DecodeError::UnknownRole("SUPERADMIN".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            let resp = AppError::from(err).into_response();
            assert_eq!(resp.status(), status);
        }
    }

    #[tokio::test]
    async fn decode_failure_body_is_generic() {
        let err = VerifyError::Decode(DecodeError::InvalidSubject("abc".into()));
        let body = body_json(AppError::from(err).into_response()).await;
        assert_eq!(body["error"]["message"], "internal server error");
        assert!(!body.to_string().contains("abc"));
    }
}
