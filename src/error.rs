//! Request-boundary errors and their HTTP mapping

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::time::Duration;
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::rsa_service::{CryptoError, KeyGenLimits};

pub const ENCRYPTION_FAILED: &str = "Encryption failed! Invalid public key.";
pub const DECRYPTION_FAILED: &str = "Decryption failed! Invalid private key or ciphertext.";
pub const GENERATION_TIMED_OUT: &str = "Key generation timed out.";
pub const GENERATION_BUSY: &str = "Key generation is busy, try again later.";
pub const INTERNAL_ERROR: &str = "Internal server error.";

/// Everything a handler can fail with.
///
/// The client only ever sees the fixed message from [`ApiError::client_message`];
/// the wrapped cause stays in the server log so failures cannot be told apart
/// from the outside.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("encryption failed: {0}")]
    Encryption(#[source] CryptoError),

    #[error("decryption failed: {0}")]
    Decryption(#[source] CryptoError),

    #[error("key generation failed: {source}")]
    Generation {
        source: CryptoError,
        limits: KeyGenLimits,
    },

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("key generation exceeded {0:?}")]
    Timeout(Duration),

    #[error("all key generation slots are in use")]
    Busy,

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Only a rejected modulus length is the caller's fault; anything else
    /// that goes wrong while generating is a server failure.
    pub fn from_generation(source: CryptoError, limits: KeyGenLimits) -> Self {
        match source {
            CryptoError::InvalidModulusLength { .. } => ApiError::Generation { source, limits },
            other => ApiError::Internal(format!("key generation failed: {other}")),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Encryption(_)
            | ApiError::Decryption(_)
            | ApiError::Generation { .. }
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Timeout(_) | ApiError::Busy => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn client_message(&self) -> String {
        match self {
            ApiError::Encryption(_) => ENCRYPTION_FAILED.to_string(),
            ApiError::Decryption(_) => DECRYPTION_FAILED.to_string(),
            ApiError::Generation { limits, .. } => format!(
                "Key generation failed! Modulus length must be an integer between {} and {} bits.",
                limits.min_bits, limits.max_bits
            ),
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Timeout(_) => GENERATION_TIMED_OUT.to_string(),
            ApiError::Busy => GENERATION_BUSY.to_string(),
            ApiError::Internal(_) => INTERNAL_ERROR.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.client_message(),
            }),
        )
            .into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(format!("Invalid query string: {}", rejection.body_text()))
    }
}
