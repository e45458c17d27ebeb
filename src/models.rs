use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// Request/Response models for RSA operations

// JSON body extractor whose rejections become structured 400s
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

// Query extractor with the same rejection mapping
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

// Model for encryption request; `text` is accepted for `message`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptRequest {
    pub public_key: String,
    #[serde(alias = "text")]
    pub message: String,
}

// Model for encryption response
#[derive(Debug, Serialize, Deserialize)]
pub struct EncryptResponse {
    pub encrypted: String,
}

// Model for decryption request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptRequest {
    pub private_key: String,
    pub encrypted: String,
}

// Model for decryption response
#[derive(Debug, Serialize, Deserialize)]
pub struct DecryptResponse {
    pub decrypted: String,
}

// Query for key generation; parsed leniently so bad values get our own message
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateParams {
    pub modulus_length: Option<String>,
}

// Model for generated key pair
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPairResponse {
    pub public_key: String,
    pub private_key: String,
}

// Model for error responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// Model for service statistics
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub version: String,
}
