use axum::{Json, extract::State, response::Html};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

use crate::config::ServiceSettings;
use crate::error::ApiError;
use crate::key_format::{KeyKind, format_as_pem};
use crate::models::{
    ApiJson, ApiQuery, DecryptRequest, DecryptResponse, EncryptRequest, EncryptResponse,
    GenerateParams, KeyPairResponse, StatsResponse,
};
use crate::rsa_service::{self, CryptoError};

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Arc<ServiceSettings>,
    pub started_at: Instant,
    /// One permit per key generation allowed to run at once
    pub keygen_slots: Arc<Semaphore>,
}

impl AppState {
    pub fn new(settings: ServiceSettings) -> Self {
        let keygen_slots = Arc::new(Semaphore::new(settings.keygen_concurrency));
        Self {
            settings: Arc::new(settings),
            started_at: Instant::now(),
            keygen_slots,
        }
    }
}

const INDEX_HTML: &str = include_str!("../static/index.html");

pub async fn root() -> Html<&'static str> {
    Html(INDEX_HTML)
}

// Handler to generate a key pair
pub async fn generate(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<GenerateParams>,
) -> Result<Json<KeyPairResponse>, ApiError> {
    let start = Instant::now();
    let settings = &state.settings;

    let bits = rsa_service::parse_modulus_length(
        params.modulus_length.as_deref(),
        settings.default_modulus_length,
        settings.limits,
    )
    .map_err(|source| ApiError::from_generation(source, settings.limits))?;

    let permit = Arc::clone(&state.keygen_slots)
        .try_acquire_owned()
        .map_err(|_| ApiError::Busy)?;

    // Key generation is CPU bound; keep it off the async workers. The permit
    // is held until OpenSSL returns, even if the request has timed out.
    let task = tokio::task::spawn_blocking(move || {
        let result = rsa_service::generate_key_pair(bits);
        drop(permit);
        result
    });
    let joined = match settings.keygen_timeout {
        Some(limit) => tokio::time::timeout(limit, task)
            .await
            .map_err(|_| ApiError::Timeout(limit))?,
        None => task.await,
    };

    let key_pair = joined
        .map_err(|e| ApiError::Internal(format!("key generation task failed: {e}")))?
        .map_err(|source| ApiError::from_generation(source, settings.limits))?;

    tracing::info!(bits, elapsed = ?start.elapsed(), "generate completed");

    Ok(Json(KeyPairResponse {
        public_key: key_pair.public_key,
        private_key: key_pair.private_key,
    }))
}

// RSA private-key work on large moduli is slow enough to stall a worker
async fn run_blocking<T, F>(op: F) -> Result<Result<T, CryptoError>, ApiError>
where
    F: FnOnce() -> Result<T, CryptoError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| ApiError::Internal(format!("RSA task failed: {e}")))
}

// Handler to encrypt a message
pub async fn encrypt(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<EncryptRequest>,
) -> Result<Json<EncryptResponse>, ApiError> {
    let start = Instant::now();

    let max_key_bits = state.settings.limits.max_bits;

    let encrypted = run_blocking(move || {
        let public_key = format_as_pem(&payload.public_key, KeyKind::Public);
        rsa_service::encrypt(&public_key, &payload.message, max_key_bits)
    })
    .await?
    .map_err(ApiError::Encryption)?;

    tracing::info!(elapsed = ?start.elapsed(), "encrypt completed");

    Ok(Json(EncryptResponse { encrypted }))
}

// Handler to decrypt base64 ciphertext
pub async fn decrypt(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<DecryptRequest>,
) -> Result<Json<DecryptResponse>, ApiError> {
    let start = Instant::now();

    let max_key_bits = state.settings.limits.max_bits;

    let decrypted = run_blocking(move || {
        let private_key = format_as_pem(&payload.private_key, KeyKind::Private);
        rsa_service::decrypt(&private_key, &payload.encrypted, max_key_bits)
    })
    .await?
    .map_err(ApiError::Decryption)?;

    tracing::info!(elapsed = ?start.elapsed(), "decrypt completed");

    Ok(Json(DecryptResponse { decrypted }))
}

// Service health check and statistics
pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        status: "healthy".to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
