// This file allows the components to be used as a library as well
pub mod config;
pub mod error;
pub mod handlers;
pub mod key_format;
pub mod models;
pub mod rsa_service;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

// Re-export important types for easier use
pub use config::{Config, ServiceSettings};
pub use error::ApiError;
pub use handlers::AppState;
pub use key_format::{KeyKind, format_as_pem};
pub use rsa_service::{CryptoError, KeyPair, decrypt, encrypt, generate_key_pair};

/// Builds the HTTP surface: the HTML page plus the JSON endpoints.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/generate", get(handlers::generate))
        .route("/encrypt", post(handlers::encrypt))
        .route("/decrypt", post(handlers::decrypt))
        .route("/stats", get(handlers::get_stats))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
