use clap::Parser;
use tracing_subscriber::EnvFilter;

use rsa_workbench::{AppState, Config, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .init();

    let settings = config.settings()?;
    tracing::info!(
        default_bits = settings.default_modulus_length,
        min_bits = settings.limits.min_bits,
        max_bits = settings.limits.max_bits,
        timeout = ?settings.keygen_timeout,
        "key generation settings"
    );

    let app = router(AppState::new(settings));

    // Create a TCP listener
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!("RSA workbench listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
