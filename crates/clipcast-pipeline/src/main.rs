//! Promo-video pipeline binary.

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

use clipcast_models::InvocationResponse;
use clipcast_pipeline::{Pipeline, PipelineConfig};

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for TLS/HTTPS)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env().add_directive("clipcast=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(true).with_target(true))
            .with(env_filter)
            .init();
    }

    let invocation_id = Uuid::new_v4();
    info!(invocation_id = %invocation_id, "Starting clipcast pipeline");

    // Load configuration
    let config = match PipelineConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Assemble the pipeline
    let pipeline = match Pipeline::from_config(config).await {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to assemble pipeline: {}", e);
            std::process::exit(1);
        }
    };

    // Run and report the outcome
    let outcome = pipeline.run().await;
    let response = InvocationResponse::from(&outcome);

    match serde_json::to_string(&response) {
        Ok(line) => println!("{line}"),
        Err(e) => error!("Failed to serialize invocation response: {}", e),
    }

    if outcome.is_success() {
        info!(invocation_id = %invocation_id, "Invocation complete");
    } else {
        error!(invocation_id = %invocation_id, "Invocation failed: {}", response.body);
        std::process::exit(1);
    }
}
