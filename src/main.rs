use std::env;

use subsidy_engine::api::{AppState, create_router};
use subsidy_engine::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

fn init_logger() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("subsidy_engine=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .compact(),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();

    let loader = match env::var("SUBSIDY_CONFIG_DIR") {
        Ok(dir) => {
            info!(config_dir = %dir, "Loading configuration from directory");
            ConfigLoader::load(dir)?
        }
        Err(_) => ConfigLoader::embedded()?,
    };
    let metadata = &loader.config().policy().metadata;
    info!(
        rules = %metadata.code,
        version = %metadata.version,
        "Configuration loaded"
    );

    let addr = env::var("SUBSIDY_ENGINE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Subsidy engine listening");

    axum::serve(listener, create_router(AppState::new(loader))).await?;
    Ok(())
}
