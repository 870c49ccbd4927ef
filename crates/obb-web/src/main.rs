use std::process::ExitCode;

use clap::Parser;
use obb_web::{app, AppState, ServerConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run(ServerConfig::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(%error, "server stopped");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(config: ServerConfig) -> std::io::Result<()> {
    let service = config.price_service();
    let address = config.bind_address();

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(
        %address,
        provider = service.provider_name(),
        upstream = %config.yahoo_base_url,
        "obb API listening"
    );

    axum::serve(listener, app(AppState::new(service))).await
}
