//! Server configuration from flags and environment.

use std::sync::Arc;

use clap::Parser;
use obb_core::adapters::yahoo::DEFAULT_BASE_URL;
use obb_core::{PriceService, YahooAdapter};

/// Runtime settings for the HTTP server.
///
/// Every option can be given as a flag or through its `OBB_*` environment
/// variable; flags win.
#[derive(Debug, Clone, Parser)]
#[command(name = "obb-web", version, about = "Historical equity price HTTP API")]
pub struct ServerConfig {
    /// Interface to bind.
    #[arg(long, env = "OBB_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "OBB_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Base URL of the Yahoo Finance chart API.
    #[arg(long, env = "OBB_YAHOO_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub yahoo_base_url: String,

    /// Per-request upstream timeout in milliseconds.
    #[arg(long, env = "OBB_UPSTREAM_TIMEOUT_MS", default_value_t = 10_000)]
    pub upstream_timeout_ms: u64,
}

impl ServerConfig {
    /// `host:port` as accepted by `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Price service wired to the configured upstream.
    pub fn price_service(&self) -> PriceService {
        let adapter = YahooAdapter::default()
            .with_base_url(&self.yahoo_base_url)
            .with_timeout_ms(self.upstream_timeout_ms);
        PriceService::new(Arc::new(adapter))
    }
}
