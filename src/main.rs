use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing_subscriber::EnvFilter;

use inventory_resolver::adapters::aggregator::client::AggregatorClient;
use inventory_resolver::adapters::orchestrator::{RandomSource, SearchOrchestrator};
use inventory_resolver::adapters::shared::USER_AGENT;
use inventory_resolver::adapters::upstream::client::UpstreamClient;
use inventory_resolver::adapters::upstream::token::TokenProvider;
use inventory_resolver::config::load_config;
use inventory_resolver::domain::quality::QualityFilter;
use inventory_resolver::domain::synthetic::SyntheticGenerator;
use inventory_resolver::mcp::server::InventoryMcpServer;

fn find_config_path() -> PathBuf {
    let candidates = [PathBuf::from("config.yaml"), binary_dir().join("config.yaml")];

    for path in &candidates {
        if path.exists() {
            return path.clone();
        }
    }

    candidates[0].clone()
}

fn binary_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout is reserved for MCP JSON-RPC
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting inventory-resolver server");

    let config_path = find_config_path();
    let config = load_config(&config_path)?;

    let quality = QualityFilter::new(&config.quality);

    let token_http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
    let tokens = Arc::new(TokenProvider::from_config(token_http, &config.upstream));
    if !tokens.has_credentials() {
        tracing::warn!(
            "Upstream client credentials are not set; the secondary provider will report auth failures"
        );
    }

    let primary = AggregatorClient::new(&config.aggregator)?;
    let secondary = UpstreamClient::new(&config.upstream, tokens, quality.clone())?;

    let random = RandomSource::from_seed(config.synthetic.seed);
    if let RandomSource::Seeded(seed) = random {
        tracing::info!(seed, "Using seeded randomness for fallback data");
    }

    let orchestrator = SearchOrchestrator::new(
        Box::new(primary),
        Box::new(secondary),
        quality,
        SyntheticGenerator::new(config.synthetic),
    )
    .with_random_source(random);

    let server = InventoryMcpServer::new(Arc::new(orchestrator));

    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
