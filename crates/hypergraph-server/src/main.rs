//! MCP server entry point for Hypergraph code generation.
//!
//! # Usage
//!
//! Run the server via stdio transport:
//!
//! ```bash
//! hypergraph-mcp --knowledge-path knowledge/hypergraph_knowledge_base.md
//! ```
//!
//! Or configure it in an MCP client:
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "hypergraph": {
//!       "command": "hypergraph-mcp"
//!     }
//!   }
//! }
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use hypergraph_core::{LogFormat, ServerConfig, ServerConfigBuilder};
use hypergraph_server::{HypergraphService, KnowledgeBase, Router};
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Hypergraph code generation over the Model Context Protocol.
#[derive(Parser, Debug)]
#[command(name = "hypergraph-mcp")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (default: <config dir>/hypergraph-mcp/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown knowledge corpus searched by `search_knowledge`
    #[arg(long, env = "HYPERGRAPH_KNOWLEDGE_PATH")]
    knowledge_path: Option<PathBuf>,

    /// Tracing filter used when RUST_LOG is unset
    #[arg(long, env = "HYPERGRAPH_LOG")]
    log_filter: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    /// Layers flags and environment over the file configuration.
    fn resolve(self) -> Result<ServerConfig> {
        let base = match &self.config {
            Some(path) => ServerConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => ServerConfig::load_default().context("loading default configuration")?,
        };

        let mut builder = ServerConfigBuilder::from_config(base);
        if let Some(path) = self.knowledge_path {
            builder = builder.knowledge_path(path);
        }
        if let Some(filter) = self.log_filter {
            builder = builder.log_filter(filter);
        }
        if self.log_json {
            builder = builder.log_format(LogFormat::Json);
        }

        let config = builder.build();
        config.validate()?;
        Ok(config)
    }
}

fn init_logging(config: &ServerConfig) {
    let json = config.log_format == LogFormat::Json;

    // Logs go to stderr; stdout carries the MCP protocol
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| {
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
        }))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Cli::parse().resolve()?;
    init_logging(&config);

    tracing::info!("Starting hypergraph-mcp v{}", env!("CARGO_PKG_VERSION"));

    let knowledge = Arc::new(KnowledgeBase::load(&config.knowledge_path).await);
    let router = Router::new(knowledge).context("initializing generators")?;

    let service = HypergraphService::new(Arc::new(router))
        .serve(stdio())
        .await?;
    service.waiting().await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
