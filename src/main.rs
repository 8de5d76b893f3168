use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use keywordsmith::api::{self, AppState};
use keywordsmith::config::AppConfig;
use keywordsmith::llm::LlmBackend;
use keywordsmith::logging::configure_logging;
use keywordsmith::seo::DataSourceMode;
use keywordsmith::tools::ToolRegistry;
use keywordsmith::LLMParams;

/// Keyword cluster generation service.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Address to bind (overrides HOST).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides PORT).
    #[arg(long)]
    port: Option<u16>,

    /// Model name (overrides LLM_MODEL / OLLAMA_MODEL).
    #[arg(long)]
    model: Option<String>,

    /// Expose the metrics and trend lookup tools to the model.
    #[arg(long)]
    tools: bool,

    /// Serve live (unimplemented) data sources instead of simulated ones.
    #[arg(long)]
    live_data: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    configure_logging();

    let args = Args::parse();
    let mut config = AppConfig::from_env();
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(model) = args.model {
        config.model = model;
    }
    if args.tools {
        config.tool_calling = true;
    }
    if args.live_data {
        config.data_source_mode = DataSourceMode::Live;
    }

    info!(
        "Starting keywordsmith: model={}, tools={}, data={:?}",
        config.model, config.tool_calling, config.data_source_mode,
    );

    let llm_client = config.build_llm_client();
    let backend = LlmBackend::new(LLMParams {
        llm_client,
        model: config.model.clone(),
        temperature: config.temperature,
    });

    let tools = config
        .tool_calling
        .then(|| Arc::new(ToolRegistry::new(config.data_source_mode)));

    let state = AppState {
        backend: Arc::new(backend),
        tools,
    };

    api::serve(&config, state).await
}
