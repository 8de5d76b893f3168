use std::env;

use async_openai::{config::OpenAIConfig, Client as OpenAIClient};
use ollama_rs::Ollama;
use tracing::info;

use crate::seo::DataSourceMode;
use crate::LLMClient;

/// Runtime configuration for the keyword service, resolved from the
/// environment with optional CLI overrides applied in `main`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub model: String,
    pub temperature: f32,
    /// Expose the lookup tools to the model during generation. Only the
    /// OpenAI-compatible backend supports tool calls.
    pub tool_calling: bool,
    pub data_source_mode: DataSourceMode,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);

        let model = env::var("LLM_MODEL")
            .or_else(|_| env::var("OLLAMA_MODEL"))
            .unwrap_or_else(|_| "llama3.1".to_string());

        let temperature: f32 = env::var("LLM_TEMPERATURE")
            .unwrap_or_else(|_| "0.2".to_string())
            .parse()
            .unwrap_or(0.2);

        let tool_calling = env::var("TOOL_CALLING")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let data_source_mode = match env::var("DATA_SOURCE_MODE").as_deref() {
            Ok("live") => DataSourceMode::Live,
            _ => DataSourceMode::Simulated,
        };

        AppConfig {
            host,
            port,
            model,
            temperature,
            tool_calling,
            data_source_mode,
        }
    }

    /// Builds the LLM client: OpenAI-compatible when OPENAI_API_KEY is set,
    /// otherwise Ollama at OLLAMA_HOST:OLLAMA_PORT.
    pub fn build_llm_client(&self) -> LLMClient {
        if let Ok(api_key) = env::var("OPENAI_API_KEY") {
            let mut openai_config = OpenAIConfig::new().with_api_key(api_key);
            if let Ok(api_base) = env::var("OPENAI_API_BASE") {
                openai_config = openai_config.with_api_base(api_base);
            }
            info!("Using OpenAI-compatible backend with model {}", self.model);
            return LLMClient::OpenAI(OpenAIClient::with_config(openai_config));
        }

        let ollama_host = env::var("OLLAMA_HOST").unwrap_or_else(|_| "http://localhost".to_string());
        let ollama_port: u16 = env::var("OLLAMA_PORT")
            .unwrap_or_else(|_| "11434".to_string())
            .parse()
            .unwrap_or(11434);
        info!(
            "Using Ollama at {}:{} with model {}",
            ollama_host, ollama_port, self.model
        );
        LLMClient::Ollama(Ollama::new(ollama_host, ollama_port))
    }
}
