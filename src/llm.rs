use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionTool, ChatCompletionToolArgs, ChatCompletionToolType,
    CreateChatCompletionRequestArgs, FunctionObjectArgs, ResponseFormat,
};
use async_openai::Client as OpenAIClient;
use async_trait::async_trait;
use ollama_rs::generation::completion::request::GenerationRequest;
use ollama_rs::generation::options::GenerationOptions;
use ollama_rs::generation::parameters::{FormatType, JsonStructure};
use ollama_rs::Ollama;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::cluster::ClusterResult;
use crate::tools::ToolRegistry;
use crate::{LLMClient, LLMParams, TARGET_LLM_REQUEST};

/// Upper bound on tool round-trips within one generation, so a backend that
/// keeps requesting lookups cannot spin forever.
const MAX_TOOL_ROUNDS: usize = 8;

const SYSTEM_PROMPT: &str =
    "You are an SEO keyword research assistant. You always respond with a single JSON object.";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("the model returned no usable output")]
    NoOutput,
    #[error("could not parse model output: {0}")]
    Unparseable(#[from] serde_json::Error),
    #[error("backend request failed: {0}")]
    Backend(String),
}

/// Seam between the cluster generator and the concrete model client, so the
/// generator can be exercised against a mocked backend.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Runs one generation for the given prompt, mediating any tool calls
    /// the model makes through the registry. Returns the model's final text.
    async fn generate(
        &self,
        prompt: &str,
        tools: Option<&ToolRegistry>,
    ) -> Result<String, GenerationError>;
}

/// The production backend over the configured LLM client.
pub struct LlmBackend {
    params: LLMParams,
}

impl LlmBackend {
    pub fn new(params: LLMParams) -> Self {
        Self { params }
    }

    async fn generate_ollama(
        &self,
        ollama: &Ollama,
        prompt: &str,
    ) -> Result<String, GenerationError> {
        let mut request = GenerationRequest::new(self.params.model.clone(), prompt.to_string());
        request.options = Some(GenerationOptions::default().temperature(self.params.temperature));
        request.format = Some(FormatType::StructuredJson(
            JsonStructure::new::<ClusterResult>(),
        ));

        debug!(target: TARGET_LLM_REQUEST, "Sending generation request to Ollama model {}", self.params.model);
        let response = ollama
            .generate(request)
            .await
            .map_err(|e| GenerationError::Backend(e.to_string()))?;

        if response.response.trim().is_empty() {
            return Err(GenerationError::NoOutput);
        }
        Ok(response.response)
    }

    async fn generate_openai(
        &self,
        client: &OpenAIClient<OpenAIConfig>,
        prompt: &str,
        tools: Option<&ToolRegistry>,
    ) -> Result<String, GenerationError> {
        let tool_defs = match tools {
            Some(registry) => tool_definitions(registry)?,
            None => Vec::new(),
        };

        let mut messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_PROMPT)
                .build()
                .map_err(|e| GenerationError::Backend(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| GenerationError::Backend(e.to_string()))?
                .into(),
        ];

        for round in 0..=MAX_TOOL_ROUNDS {
            let mut request = CreateChatCompletionRequestArgs::default();
            request
                .model(self.params.model.clone())
                .temperature(self.params.temperature)
                .response_format(ResponseFormat::JsonObject)
                .messages(messages.clone());
            if !tool_defs.is_empty() {
                request.tools(tool_defs.clone());
            }
            let request = request
                .build()
                .map_err(|e| GenerationError::Backend(e.to_string()))?;

            debug!(target: TARGET_LLM_REQUEST, "Sending chat request to model {} (round {})", self.params.model, round);
            let response = client
                .chat()
                .create(request)
                .await
                .map_err(|e| GenerationError::Backend(e.to_string()))?;

            let message = response
                .choices
                .into_iter()
                .next()
                .ok_or(GenerationError::NoOutput)?
                .message;

            match (message.tool_calls, tools) {
                (Some(calls), Some(registry)) if !calls.is_empty() => {
                    debug!(target: TARGET_LLM_REQUEST, "Model requested {} tool call(s)", calls.len());
                    messages.push(
                        ChatCompletionRequestAssistantMessageArgs::default()
                            .tool_calls(calls.clone())
                            .build()
                            .map_err(|e| GenerationError::Backend(e.to_string()))?
                            .into(),
                    );
                    for call in calls {
                        let output = run_tool_call(registry, &call).await;
                        messages.push(
                            ChatCompletionRequestToolMessageArgs::default()
                                .tool_call_id(call.id.clone())
                                .content(output.to_string())
                                .build()
                                .map_err(|e| GenerationError::Backend(e.to_string()))?
                                .into(),
                        );
                    }
                }
                _ => {
                    let content = message.content.unwrap_or_default();
                    if content.trim().is_empty() {
                        return Err(GenerationError::NoOutput);
                    }
                    return Ok(content);
                }
            }
        }

        Err(GenerationError::Backend(format!(
            "model did not finalize output within {} tool rounds",
            MAX_TOOL_ROUNDS
        )))
    }
}

#[async_trait]
impl GenerationBackend for LlmBackend {
    async fn generate(
        &self,
        prompt: &str,
        tools: Option<&ToolRegistry>,
    ) -> Result<String, GenerationError> {
        match &self.params.llm_client {
            LLMClient::Ollama(ollama) => {
                if tools.is_some() {
                    warn!(target: TARGET_LLM_REQUEST, "Tool calling is not supported on the Ollama backend; generating without tools");
                }
                self.generate_ollama(ollama, prompt).await
            }
            LLMClient::OpenAI(client) => self.generate_openai(client, prompt, tools).await,
        }
    }
}

/// Declares the registry's tools in the chat-completion function format.
fn tool_definitions(registry: &ToolRegistry) -> Result<Vec<ChatCompletionTool>, GenerationError> {
    registry
        .iter()
        .map(|tool| {
            let function = FunctionObjectArgs::default()
                .name(tool.name())
                .description(tool.description())
                .parameters(tool.parameters())
                .build()
                .map_err(|e| GenerationError::Backend(e.to_string()))?;
            ChatCompletionToolArgs::default()
                .r#type(ChatCompletionToolType::Function)
                .function(function)
                .build()
                .map_err(|e| GenerationError::Backend(e.to_string()))
        })
        .collect()
}

/// Executes one tool call. Failures are reported back to the model as an
/// error payload rather than aborting the generation.
async fn run_tool_call(registry: &ToolRegistry, call: &ChatCompletionMessageToolCall) -> Value {
    let name = call.function.name.as_str();
    let Some(tool) = registry.get(name) else {
        warn!(target: TARGET_LLM_REQUEST, "Model called unknown tool {}", name);
        return json!({"error": format!("unknown tool: {name}")});
    };
    let args: Value = serde_json::from_str(&call.function.arguments).unwrap_or(Value::Null);
    match tool.invoke(args).await {
        Ok(value) => value,
        Err(e) => {
            warn!(target: TARGET_LLM_REQUEST, "Tool {} rejected arguments: {}", name, e);
            json!({"error": e.to_string()})
        }
    }
}
