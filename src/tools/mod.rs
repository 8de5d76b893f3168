mod metrics;
mod trend;

pub use metrics::KeywordMetricsTool;
pub use trend::KeywordTrendTool;

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::seo::DataSourceMode;

/// Arguments shared by both lookup tools.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupArgs {
    pub keyword: String,
    pub country_code: String,
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid tool arguments: {0}")]
    InvalidArguments(#[from] serde_json::Error),
}

/// A named operation the generating backend may invoke mid-generation.
/// Implementations are pure functions of their arguments plus injected
/// configuration; returning JSON `null` signals that no data is available,
/// which callers must tolerate as a non-error outcome.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique tool identifier, as declared to the backend.
    fn name(&self) -> &str;

    /// Human-readable description for the backend.
    fn description(&self) -> &str;

    /// JSON schema for the tool arguments.
    fn parameters(&self) -> serde_json::Value;

    /// Executes the tool with the backend-supplied arguments.
    async fn invoke(&self, args: serde_json::Value) -> Result<serde_json::Value, ToolError>;
}

/// Registry of the tools exposed to the generating backend.
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new(mode: DataSourceMode) -> Self {
        let mut tools: BTreeMap<String, Arc<dyn Tool>> = BTreeMap::new();
        for tool in [
            Arc::new(KeywordMetricsTool::new(mode)) as Arc<dyn Tool>,
            Arc::new(KeywordTrendTool::new(mode)) as Arc<dyn Tool>,
        ] {
            tools.insert(tool.name().to_string(), tool);
        }
        Self { tools }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.tools.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn both_lookup_tools_are_registered() {
        let registry = ToolRegistry::new(DataSourceMode::Simulated);
        assert!(registry.get("keyword_metrics").is_some());
        assert!(registry.get("keyword_trend").is_some());
        assert!(registry.get("keyword_backlinks").is_none());
        assert_eq!(registry.iter().count(), 2);
    }

    #[tokio::test]
    async fn malformed_arguments_yield_a_tool_error() {
        let registry = ToolRegistry::new(DataSourceMode::Simulated);
        let tool = registry.get("keyword_metrics").unwrap();
        let result = tool.invoke(json!({"keyword": 42})).await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }
}
