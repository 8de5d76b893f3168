use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::seo::{fetch_keyword_metrics, DataSourceMode};
use crate::TARGET_LLM_REQUEST;

use super::{LookupArgs, Tool, ToolError};

/// Resolves `{searchVolume, rankingDifficulty}` for a keyword in a country.
pub struct KeywordMetricsTool {
    mode: DataSourceMode,
}

impl KeywordMetricsTool {
    pub fn new(mode: DataSourceMode) -> Self {
        Self { mode }
    }
}

#[async_trait]
impl Tool for KeywordMetricsTool {
    fn name(&self) -> &str {
        "keyword_metrics"
    }

    fn description(&self) -> &str {
        "Look up the estimated monthly search volume and ranking difficulty (0-100) \
         for a keyword in a target country. Returns null when no data is available."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "keyword": {
                    "type": "string",
                    "description": "The keyword to look up."
                },
                "countryCode": {
                    "type": "string",
                    "description": "Country code (e.g. 'us') or 'global'."
                }
            },
            "required": ["keyword", "countryCode"]
        })
    }

    async fn invoke(&self, args: Value) -> Result<Value, ToolError> {
        let args: LookupArgs = serde_json::from_value(args)?;
        debug!(
            target: TARGET_LLM_REQUEST,
            "keyword_metrics tool invoked for \"{}\" in {}", args.keyword, args.country_code
        );
        match fetch_keyword_metrics(&args.keyword, &args.country_code, self.mode).await {
            Some(metrics) => Ok(json!(metrics)),
            None => Ok(Value::Null),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn simulated_lookup_returns_both_fields() {
        let tool = KeywordMetricsTool::new(DataSourceMode::Simulated);
        let value = tool
            .invoke(json!({"keyword": "running shoes", "countryCode": "us"}))
            .await
            .unwrap();
        let volume = value["searchVolume"].as_u64().unwrap();
        let difficulty = value["rankingDifficulty"].as_u64().unwrap();
        assert!((100..5100).contains(&volume));
        assert!(difficulty < 100);
    }

    #[tokio::test]
    async fn live_lookup_signals_absent_data() {
        let tool = KeywordMetricsTool::new(DataSourceMode::Live);
        let value = tool
            .invoke(json!({"keyword": "running shoes", "countryCode": "us"}))
            .await
            .unwrap();
        assert!(value.is_null());
    }
}
