use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::seo::{fetch_keyword_trend, DataSourceMode};
use crate::TARGET_LLM_REQUEST;

use super::{LookupArgs, Tool, ToolError};

/// Resolves `{trendScore}` for a keyword in a country.
pub struct KeywordTrendTool {
    mode: DataSourceMode,
}

impl KeywordTrendTool {
    pub fn new(mode: DataSourceMode) -> Self {
        Self { mode }
    }
}

#[async_trait]
impl Tool for KeywordTrendTool {
    fn name(&self) -> &str {
        "keyword_trend"
    }

    fn description(&self) -> &str {
        "Look up the trend score (0-100) describing a keyword's popularity \
         trajectory in a target country. Returns null when no data is available."
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
            "keyword_trend tool invoked for \"{}\" in {}", args.keyword, args.country_code
        );
        match fetch_keyword_trend(&args.keyword, &args.country_code, self.mode).await {
            Some(trend) => Ok(json!(trend)),
            None => Ok(Value::Null),
        }
    }
}
