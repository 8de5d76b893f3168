use tracing::{debug, info};

use crate::llm::GenerationBackend;
use crate::prompt;
use crate::tools::ToolRegistry;
use crate::TARGET_LLM_REQUEST;

pub use crate::llm::GenerationError;

use super::normalize::normalize;
use super::types::{ClusterRequest, ClusterResult, RawClusterResult};

/// Generates a keyword cluster for a validated request.
///
/// Builds the prompt, runs the backend once (with the lookup tools exposed
/// when a registry is supplied), then normalizes the raw output and drops any
/// keyword that leaked the target country. Failure is terminal for the
/// request; there is no retry.
pub async fn generate_cluster(
    request: &ClusterRequest,
    backend: &dyn GenerationBackend,
    tools: Option<&ToolRegistry>,
) -> Result<ClusterResult, GenerationError> {
    let prompt = prompt::cluster_prompt(request, tools.is_some());
    debug!(
        target: TARGET_LLM_REQUEST,
        "Generating cluster for seed keyword \"{}\" ({}, {}, {})",
        request.seed_keyword, request.content_type, request.website_type, request.country
    );

    let response = backend.generate(&prompt, tools).await?;
    let cleaned = clean_response(&response);
    let raw: RawClusterResult = serde_json::from_str(&cleaned)?;

    let mut result = normalize(raw);
    scrub_country(&mut result, &request.country);

    info!(
        target: TARGET_LLM_REQUEST,
        "Generated cluster for \"{}\": {} related, {} semantic, {} phrase-match",
        request.seed_keyword,
        result.related_keywords.len(),
        result.semantic_keywords.len(),
        result.phrase_match_keywords.len()
    );
    Ok(result)
}

/// Strips reasoning blocks and Markdown code fences some models wrap around
/// their JSON output.
fn clean_response(text: &str) -> String {
    let mut cleaned = text.to_string();
    while let (Some(start), Some(end)) = (cleaned.find("<think>"), cleaned.find("</think>")) {
        if end < start {
            break;
        }
        cleaned.replace_range(start..end + "</think>".len(), "");
    }

    let trimmed = cleaned.trim();
    if let Some(body) = trimmed.strip_prefix("```") {
        let body = body.strip_prefix("json").unwrap_or(body);
        let body = body.strip_suffix("```").unwrap_or(body);
        return body.trim().to_string();
    }
    trimmed.to_string()
}

/// The country is context for scoring only; it must never appear inside a
/// generated keyword. Matches on whole tokens so a code like "us" does not
/// delete "running shoes".
fn scrub_country(result: &mut ClusterResult, country: &str) {
    if country.eq_ignore_ascii_case("global") {
        return;
    }
    let country = country.to_lowercase();
    for category in [
        &mut result.related_keywords,
        &mut result.semantic_keywords,
        &mut result.phrase_match_keywords,
    ] {
        category.retain(|entry| {
            let leaked = entry
                .keyword
                .to_lowercase()
                .split_whitespace()
                .any(|token| token.trim_matches(|c: char| !c.is_alphanumeric()) == country);
            if leaked {
                debug!(
                    target: TARGET_LLM_REQUEST,
                    "Dropping keyword \"{}\": contains target country \"{}\"",
                    entry.keyword, country
                );
            }
            !leaked
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::KeywordInfo;

    fn entry(keyword: &str) -> KeywordInfo {
        KeywordInfo {
            keyword: keyword.into(),
            search_volume: 100.0,
            ranking_difficulty: 50.0,
            trend_score: None,
        }
    }

    #[test]
    fn clean_response_strips_fences_and_think_blocks() {
        let wrapped = "```json\n{\"relatedKeywords\": []}\n```";
        assert_eq!(clean_response(wrapped), "{\"relatedKeywords\": []}");

        let thinking = "<think>volume is probably low</think>{\"a\": 1}";
        assert_eq!(clean_response(thinking), "{\"a\": 1}");

        assert_eq!(clean_response("  {\"a\": 1} \n"), "{\"a\": 1}");
    }

    #[test]
    fn scrub_country_matches_whole_tokens_only() {
        let mut result = ClusterResult {
            related_keywords: vec![entry("running shoes"), entry("best shoes in us")],
            semantic_keywords: vec![entry("jogging sneakers US")],
            phrase_match_keywords: vec![entry("running shoes for women")],
        };
        scrub_country(&mut result, "us");
        assert_eq!(result.related_keywords.len(), 1);
        assert_eq!(result.related_keywords[0].keyword, "running shoes");
        assert!(result.semantic_keywords.is_empty());
        assert_eq!(result.phrase_match_keywords.len(), 1);
    }

    #[test]
    fn scrub_country_is_a_no_op_for_global() {
        let mut result = ClusterResult {
            related_keywords: vec![entry("global running trends")],
            ..Default::default()
        };
        scrub_country(&mut result, "global");
        assert_eq!(result.related_keywords.len(), 1);
    }
}
