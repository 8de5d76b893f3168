use crate::cluster::ClusterRequest;

use super::common::{current_date, JSON_ONLY};

const OUTPUT_FORMAT: &str = r#"
Return the keyword cluster as a JSON object with this exact shape:

{
  "relatedKeywords": [
    {"keyword": "...", "searchVolume": 0, "rankingDifficulty": 0, "trendScore": 0}
  ],
  "semanticKeywords": [ ... same entry shape ... ],
  "phraseMatchKeywords": [ ... same entry shape ... ]
}

- "relatedKeywords": keywords closely related to the seed keyword.
- "semanticKeywords": keywords with a similar meaning to the seed keyword.
- "phraseMatchKeywords": keywords that include the seed keyword as part of a phrase.
- "searchVolume": estimated monthly search volume (a number).
- "rankingDifficulty": how hard it is to rank for the keyword, 0-100 (a number).
- "trendScore": relative popularity trajectory, 0-100 (a number); omit it when you have no basis for an estimate.
"#;

const TOOL_INSTRUCTIONS: &str = r#"
Before finalizing the cluster, call the keyword_metrics tool and the
keyword_trend tool for every candidate keyword, passing the keyword and the
country code. Use the returned values for searchVolume, rankingDifficulty and
trendScore. When a tool returns null for a keyword, no data is available:
fall back to your own estimate for that keyword and treat it as an estimate.
"#;

/// Builds the generation instruction for a validated request. When
/// `tools_enabled` is set, the prompt directs the model to resolve metrics
/// through the lookup tools before falling back to its own estimates.
pub fn cluster_prompt(request: &ClusterRequest, tools_enabled: bool) -> String {
    let tool_section = if tools_enabled { TOOL_INSTRUCTIONS } else { "" };
    format!(
        r#"You are an expert SEO specialist. Today is {date}. Generate a keyword cluster based on the following information:

Seed Keyword: {seed}
Content Type: {content_type}
Website Type: {website_type}
Target Country: {country}

Consider the content type and the website type when generating the cluster.
Focus on keywords that are relevant and have a good balance between search
volume and ranking difficulty. Target roughly ten keywords per category;
return fewer if more would dilute quality.

The target country is context for scoring only. Never include the country
name or code inside the generated keyword strings themselves.
{tool_section}{output_format}{json_only}"#,
        date = current_date(),
        seed = request.seed_keyword,
        content_type = request.content_type,
        website_type = request.website_type,
        country = request.country,
        tool_section = tool_section,
        output_format = OUTPUT_FORMAT,
        json_only = JSON_ONLY,
    )
}
