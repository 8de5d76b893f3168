use serde_json::Value;

use super::types::{ClusterResult, KeywordInfo, RawClusterResult, RawKeywordInfo};

/// Coerces the lenient wire shape into a strict `ClusterResult`.
///
/// Every `searchVolume` and `rankingDifficulty` comes out a finite number
/// (failed coercion yields 0). A present `trendScore` stays numeric; an
/// absent one stays absent. No other field is altered, and running the pass
/// twice yields the same result.
pub fn normalize(raw: RawClusterResult) -> ClusterResult {
    ClusterResult {
        related_keywords: normalize_category(raw.related_keywords),
        semantic_keywords: normalize_category(raw.semantic_keywords),
        phrase_match_keywords: normalize_category(raw.phrase_match_keywords),
    }
}

fn normalize_category(entries: Vec<RawKeywordInfo>) -> Vec<KeywordInfo> {
    entries
        .into_iter()
        .map(|entry| KeywordInfo {
            keyword: entry.keyword,
            search_volume: coerce_metric(&entry.search_volume),
            ranking_difficulty: coerce_metric(&entry.ranking_difficulty),
            trend_score: entry.trend_score.as_ref().map(coerce_metric),
        })
        .collect()
}

/// Best-effort numeric coercion: a finite JSON number passes through, a
/// numeric string is parsed, anything else becomes 0.
fn coerce_metric(value: &Value) -> f64 {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(n) if n.is_finite() => n,
        _ => 0.0,
    }
}
