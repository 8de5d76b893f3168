use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The kind of content the keywords are being generated for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    #[serde(rename = "article")]
    Article,
    #[serde(rename = "internal page")]
    InternalPage,
    #[serde(rename = "landing page")]
    LandingPage,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [
        ContentType::Article,
        ContentType::InternalPage,
        ContentType::LandingPage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Article => "article",
            ContentType::InternalPage => "internal page",
            ContentType::LandingPage => "landing page",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "article" => Ok(ContentType::Article),
            "internal page" => Ok(ContentType::InternalPage),
            "landing page" => Ok(ContentType::LandingPage),
            _ => Err(()),
        }
    }
}

/// A validated generation request. Immutable once built; validated exactly
/// once at the form boundary.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRequest {
    pub seed_keyword: String,
    pub content_type: ContentType,
    pub website_type: String,
    /// ISO-like country code, or "global".
    pub country: String,
}

/// One discovered keyword with its estimated metrics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeywordInfo {
    pub keyword: String,
    /// Estimated monthly search volume.
    pub search_volume: f64,
    /// Competitiveness estimate, 0-100.
    pub ranking_difficulty: f64,
    /// Popularity trajectory estimate, 0-100. Absent when no trend data was
    /// available or estimated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend_score: Option<f64>,
}

/// The three-category keyword cluster. The categories are independent; a
/// keyword may appear in more than one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClusterResult {
    /// Keywords closely related to the seed keyword.
    pub related_keywords: Vec<KeywordInfo>,
    /// Keywords with a similar meaning to the seed keyword.
    pub semantic_keywords: Vec<KeywordInfo>,
    /// Keywords that include the seed keyword as part of a phrase.
    pub phrase_match_keywords: Vec<KeywordInfo>,
}

/// Lenient wire shape of one keyword entry. Models sometimes return numbers
/// as strings or drop fields entirely; normalization coerces these.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawKeywordInfo {
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub search_volume: Value,
    #[serde(default)]
    pub ranking_difficulty: Value,
    #[serde(default)]
    pub trend_score: Option<Value>,
}

/// Lenient wire shape of the full model output.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawClusterResult {
    #[serde(default)]
    pub related_keywords: Vec<RawKeywordInfo>,
    #[serde(default)]
    pub semantic_keywords: Vec<RawKeywordInfo>,
    #[serde(default)]
    pub phrase_match_keywords: Vec<RawKeywordInfo>,
}
