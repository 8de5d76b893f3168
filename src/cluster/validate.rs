use serde::Deserialize;
use thiserror::Error;

use super::types::{ClusterRequest, ContentType};

/// Raw form fields as submitted by the page. All fields default to empty so
/// a missing field is reported as a validation problem rather than a
/// deserialization failure.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordFormRequest {
    #[serde(default)]
    pub seed_keyword: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub website_type: String,
    #[serde(default)]
    pub country: String,
}

/// Every violated constraint, aggregated into one human-readable message.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{}", .0.join(", "))]
pub struct ValidationError(pub Vec<String>);

/// Validates the raw form input against the request constraints. Collects
/// every violation instead of stopping at the first one. No side effects.
pub fn validate(form: &KeywordFormRequest) -> Result<ClusterRequest, ValidationError> {
    let mut problems = Vec::new();

    let seed_keyword = form.seed_keyword.trim();
    if seed_keyword.is_empty() {
        problems.push("The seed keyword is required.".to_string());
    }

    let content_type = form.content_type.trim().parse::<ContentType>().ok();
    if content_type.is_none() {
        problems.push(
            "The content type must be one of: article, internal page, landing page.".to_string(),
        );
    }

    let website_type = form.website_type.trim();
    if website_type.is_empty() {
        problems.push("The website type is required.".to_string());
    }

    let country = form.country.trim();
    let country = if country.eq_ignore_ascii_case("global") {
        "global".to_string()
    } else if country.chars().count() >= 2 {
        country.to_lowercase()
    } else {
        problems.push(
            "The country is required. Use a country code (e.g. 'us') or 'global'.".to_string(),
        );
        String::new()
    };

    match content_type {
        Some(content_type) if problems.is_empty() => Ok(ClusterRequest {
            seed_keyword: seed_keyword.to_string(),
            content_type,
            website_type: website_type.to_string(),
            country,
        }),
        _ => Err(ValidationError(problems)),
    }
}
