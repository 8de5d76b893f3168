//! Placeholder data sources for external SEO metrics.
//!
//! Both lookups must be replaced with real integrations (Google Keyword
//! Planner, Google Trends, or equivalent) before the numbers shown to users
//! mean anything. In `Simulated` mode they return pseudo-random values so the
//! rest of the pipeline can be exercised; in `Live` mode they return `None`
//! unconditionally until a real integration lands. Real implementations must
//! preserve these signatures.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which behavior the stub lookups use. Injected explicitly rather than
/// sniffed from the process environment so the lookups stay pure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataSourceMode {
    /// Pseudo-random demo data.
    Simulated,
    /// No data until a real API integration exists.
    Live,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMetrics {
    pub search_volume: u64,
    pub ranking_difficulty: u8,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeywordTrend {
    /// Relative popularity trajectory, 0-100.
    pub trend_score: u8,
}

/// Looks up search volume and ranking difficulty for a keyword in a country.
/// Absence of data is a valid outcome, not an error.
pub async fn fetch_keyword_metrics(
    keyword: &str,
    country_code: &str,
    mode: DataSourceMode,
) -> Option<KeywordMetrics> {
    debug!(
        "[stub] keyword metrics lookup for \"{}\" in {}",
        keyword, country_code
    );
    match mode {
        DataSourceMode::Simulated => {
            let mut rng = rand::rng();
            Some(KeywordMetrics {
                search_volume: rng.random_range(100..5100),
                ranking_difficulty: rng.random_range(0..100),
            })
        }
        DataSourceMode::Live => None,
    }
}

/// Looks up the trend score for a keyword in a country. Absence of data is a
/// valid outcome, not an error.
pub async fn fetch_keyword_trend(
    keyword: &str,
    country_code: &str,
    mode: DataSourceMode,
) -> Option<KeywordTrend> {
    debug!(
        "[stub] keyword trend lookup for \"{}\" in {}",
        keyword, country_code
    );
    match mode {
        DataSourceMode::Simulated => {
            let mut rng = rand::rng();
            Some(KeywordTrend {
                trend_score: rng.random_range(0..100),
            })
        }
        DataSourceMode::Live => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn simulated_metrics_stay_in_range() {
        for _ in 0..50 {
            let metrics = fetch_keyword_metrics("running shoes", "us", DataSourceMode::Simulated)
                .await
                .unwrap();
            assert!((100..5100).contains(&metrics.search_volume));
            assert!(metrics.ranking_difficulty < 100);
        }
    }

    #[tokio::test]
    async fn simulated_trend_stays_in_range() {
        for _ in 0..50 {
            let trend = fetch_keyword_trend("running shoes", "us", DataSourceMode::Simulated)
                .await
                .unwrap();
            assert!(trend.trend_score < 100);
        }
    }

    #[tokio::test]
    async fn live_mode_returns_no_data() {
        assert!(
            fetch_keyword_metrics("running shoes", "us", DataSourceMode::Live)
                .await
                .is_none()
        );
        assert!(
            fetch_keyword_trend("running shoes", "us", DataSourceMode::Live)
                .await
                .is_none()
        );
    }
}
