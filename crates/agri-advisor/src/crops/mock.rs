//! Mock Crop Advisor
//!
//! Returns the same four suggestions whatever the conditions.

use async_trait::async_trait;

use super::CropAdvisor;
use crate::error::Result;
use crate::model::{CropQuery, CropSuggestion};

/// (name, confidence, icon, description)
const CANNED: [(&str, u8, &str, &str); 4] = [
    (
        "Tomatoes",
        92,
        "🍅",
        "Thrives in your soil conditions with high market value. Requires moderate watering and full sun exposure.",
    ),
    (
        "Sweet Corn",
        87,
        "🌽",
        "Well-suited for your climate zone with good yield potential. Plant in blocks for proper pollination.",
    ),
    (
        "Bell Peppers",
        81,
        "🫑",
        "Excellent choice for your temperature range. Add calcium to prevent blossom end rot.",
    ),
    (
        "Kale",
        76,
        "🥬",
        "Hardy crop that can withstand temperature fluctuations in your region. Rich in nutrients.",
    ),
];

/// Canned crop advisor
#[derive(Clone, Debug, Default)]
pub struct MockCropAdvisor;

impl MockCropAdvisor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CropAdvisor for MockCropAdvisor {
    async fn recommend(&self, query: &CropQuery) -> Result<Vec<CropSuggestion>> {
        tracing::debug!(?query, "Recommending crops");

        let mut suggestions: Vec<CropSuggestion> = CANNED
            .iter()
            .map(|&(name, confidence, icon, description)| CropSuggestion {
                name: name.into(),
                confidence,
                description: description.into(),
                icon: icon.into(),
            })
            .collect();
        suggestions.sort_by(|a, b| b.confidence.cmp(&a.confidence));

        Ok(suggestions)
    }

    fn name(&self) -> &str {
        "MockCropAdvisor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SoilType;

    #[tokio::test]
    async fn test_four_suggestions_best_first() {
        let advisor = MockCropAdvisor::new();
        let suggestions = advisor.recommend(&CropQuery::default()).await.unwrap();

        let names: Vec<_> = suggestions.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Tomatoes", "Sweet Corn", "Bell Peppers", "Kale"]);
        assert!(suggestions.windows(2).all(|w| w[0].confidence >= w[1].confidence));
    }

    #[tokio::test]
    async fn test_conditions_do_not_change_canned_answer() {
        let advisor = MockCropAdvisor::new();
        let query = CropQuery {
            soil_type: Some(SoilType::Sandy),
            temperature_c: Some(35.0),
            ..CropQuery::default()
        };
        let dry = advisor.recommend(&query).await.unwrap();
        let blank = advisor.recommend(&CropQuery::default()).await.unwrap();
        assert_eq!(dry, blank);
    }
}
