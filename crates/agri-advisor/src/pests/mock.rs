//! Mock Pest Detector
//!
//! Picks one of four canned findings at random.

use async_trait::async_trait;
use agri_core::{AttachmentKind, FileHandle};
use rand::seq::SliceRandom;

use super::PestDetector;
use crate::error::{AdvisorError, Result};
use crate::model::{DetectionKind, DetectionResult, Severity};

/// Canned detector
#[derive(Clone, Debug)]
pub struct MockPestDetector {
    results: Vec<DetectionResult>,
}

impl Default for MockPestDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPestDetector {
    pub fn new() -> Self {
        Self { results: canned() }
    }

    /// Detector choosing among `results` instead of the built-in findings
    pub fn with_results(results: Vec<DetectionResult>) -> Result<Self> {
        if results.is_empty() {
            return Err(AdvisorError::Config("detector needs at least one result".into()));
        }
        Ok(Self { results })
    }

    pub fn results(&self) -> &[DetectionResult] {
        &self.results
    }
}

#[async_trait]
impl PestDetector for MockPestDetector {
    async fn detect(&self, image: &FileHandle) -> Result<DetectionResult> {
        if image.kind() != AttachmentKind::Image {
            return Err(AdvisorError::NotAnImage(image.name.clone()));
        }

        let result = self
            .results
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| AdvisorError::Detection("no results configured".into()))?;
        tracing::debug!(file = %image.name, finding = %result.name, "Detection complete");

        Ok(result)
    }

    fn name(&self) -> &str {
        "MockPestDetector"
    }
}

fn finding(
    kind: DetectionKind,
    name: &str,
    confidence: u8,
    severity: Severity,
    description: &str,
    treatment: &str,
) -> DetectionResult {
    DetectionResult {
        kind,
        name: name.into(),
        confidence,
        description: description.into(),
        treatment: treatment.into(),
        severity,
    }
}

fn canned() -> Vec<DetectionResult> {
    vec![
        finding(
            DetectionKind::Pest,
            "Aphids",
            89,
            Severity::Medium,
            "Small sap-sucking insects that can cause stunted growth and deformation of leaves and shoots.",
            "Release ladybugs as natural predators or spray with neem oil solution (2 tbsp neem oil, 1 tsp mild liquid soap, 1 gallon water).",
        ),
        finding(
            DetectionKind::Disease,
            "Powdery Mildew",
            94,
            Severity::High,
            "Fungal disease that appears as white powdery spots on leaves and stems, causing leaf yellowing and plant weakness.",
            "Improve air circulation, apply potassium bicarbonate spray, or use milk spray (1 part milk to 9 parts water) as an organic solution.",
        ),
        finding(
            DetectionKind::Pest,
            "Tomato Hornworm",
            92,
            Severity::High,
            "Large green caterpillars that feed on tomato plants, causing extensive defoliation.",
            "Handpick and remove the caterpillars or apply Bacillus thuringiensis (Bt), a natural microbial insecticide.",
        ),
        finding(
            DetectionKind::Disease,
            "Leaf Spot",
            87,
            Severity::Medium,
            "Fungal disease causing circular spots with dark borders on leaves, which may turn yellow and drop prematurely.",
            "Remove affected leaves, improve air circulation, and apply copper-based fungicide for severe cases.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf() -> FileHandle {
        FileHandle::new("leaf.jpg", "image/jpeg", vec![0xFF, 0xD8])
    }

    #[tokio::test]
    async fn test_result_comes_from_catalog() {
        let detector = MockPestDetector::new();
        for _ in 0..20 {
            let result = detector.detect(&leaf()).await.unwrap();
            assert!(detector.results().contains(&result));
        }
    }

    #[tokio::test]
    async fn test_non_image_rejected() {
        let detector = MockPestDetector::new();
        let pdf = FileHandle::new("report.pdf", "application/pdf", vec![0x25]);
        assert!(matches!(detector.detect(&pdf).await, Err(AdvisorError::NotAnImage(name)) if name == "report.pdf"));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(MockPestDetector::with_results(Vec::new()).is_err());
    }
}
