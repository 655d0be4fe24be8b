//! Advisor Front
//!
//! Applies the fixed analysis delays in front of the crop and pest
//! providers.

use std::sync::Arc;
use std::time::Duration;

use agri_core::{AttachmentKind, FileHandle, Timer};
use serde::{Deserialize, Serialize};

use crate::crops::{CropAdvisor, MockCropAdvisor};
use crate::error::{AdvisorError, Result};
use crate::model::{CropQuery, CropSuggestion, DetectionResult};
use crate::pests::{MockPestDetector, PestDetector};

/// Analysis delays
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorConfig {
    #[serde(default = "default_crop_delay_ms")]
    pub crop_delay_ms: u64,

    #[serde(default = "default_pest_delay_ms")]
    pub pest_delay_ms: u64,
}

fn default_crop_delay_ms() -> u64 { 2000 }
fn default_pest_delay_ms() -> u64 { 2500 }

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            crop_delay_ms: default_crop_delay_ms(),
            pest_delay_ms: default_pest_delay_ms(),
        }
    }
}

impl AdvisorConfig {
    pub const fn crop_delay(&self) -> Duration {
        Duration::from_millis(self.crop_delay_ms)
    }

    pub const fn pest_delay(&self) -> Duration {
        Duration::from_millis(self.pest_delay_ms)
    }
}

pub struct Advisor {
    crops: Arc<dyn CropAdvisor>,
    pests: Arc<dyn PestDetector>,
    timer: Box<dyn Timer>,
    config: AdvisorConfig,
}

impl Advisor {
    pub fn new(
        crops: Arc<dyn CropAdvisor>,
        pests: Arc<dyn PestDetector>,
        timer: impl Timer + 'static,
        config: AdvisorConfig,
    ) -> Self {
        Self {
            crops,
            pests,
            timer: Box::new(timer),
            config,
        }
    }

    /// Canned providers with the default delays
    pub fn mock(timer: impl Timer + 'static) -> Self {
        Self::new(
            Arc::new(MockCropAdvisor::new()),
            Arc::new(MockPestDetector::new()),
            timer,
            AdvisorConfig::default(),
        )
    }

    pub const fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    pub async fn recommend_crops(&self, query: &CropQuery) -> Result<Vec<CropSuggestion>> {
        self.timer.sleep(self.config.crop_delay()).await;
        let suggestions = self.crops.recommend(query).await?;
        tracing::info!(provider = self.crops.name(), count = suggestions.len(), "Crop suggestions ready");
        Ok(suggestions)
    }

    /// Analyze a plant image; a non-image fails before the delay
    pub async fn detect_pests(&self, image: &FileHandle) -> Result<DetectionResult> {
        if image.kind() != AttachmentKind::Image {
            return Err(AdvisorError::NotAnImage(image.name.clone()));
        }
        self.timer.sleep(self.config.pest_delay()).await;
        self.pests.detect(image).await.inspect_err(|e| {
            tracing::warn!(error = %e, provider = self.pests.name(), "Detection failed");
        })
    }
}

impl std::fmt::Debug for Advisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Advisor")
            .field("crops", &self.crops.name())
            .field("pests", &self.pests.name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
