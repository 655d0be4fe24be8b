//! Pest & Disease Detection
//!
//! Providers that analyze a plant photo.

mod mock;

pub use mock::MockPestDetector;

use async_trait::async_trait;
use agri_core::FileHandle;

use crate::error::Result;
use crate::model::DetectionResult;

/// Plant image analyzer (Strategy pattern)
#[async_trait]
pub trait PestDetector: Send + Sync {
    /// Analyze one image; non-image files are rejected
    async fn detect(&self, image: &FileHandle) -> Result<DetectionResult>;

    /// Provider name
    fn name(&self) -> &str;
}
