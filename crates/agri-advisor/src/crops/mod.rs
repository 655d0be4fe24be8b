//! Crop Recommendation
//!
//! Providers that turn field conditions into ranked crop suggestions.

mod mock;

pub use mock::MockCropAdvisor;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{CropQuery, CropSuggestion};

/// Crop recommendation provider (Strategy pattern)
///
/// The page ships with the canned mock; a model-backed service implements
/// the same trait.
#[async_trait]
pub trait CropAdvisor: Send + Sync {
    /// Suggestions for the given conditions, best match first
    async fn recommend(&self, query: &CropQuery) -> Result<Vec<CropSuggestion>>;

    /// Provider name
    fn name(&self) -> &str;
}
