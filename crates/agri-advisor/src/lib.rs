//! # agri-advisor
//!
//! Crop recommendation and pest/disease detection for the AgriGenius page.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────┐  submit()   ┌──────────────────┐  2000ms  ┌──────────────┐
//! │ CropRequest  │────────────▶│ Advisor          │─────────▶│ CropAdvisor  │
//! │ (form state) │◀────────────│ recommend_crops  │◀─────────│ (mock)       │
//! └──────────────┘  finish()   └──────────────────┘          └──────────────┘
//!
//! ┌──────────────┐  begin()    ┌──────────────────┐  2500ms  ┌──────────────┐
//! │ PestUpload   │────────────▶│ Advisor          │─────────▶│ PestDetector │
//! │ (image+URL)  │◀────────────│ detect_pests     │◀─────────│ (mock)       │
//! └──────────────┘  finish()   └──────────────────┘          └──────────────┘
//! ```
//!
//! Both providers are traits; the shipped implementations return canned
//! results regardless of input.

pub mod advisor;
pub mod crops;
pub mod error;
pub mod model;
pub mod pests;
pub mod workflow;

pub use advisor::{Advisor, AdvisorConfig};
pub use crops::{CropAdvisor, MockCropAdvisor};
pub use error::{AdvisorError, Result};
pub use model::{
    CropField, CropForm, CropQuery, CropSuggestion, DetectionKind, DetectionResult, Severity, SoilType,
};
pub use pests::{MockPestDetector, PestDetector};
pub use workflow::{CropRequest, PestUpload};
