//! View State
//!
//! Synchronous state machines behind the crop form and the pest upload
//! panel. The async `Advisor` produces the results they consume.

mod crop;
mod pest;

pub use crop::CropRequest;
pub use pest::PestUpload;
