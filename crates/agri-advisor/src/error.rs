//! Error Types for the Advisor

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdvisorError {
    #[error("Invalid value for {field}: {value:?}")]
    InvalidField {
        field: &'static str,
        value: String,
    },

    #[error("Not an image: {0}")]
    NotAnImage(String),

    #[error("No file selected")]
    NoFileSelected,

    #[error("A request is already in progress")]
    Busy,

    #[error("Detection failed: {0}")]
    Detection(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AdvisorError {
    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidField { field, .. } => format!("Please enter a valid {field}."),
            Self::NotAnImage(name) => format!("{name} is not an image. Please upload a photo of your plant."),
            Self::NoFileSelected => "Please select an image first.".into(),
            Self::Busy => "Analysis already in progress.".into(),
            Self::Detection(_) => "Could not analyze the image. Please try again.".into(),
            Self::Config(_) => "An unexpected error occurred.".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_errors_hide_details() {
        let err = AdvisorError::Config("detector needs at least one result".into());
        assert_eq!(err.user_message(), "An unexpected error occurred.");
        assert_eq!(err.clone(), err);

        let err = AdvisorError::Detection("timeout".into());
        assert!(!err.user_message().contains("timeout"));
    }

    #[test]
    fn test_invalid_field_names_the_field() {
        let err = AdvisorError::InvalidField { field: "rainfall", value: "lots".into() };
        assert_eq!(err.user_message(), "Please enter a valid rainfall.");
    }
}
