//! Crop form state: `idle -> loading -> idle` with suggestions.

use serde::Serialize;

use crate::error::{AdvisorError, Result};
use crate::model::{CropField, CropForm, CropQuery, CropSuggestion};

#[derive(Clone, Debug, Default, Serialize)]
pub struct CropRequest {
    form: CropForm,
    loading: bool,
    suggestions: Vec<CropSuggestion>,
}

impl CropRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn form(&self) -> &CropForm {
        &self.form
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn suggestions(&self) -> &[CropSuggestion] {
        &self.suggestions
    }

    pub fn set(&mut self, field: CropField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Validate the form and enter the loading state
    ///
    /// Earlier suggestions stay visible until `finish` replaces them.
    pub fn submit(&mut self) -> Result<CropQuery> {
        if self.loading {
            return Err(AdvisorError::Busy);
        }
        let query = self.form.to_query()?;
        self.loading = true;
        Ok(query)
    }

    pub fn finish(&mut self, suggestions: Vec<CropSuggestion>) {
        self.suggestions = suggestions;
        self.loading = false;
    }

    /// Leave the loading state without new suggestions
    pub fn fail(&mut self) {
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(name: &str) -> CropSuggestion {
        CropSuggestion {
            name: name.into(),
            confidence: 90,
            description: String::new(),
            icon: String::new(),
        }
    }

    #[test]
    fn test_submit_enters_loading_once() {
        let mut request = CropRequest::new();
        request.set(CropField::Temperature, "25");

        let query = request.submit().unwrap();
        assert_eq!(query.temperature_c, Some(25.0));
        assert!(request.is_loading());
        assert!(matches!(request.submit(), Err(AdvisorError::Busy)));

        request.finish(vec![suggestion("Kale")]);
        assert!(!request.is_loading());
        assert_eq!(request.suggestions().len(), 1);
    }

    #[test]
    fn test_invalid_form_stays_idle() {
        let mut request = CropRequest::new();
        request.set(CropField::LandSize, "five");
        assert!(request.submit().is_err());
        assert!(!request.is_loading());
    }
}
