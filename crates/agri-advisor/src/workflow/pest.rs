//! Pest upload panel state.
//!
//! Holds at most one selected image and its preview handle. Replacing or
//! resetting the selection revokes the old preview.

use agri_core::{AttachmentKind, FileHandle, PreviewHandle, PreviewUrls};

use crate::error::{AdvisorError, Result};
use crate::model::DetectionResult;

pub struct PestUpload {
    previews: Box<dyn PreviewUrls>,
    file: Option<FileHandle>,
    preview: Option<PreviewHandle>,
    dragging: bool,
    uploading: bool,
    result: Option<DetectionResult>,
}

impl PestUpload {
    pub fn new(previews: impl PreviewUrls + 'static) -> Self {
        Self {
            previews: Box::new(previews),
            file: None,
            preview: None,
            dragging: false,
            uploading: false,
            result: None,
        }
    }

    pub const fn file(&self) -> Option<&FileHandle> {
        self.file.as_ref()
    }

    pub const fn preview(&self) -> Option<&PreviewHandle> {
        self.preview.as_ref()
    }

    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub const fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub const fn result(&self) -> Option<&DetectionResult> {
        self.result.as_ref()
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    /// Select a new image, replacing any previous one
    pub fn select(&mut self, file: FileHandle) -> Result<()> {
        self.dragging = false;
        if file.kind() != AttachmentKind::Image {
            return Err(AdvisorError::NotAnImage(file.name));
        }
        if self.uploading {
            return Err(AdvisorError::Busy);
        }
        self.revoke_preview();
        self.preview = Some(self.previews.create(&file));
        self.file = Some(file);
        self.result = None;
        tracing::debug!(file = ?self.file.as_ref().map(|f| &f.name), "Plant image selected");
        Ok(())
    }

    /// Start analysis of the selected image; clears the previous result
    pub fn begin(&mut self) -> Result<FileHandle> {
        if self.uploading {
            return Err(AdvisorError::Busy);
        }
        let file = self.file.clone().ok_or(AdvisorError::NoFileSelected)?;
        self.uploading = true;
        self.result = None;
        Ok(file)
    }

    pub fn finish(&mut self, result: DetectionResult) {
        self.result = Some(result);
        self.uploading = false;
    }

    pub fn fail(&mut self) {
        self.uploading = false;
    }

    /// Drop the selection and the result
    pub fn reset(&mut self) {
        self.revoke_preview();
        self.file = None;
        self.result = None;
        self.uploading = false;
    }

    fn revoke_preview(&mut self) {
        if let Some(handle) = self.preview.take() {
            self.previews.revoke(&handle);
        }
    }
}

impl Drop for PestUpload {
    fn drop(&mut self) {
        self.revoke_preview();
    }
}

impl std::fmt::Debug for PestUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PestUpload")
            .field("file", &self.file.as_ref().map(|f| &f.name))
            .field("uploading", &self.uploading)
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}
