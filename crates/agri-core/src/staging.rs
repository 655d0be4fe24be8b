//! Attachment Staging
//!
//! Files selected but not yet sent. Each staged file gets a preview handle
//! from the platform; the handle is revoked when the file is removed, when
//! the staging list is cleared, or when the list is dropped. On send the
//! attachments (and their live previews) move into the message.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::sync::Arc;

use crate::message::{Attachment, AttachmentId, AttachmentKind, PreviewHandle};

/// A platform file handle: name, MIME type and contents
#[derive(Clone, Debug)]
pub struct FileHandle {
    pub name: String,
    pub mime: String,
    pub data: Arc<[u8]>,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            data: data.into(),
        }
    }

    pub fn kind(&self) -> AttachmentKind {
        AttachmentKind::from_mime(&self.mime)
    }
}

/// Platform preview-URL generator
///
/// Every handle returned by `create` must eventually be passed to `revoke`.
pub trait PreviewUrls {
    fn create(&self, file: &FileHandle) -> PreviewHandle;

    fn revoke(&self, handle: &PreviewHandle);
}

impl<T: PreviewUrls + ?Sized> PreviewUrls for Rc<T> {
    fn create(&self, file: &FileHandle) -> PreviewHandle {
        (**self).create(file)
    }

    fn revoke(&self, handle: &PreviewHandle) {
        (**self).revoke(handle);
    }
}

/// In-memory preview generator that tracks live handles
///
/// Used off-browser and in tests to make leaked handles observable.
#[derive(Debug, Default)]
pub struct LocalPreviews {
    live: RefCell<HashSet<PreviewHandle>>,
}

impl LocalPreviews {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handles created and not yet revoked
    pub fn live_count(&self) -> usize {
        self.live.borrow().len()
    }

    pub fn is_live(&self, handle: &PreviewHandle) -> bool {
        self.live.borrow().contains(handle)
    }
}

impl PreviewUrls for LocalPreviews {
    fn create(&self, file: &FileHandle) -> PreviewHandle {
        let handle = PreviewHandle::new(format!("local:{}/{}", AttachmentId::new(), file.name));
        self.live.borrow_mut().insert(handle.clone());
        handle
    }

    fn revoke(&self, handle: &PreviewHandle) {
        if !self.live.borrow_mut().remove(handle) {
            tracing::warn!(preview = handle.as_str(), "Revoking unknown preview handle");
        }
    }
}

/// Staged attachments awaiting the next send
pub struct AttachmentStaging {
    staged: Vec<Attachment>,
    previews: Box<dyn PreviewUrls>,
}

impl AttachmentStaging {
    pub fn new(previews: impl PreviewUrls + 'static) -> Self {
        Self {
            staged: Vec::new(),
            previews: Box::new(previews),
        }
    }

    /// Stage files, returning the new attachment ids in order
    pub fn stage(&mut self, files: impl IntoIterator<Item = FileHandle>) -> Vec<AttachmentId> {
        files
            .into_iter()
            .map(|file| {
                let attachment = Attachment {
                    id: AttachmentId::new(),
                    kind: file.kind(),
                    preview: self.previews.create(&file),
                    display_name: file.name,
                    mime: file.mime,
                    data: file.data,
                };
                tracing::debug!(id = %attachment.id, kind = ?attachment.kind, "Attachment staged");
                let id = attachment.id.clone();
                self.staged.push(attachment);
                id
            })
            .collect()
    }

    /// Remove a staged attachment and release its preview
    ///
    /// Returns `false` when no attachment has this id.
    pub fn remove(&mut self, id: &AttachmentId) -> bool {
        let Some(pos) = self.staged.iter().position(|a| &a.id == id) else {
            return false;
        };
        let attachment = self.staged.remove(pos);
        self.previews.revoke(&attachment.preview);
        true
    }

    /// Move every staged attachment out; previews stay alive with the new owner
    pub fn take(&mut self) -> Vec<Attachment> {
        std::mem::take(&mut self.staged)
    }

    /// Drop every staged attachment and release the previews
    pub fn clear(&mut self) {
        for attachment in self.staged.drain(..) {
            self.previews.revoke(&attachment.preview);
        }
    }

    /// Release previews for attachments that already left staging
    pub fn release(&self, attachments: &[Attachment]) {
        for attachment in attachments {
            self.previews.revoke(&attachment.preview);
        }
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.staged
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }
}

impl Drop for AttachmentStaging {
    fn drop(&mut self) {
        self.clear();
    }
}

impl std::fmt::Debug for AttachmentStaging {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttachmentStaging")
            .field("staged", &self.staged)
            .finish_non_exhaustive()
    }
}
