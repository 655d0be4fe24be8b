//! Conversation Messages
//!
//! Message format and the append-only message store that drives rendering.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author of a message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Typed or spoken input
    User,
    /// Simulated (or real) assistant reply
    Assistant,
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// Unique message identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(String);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique attachment identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttachmentId(String);

impl AttachmentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AttachmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Attachment category, derived from the source MIME type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Document,
}

impl AttachmentKind {
    /// `image/*` is an image, anything else a document
    pub fn from_mime(mime: &str) -> Self {
        if mime.starts_with("image/") {
            Self::Image
        } else {
            Self::Document
        }
    }
}

/// Handle to a locally renderable preview (e.g. an object URL)
///
/// Must be released through the `PreviewUrls` that created it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PreviewHandle(String);

impl PreviewHandle {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A file attached to a message (or staged for one)
#[derive(Clone, Debug, Serialize)]
pub struct Attachment {
    pub id: AttachmentId,

    pub kind: AttachmentKind,

    /// File name shown to the user
    pub display_name: String,

    /// Source MIME type
    pub mime: String,

    pub preview: PreviewHandle,

    /// Raw file bytes, shared rather than copied on send
    #[serde(skip_serializing)]
    pub data: Arc<[u8]>,
}

impl Attachment {
    /// Size of the underlying file in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// A single message in the conversation
#[derive(Clone, Debug, Serialize)]
pub struct Message {
    pub id: MessageId,

    /// Text content; may be empty when attachments are present
    pub content: String,

    pub sender: Sender,

    /// Attachments in staging order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,

    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn new(sender: Sender, content: impl Into<String>, attachments: Vec<Attachment>) -> Self {
        Self {
            id: MessageId::new(),
            content: content.into(),
            sender,
            attachments,
            timestamp: Utc::now(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>, attachments: Vec<Attachment>) -> Self {
        Self::new(Sender::User, content, attachments)
    }

    /// Create an assistant message (assistant replies never carry attachments)
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, content, Vec::new())
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }
}

/// Append-only, insertion-ordered message list
///
/// There is no edit, delete or size cap; history grows for the lifetime of
/// the page.
#[derive(Clone, Debug, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message to the end of the list
    pub fn append(&mut self, message: Message) {
        tracing::debug!(id = %message.id, sender = %message.sender, "Message appended");
        self.messages.push(message);
    }

    /// Full copy of the list for rendering
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_mime() {
        assert_eq!(AttachmentKind::from_mime("image/png"), AttachmentKind::Image);
        assert_eq!(AttachmentKind::from_mime("application/pdf"), AttachmentKind::Document);
        assert_eq!(AttachmentKind::from_mime("text/image"), AttachmentKind::Document);
        assert_eq!(AttachmentKind::from_mime(""), AttachmentKind::Document);
    }

    #[test]
    fn test_store_keeps_insertion_order() {
        let mut store = MessageStore::new();
        store.append(Message::user("first", Vec::new()));
        store.append(Message::assistant("second"));
        store.append(Message::user("third", Vec::new()));

        let contents: Vec<_> = store.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["first", "second", "third"]);
        assert_eq!(store.last().map(|m| m.sender), Some(Sender::User));
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = Message::user("same", Vec::new());
        let b = Message::user("same", Vec::new());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_message_serializes_sender_lowercase() {
        let json = serde_json::to_value(Message::assistant("hi")).unwrap();
        assert_eq!(json["sender"], "assistant");
        assert!(json.get("attachments").is_none());
    }
}
