//! User-facing Notices
//!
//! Transient messages for the toast surface.

use serde::{Deserialize, Serialize};

use crate::error::ChatError;
use crate::i18n::{self, Language};

/// Notice severity
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Destructive,
}

/// A toast: title, description and severity
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Info,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Destructive,
        }
    }

    /// Notice for a chat error
    pub fn from_error(language: Language, error: &ChatError) -> Self {
        let title_key = match error {
            ChatError::CapabilityUnavailable => "chatbot.voice.unsupported.title",
            ChatError::VoiceRecognition { .. }
            | ChatError::RecognitionStartFailure(_)
            | ChatError::VoiceBusy
            | ChatError::ResponsePending
            | ChatError::SessionClosed => "chatbot.voice.error.title",
            ChatError::Provider(_) | ChatError::Config(_) => "chatbot.reply.error.title",
        };
        Self::destructive(i18n::text(language, title_key), error.user_message())
    }

    /// Voice session started
    pub fn listening(language: Language) -> Self {
        Self::info(
            i18n::text(language, "chatbot.voice.listening.title"),
            i18n::text(language, "chatbot.voice.listening.description"),
        )
    }

    /// Files staged for the next message
    pub fn attachments_added(language: Language, names: &[&str]) -> Self {
        Self::info(i18n::text(language, "chatbot.attachment.added.title"), names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_notice_is_destructive() {
        let notice = Notice::from_error(Language::En, &ChatError::CapabilityUnavailable);
        assert_eq!(notice.title, "Voice Recognition Not Supported");
        assert_eq!(notice.severity, Severity::Destructive);
    }

    #[test]
    fn test_refused_voice_start_uses_voice_title() {
        for error in [ChatError::VoiceBusy, ChatError::ResponsePending, ChatError::SessionClosed] {
            let notice = Notice::from_error(Language::En, &error);
            assert_eq!(notice.title, "Voice Recognition Error");
            assert_eq!(notice.description, error.user_message());
        }
        let reply = Notice::from_error(Language::En, &ChatError::Provider("offline".into()));
        assert_eq!(reply.title, "Assistant unavailable");
    }

    #[test]
    fn test_attachment_notice_lists_names() {
        let notice = Notice::attachments_added(Language::En, &["leaf.jpg", "soil.pdf"]);
        assert_eq!(notice.description, "leaf.jpg, soil.pdf");
        assert_eq!(notice.severity, Severity::Info);
    }
}
