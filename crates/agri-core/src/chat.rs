//! Input Capture
//!
//! `ChatSession` owns everything the chat view mutates: the draft, the
//! message store, staged attachments, the pending-reply flag and the voice
//! session. It performs no I/O and never sleeps; `ChatController` drives the
//! timed parts.
//!
//! Mutual exclusion: while a reply is pending or a voice session is
//! listening, the draft rejects edits and `send()` does nothing. A voice
//! session cannot start while a reply is pending.

use serde::Serialize;

use crate::config::ChatConfig;
use crate::error::{ChatError, Result};
use crate::i18n::{self, Language};
use crate::message::{Attachment, AttachmentId, Message, MessageId, MessageStore};
use crate::staging::{AttachmentStaging, FileHandle, PreviewUrls};
use crate::voice::{RecognitionId, RecognitionOutcome, SpeechRecognizer, VoiceSession, VoiceTicket, VoiceTransition};

/// Key that submits the draft
pub const SUBMIT_KEY: &str = "Enter";

/// Ticket for the one reply owed to a just-sent user message
#[derive(Clone, Debug)]
pub struct PendingReply {
    /// The user message being answered
    pub message: Message,
}

/// Everything the view needs to render
#[derive(Clone, Debug, Serialize)]
pub struct ChatSnapshot {
    pub messages: Vec<Message>,
    pub draft: String,
    pub staged: Vec<Attachment>,
    pub pending: bool,
    pub listening: bool,
    pub voice_available: bool,
    pub language: Language,
}

impl ChatSnapshot {
    /// Whether the input field accepts edits
    pub const fn input_enabled(&self) -> bool {
        !self.pending && !self.listening
    }

    /// Whether the send button should be enabled
    pub fn can_send(&self) -> bool {
        self.input_enabled() && (!self.draft.trim().is_empty() || !self.staged.is_empty())
    }
}

/// Conversational view state
pub struct ChatSession {
    language: Language,
    draft: String,
    store: MessageStore,
    staging: AttachmentStaging,
    voice: VoiceSession,
    pending: Option<MessageId>,
    torn_down: bool,
}

impl ChatSession {
    pub fn new(
        config: &ChatConfig,
        previews: impl PreviewUrls + 'static,
        recognizer: Option<Box<dyn SpeechRecognizer>>,
    ) -> Self {
        let mut store = MessageStore::new();
        if config.welcome {
            store.append(Message::assistant(i18n::text(config.language, "chatbot.welcome")));
        }

        Self {
            language: config.language,
            draft: String::new(),
            store,
            staging: AttachmentStaging::new(previews),
            voice: VoiceSession::new(recognizer),
            pending: None,
            torn_down: false,
        }
    }

    pub const fn language(&self) -> Language {
        self.language
    }

    /// Change the display language; an active voice session keeps its locale
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub const fn is_listening(&self) -> bool {
        self.voice.is_listening()
    }

    pub const fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub const fn voice(&self) -> &VoiceSession {
        &self.voice
    }

    pub fn messages(&self) -> &[Message] {
        self.store.messages()
    }

    pub fn staged(&self) -> &[Attachment] {
        self.staging.attachments()
    }

    const fn input_locked(&self) -> bool {
        self.torn_down || self.is_pending() || self.is_listening()
    }

    /// Replace the draft text; rejected while a reply is pending or voice is listening
    pub fn set_draft(&mut self, text: impl Into<String>) -> bool {
        if self.input_locked() {
            return false;
        }
        self.draft = text.into();
        true
    }

    /// Key press in the input field; the submit key sends
    pub fn handle_key(&mut self, key: &str) -> Option<PendingReply> {
        if key == SUBMIT_KEY {
            self.send()
        } else {
            None
        }
    }

    /// Turn the draft and staged files into a user message
    ///
    /// Returns `None` (and changes nothing) when there is nothing to send or
    /// input is locked.
    pub fn send(&mut self) -> Option<PendingReply> {
        if self.input_locked() {
            tracing::debug!("Send ignored while input is locked");
            return None;
        }
        let content = self.draft.trim();
        if content.is_empty() && self.staging.is_empty() {
            return None;
        }

        let message = Message::user(content, self.staging.take());
        self.draft.clear();
        self.pending = Some(message.id.clone());
        self.store.append(message.clone());

        Some(PendingReply { message })
    }

    /// Append the assistant reply and clear the pending flag
    pub fn complete_reply(&mut self, ticket: &PendingReply, reply: Message) {
        if self.pending.as_ref() != Some(&ticket.message.id) {
            tracing::warn!(id = %ticket.message.id, "Reply does not match the pending message");
        }
        self.store.append(reply);
        self.pending = None;
    }

    /// Clear the pending flag without a reply (provider failure)
    pub fn fail_reply(&mut self, ticket: &PendingReply) {
        if self.pending.as_ref() == Some(&ticket.message.id) {
            self.pending = None;
        }
    }

    /// Stage files for the next message
    pub fn stage(&mut self, files: impl IntoIterator<Item = FileHandle>) -> Vec<AttachmentId> {
        if self.torn_down {
            return Vec::new();
        }
        self.staging.stage(files)
    }

    /// Remove a staged file; `false` if no such id is staged
    pub fn remove_attachment(&mut self, id: &AttachmentId) -> bool {
        self.staging.remove(id)
    }

    /// Start a voice session in the current language's locale
    pub fn start_voice(&mut self) -> Result<VoiceTicket> {
        if self.torn_down {
            return Err(ChatError::SessionClosed);
        }
        if self.is_pending() {
            return Err(ChatError::ResponsePending);
        }
        self.voice.begin(self.language)
    }

    /// Stop the active voice session without producing a message
    pub fn stop_voice(&mut self) -> bool {
        self.voice.stop()
    }

    /// Apply a recognition outcome; a transcript lands in the draft
    pub fn resolve_voice(&mut self, id: RecognitionId, outcome: RecognitionOutcome) -> VoiceTransition {
        let transition = self.voice.resolve(id, outcome);
        if let VoiceTransition::Transcript(text) = &transition {
            self.draft.clone_from(text);
        }
        transition
    }

    /// Tear the view down: abort voice and release every preview handle
    ///
    /// A pending reply may still be completed afterwards.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.voice.abort();
        self.staging.clear();
        for message in self.store.messages() {
            self.staging.release(&message.attachments);
        }
        tracing::debug!(messages = self.store.len(), "Chat session torn down");
    }

    pub fn snapshot(&self) -> ChatSnapshot {
        ChatSnapshot {
            messages: self.store.snapshot(),
            draft: self.draft.clone(),
            staged: self.staging.attachments().to_vec(),
            pending: self.is_pending(),
            listening: self.is_listening(),
            voice_available: self.voice.is_available(),
            language: self.language,
        }
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("language", &self.language)
            .field("draft", &self.draft)
            .field("messages", &self.store.len())
            .field("staged", &self.staging.len())
            .field("pending", &self.pending)
            .field("voice", &self.voice)
            .finish_non_exhaustive()
    }
}
