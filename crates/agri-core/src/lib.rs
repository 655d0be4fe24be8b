//! # agri-core
//!
//! Conversational input pipeline for the AgriGenius assistant.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ChatController                          │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │ ChatSession │  │  Response   │  │  SpeechRecognizer   │  │
//! │  │ draft/store │──│  Simulator  │  │  PreviewUrls/Timer  │  │
//! │  │ staging     │  │  (Provider) │  │  (platform seams)   │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! `ChatSession` is synchronous and performs no I/O. `ChatController` runs
//! it on a single-threaded loop and owns every delay. Platform capabilities
//! (speech recognition, preview URLs, timers) are traits so the browser
//! build and the tests plug in their own.

pub mod chat;
pub mod config;
pub mod controller;
pub mod error;
pub mod i18n;
pub mod message;
pub mod notice;
pub mod provider;
pub mod simulator;
pub mod staging;
pub mod timer;
pub mod voice;

pub use chat::{ChatSession, ChatSnapshot, PendingReply, SUBMIT_KEY};
pub use config::ChatConfig;
pub use controller::{ChatController, ChatEvent};
pub use error::{ChatError, Result};
pub use i18n::Language;
pub use message::{Attachment, AttachmentId, AttachmentKind, Message, MessageId, MessageStore, PreviewHandle, Sender};
pub use notice::{Notice, Severity};
pub use provider::{CannedResponder, ResponseProvider, CANNED_RESPONSES};
pub use simulator::ResponseSimulator;
pub use staging::{AttachmentStaging, FileHandle, LocalPreviews, PreviewUrls};
pub use timer::Timer;
#[cfg(feature = "tokio-timer")]
pub use timer::TokioTimer;
pub use voice::{
    RecognitionCompleter, RecognitionHandle, RecognitionId, RecognitionOutcome, SpeechRecognizer, VoiceSession,
    VoiceState, VoiceTicket, VoiceTransition,
};
