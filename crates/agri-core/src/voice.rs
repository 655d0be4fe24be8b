//! Voice Session Controller
//!
//! Wraps the platform speech recognizer in a two-state machine
//! (`Idle` / `Listening`). Every started session hands back a one-shot
//! `RecognitionHandle`; the platform resolves it at most once with a
//! transcript, an error code, or a plain end. Sessions are numbered so that
//! an outcome arriving after stop, abort or teardown is recognized as stale
//! and ignored.

use tokio::sync::oneshot;

use crate::error::{ChatError, Result};
use crate::i18n::Language;

/// Sequence number of a recognition session
pub type RecognitionId = u64;

/// Terminal result of one recognition session
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecognitionOutcome {
    /// Final transcript of a single utterance
    Transcript(String),
    /// Platform error code (e.g. `no-speech`, `not-allowed`)
    Error(String),
    /// Session ended without a result
    Ended,
}

/// Platform side of a recognition session; resolves the handle once
#[derive(Debug)]
pub struct RecognitionCompleter {
    tx: Option<oneshot::Sender<RecognitionOutcome>>,
}

impl RecognitionCompleter {
    /// Deliver the outcome. Only the first call has any effect.
    pub fn complete(&mut self, outcome: RecognitionOutcome) -> bool {
        match self.tx.take() {
            Some(tx) => tx.send(outcome).is_ok(),
            None => false,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.tx.is_none()
    }
}

/// Caller side of a recognition session
#[derive(Debug)]
pub struct RecognitionHandle {
    rx: oneshot::Receiver<RecognitionOutcome>,
}

impl RecognitionHandle {
    /// Create a connected completer/handle pair
    pub fn channel() -> (RecognitionCompleter, Self) {
        let (tx, rx) = oneshot::channel();
        (RecognitionCompleter { tx: Some(tx) }, Self { rx })
    }

    /// Wait for the outcome; a dropped completer counts as `Ended`
    pub async fn outcome(self) -> RecognitionOutcome {
        self.rx.await.unwrap_or(RecognitionOutcome::Ended)
    }
}

/// Platform speech-recognition capability
///
/// Implementations run in non-continuous, final-result-only mode.
pub trait SpeechRecognizer {
    /// Begin listening for a single utterance in `locale`
    ///
    /// Errors are synchronous start failures such as a denied permission.
    fn start(&mut self, locale: &str) -> std::result::Result<RecognitionHandle, String>;

    /// Ask the platform to stop listening
    fn stop(&mut self);

    /// Cancel immediately; no result should be delivered afterwards
    fn abort(&mut self);
}

/// A started session: its number and the handle to await
#[derive(Debug)]
pub struct VoiceTicket {
    pub id: RecognitionId,
    pub locale: &'static str,
    pub handle: RecognitionHandle,
}

impl VoiceTicket {
    pub async fn wait(self) -> (RecognitionId, RecognitionOutcome) {
        (self.id, self.handle.outcome().await)
    }
}

/// Voice session state
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VoiceState {
    Idle,
    Listening {
        id: RecognitionId,
        /// Locale chosen at start, not re-read mid-session
        locale: &'static str,
    },
}

/// Effect of resolving a session
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VoiceTransition {
    /// Write the transcript into the draft and auto-send
    Transcript(String),
    /// Report the error; no message
    Failed(ChatError),
    /// Ended without a result; no message
    Ended,
    /// Outcome for a session that is no longer current; ignore
    Stale,
}

/// The voice state machine, owning the platform recognizer
pub struct VoiceSession {
    recognizer: Option<Box<dyn SpeechRecognizer>>,
    state: VoiceState,
    next_id: RecognitionId,
}

impl VoiceSession {
    /// `None` means the platform has no recognition capability
    pub fn new(recognizer: Option<Box<dyn SpeechRecognizer>>) -> Self {
        Self {
            recognizer,
            state: VoiceState::Idle,
            next_id: 1,
        }
    }

    /// Session without recognition capability
    pub fn unavailable() -> Self {
        Self::new(None)
    }

    pub const fn state(&self) -> &VoiceState {
        &self.state
    }

    pub const fn is_listening(&self) -> bool {
        matches!(self.state, VoiceState::Listening { .. })
    }

    pub const fn is_available(&self) -> bool {
        self.recognizer.is_some()
    }

    /// `idle --start()--> listening`
    pub fn begin(&mut self, language: Language) -> Result<VoiceTicket> {
        if self.is_listening() {
            return Err(ChatError::VoiceBusy);
        }
        let recognizer = self
            .recognizer
            .as_deref_mut()
            .ok_or(ChatError::CapabilityUnavailable)?;

        let locale = language.recognition_locale();
        let handle = recognizer.start(locale).map_err(|e| {
            tracing::warn!(error = %e, "Speech recognition failed to start");
            ChatError::RecognitionStartFailure(e)
        })?;

        let id = self.next_id;
        self.next_id += 1;
        self.state = VoiceState::Listening { id, locale };
        tracing::debug!(id, locale, "Voice session listening");

        Ok(VoiceTicket { id, locale, handle })
    }

    /// User-initiated stop; returns whether a session was active
    pub fn stop(&mut self) -> bool {
        self.retire(false)
    }

    /// Forced cancellation (teardown); returns whether a session was active
    pub fn abort(&mut self) -> bool {
        self.retire(true)
    }

    fn retire(&mut self, abort: bool) -> bool {
        let VoiceState::Listening { id, .. } = self.state else {
            return false;
        };
        self.state = VoiceState::Idle;
        if let Some(recognizer) = self.recognizer.as_mut() {
            if abort {
                recognizer.abort();
            } else {
                recognizer.stop();
            }
        }
        tracing::debug!(id, "Voice session retired");
        true
    }

    /// Apply the platform outcome of session `id`
    pub fn resolve(&mut self, id: RecognitionId, outcome: RecognitionOutcome) -> VoiceTransition {
        match self.state {
            VoiceState::Listening { id: current, .. } if current == id => {}
            _ => {
                tracing::debug!(id, "Ignoring outcome of stale voice session");
                return VoiceTransition::Stale;
            }
        }
        self.state = VoiceState::Idle;

        match outcome {
            RecognitionOutcome::Transcript(text) => VoiceTransition::Transcript(text),
            RecognitionOutcome::Error(code) => {
                tracing::warn!(id, code = %code, "Voice recognition error");
                VoiceTransition::Failed(ChatError::VoiceRecognition { code })
            }
            RecognitionOutcome::Ended => VoiceTransition::Ended,
        }
    }
}

impl std::fmt::Debug for VoiceSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceSession")
            .field("available", &self.is_available())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Scriptable recognizer for tests
#[cfg(test)]
pub(crate) mod fake {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Default)]
    pub struct FakeState {
        pub completer: Option<RecognitionCompleter>,
        pub locales: Vec<String>,
        pub stops: usize,
        pub aborts: usize,
        pub fail_start: Option<String>,
    }

    /// Cloneable handle so tests can fire callbacks after handing it over
    #[derive(Clone, Default)]
    pub struct FakeRecognizer(pub Rc<RefCell<FakeState>>);

    impl FakeRecognizer {
        pub fn failing(reason: &str) -> Self {
            let fake = Self::default();
            fake.0.borrow_mut().fail_start = Some(reason.into());
            fake
        }

        pub fn deliver(&self, outcome: RecognitionOutcome) -> bool {
            self.0
                .borrow_mut()
                .completer
                .as_mut()
                .is_some_and(|c| c.complete(outcome))
        }

        pub fn boxed(&self) -> Option<Box<dyn SpeechRecognizer>> {
            Some(Box::new(self.clone()))
        }
    }

    impl SpeechRecognizer for FakeRecognizer {
        fn start(&mut self, locale: &str) -> std::result::Result<RecognitionHandle, String> {
            let mut state = self.0.borrow_mut();
            if let Some(reason) = state.fail_start.clone() {
                return Err(reason);
            }
            let (completer, handle) = RecognitionHandle::channel();
            state.completer = Some(completer);
            state.locales.push(locale.to_string());
            Ok(handle)
        }

        fn stop(&mut self) {
            let mut state = self.0.borrow_mut();
            state.stops += 1;
            if let Some(c) = state.completer.as_mut() {
                c.complete(RecognitionOutcome::Ended);
            }
        }

        fn abort(&mut self) {
            let mut state = self.0.borrow_mut();
            state.aborts += 1;
            if let Some(c) = state.completer.as_mut() {
                c.complete(RecognitionOutcome::Error("aborted".into()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeRecognizer;
    use super::*;

    #[test]
    fn test_start_without_capability_stays_idle() {
        let mut voice = VoiceSession::unavailable();
        let err = voice.begin(Language::En).unwrap_err();
        assert_eq!(err, ChatError::CapabilityUnavailable);
        assert_eq!(voice.state(), &VoiceState::Idle);
    }

    #[test]
    fn test_start_failure_stays_idle() {
        let mut voice = VoiceSession::new(FakeRecognizer::failing("not-allowed").boxed());
        let err = voice.begin(Language::En).unwrap_err();
        assert_eq!(err, ChatError::RecognitionStartFailure("not-allowed".into()));
        assert!(!voice.is_listening());
    }

    #[test]
    fn test_locale_follows_language_at_start() {
        let fake = FakeRecognizer::default();
        let mut voice = VoiceSession::new(fake.boxed());

        let ticket = voice.begin(Language::Hi).unwrap();
        assert_eq!(ticket.locale, "hi-IN");
        assert_eq!(fake.0.borrow().locales, ["hi-IN"]);
    }

    #[test]
    fn test_second_start_is_busy() {
        let mut voice = VoiceSession::new(FakeRecognizer::default().boxed());
        voice.begin(Language::En).unwrap();
        assert_eq!(voice.begin(Language::En).unwrap_err(), ChatError::VoiceBusy);
    }

    #[test]
    fn test_transcript_returns_to_idle() {
        let mut voice = VoiceSession::new(FakeRecognizer::default().boxed());
        let ticket = voice.begin(Language::En).unwrap();

        let transition = voice.resolve(ticket.id, RecognitionOutcome::Transcript("hello".into()));
        assert_eq!(transition, VoiceTransition::Transcript("hello".into()));
        assert_eq!(voice.state(), &VoiceState::Idle);
    }

    #[test]
    fn test_error_carries_code() {
        let mut voice = VoiceSession::new(FakeRecognizer::default().boxed());
        let ticket = voice.begin(Language::En).unwrap();

        let transition = voice.resolve(ticket.id, RecognitionOutcome::Error("no-speech".into()));
        assert_eq!(
            transition,
            VoiceTransition::Failed(ChatError::VoiceRecognition { code: "no-speech".into() })
        );
        assert!(!voice.is_listening());
    }

    #[test]
    fn test_outcome_after_stop_is_stale() {
        let fake = FakeRecognizer::default();
        let mut voice = VoiceSession::new(fake.boxed());
        let ticket = voice.begin(Language::En).unwrap();

        assert!(voice.stop());
        assert_eq!(fake.0.borrow().stops, 1);
        assert_eq!(
            voice.resolve(ticket.id, RecognitionOutcome::Transcript("late".into())),
            VoiceTransition::Stale
        );
    }

    #[test]
    fn test_abort_only_when_listening() {
        let fake = FakeRecognizer::default();
        let mut voice = VoiceSession::new(fake.boxed());
        assert!(!voice.abort());
        assert_eq!(fake.0.borrow().aborts, 0);

        voice.begin(Language::En).unwrap();
        assert!(voice.abort());
        assert_eq!(fake.0.borrow().aborts, 1);
    }

    #[tokio::test]
    async fn test_handle_resolves_once() {
        let (mut completer, handle) = RecognitionHandle::channel();
        assert!(completer.complete(RecognitionOutcome::Transcript("first".into())));
        assert!(!completer.complete(RecognitionOutcome::Ended));
        assert!(completer.is_complete());
        assert_eq!(handle.outcome().await, RecognitionOutcome::Transcript("first".into()));
    }

    #[tokio::test]
    async fn test_dropped_completer_is_ended() {
        let (completer, handle) = RecognitionHandle::channel();
        drop(completer);
        assert_eq!(handle.outcome().await, RecognitionOutcome::Ended);
    }
}
