//! Chat Controller
//!
//! Drives a `ChatSession` on a single-threaded event loop: the timed reply
//! after each send, the voice session round trip and the auto-send that
//! follows a transcript. Every state change is pushed to the listener as a
//! fresh `ChatSnapshot`; toasts go out as `ChatEvent::Notice`.
//!
//! No `RefCell` borrow is held across an `.await`, so the view may call back
//! into the controller from inside the listener.

use std::cell::RefCell;
use std::sync::Arc;
use std::time::Duration;

use crate::chat::{ChatSession, ChatSnapshot, PendingReply, SUBMIT_KEY};
use crate::config::ChatConfig;
use crate::error::Result;
use crate::i18n::Language;
use crate::message::AttachmentId;
use crate::notice::Notice;
use crate::provider::ResponseProvider;
use crate::simulator::ResponseSimulator;
use crate::staging::{FileHandle, PreviewUrls};
use crate::timer::Timer;
use crate::voice::{SpeechRecognizer, VoiceTransition};

/// What the view receives
#[derive(Clone, Debug)]
pub enum ChatEvent {
    Changed(ChatSnapshot),
    Notice(Notice),
}

type Listener = Box<dyn Fn(ChatEvent)>;

/// Async driver around a `ChatSession`
pub struct ChatController {
    session: RefCell<ChatSession>,
    simulator: ResponseSimulator,
    autosend_delay: Duration,
    listener: Option<Listener>,
}

impl ChatController {
    pub fn new(session: ChatSession, simulator: ResponseSimulator, config: &ChatConfig) -> Self {
        Self {
            session: RefCell::new(session),
            simulator,
            autosend_delay: config.voice_autosend_delay(),
            listener: None,
        }
    }

    /// Build the session and simulator from one config
    pub fn build(
        config: &ChatConfig,
        provider: Arc<dyn ResponseProvider>,
        timer: impl Timer + 'static,
        previews: impl PreviewUrls + 'static,
        recognizer: Option<Box<dyn SpeechRecognizer>>,
    ) -> Self {
        let session = ChatSession::new(config, previews, recognizer);
        let simulator = ResponseSimulator::new(provider, timer, config.response_delay());
        Self::new(session, simulator, config)
    }

    /// Register the view callback
    #[must_use]
    pub fn with_listener(mut self, listener: impl Fn(ChatEvent) + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn snapshot(&self) -> ChatSnapshot {
        self.session.borrow().snapshot()
    }

    pub fn language(&self) -> Language {
        self.session.borrow().language()
    }

    fn emit(&self, event: ChatEvent) {
        if let Some(listener) = &self.listener {
            listener(event);
        }
    }

    fn changed(&self) {
        let snapshot = self.snapshot();
        self.emit(ChatEvent::Changed(snapshot));
    }

    fn notify(&self, notice: Notice) {
        self.emit(ChatEvent::Notice(notice));
    }

    pub fn set_language(&self, language: Language) {
        self.session.borrow_mut().set_language(language);
        self.changed();
    }

    pub fn set_draft(&self, text: impl Into<String>) -> bool {
        let accepted = self.session.borrow_mut().set_draft(text);
        if accepted {
            self.changed();
        }
        accepted
    }

    /// Submit the draft; resolves once the reply has landed
    ///
    /// Returns `false` if nothing was sent.
    pub async fn send(&self) -> bool {
        let ticket = self.session.borrow_mut().send();
        let Some(ticket) = ticket else {
            return false;
        };
        self.changed();
        self.deliver_reply(ticket).await;
        true
    }

    pub async fn handle_key(&self, key: &str) -> bool {
        if key == SUBMIT_KEY {
            self.send().await
        } else {
            false
        }
    }

    async fn deliver_reply(&self, ticket: PendingReply) {
        match self.simulator.reply(&ticket.message).await {
            Ok(reply) => self.session.borrow_mut().complete_reply(&ticket, reply),
            Err(e) => {
                tracing::warn!(error = %e, provider = self.simulator.provider().name(), "Reply failed");
                self.session.borrow_mut().fail_reply(&ticket);
                let notice = Notice::from_error(self.language(), &e);
                self.notify(notice);
            }
        }
        self.changed();
    }

    /// Stage files and announce them
    pub fn stage(&self, files: Vec<FileHandle>) -> Vec<AttachmentId> {
        let names: Vec<String> = files.iter().map(|f| f.name.clone()).collect();
        let ids = self.session.borrow_mut().stage(files);
        if ids.is_empty() {
            return ids;
        }
        self.changed();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        self.notify(Notice::attachments_added(self.language(), &names));
        ids
    }

    pub fn remove_attachment(&self, id: &AttachmentId) -> bool {
        let removed = self.session.borrow_mut().remove_attachment(id);
        if removed {
            self.changed();
        }
        removed
    }

    /// Microphone button: stop when listening, otherwise listen
    pub async fn toggle_voice(&self) -> Result<()> {
        let stopped = self.session.borrow_mut().stop_voice();
        if stopped {
            self.changed();
            return Ok(());
        }
        self.listen().await
    }

    /// Run one voice session to completion
    ///
    /// A transcript is written into the draft and sent after the auto-send
    /// delay. Errors are reported as a notice and returned.
    pub async fn listen(&self) -> Result<()> {
        let started = self.session.borrow_mut().start_voice();
        let ticket = match started {
            Ok(ticket) => ticket,
            Err(e) => {
                self.notify(Notice::from_error(self.language(), &e));
                return Err(e);
            }
        };
        self.changed();
        self.notify(Notice::listening(self.language()));

        let (id, outcome) = ticket.wait().await;
        let transition = self.session.borrow_mut().resolve_voice(id, outcome);

        match transition {
            VoiceTransition::Transcript(_) => {
                self.changed();
                self.simulator.wait(self.autosend_delay).await;
                self.send().await;
            }
            VoiceTransition::Failed(e) => {
                self.changed();
                self.notify(Notice::from_error(self.language(), &e));
                return Err(e);
            }
            VoiceTransition::Ended => self.changed(),
            VoiceTransition::Stale => {}
        }
        Ok(())
    }

    /// The view is going away; no voice outcome has any effect after this
    ///
    /// A pending reply still lands and emits `Changed`.
    pub fn teardown(&self) {
        self.session.borrow_mut().teardown();
    }

    pub fn is_torn_down(&self) -> bool {
        self.session.borrow().is_torn_down()
    }
}

impl std::fmt::Debug for ChatController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatController")
            .field("session", &self.session)
            .field("simulator", &self.simulator)
            .field("autosend_delay", &self.autosend_delay)
            .finish_non_exhaustive()
    }
}

#[cfg(all(test, feature = "tokio-timer"))]
mod tests {
    use std::rc::Rc;

    use async_trait::async_trait;

    use super::*;
    use crate::error::ChatError;
    use crate::message::{Message, Sender};
    use crate::notice::Severity;
    use crate::provider::{CannedResponder, CANNED_RESPONSES};
    use crate::staging::LocalPreviews;
    use crate::timer::TokioTimer;
    use crate::voice::fake::FakeRecognizer;
    use crate::voice::RecognitionOutcome;

    type Events = Rc<RefCell<Vec<ChatEvent>>>;

    fn quiet() -> ChatConfig {
        ChatConfig { welcome: false, ..ChatConfig::default() }
    }

    fn controller_with(
        provider: Arc<dyn ResponseProvider>,
        recognizer: Option<Box<dyn SpeechRecognizer>>,
    ) -> (ChatController, Events) {
        let events: Events = Rc::default();
        let sink = events.clone();
        let controller = ChatController::build(&quiet(), provider, TokioTimer, LocalPreviews::new(), recognizer)
            .with_listener(move |event| sink.borrow_mut().push(event));
        (controller, events)
    }

    fn controller(recognizer: Option<Box<dyn SpeechRecognizer>>) -> (ChatController, Events) {
        controller_with(Arc::new(CannedResponder::new()), recognizer)
    }

    fn notices(events: &Events) -> Vec<Notice> {
        events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                ChatEvent::Notice(n) => Some(n.clone()),
                ChatEvent::Changed(_) => None,
            })
            .collect()
    }

    struct FailingProvider;

    #[async_trait]
    impl ResponseProvider for FailingProvider {
        async fn respond(&self, _message: &Message) -> Result<String> {
            Err(ChatError::Provider("offline".into()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_user_message_shows_before_reply() {
        let (controller, _) = controller(None);
        controller.set_draft("How do I improve my soil quality?");
        let start = tokio::time::Instant::now();

        let observe = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            controller.snapshot()
        };
        let (sent, mid) = futures::join!(controller.send(), observe);

        assert!(sent);
        assert_eq!(mid.messages.len(), 1);
        assert!(mid.pending);
        assert!(!mid.input_enabled());
        assert!(start.elapsed() >= Duration::from_millis(1500));

        let done = controller.snapshot();
        assert_eq!(done.messages.len(), 2);
        assert!(!done.pending);
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_send_appends_user_then_assistant() {
        let (controller, _) = controller(None);

        for content in ["tomatoes", "pests?", "thanks"] {
            let before = controller.snapshot().messages.len();
            controller.set_draft(content);
            assert!(controller.send().await);

            let messages = controller.snapshot().messages;
            assert_eq!(messages.len(), before + 2);
            assert_eq!(messages[before].sender, Sender::User);
            assert_eq!(messages[before].content, content);
            assert_eq!(messages[before + 1].sender, Sender::Assistant);
            assert!(CANNED_RESPONSES.contains(&messages[before + 1].content.as_str()));
            assert!(messages[before].timestamp <= messages[before + 1].timestamp);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_whitespace_draft_sends_nothing() {
        let (controller, events) = controller(None);
        controller.set_draft("   ");
        assert!(!controller.send().await);
        assert!(!controller.handle_key(SUBMIT_KEY).await);
        assert!(controller.snapshot().messages.is_empty());
        assert!(notices(&events).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_provider_failure_unlocks_input() {
        let (controller, events) = controller_with(Arc::new(FailingProvider), None);
        controller.set_draft("hello");
        assert!(controller.send().await);

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.messages.len(), 1);
        assert!(!snapshot.pending);
        let notices = notices(&events);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].severity, Severity::Destructive);
    }

    #[tokio::test(start_paused = true)]
    async fn test_voice_transcript_is_sent_automatically() {
        let fake = FakeRecognizer::default();
        let (controller, events) = controller(fake.boxed());
        let start = tokio::time::Instant::now();

        let speak = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            assert!(controller.snapshot().listening);
            assert!(fake.deliver(RecognitionOutcome::Transcript("hello".into())));
        };
        let (result, ()) = futures::join!(controller.toggle_voice(), speak);
        result.unwrap();

        let drafted = events.borrow().iter().any(|e| match e {
            ChatEvent::Changed(s) => s.draft == "hello" && !s.listening,
            ChatEvent::Notice(_) => false,
        });
        assert!(drafted);

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.messages.len(), 2);
        assert_eq!(snapshot.messages[0].content, "hello");
        assert_eq!(snapshot.draft, "");
        assert!(start.elapsed() >= Duration::from_millis(2000));
        assert_eq!(fake.0.borrow().locales, ["en-US"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_voice_without_capability() {
        let (controller, events) = controller(None);

        let err = controller.toggle_voice().await.unwrap_err();
        assert_eq!(err, ChatError::CapabilityUnavailable);
        assert!(!controller.snapshot().listening);

        let notices = notices(&events);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "Voice Recognition Not Supported");
        assert_eq!(notices[0].severity, Severity::Destructive);
    }

    #[tokio::test(start_paused = true)]
    async fn test_voice_start_failure_stays_idle() {
        let fake = FakeRecognizer::failing("not-allowed");
        let (controller, events) = controller(fake.boxed());

        let err = controller.toggle_voice().await.unwrap_err();
        assert_eq!(err, ChatError::RecognitionStartFailure("not-allowed".into()));
        assert!(!controller.snapshot().listening);

        let notices = notices(&events);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "Voice Recognition Error");
        assert_eq!(notices[0].severity, Severity::Destructive);
    }

    #[tokio::test(start_paused = true)]
    async fn test_voice_refused_while_reply_pending() {
        let fake = FakeRecognizer::default();
        let (controller, events) = controller(fake.boxed());
        controller.set_draft("When should I plant corn?");

        let press_mic = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            controller.toggle_voice().await
        };
        let (sent, voice) = futures::join!(controller.send(), press_mic);

        assert!(sent);
        assert_eq!(voice.unwrap_err(), ChatError::ResponsePending);
        assert!(fake.0.borrow().locales.is_empty());
        let notices = notices(&events);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "Voice Recognition Error");
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_reply_lands_after_teardown() {
        let (controller, events) = controller(None);
        controller.set_draft("tomatoes");

        let unmount = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            controller.teardown();
            events.borrow().len()
        };
        let (sent, seen) = futures::join!(controller.send(), unmount);

        assert!(sent);
        assert_eq!(events.borrow().len(), seen + 1);
        let snapshot = controller.snapshot();
        assert!(!snapshot.pending);
        assert_eq!(snapshot.messages.len(), 2);
        assert_eq!(snapshot.messages[1].sender, Sender::Assistant);
    }

    #[tokio::test(start_paused = true)]
    async fn test_voice_error_reports_code() {
        let fake = FakeRecognizer::default();
        let (controller, events) = controller(fake.boxed());

        let fail = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            fake.deliver(RecognitionOutcome::Error("no-speech".into()));
        };
        let (result, ()) = futures::join!(controller.listen(), fail);

        assert_eq!(result.unwrap_err(), ChatError::VoiceRecognition { code: "no-speech".into() });
        assert!(controller.snapshot().messages.is_empty());
        let last = notices(&events).pop().unwrap();
        assert!(last.description.contains("no-speech"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_toggle_stops_without_message() {
        let fake = FakeRecognizer::default();
        let (controller, _) = controller(fake.boxed());

        let stop = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            controller.toggle_voice().await
        };
        let (first, second) = futures::join!(controller.toggle_voice(), stop);

        first.unwrap();
        second.unwrap();
        assert_eq!(fake.0.borrow().stops, 1);
        let snapshot = controller.snapshot();
        assert!(!snapshot.listening);
        assert!(snapshot.messages.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_while_listening_has_no_effect() {
        let fake = FakeRecognizer::default();
        let (controller, events) = controller(fake.boxed());

        let unmount = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            let seen = events.borrow().len();
            controller.teardown();
            assert!(!fake.deliver(RecognitionOutcome::Transcript("late".into())));
            seen
        };
        let (result, seen) = futures::join!(controller.listen(), unmount);

        result.unwrap();
        assert_eq!(fake.0.borrow().aborts, 1);
        assert_eq!(events.borrow().len(), seen);
        assert!(controller.snapshot().messages.is_empty());
        assert!(controller.is_torn_down());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stage_announces_files() {
        let (controller, events) = controller(None);
        let ids = controller.stage(vec![
            FileHandle::new("leaf.jpg", "image/jpeg", vec![0xFF]),
            FileHandle::new("soil.pdf", "application/pdf", vec![0x25]),
        ]);
        assert_eq!(ids.len(), 2);
        assert_eq!(notices(&events)[0].description, "leaf.jpg, soil.pdf");

        assert!(controller.remove_attachment(&ids[0]));
        assert_eq!(controller.snapshot().staged.len(), 1);
    }
}
