//! Response Simulator
//!
//! Turns a user message into an assistant message after a fixed delay.

use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::message::Message;
use crate::provider::ResponseProvider;
use crate::timer::{delayed, Timer};

/// Fixed-delay reply scheduler
pub struct ResponseSimulator {
    provider: Arc<dyn ResponseProvider>,
    timer: Box<dyn Timer>,
    delay: Duration,
}

impl ResponseSimulator {
    pub fn new(provider: Arc<dyn ResponseProvider>, timer: impl Timer + 'static, delay: Duration) -> Self {
        Self {
            provider,
            timer: Box::new(timer),
            delay,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn provider(&self) -> &dyn ResponseProvider {
        self.provider.as_ref()
    }

    /// Wait the fixed delay, then build the assistant reply to `message`
    pub async fn reply(&self, message: &Message) -> Result<Message> {
        let content = delayed(self.timer.as_ref(), self.delay, self.provider.respond(message)).await?;
        tracing::debug!(provider = self.provider.name(), "Reply ready");
        Ok(Message::assistant(content))
    }

    /// Sleep on the simulator's timer (used for the voice auto-send delay)
    pub async fn wait(&self, duration: Duration) {
        self.timer.sleep(duration).await;
    }
}

impl std::fmt::Debug for ResponseSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseSimulator")
            .field("provider", &self.provider.name())
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

#[cfg(all(test, feature = "tokio-timer"))]
mod tests {
    use super::*;
    use crate::message::Sender;
    use crate::provider::{CannedResponder, CANNED_RESPONSES};
    use crate::timer::TokioTimer;

    #[tokio::test(start_paused = true)]
    async fn test_reply_after_fixed_delay() {
        let simulator = ResponseSimulator::new(
            Arc::new(CannedResponder::new()),
            TokioTimer,
            Duration::from_millis(1500),
        );
        let start = tokio::time::Instant::now();

        let reply = simulator.reply(&Message::user("tomatoes", Vec::new())).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(1500));
        assert_eq!(reply.sender, Sender::Assistant);
        assert!(reply.attachments.is_empty());
        assert!(CANNED_RESPONSES.contains(&reply.content.as_str()));
    }
}
