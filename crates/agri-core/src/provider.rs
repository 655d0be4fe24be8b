//! Response Provider Strategy Pattern
//!
//! Defines a common interface for whatever produces assistant replies. The
//! demo ships `CannedResponder`, which answers from a fixed table; a real
//! backend can implement the same trait without touching input capture or
//! the message store.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agri_core::provider::{CannedResponder, ResponseProvider};
//!
//! let provider = CannedResponder::new();
//! let reply = provider.respond(&message).await?;
//! ```

use async_trait::async_trait;
use rand::seq::SliceRandom;

use crate::error::{ChatError, Result};
use crate::message::Message;

/// The fixed replies of the demo assistant
pub const CANNED_RESPONSES: [&str; 5] = [
    "Based on your soil type and climate, I recommend planting tomatoes, peppers, or eggplants in your region this season.",
    "I've analyzed your crop data. For optimal yield, consider applying nitrogen-rich fertilizer at 40% of the usual rate, given your soil's current composition.",
    "Your plant appears to have early signs of powdery mildew. I recommend a solution of 1 tablespoon baking soda, 1/2 teaspoon liquid soap, and 1 gallon of water as an eco-friendly treatment.",
    "Weather forecasts indicate a 70% chance of frost in your area next week. I suggest covering sensitive crops or delaying planting until after this cold spell passes.",
    "Based on current market trends, your harvest might fetch 15% higher prices if you wait 2 weeks before selling. Would you like me to set a reminder to alert you at the optimal selling time?",
];

/// Strategy trait for reply backends
#[async_trait]
pub trait ResponseProvider: Send + Sync {
    /// Produce the assistant reply text for a user message
    async fn respond(&self, message: &Message) -> Result<String>;

    /// Provider name
    fn name(&self) -> &str;
}

/// Answers with a uniformly random entry of a fixed table
#[derive(Clone, Debug)]
pub struct CannedResponder {
    responses: Vec<String>,
}

impl Default for CannedResponder {
    fn default() -> Self {
        Self::new()
    }
}

impl CannedResponder {
    pub fn new() -> Self {
        Self {
            responses: CANNED_RESPONSES.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Use a custom table; it must hold at least one entry
    pub fn with_responses(responses: Vec<String>) -> Result<Self> {
        if responses.is_empty() {
            return Err(ChatError::Config("canned response table is empty".into()));
        }
        Ok(Self { responses })
    }

    pub fn responses(&self) -> &[String] {
        &self.responses
    }

    fn pick(&self) -> String {
        let mut rng = rand::thread_rng();
        self.responses
            .choose(&mut rng)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl ResponseProvider for CannedResponder {
    async fn respond(&self, message: &Message) -> Result<String> {
        let reply = self.pick();
        tracing::debug!(to = %message.id, "Canned reply selected");
        Ok(reply)
    }

    fn name(&self) -> &str {
        "canned"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reply_comes_from_table() {
        let provider = CannedResponder::new();
        let message = Message::user("tomatoes", Vec::new());

        for _ in 0..20 {
            let reply = provider.respond(&message).await.unwrap();
            assert!(CANNED_RESPONSES.contains(&reply.as_str()));
        }
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(matches!(
            CannedResponder::with_responses(Vec::new()),
            Err(ChatError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_single_entry_table_is_deterministic() {
        let provider = CannedResponder::with_responses(vec!["Water at dawn.".into()]).unwrap();
        let reply = provider.respond(&Message::user("?", Vec::new())).await.unwrap();
        assert_eq!(reply, "Water at dawn.");
    }
}
