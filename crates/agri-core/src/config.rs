//! Chat Configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::i18n::Language;

/// Timing and presentation settings for the chat pipeline
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Delay before the simulated assistant reply lands
    #[serde(default = "default_response_delay_ms")]
    pub response_delay_ms: u64,

    /// Delay between a voice transcript and the automatic send
    #[serde(default = "default_voice_autosend_delay_ms")]
    pub voice_autosend_delay_ms: u64,

    /// Initial display language
    #[serde(default)]
    pub language: Language,

    /// Seed the conversation with the localized welcome message
    #[serde(default = "default_welcome")]
    pub welcome: bool,
}

fn default_response_delay_ms() -> u64 { 1500 }
fn default_voice_autosend_delay_ms() -> u64 { 500 }
fn default_welcome() -> bool { true }

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            response_delay_ms: default_response_delay_ms(),
            voice_autosend_delay_ms: default_voice_autosend_delay_ms(),
            language: Language::default(),
            welcome: default_welcome(),
        }
    }
}

impl ChatConfig {
    pub const fn response_delay(&self) -> Duration {
        Duration::from_millis(self.response_delay_ms)
    }

    pub const fn voice_autosend_delay(&self) -> Duration {
        Duration::from_millis(self.voice_autosend_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ChatConfig::default();
        assert_eq!(config.response_delay(), Duration::from_millis(1500));
        assert_eq!(config.voice_autosend_delay(), Duration::from_millis(500));
        assert!(config.welcome);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ChatConfig = serde_json::from_str(r#"{"language": "es"}"#).unwrap();
        assert_eq!(config.language, Language::Es);
        assert_eq!(config.response_delay_ms, 1500);
    }
}
