//! Error Types

use thiserror::Error;

/// Result type alias for chat operations
pub type Result<T> = std::result::Result<T, ChatError>;

/// Chat pipeline error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// The platform offers no speech-recognition capability
    #[error("Speech recognition is not available on this platform")]
    CapabilityUnavailable,

    /// Recognition failed mid-session with a platform error code
    #[error("Voice recognition error: {code}")]
    VoiceRecognition { code: String },

    /// The recognizer refused to start (e.g. permission denied)
    #[error("Could not start voice recognition: {0}")]
    RecognitionStartFailure(String),

    /// A voice session is already listening
    #[error("A voice session is already active")]
    VoiceBusy,

    /// An assistant reply is still pending
    #[error("A response is still pending")]
    ResponsePending,

    /// The chat view has been torn down
    #[error("Chat session is closed")]
    SessionClosed,

    /// Response provider failed
    #[error("Provider error: {0}")]
    Provider(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ChatError {
    /// Check if error is retryable
    ///
    /// Nothing is retried automatically; this only tells the UI whether
    /// offering the same action again makes sense.
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::VoiceRecognition { .. } | Self::RecognitionStartFailure(_) | Self::Provider(_)
        )
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            Self::CapabilityUnavailable => "Your browser does not support voice recognition.".into(),
            Self::VoiceRecognition { code } => format!("Could not recognize speech: {code}"),
            Self::RecognitionStartFailure(_) => {
                "Could not start voice recognition. Please try again.".into()
            }
            Self::VoiceBusy => "Voice input is already listening.".into(),
            Self::ResponsePending => "Please wait for the current answer.".into(),
            Self::SessionClosed => "The chat has been closed.".into(),
            Self::Provider(_) => "The assistant could not answer right now. Please try again.".into(),
            Self::Config(_) => "An unexpected error occurred.".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_carries_platform_code() {
        let err = ChatError::VoiceRecognition { code: "no-speech".into() };
        assert_eq!(err.user_message(), "Could not recognize speech: no-speech");
        assert!(err.is_retryable());
        assert!(!ChatError::CapabilityUnavailable.is_retryable());
    }
}
