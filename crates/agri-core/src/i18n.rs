//! Localized Strings
//!
//! Display language selection and the small string table used by the
//! chat surface. Lookups fall back to English, then to the key itself.

use serde::{Deserialize, Serialize};

/// Active display language
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Hi,
}

impl Language {
    /// All supported languages, in menu order
    pub const ALL: [Self; 3] = [Self::En, Self::Es, Self::Hi];

    /// Parse a BCP 47 tag, matching on the primary subtag only
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.split(['-', '_']).next()?.to_ascii_lowercase();
        match primary.as_str() {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            "hi" => Some(Self::Hi),
            _ => None,
        }
    }

    /// Short language tag
    pub const fn tag(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Hi => "hi",
        }
    }

    /// Locale handed to the speech recognizer
    pub const fn recognition_locale(self) -> &'static str {
        match self {
            Self::En => "en-US",
            Self::Es => "es-ES",
            Self::Hi => "hi-IN",
        }
    }

    /// Native display name
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Es => "Español",
            Self::Hi => "हिन्दी",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Look up a string by key for the given language
pub fn text(language: Language, key: &str) -> &str {
    lookup(language, key)
        .or_else(|| lookup(Language::En, key))
        .unwrap_or(key)
}

fn lookup(language: Language, key: &str) -> Option<&'static str> {
    let value = match (language, key) {
        (Language::En, "chatbot.welcome") => {
            "Hello! I'm your AgriGenius assistant. How can I help you with your farming needs today?"
        }
        (Language::En, "chatbot.thinking") => "Thinking...",
        (Language::En, "chatbot.placeholder") => "Ask about crops, pests, weather, or techniques...",
        (Language::En, "chatbot.voice.start") => "Start voice input",
        (Language::En, "chatbot.voice.stop") => "Stop listening",
        (Language::En, "chatbot.voice.listening.title") => "Listening...",
        (Language::En, "chatbot.voice.listening.description") => "Speak now to send a message.",
        (Language::En, "chatbot.voice.unsupported.title") => "Voice Recognition Not Supported",
        (Language::En, "chatbot.voice.error.title") => "Voice Recognition Error",
        (Language::En, "chatbot.attachment.added.title") => "Attachment added",
        (Language::En, "chatbot.reply.error.title") => "Assistant unavailable",

        (Language::Es, "chatbot.welcome") => {
            "¡Hola! Soy tu asistente AgriGenius. ¿Cómo puedo ayudarte hoy con tu cultivo?"
        }
        (Language::Es, "chatbot.thinking") => "Pensando...",
        (Language::Es, "chatbot.placeholder") => {
            "Pregunta sobre cultivos, plagas, clima o técnicas..."
        }
        (Language::Es, "chatbot.voice.start") => "Iniciar entrada de voz",
        (Language::Es, "chatbot.voice.stop") => "Dejar de escuchar",
        (Language::Es, "chatbot.voice.listening.title") => "Escuchando...",
        (Language::Es, "chatbot.voice.listening.description") => {
            "Habla ahora para enviar un mensaje."
        }
        (Language::Es, "chatbot.voice.unsupported.title") => "Reconocimiento de voz no disponible",
        (Language::Es, "chatbot.voice.error.title") => "Error de reconocimiento de voz",
        (Language::Es, "chatbot.attachment.added.title") => "Archivo adjuntado",

        (Language::Hi, "chatbot.thinking") => "सोच रहा हूँ...",
        (Language::Hi, "chatbot.voice.listening.title") => "सुन रहा हूँ...",
        _ => return None,
    };
    Some(value)
}
