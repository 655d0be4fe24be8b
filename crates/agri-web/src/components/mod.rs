//! UI Components

mod chat;
mod crop;
mod layout;
mod pest;
mod toast;

pub use chat::Chatbot;
pub use crop::CropRecommendation;
pub use layout::{Features, Footer, Hero, Navbar};
pub use pest::PestDetection;
pub use toast::{Toaster, Toasts};
