//! Home Page
//!
//! The whole site is one scrolling page.

use std::rc::Rc;

use agri_advisor::Advisor;
use leptos::prelude::*;

use crate::components::{Chatbot, CropRecommendation, Features, Footer, Hero, Navbar, PestDetection, Toaster, Toasts};
use crate::platform::BrowserTimer;

#[component]
pub fn HomePage() -> impl IntoView {
    let toasts = Toasts::new();
    let advisor = StoredValue::new_local(Rc::new(Advisor::mock(BrowserTimer)));

    view! {
        <div class="home">
            <Navbar />
            <Hero />
            <Features />
            <CropRecommendation advisor toasts />
            <PestDetection advisor toasts />
            <Chatbot toasts />
            <Footer />
            <Toaster toasts />
        </div>
    }
}
