//! AgriGenius Web Frontend
//!
//! Leptos-based WASM page: crop recommendations, pest detection and the
//! chat assistant, all running in the browser.

mod app;
mod components;
mod pages;
mod platform;

pub use app::App;

use wasm_bindgen::prelude::*;

// Pulled in for its `js` feature: browser entropy for `rand` and `uuid`.
use getrandom as _;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
