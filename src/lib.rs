/// Tab Shelf - Chrome Extension for collecting and re-opening tabs
/// Built with Rust + WASM + Yew

mod background;
mod record;
mod reducer;
mod store;
mod view;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Start the background page: context menus and tab moving
#[wasm_bindgen]
pub fn start_background() {
    background::init();
}

// Start the Yew app for the saved-tabs page
#[wasm_bindgen]
pub fn start_tabs_page() {
    yew::Renderer::<ui::tabs::App>::new().render();
}
