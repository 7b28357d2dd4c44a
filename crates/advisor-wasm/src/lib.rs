use wasm_bindgen::prelude::*;

mod api;
mod app;
mod dom;
mod storage;
mod surface;
mod utils;

pub use api::FetchAdvisorClient;
pub use storage::BrowserStorage;
pub use surface::DomSurface;

use advisor_types::UserRole;

/// Initialize the WASM application
/// This sets up panic hooks and logging
#[wasm_bindgen(start)]
pub fn init() {
    // Set panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    wasm_logger::init(wasm_logger::Config::default());

    log::info!("Advisor WASM initialized");
}

/// Wire the advisor page and resume any stored conversation
#[wasm_bindgen]
pub fn init_advisor() -> Result<(), JsValue> {
    log::info!("Initializing advisor page");
    app::AdvisorApp::new()?.start()
}

#[wasm_bindgen]
pub fn go_to_student_page() -> Result<(), JsValue> {
    app::go_to_role_page(UserRole::Student)
}

#[wasm_bindgen]
pub fn go_to_parent_page() -> Result<(), JsValue> {
    app::go_to_role_page(UserRole::Parent)
}
