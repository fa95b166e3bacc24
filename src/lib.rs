// ============================================================================
// CINEMAX PORTAL - FRONTEND MVVM (RUST + WASM)
// ============================================================================
// - Views: enlazan el HTML existente (sin lógica)
// - ViewModels: estado de la página + lógica UI
// - Services: SOLO comunicación API
// - Stores: sesión en localStorage
// - Utils: validación y formato (funciones puras)
// ============================================================================

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod stores;
pub mod state;
pub mod viewmodels;
pub mod utils;
mod dom;
mod views;
mod app;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_logger::Config;

use crate::app::App;
use crate::config::CONFIG;

// Mantiene viva la instancia de App
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let level = if CONFIG.is_logging_enabled() {
        log::Level::Debug
    } else {
        log::Level::Warn
    };
    wasm_logger::init(Config::new(level));
    log::info!("🎬 CineMax Portal - Rust + WASM");

    let app = App::new()?;
    app.mount()?;
    log::info!("✅ [APP] Vista montada: {:?}", app.page());

    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    Ok(())
}
