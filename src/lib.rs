// ============================================================================
// PASAL STOREFRONT - SESIÓN, CARRITO Y CHECKOUT (RUST PURO + WASM)
// ============================================================================
// Arquitectura MVVM:
// - ViewModels: lógica de cada pantalla (carrito, checkout, auth)
// - State: reducer puro + store con persistencia en localStorage
// - Services: API del backend y fronteras asíncronas (stock, auth, pedidos)
// - Models: estructuras compartidas con backend
// ============================================================================

pub mod bindings;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

#[cfg(test)]
mod test_support;

pub use bindings::Storefront;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let level = if config::CONFIG.is_logging_enabled() {
        log::Level::Info
    } else {
        log::Level::Warn
    };
    wasm_logger::init(wasm_logger::Config::new(level));
    log::info!("🚀 Pasal Storefront - Rust Puro + MVVM ({})", config::CONFIG.environment);
}
