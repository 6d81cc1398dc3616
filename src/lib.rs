//! Glossary Filter WASM Module
//!
//! Alphabetical grouping, letter navigation and live filtering for CMS
//! glossary lists. The engine works against any [`dom::HostDocument`]; the
//! browser build binds it to the page through [`api::AlphabeticalFilterHandle`].

pub mod api;
pub mod dom;
pub mod engine;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use dom::{HostDocument, MemoryDocument, WebDocument};
pub use engine::{AlphabeticalFilter, FilterError, LinkAction, VisibilityBus, VisibilityProvider};
pub use models::{FilterConfig, FilterStats, Item, SyncReport};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // Fails only when the host already installed a logger
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Debug);

    log::info!("Glossary filter WASM module initialized");
}
