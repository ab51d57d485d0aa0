//! WASM bindings for the snipbar content script.
//!
//! Exposes the injector lifecycle to the extension's JavaScript entry
//! point: construct a [`SnippetInjector`], call `start()` when the content
//! script loads, `stop()` on extension disable.

mod injector;

pub use injector::*;

use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}
