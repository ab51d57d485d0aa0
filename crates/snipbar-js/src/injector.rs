//! The injector lifecycle handle exposed to JavaScript.

use wasm_bindgen::prelude::*;

use snipbar_browser::{HostSelectors, PageWatcher, SyncStore, insert_text};

/// Content-script entry point: watches the host page and maintains the
/// snippet button bar.
#[wasm_bindgen]
pub struct SnippetInjector {
    selectors: HostSelectors,
    store: SyncStore,
    watcher: Option<PageWatcher>,
}

#[wasm_bindgen]
impl SnippetInjector {
    /// Create an injector for the default (Gemini) host markup.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            selectors: HostSelectors::default(),
            store: SyncStore::new(),
            watcher: None,
        }
    }

    /// Begin watching the page.
    ///
    /// Replaces any previous watcher; the old one tears down first, so the
    /// call is safe to repeat.
    pub fn start(&mut self) -> Result<(), JsError> {
        self.watcher = None;
        let watcher = PageWatcher::start(self.selectors, self.store)
            .map_err(|e| JsError::new(&e.to_string()))?;
        self.watcher = Some(watcher);
        Ok(())
    }

    /// Stop watching and remove the injected bar.
    pub fn stop(&mut self) {
        self.watcher = None;
    }

    /// Whether the watcher is currently active.
    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.watcher.is_some()
    }

    /// Insert text into the host editor directly, bypassing the bar.
    #[wasm_bindgen(js_name = insertText)]
    pub fn insert_text(&self, text: &str) {
        insert_text(self.selectors, text);
    }
}

impl Default for SnippetInjector {
    fn default() -> Self {
        Self::new()
    }
}
