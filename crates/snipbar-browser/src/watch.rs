//! Mutation observation and the injector lifecycle handle.
//!
//! The host is a single-page application that mounts its input widget
//! lazily and may tear it down and rebuild it without a page reload. The
//! watcher observes the whole document subtree and re-runs the attachment
//! attempt on every mutation batch; absence of the widget is "not yet
//! mounted", never a failure.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{MutationObserver, MutationObserverInit};

use snipbar_core::InjectError;

use crate::attach::{InjectorState, attempt_attach};
use crate::selectors::HostSelectors;
use crate::store::{StoreSubscription, SyncStore};

/// Long-lived handle for the injector lifecycle.
///
/// Owns the mutation subscription, its callback, the storage subscription
/// and the shared state. Dropping the handle (or calling [`stop`]) cancels
/// observation, detaches the storage listener and removes the bar.
///
/// [`stop`]: PageWatcher::stop
pub struct PageWatcher {
    observer: MutationObserver,
    state: Rc<RefCell<InjectorState>>,
    _on_mutations: Closure<dyn FnMut()>,
    _store_subscription: Option<StoreSubscription>,
}

impl PageWatcher {
    /// Begin continuous observation of the document for the host widget.
    pub fn start(selectors: HostSelectors, store: SyncStore) -> Result<Self, InjectError> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let body = document.body().ok_or("document has no body")?;

        let state = InjectorState::shared();

        // External edits push the full replacement list; re-render only,
        // editor state is untouched.
        let store_state = Rc::clone(&state);
        let store_subscription = match store.on_change(move |snippets| {
            let mut guard = store_state.borrow_mut();
            guard.set_snippets(snippets);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                guard.render_cached(&document, selectors);
            }
        }) {
            Ok(subscription) => Some(subscription),
            Err(err) => {
                tracing::warn!(%err, "storage change subscription unavailable");
                None
            }
        };

        let mutation_state = Rc::clone(&state);
        let on_mutations = Closure::wrap(Box::new(move || {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if document
                .query_selector(selectors.mount_marker)
                .ok()
                .flatten()
                .is_none()
            {
                return;
            }
            if attempt_attach(&document, selectors, &mutation_state) {
                // Freshly attached: render once from the store so the bar
                // does not wait for the next external edit.
                let load_state = Rc::clone(&mutation_state);
                wasm_bindgen_futures::spawn_local(async move {
                    match store.read().await {
                        Ok(snippets) => {
                            let mut guard = load_state.borrow_mut();
                            guard.set_snippets(snippets);
                            if let Some(document) =
                                web_sys::window().and_then(|w| w.document())
                            {
                                guard.render_cached(&document, selectors);
                            }
                        }
                        Err(err) => tracing::warn!(%err, "initial snippet load failed"),
                    }
                });
            }
        }) as Box<dyn FnMut()>);

        let observer = MutationObserver::new(on_mutations.as_ref().unchecked_ref())
            .map_err(|e| InjectError(format!("observer creation failed: {e:?}")))?;
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        observer
            .observe_with_options(body.as_ref(), &init)
            .map_err(|e| InjectError(format!("observe failed: {e:?}")))?;

        Ok(Self {
            observer,
            state,
            _on_mutations: on_mutations,
            _store_subscription: store_subscription,
        })
    }

    /// The shared injector state.
    pub fn state(&self) -> &Rc<RefCell<InjectorState>> {
        &self.state
    }

    /// Explicit teardown: cancel observation, detach the storage listener
    /// and remove the bar element if present. Equivalent to dropping the
    /// handle.
    pub fn stop(self) {}
}

impl Drop for PageWatcher {
    fn drop(&mut self) {
        self.observer.disconnect();
        if let Some(bar) = self.state.borrow_mut().bar.take() {
            bar.remove();
        }
    }
}
