//! Marker-gated attachment of the button bar into the host page.

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::Document;

use snipbar_core::Snippet;

use crate::bar::SnippetBar;
use crate::selectors::{BAR_CONTAINER_ID, HostSelectors};

/// Shared injector state threaded through the watcher, the renderer and
/// the storage subscription.
///
/// Holds at most one bar handle and one wholesale copy of the snippet
/// list; both are replaced, never patched.
pub struct InjectorState {
    pub(crate) bar: Option<SnippetBar>,
    pub(crate) snippets: Vec<Snippet>,
}

impl InjectorState {
    /// Fresh state behind the shared handle the callbacks clone.
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            bar: None,
            snippets: Vec::new(),
        }))
    }

    /// Replace the cached snippet list wholesale.
    pub fn set_snippets(&mut self, snippets: Vec<Snippet>) {
        self.snippets = snippets;
    }

    /// Whether a bar handle is currently installed.
    pub fn is_attached(&self) -> bool {
        self.bar.is_some()
    }

    /// Re-render the attached bar from the cached list. No-op when
    /// detached.
    pub fn render_cached(&mut self, document: &Document, selectors: HostSelectors) {
        let Self { bar, snippets } = self;
        if let Some(bar) = bar {
            bar.render(document, selectors, snippets);
        }
    }
}

/// Try to attach the button bar, returning true when a new bar was created.
///
/// The presence of [`BAR_CONTAINER_ID`] in the document is the sole gate
/// against duplicates: the host may tear down and rebuild its input widget
/// without a page reload, so a removed bar must be re-attachable while a
/// live one must never be doubled.
pub fn attempt_attach(
    document: &Document,
    selectors: HostSelectors,
    state: &Rc<RefCell<InjectorState>>,
) -> bool {
    if document.get_element_by_id(BAR_CONTAINER_ID).is_some() {
        return false;
    }

    let Ok(Some(input_host)) = document.query_selector(selectors.input_host) else {
        return false;
    };
    // The widget builds its subtrees lazily; if the bar host is not there
    // yet, wait for the next mutation batch.
    let Ok(Some(bar_host)) = input_host.query_selector(selectors.bar_host) else {
        return false;
    };

    let Ok(container) = document.create_element("div") else {
        return false;
    };
    container.set_id(BAR_CONTAINER_ID);
    if bar_host.append_child(container.as_ref()).is_err() {
        return false;
    }

    let mut bar = SnippetBar::new(container);
    let mut state_ref = state.borrow_mut();
    bar.render(document, selectors, &state_ref.snippets);
    state_ref.bar = Some(bar);
    tracing::debug!("attached snippet bar");
    true
}
