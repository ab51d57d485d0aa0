//! Button-bar rendering from store data.

use gloo_events::EventListener;
use web_sys::{Document, Element};

use snipbar_core::Snippet;

use crate::insert::insert_text;
use crate::selectors::{BUTTON_CLASS, HostSelectors};

/// Handle to the injected button bar.
///
/// Owns the container element and the click listeners for its buttons.
/// Re-rendering replaces both, so stale listeners drop with their buttons.
pub struct SnippetBar {
    container: Element,
    listeners: Vec<EventListener>,
}

impl SnippetBar {
    pub(crate) fn new(container: Element) -> Self {
        Self {
            container,
            listeners: Vec::new(),
        }
    }

    /// The injected container element.
    pub fn container(&self) -> &Element {
        &self.container
    }

    /// Re-render the bar from a full snippet list.
    ///
    /// Clears existing controls and creates one button per snippet in list
    /// order: visible label from the display title, full text as the
    /// tooltip, click bound to the insertion protocol. Safe to call
    /// repeatedly; the latest call fully determines what is visible.
    pub fn render(&mut self, document: &Document, selectors: HostSelectors, snippets: &[Snippet]) {
        self.listeners.clear();
        self.container.set_inner_html("");

        for snippet in snippets {
            let Ok(button) = document.create_element("button") else {
                continue;
            };
            button.set_class_name(BUTTON_CLASS);
            button.set_text_content(Some(snippet.display_title()));
            let _ = button.set_attribute("title", &snippet.text);

            let text = snippet.text.clone();
            let listener = EventListener::new(button.as_ref(), "click", move |_event| {
                insert_text(selectors, &text);
            });

            if self.container.append_child(button.as_ref()).is_ok() {
                self.listeners.push(listener);
            }
        }

        tracing::debug!(count = snippets.len(), "rendered snippet bar");
    }

    /// Remove the bar from the document, dropping its listeners with it.
    pub fn remove(self) {
        self.container.remove();
    }
}
