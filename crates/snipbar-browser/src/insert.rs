//! The editor-insertion protocol.
//!
//! Replaces the host editor's content with a multi-line payload, formatted
//! the way the host's own typing would produce it, then restores focus,
//! notifies the host, places the caret and scrolls the content into view.
//! Every lookup failure degrades to a silent no-op for that step; nothing
//! here may break or lock up the page.

use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, InputEvent, InputEventInit, Node, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

use snipbar_core::{
    CaretPlacement, InjectError, LastLineNode, ParagraphNode, TRAILING_BLANK_MARKERS,
    caret_placement, paragraph_plan,
};

use crate::selectors::HostSelectors;

/// Insert `text` into the host editor, replacing its current content.
///
/// Silent when the editor is not mounted; the host may still be
/// constructing its widget, and the next user action simply retries.
pub fn insert_text(selectors: HostSelectors, text: &str) {
    if let Err(err) = insert_text_impl(selectors, text) {
        tracing::debug!(%err, "insertion skipped");
    }
}

fn insert_text_impl(selectors: HostSelectors, text: &str) -> Result<(), InjectError> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    // Without the editor there is nothing to mutate at all; abort before
    // touching any state.
    let editor = document
        .query_selector(selectors.editor)
        .map_err(|e| InjectError(format!("editor selector failed: {e:?}")))?
        .ok_or("editor not mounted")?;

    // Clear and rebuild run synchronously with no suspension point in
    // between; no intermediate state is ever observable.
    editor.set_inner_html("");
    let mut last_paragraph: Option<Element> = None;
    for node in paragraph_plan(text) {
        let paragraph = create_paragraph(&document, &node)?;
        editor
            .append_child(paragraph.as_ref())
            .map_err(|e| InjectError(format!("paragraph append failed: {e:?}")))?;
        last_paragraph = Some(paragraph);
    }
    for _ in 0..TRAILING_BLANK_MARKERS {
        let marker = document
            .create_element("br")
            .map_err(|e| InjectError(format!("marker creation failed: {e:?}")))?;
        editor
            .append_child(marker.as_ref())
            .map_err(|e| InjectError(format!("marker append failed: {e:?}")))?;
    }

    // Focus first, then let the notification bubble through the host's own
    // handlers so its state (send-button enablement) updates as it would
    // for manual typing.
    if let Some(html_editor) = editor.dyn_ref::<HtmlElement>() {
        let _ = html_editor.focus();
    }
    notify_host(&editor);

    // The caret belongs at the absolute end of the real content. The
    // trailing markers are typing room, not content, so the anchor is the
    // last appended paragraph.
    place_caret(&document, &window, &editor, last_paragraph.as_ref());

    // The host does not observe the mutation itself; hint its wrapper to
    // recompute its height for the new content.
    if let Ok(Some(wrapper)) = document.query_selector(selectors.layout_wrapper) {
        if let Some(wrapper) = wrapper.dyn_ref::<HtmlElement>() {
            let _ = wrapper.style().set_property("height", "auto");
        }
    }

    // Which element owns visible scrolling varies by host version; walk
    // the fallback chain in fixed order.
    scroll_to_end(&editor, selectors, last_paragraph.as_ref());

    Ok(())
}

fn create_paragraph(document: &Document, node: &ParagraphNode) -> Result<Element, InjectError> {
    let paragraph = document
        .create_element("p")
        .map_err(|e| InjectError(format!("paragraph creation failed: {e:?}")))?;
    match node {
        // An empty paragraph may visually collapse; an explicit line-break
        // marker keeps the blank line one line tall.
        ParagraphNode::Blank => {
            let marker = document
                .create_element("br")
                .map_err(|e| InjectError(format!("marker creation failed: {e:?}")))?;
            paragraph
                .append_child(marker.as_ref())
                .map_err(|e| InjectError(format!("marker append failed: {e:?}")))?;
        }
        ParagraphNode::Text(line) => paragraph.set_text_content(Some(line)),
    }
    Ok(paragraph)
}

/// Dispatch a bubbling synthetic `input` event on the editor.
fn notify_host(editor: &Element) {
    let init = InputEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    init.set_input_type("insertText");
    match InputEvent::new_with_event_init_dict("input", &init) {
        Ok(event) => {
            let _ = editor.dispatch_event(&event);
        }
        Err(err) => tracing::debug!(?err, "input event construction failed"),
    }
}

/// Apply the caret decision table via the Selection API.
fn place_caret(
    document: &Document,
    window: &Window,
    editor: &Element,
    last_paragraph: Option<&Element>,
) {
    let placement = caret_placement(last_paragraph.map(describe_last_child));

    let Ok(range) = document.create_range() else {
        return;
    };
    let anchored = match placement {
        CaretPlacement::TextEnd { offset } => {
            let Some(text_node) = last_paragraph.and_then(|p| p.last_child()) else {
                return;
            };
            range.set_start(&text_node, offset as u32).is_ok()
                && range.set_end(&text_node, offset as u32).is_ok()
        }
        CaretPlacement::LineEnd => {
            let Some(paragraph) = last_paragraph else {
                return;
            };
            let selected = range.select_node_contents(paragraph.as_ref()).is_ok();
            range.collapse_with_to_start(false);
            selected
        }
        CaretPlacement::EditorEnd => {
            let selected = range.select_node_contents(editor.as_ref()).is_ok();
            range.collapse_with_to_start(false);
            selected
        }
    };
    if !anchored {
        tracing::debug!("caret range could not be anchored");
        return;
    }

    let Ok(Some(selection)) = window.get_selection() else {
        return;
    };
    let _ = selection.remove_all_ranges();
    let _ = selection.add_range(&range);
}

fn describe_last_child(paragraph: &Element) -> LastLineNode {
    match paragraph.last_child() {
        Some(node) if node.node_type() == Node::TEXT_NODE => LastLineNode::Text {
            utf16_len: node
                .text_content()
                .map(|t| t.encode_utf16().count())
                .unwrap_or(0),
        },
        Some(_) => LastLineNode::Element,
        None => LastLineNode::Empty,
    }
}

/// Three-layer scroll fallback: the editor's own scroll region, the
/// nearest scrollable ancestor, then a smooth scroll of the last content
/// paragraph into view.
fn scroll_to_end(editor: &Element, selectors: HostSelectors, last_paragraph: Option<&Element>) {
    editor.set_scroll_top(editor.scroll_height());

    let scrollable = editor
        .closest(selectors.scroll_container)
        .ok()
        .flatten()
        .or_else(|| editor.parent_element());
    if let Some(scrollable) = scrollable {
        scrollable.set_scroll_top(scrollable.scroll_height());
    }

    if let Some(paragraph) = last_paragraph {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::End);
        paragraph.scroll_into_view_with_scroll_into_view_options(&options);
    }
}
