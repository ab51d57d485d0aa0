//! WASM browser tests for snipbar-browser.
//!
//! Run with: `wasm-pack test --headless --firefox` or `--chrome`

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use snipbar_browser::{
    BAR_CONTAINER_ID, GEMINI, InjectorState, PageWatcher, Snippet, SyncStore, attempt_attach,
    insert_text,
};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Build a minimal copy of the host's input widget markup.
fn mount_host(document: &Document) {
    let body = document.body().unwrap();
    body.set_inner_html(
        r#"<input-area-v2>
            <input-container>
                <div class="input-area-container"></div>
            </input-container>
            <rich-textarea>
                <div class="ql-container">
                    <div class="ql-editor" contenteditable="true"></div>
                </div>
            </rich-textarea>
        </input-area-v2>"#,
    );
}

fn bar_count(document: &Document) -> u32 {
    document
        .query_selector_all(&format!("#{BAR_CONTAINER_ID}"))
        .unwrap()
        .length()
}

fn snippet(title: &str, text: &str) -> Snippet {
    Snippet {
        title: title.to_string(),
        text: text.to_string(),
    }
}

/// Yield to the browser so queued observer callbacks run.
async fn next_task() {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let window = web_sys::window().unwrap();
        window
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, 0)
            .unwrap();
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}

// === Attachment lifecycle ===

#[wasm_bindgen_test]
fn test_attach_is_idempotent() {
    let document = document();
    mount_host(&document);
    let state = InjectorState::shared();

    assert!(attempt_attach(&document, GEMINI, &state));
    assert!(!attempt_attach(&document, GEMINI, &state));
    assert!(!attempt_attach(&document, GEMINI, &state));
    assert_eq!(bar_count(&document), 1);
    assert!(state.borrow().is_attached());
}

#[wasm_bindgen_test]
fn test_reattach_after_host_teardown() {
    let document = document();
    mount_host(&document);
    let state = InjectorState::shared();

    assert!(attempt_attach(&document, GEMINI, &state));
    document
        .get_element_by_id(BAR_CONTAINER_ID)
        .unwrap()
        .remove();
    assert_eq!(bar_count(&document), 0);

    // The marker check, not a one-shot flag, gates duplicates, so the
    // rebuilt widget gets a fresh bar.
    assert!(attempt_attach(&document, GEMINI, &state));
    assert_eq!(bar_count(&document), 1);
}

#[wasm_bindgen_test]
fn test_attach_waits_for_bar_host() {
    let document = document();
    document
        .body()
        .unwrap()
        .set_inner_html("<input-area-v2><input-container></input-container></input-area-v2>");
    let state = InjectorState::shared();

    assert!(!attempt_attach(&document, GEMINI, &state));
    assert_eq!(bar_count(&document), 0);
}

#[wasm_bindgen_test]
async fn test_watcher_attaches_on_mutation_and_stops_clean() {
    let document = document();
    document.body().unwrap().set_inner_html("");

    let watcher = PageWatcher::start(GEMINI, SyncStore::new()).unwrap();
    mount_host(&document);
    next_task().await;

    assert_eq!(bar_count(&document), 1);
    assert!(watcher.state().borrow().is_attached());

    watcher.stop();
    assert_eq!(bar_count(&document), 0);
}

// === Button-bar rendering ===

#[wasm_bindgen_test]
fn test_render_labels_order_and_tooltips() {
    let document = document();
    mount_host(&document);
    let state = InjectorState::shared();
    assert!(attempt_attach(&document, GEMINI, &state));

    {
        let mut guard = state.borrow_mut();
        guard.set_snippets(vec![snippet("A", "a1"), snippet("", "b1\nb2")]);
        guard.render_cached(&document, GEMINI);
    }

    let container = document.get_element_by_id(BAR_CONTAINER_ID).unwrap();
    assert_eq!(container.child_element_count(), 2);

    let first = container.first_element_child().unwrap();
    assert_eq!(first.tag_name(), "BUTTON");
    assert_eq!(first.text_content().unwrap(), "A");
    assert_eq!(first.get_attribute("title").unwrap(), "a1");

    // Blank title falls back to the first non-empty text line.
    let second = first.next_element_sibling().unwrap();
    assert_eq!(second.text_content().unwrap(), "b1");
    assert_eq!(second.get_attribute("title").unwrap(), "b1\nb2");
}

#[wasm_bindgen_test]
fn test_render_follows_replacement_lists() {
    let document = document();
    mount_host(&document);
    let state = InjectorState::shared();
    assert!(attempt_attach(&document, GEMINI, &state));
    let container = document.get_element_by_id(BAR_CONTAINER_ID).unwrap();

    let mut guard = state.borrow_mut();
    guard.set_snippets(vec![snippet("A", "a1"), snippet("B", "b1")]);
    guard.render_cached(&document, GEMINI);
    assert_eq!(container.child_element_count(), 2);

    guard.set_snippets(Vec::new());
    guard.render_cached(&document, GEMINI);
    assert_eq!(container.child_element_count(), 0);

    guard.set_snippets(vec![snippet("C", "c1"), snippet("D", "d1")]);
    guard.render_cached(&document, GEMINI);
    assert_eq!(container.child_element_count(), 2);
    assert_eq!(
        container.first_element_child().unwrap().text_content().unwrap(),
        "C"
    );
}

// === Editor-insertion protocol ===

#[wasm_bindgen_test]
fn test_insert_line_round_trip() {
    let document = document();
    mount_host(&document);

    insert_text(GEMINI, "a\n\nb");

    let editor = document.query_selector(GEMINI.editor).unwrap().unwrap();
    // Three paragraphs plus two trailing blank markers.
    assert_eq!(editor.child_element_count(), 5);

    let paragraphs = editor.query_selector_all("p").unwrap();
    assert_eq!(paragraphs.length(), 3);

    // The blank line is an explicit line-break marker, not an empty node.
    let blank: Element = paragraphs.item(1).unwrap().dyn_into().unwrap();
    assert_eq!(blank.child_element_count(), 1);
    assert_eq!(blank.first_element_child().unwrap().tag_name(), "BR");

    // Visible lines reproduce the payload.
    let mut lines = Vec::new();
    for i in 0..paragraphs.length() {
        let paragraph: Element = paragraphs.item(i).unwrap().dyn_into().unwrap();
        if paragraph.query_selector("br").unwrap().is_some() {
            lines.push(String::new());
        } else {
            lines.push(paragraph.text_content().unwrap_or_default());
        }
    }
    assert_eq!(lines.join("\n"), "a\n\nb");

    // The trailing markers follow the last paragraph.
    let last = editor.last_element_child().unwrap();
    assert_eq!(last.tag_name(), "BR");
    assert_eq!(last.previous_element_sibling().unwrap().tag_name(), "BR");
}

#[wasm_bindgen_test]
fn test_cursor_lands_at_end_of_content() {
    let document = document();
    mount_host(&document);

    insert_text(GEMINI, "a\n\nb");

    let selection = web_sys::window().unwrap().get_selection().unwrap().unwrap();
    let anchor = selection.anchor_node().unwrap();
    // The caret sits in the last content paragraph's text node, not in the
    // trailing blank markers.
    assert_eq!(anchor.node_type(), web_sys::Node::TEXT_NODE);
    assert_eq!(anchor.text_content().unwrap(), "b");
    assert_eq!(selection.anchor_offset(), 1);
    assert_eq!(selection.focus_offset(), 1);
}

#[wasm_bindgen_test]
fn test_insert_blank_payload_keeps_one_blank_line() {
    let document = document();
    mount_host(&document);

    insert_text(GEMINI, "");

    let editor = document.query_selector(GEMINI.editor).unwrap().unwrap();
    // One blank paragraph plus the two trailing markers.
    assert_eq!(editor.child_element_count(), 3);
    let paragraph = editor.first_element_child().unwrap();
    assert_eq!(paragraph.tag_name(), "P");
    assert_eq!(paragraph.first_element_child().unwrap().tag_name(), "BR");
}

#[wasm_bindgen_test]
fn test_insert_preserves_interior_whitespace() {
    let document = document();
    mount_host(&document);

    insert_text(GEMINI, "  keep  me  ");

    let editor = document.query_selector(GEMINI.editor).unwrap().unwrap();
    let paragraph = editor.first_element_child().unwrap();
    assert_eq!(paragraph.text_content().unwrap(), "  keep  me  ");
}

#[wasm_bindgen_test]
fn test_insert_without_editor_is_a_no_op() {
    let document = document();
    let body = document.body().unwrap();
    body.set_inner_html("<main><p>host content</p></main>");
    let before = body.inner_html();

    insert_text(GEMINI, "anything");

    assert_eq!(body.inner_html(), before);
}
