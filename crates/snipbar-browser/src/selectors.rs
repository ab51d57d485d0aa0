//! Selector contract for the host page.
//!
//! The host markup is versioned informally and changes between releases;
//! every selector the injector touches lives here so a host update is a
//! one-file change.

/// Well-known id of the injected button-bar container.
///
/// Its presence in the document is the authoritative "already attached"
/// marker; see [`crate::attach::attempt_attach`].
pub const BAR_CONTAINER_ID: &str = "snipbar-container";

/// CSS class applied to each snippet button.
pub const BUTTON_CLASS: &str = "snippet-button";

/// Element selectors for one version of the host markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostSelectors {
    /// Element whose appearance signals that the input widget has mounted.
    pub mount_marker: &'static str,
    /// Outer input container the bar host lives under.
    pub input_host: &'static str,
    /// Immediate child container that receives the button bar.
    pub bar_host: &'static str,
    /// The rich-text editable region.
    pub editor: &'static str,
    /// Outer text-area wrapper, used only for layout-invalidation hints.
    pub layout_wrapper: &'static str,
    /// Preferred scrollable ancestor of the editor.
    pub scroll_container: &'static str,
}

/// Selector set for the Gemini web app.
pub const GEMINI: HostSelectors = HostSelectors {
    mount_marker: "input-area-v2",
    input_host: "input-container",
    bar_host: ".input-area-container",
    editor: "div.ql-editor",
    layout_wrapper: "rich-textarea",
    scroll_container: ".ql-container",
};

impl Default for HostSelectors {
    fn default() -> Self {
        GEMINI
    }
}
