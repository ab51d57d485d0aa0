//! snipbar-core: pure snippet and insertion-planning logic.
//!
//! This crate holds every decision that does not require a live DOM:
//! - `snippet`: the snippet record, legacy-shape normalization, label derivation
//! - `paragraph`: line splitting into a paragraph plan for insertion
//! - `caret`: the caret placement decision table
//! - `platform`: the error type shared with platform (DOM) layers
//!
//! The browser layer (`snipbar-browser`) transcribes these decisions into
//! DOM operations; keeping them here makes them natively testable.

pub mod caret;
pub mod paragraph;
pub mod platform;
pub mod snippet;

pub use caret::{CaretPlacement, LastLineNode, caret_placement};
pub use paragraph::{ParagraphNode, TRAILING_BLANK_MARKERS, paragraph_plan, visible_text};
pub use platform::InjectError;
pub use snippet::{Snippet, StoredRecord, UNTITLED_LABEL};
