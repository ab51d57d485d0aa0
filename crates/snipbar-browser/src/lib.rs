//! Browser DOM layer for the snipbar injector.
//!
//! Detects the host chat widget as it mounts, injects the snippet button
//! bar exactly once per live mount, and drives the editor-insertion
//! protocol. Assumes a `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `selectors`: the informally-versioned host markup contract
//! - `store`: read/subscribe bridge to the extension's snippet storage
//! - `watch`: mutation observation and the injector lifecycle handle
//! - `attach`: marker-gated, idempotent bar attachment
//! - `bar`: button-bar rendering from store data
//! - `insert`: the editor-insertion protocol
//!
//! # Re-exports
//!
//! This crate re-exports `snipbar-core` for convenience, so consumers only
//! need to depend on `snipbar-browser`.

// Re-export core crate
pub use snipbar_core;
pub use snipbar_core::*;

pub mod attach;
pub mod bar;
pub mod insert;
pub mod selectors;
pub mod store;
pub mod watch;

pub use attach::{InjectorState, attempt_attach};
pub use bar::SnippetBar;
pub use insert::insert_text;
pub use selectors::{BAR_CONTAINER_ID, BUTTON_CLASS, GEMINI, HostSelectors};
pub use store::{STORAGE_KEY, StoreError, StoreSubscription, SyncStore};
pub use watch::PageWatcher;
