//! Read/subscribe bridge to the extension's snippet storage.
//!
//! The snippet list lives in `chrome.storage.sync` under a fixed key and
//! is written by the management surface (popup); this side only reads and
//! listens. The extension API is resolved dynamically through
//! `js_sys::Reflect` rather than a static import, so a page without it
//! (tests, plain tabs) degrades to [`StoreError::Unavailable`] instead of
//! failing at load time.

use js_sys::{Function, Reflect};
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen_futures::JsFuture;

use snipbar_core::{Snippet, StoredRecord};

/// Storage key holding the ordered snippet list.
pub const STORAGE_KEY: &str = "snippets";

/// Storage area name carried by change notifications we care about.
const SYNC_AREA: &str = "sync";

/// Error type for store bridge operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The extension storage API is not reachable from this page.
    #[error("extension storage api unavailable (`{0}` missing)")]
    Unavailable(String),
    /// The storage call itself failed.
    #[error("storage read failed: {0}")]
    Read(String),
}

/// Thin handle over `chrome.storage.sync` for the snippet list.
#[derive(Debug, Clone, Copy)]
pub struct SyncStore {
    key: &'static str,
}

impl SyncStore {
    /// Store handle for the default snippet key.
    pub fn new() -> Self {
        Self { key: STORAGE_KEY }
    }

    /// Read the full snippet list.
    ///
    /// A missing key yields an empty list. Elements are decoded
    /// one-by-one and normalized, so a malformed record is skipped
    /// without poisoning its neighbors.
    pub async fn read(&self) -> Result<Vec<Snippet>, StoreError> {
        let area = resolve_path(&["chrome", "storage", "sync"])?;
        let get = member_function(&area, "get")?;
        let promise = get
            .call1(&area, &JsValue::from_str(self.key))
            .map_err(|e| StoreError::Read(format!("{e:?}")))?
            .dyn_into::<js_sys::Promise>()
            .map_err(|_| StoreError::Read("storage get did not return a promise".to_string()))?;

        let result = JsFuture::from(promise)
            .await
            .map_err(|e| StoreError::Read(format!("{e:?}")))?;
        let records = Reflect::get(&result, &JsValue::from_str(self.key))
            .unwrap_or(JsValue::UNDEFINED);
        Ok(decode_records(&records))
    }

    /// Subscribe to external changes of the snippet list.
    ///
    /// The handler receives the full replacement list every time the key
    /// changes in the sync area. The returned subscription owns the JS
    /// listener; dropping it detaches the listener.
    pub fn on_change(
        &self,
        mut handler: impl FnMut(Vec<Snippet>) + 'static,
    ) -> Result<StoreSubscription, StoreError> {
        let event = resolve_path(&["chrome", "storage", "onChanged"])?;
        let add = member_function(&event, "addListener")?;

        let key = self.key;
        let listener = Closure::wrap(Box::new(move |changes: JsValue, area_name: JsValue| {
            if area_name.as_string().as_deref() != Some(SYNC_AREA) {
                return;
            }
            let Ok(change) = Reflect::get(&changes, &JsValue::from_str(key)) else {
                return;
            };
            if change.is_undefined() {
                return;
            }
            // A deleted key has no newValue; that reads as an empty list.
            let new_value =
                Reflect::get(&change, &JsValue::from_str("newValue")).unwrap_or(JsValue::UNDEFINED);
            handler(decode_records(&new_value));
        }) as Box<dyn FnMut(JsValue, JsValue)>);

        add.call1(&event, listener.as_ref().unchecked_ref())
            .map_err(|e| StoreError::Read(format!("addListener failed: {e:?}")))?;

        Ok(StoreSubscription { event, listener })
    }
}

impl Default for SyncStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Owned storage-change subscription.
///
/// Detaches the underlying JS listener when dropped, so the closure can
/// never be invoked after it is freed.
pub struct StoreSubscription {
    event: JsValue,
    listener: Closure<dyn FnMut(JsValue, JsValue)>,
}

impl Drop for StoreSubscription {
    fn drop(&mut self) {
        let Ok(remove) = member_function(&self.event, "removeListener") else {
            return;
        };
        if let Err(err) = remove.call1(&self.event, self.listener.as_ref().unchecked_ref()) {
            tracing::debug!(?err, "storage listener removal failed");
        }
    }
}

/// Walk a dotted global path, erroring on the first missing segment.
fn resolve_path(segments: &[&str]) -> Result<JsValue, StoreError> {
    let mut current: JsValue = js_sys::global().into();
    for segment in segments {
        current = Reflect::get(&current, &JsValue::from_str(segment))
            .map_err(|_| StoreError::Unavailable((*segment).to_string()))?;
        if current.is_undefined() || current.is_null() {
            return Err(StoreError::Unavailable((*segment).to_string()));
        }
    }
    Ok(current)
}

fn member_function(target: &JsValue, name: &str) -> Result<Function, StoreError> {
    Reflect::get(target, &JsValue::from_str(name))
        .map_err(|_| StoreError::Unavailable(name.to_string()))?
        .dyn_into::<Function>()
        .map_err(|_| StoreError::Unavailable(name.to_string()))
}

/// Decode a stored value into normalized snippets.
///
/// Anything that is not an array reads as empty. Elements decode
/// individually; undecodable ones are skipped.
fn decode_records(value: &JsValue) -> Vec<Snippet> {
    let Some(array) = value.dyn_ref::<js_sys::Array>() else {
        return Vec::new();
    };
    array
        .iter()
        .filter_map(|entry| match serde_wasm_bindgen::from_value::<StoredRecord>(entry) {
            Ok(record) => record.normalize(),
            Err(err) => {
                tracing::debug!(%err, "skipping undecodable snippet record");
                None
            }
        })
        .collect()
}
