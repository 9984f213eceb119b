//! Browser implementations of the core host traits

use idle_guard_core::{ActivityStore, Clock, Error, Redirect, Result};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Storage;

/// Best-effort text for a thrown JS value
pub(crate) fn js_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{value:?}")
}

pub(crate) fn document() -> Result<web_sys::Document> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| Error::Host("no document in this context".to_string()))
}

/// `window.localStorage`
#[derive(Clone, Debug)]
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    /// Fails when storage is disabled, e.g. in sandboxed frames or some private modes
    pub fn new() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| Error::StorageUnavailable("no window in this context".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| Error::StorageUnavailable(js_message(&e)))?
            .ok_or_else(|| Error::StorageUnavailable("localStorage is disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl ActivityStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| Error::Storage(js_message(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| Error::Storage(js_message(&e)))
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| Error::Storage(js_message(&e)))
    }
}

/// `Date.now()`
#[derive(Clone, Copy, Debug, Default)]
pub struct JsClock;

impl Clock for JsClock {
    #[allow(clippy::cast_possible_truncation)]
    fn now_millis(&self) -> i64 {
        js_sys::Date::now() as i64
    }
}

/// Full page navigation through `window.location.href`
#[derive(Clone, Copy, Debug, Default)]
pub struct WindowRedirect;

impl Redirect for WindowRedirect {
    fn redirect(&self, target: &str) -> Result<()> {
        let window = web_sys::window()
            .ok_or_else(|| Error::Navigation("no window in this context".to_string()))?;
        window
            .location()
            .set_href(target)
            .map_err(|e| Error::Navigation(js_message(&e)))
    }
}
