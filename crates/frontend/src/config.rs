//! Watchdog configuration sourced from the page

use crate::browser::{document, js_message};
use idle_guard_core::{Error, Result, WatchdogConfig};
use wasm_bindgen::JsValue;

/// `<meta name="idle-guard" content='{"idleTimeoutMs": 600000}'>`
pub const META_SELECTOR: &str = r#"meta[name="idle-guard"]"#;

/// Read the config from the page's meta tag, defaults when there is none
pub fn config_from_document() -> Result<WatchdogConfig> {
    let document = document()?;
    let element = document
        .query_selector(META_SELECTOR)
        .map_err(|e| Error::Host(js_message(&e)))?;

    match element.and_then(|el| el.get_attribute("content")) {
        Some(json) if !json.trim().is_empty() => WatchdogConfig::from_json_str(&json),
        _ => Ok(WatchdogConfig::default()),
    }
}

/// Build a config from a JS options object, `undefined`/`null` meaning defaults
pub fn config_from_js(options: JsValue) -> Result<WatchdogConfig> {
    if options.is_undefined() || options.is_null() {
        return Ok(WatchdogConfig::default());
    }

    let patch: serde_json::Value = serde_wasm_bindgen::from_value(options)
        .map_err(|e| Error::config_message(format!("invalid options: {e}")))?;
    WatchdogConfig::default().with_patch(&patch)
}
