//! JavaScript entry points

use crate::config::config_from_js;
use crate::logging::{init_logging, parse_level};
use crate::watchdog::IdleWatchdog;
use wasm_bindgen::prelude::*;

/// Handle returned to JS; the watchdog stays installed until `stop()`
#[wasm_bindgen]
pub struct IdleGuardHandle {
    watchdog: Option<IdleWatchdog>,
}

impl IdleGuardHandle {
    fn active(&self) -> Result<&IdleWatchdog, JsError> {
        self.watchdog
            .as_ref()
            .ok_or_else(|| JsError::new("idle guard has been stopped"))
    }
}

#[wasm_bindgen]
impl IdleGuardHandle {
    /// Run the idle check now; `true` when the session was ended
    pub fn check(&self) -> Result<bool, JsError> {
        Ok(self.active()?.check()?.is_logged_out())
    }

    /// Record activity now and return the stored timestamp
    #[allow(clippy::cast_precision_loss)]
    pub fn touch(&self) -> Result<f64, JsError> {
        Ok(self.active()?.touch()? as f64)
    }

    pub fn logout(&self) -> Result<(), JsError> {
        self.active()?.logout().map_err(JsError::from)
    }

    /// Milliseconds until the session counts as idle, `undefined` without a record
    #[allow(clippy::cast_precision_loss)]
    pub fn remaining(&self) -> Result<Option<f64>, JsError> {
        let remaining = self.active()?.timer().remaining()?;
        Ok(remaining.map(|d| d.as_millis() as f64))
    }

    /// Detach all listeners; later calls on this handle fail
    pub fn stop(&mut self) {
        self.watchdog = None;
    }
}

/// Install the idle watchdog, `options` follows the `WatchdogConfig` camelCase shape
#[wasm_bindgen(js_name = startIdleGuard)]
pub fn start_idle_guard(options: JsValue) -> Result<IdleGuardHandle, JsError> {
    let config = config_from_js(options)?;
    let watchdog = IdleWatchdog::install(config)?;
    Ok(IdleGuardHandle {
        watchdog: Some(watchdog),
    })
}

/// Send `tracing` output to the console, e.g. `initIdleGuardLogging("debug")`
#[wasm_bindgen(js_name = initIdleGuardLogging)]
pub fn init_idle_guard_logging(level: Option<String>) {
    init_logging(parse_level(level.as_deref()));
}

#[cfg(feature = "autostart")]
#[wasm_bindgen(start)]
pub fn autostart() {
    init_logging(tracing::Level::INFO);

    let installed = crate::config::config_from_document().and_then(IdleWatchdog::install);
    match installed {
        Ok(watchdog) => watchdog.forget(),
        Err(e) => tracing::error!(error = %e, "Failed to start idle guard"),
    }
}
