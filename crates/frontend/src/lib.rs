//! Browser binding for the idle session watchdog
//!
//! Wires [`idle_guard_core::IdleTimer`] to `localStorage`, `Date.now()`,
//! `window.location` and document events.

pub mod bindings;
pub mod browser;
pub mod config;
pub mod hooks;
pub mod logging;
pub mod watchdog;

pub use bindings::{IdleGuardHandle, start_idle_guard};
pub use browser::{JsClock, LocalStorageStore, WindowRedirect};
pub use config::{config_from_document, config_from_js};
pub use hooks::{IdleGuard, use_idle_watchdog};
pub use logging::init_logging;
pub use watchdog::{BrowserIdleTimer, IdleWatchdog};
