//! Custom hooks

pub mod use_idle_watchdog;

pub use use_idle_watchdog::{IdleGuard, IdleGuardProps, use_idle_watchdog};
