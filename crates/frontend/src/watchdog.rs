//! DOM wiring for the idle timer

use crate::browser::{JsClock, LocalStorageStore, WindowRedirect, document};
use gloo_events::EventListener;
use gloo_timers::callback::Interval;
use idle_guard_core::{
    ActivityStore, CheckOutcome, Clock, IdleTimer, Redirect, Result, ValidateConfig,
    WatchdogConfig,
};
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, error};

/// Timer backed by `localStorage`, `Date.now()` and `window.location`
pub type BrowserIdleTimer = IdleTimer<LocalStorageStore, JsClock, WindowRedirect>;

/// State shared with the event callbacks
struct Shared<S, C, R> {
    timer: IdleTimer<S, C, R>,
    // Set once a logout has been issued; the page is on its way out
    ended: Cell<bool>,
}

impl<S, C, R> Shared<S, C, R>
where
    S: ActivityStore,
    C: Clock,
    R: Redirect,
{
    fn check(&self) -> Result<CheckOutcome> {
        let outcome = self.timer.check_session()?;
        if outcome.is_logged_out() {
            self.ended.set(true);
        }
        Ok(outcome)
    }

    fn on_check(&self) {
        if self.ended.get() {
            return;
        }
        if let Err(e) = self.check() {
            error!(error = %e, "Idle session check failed");
        }
    }

    fn on_activity(&self) {
        if self.ended.get() {
            return;
        }
        if let Err(e) = self.timer.record_activity() {
            error!(error = %e, "Failed to record activity");
        }
    }
}

/// Installed watchdog; dropping it detaches every listener and the interval
pub struct IdleWatchdog<S = LocalStorageStore, C = JsClock, R = WindowRedirect> {
    shared: Rc<Shared<S, C, R>>,
    listeners: Vec<EventListener>,
    interval: Option<Interval>,
}

impl IdleWatchdog {
    /// Validate `config` and install a watchdog over the real browser APIs
    pub fn install(config: WatchdogConfig) -> Result<Self> {
        config.validate()?;
        let timer = IdleTimer::new(config, LocalStorageStore::new()?, JsClock, WindowRedirect);
        Self::with_timer(timer)
    }
}

impl<S, C, R> IdleWatchdog<S, C, R>
where
    S: ActivityStore + 'static,
    C: Clock + 'static,
    R: Redirect + 'static,
{
    /// Bind an already built timer to the current document
    ///
    /// The load check runs on `DOMContentLoaded` while the document is still
    /// loading, and immediately otherwise.
    pub fn with_timer(timer: IdleTimer<S, C, R>) -> Result<Self> {
        let document = document()?;
        let shared = Rc::new(Shared {
            timer,
            ended: Cell::new(false),
        });
        let mut listeners = Vec::new();

        if document.ready_state() == "loading" {
            let shared = Rc::clone(&shared);
            listeners.push(EventListener::once(
                &document,
                "DOMContentLoaded",
                move |_| shared.on_check(),
            ));
        } else {
            shared.on_check();
        }

        for event in &shared.timer.config().activity_events {
            let handler = Rc::clone(&shared);
            listeners.push(EventListener::new(&document, event.clone(), move |_| {
                handler.on_activity();
            }));
        }

        let interval = shared.timer.config().check_interval_ms.map(|millis| {
            let shared = Rc::clone(&shared);
            Interval::new(millis, move || shared.on_check())
        });

        debug!(
            events = ?shared.timer.config().activity_events,
            interval_ms = ?shared.timer.config().check_interval_ms,
            "Idle watchdog installed"
        );

        Ok(Self {
            shared,
            listeners,
            interval,
        })
    }

    pub fn timer(&self) -> &IdleTimer<S, C, R> {
        &self.shared.timer
    }

    /// Whether this watchdog has already sent the user to logout
    pub fn has_ended(&self) -> bool {
        self.shared.ended.get()
    }

    /// Run the idle check now
    pub fn check(&self) -> Result<CheckOutcome> {
        self.shared.check()
    }

    /// Record activity now, as a click would
    pub fn touch(&self) -> Result<i64> {
        self.shared.timer.record_activity()
    }

    /// End the session immediately
    pub fn logout(&self) -> Result<()> {
        self.shared.ended.set(true);
        self.shared.timer.logout()
    }

    /// Keep the listeners and interval alive for the rest of the page's life
    pub fn forget(self) {
        for listener in self.listeners {
            listener.forget();
        }
        if let Some(interval) = self.interval {
            let _ = interval.forget();
        }
    }
}
