//! Idle session timer
//!
//! Tracks the last observed user interaction in an [`ActivityStore`] and
//! ends the session through a [`Redirect`] once the configured idle timeout
//! has been exceeded.

use crate::clock::Clock;
use crate::config::{MalformedPolicy, WatchdogConfig};
use crate::redirect::Redirect;
use crate::storage::ActivityStore;
use crate::{Result, timestamp};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Result of a session check
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Session is live, the stored timestamp now equals `now`
    Refreshed { previous: Option<i64>, now: i64 },
    /// Session was idle for longer than the timeout and has been ended
    LoggedOut { idle_for: Duration },
}

impl CheckOutcome {
    pub fn is_logged_out(&self) -> bool {
        matches!(self, Self::LoggedOut { .. })
    }
}

/// What the store currently says about the last activity
enum Stored {
    Absent,
    Malformed(String),
    At(i64),
}

pub struct IdleTimer<S, C, R> {
    config: WatchdogConfig,
    store: S,
    clock: C,
    redirect: R,
}

impl<S, C, R> IdleTimer<S, C, R>
where
    S: ActivityStore,
    C: Clock,
    R: Redirect,
{
    pub fn new(config: WatchdogConfig, store: S, clock: C, redirect: R) -> Self {
        Self {
            config,
            store,
            clock,
            redirect,
        }
    }

    pub fn config(&self) -> &WatchdogConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run the idle check: log out when idle, otherwise refresh the timestamp
    pub fn check_session(&self) -> Result<CheckOutcome> {
        let now = self.clock.now_millis();

        let previous = match self.read()? {
            Stored::Absent => None,
            Stored::Malformed(raw) => match self.config.on_malformed {
                MalformedPolicy::TreatAsAbsent => {
                    warn!(key = %self.config.storage_key, value = %raw, "Ignoring malformed last-activity value");
                    None
                }
                MalformedPolicy::Logout => {
                    warn!(key = %self.config.storage_key, value = %raw, "Malformed last-activity value, ending session");
                    self.logout()?;
                    return Ok(CheckOutcome::LoggedOut {
                        idle_for: Duration::ZERO,
                    });
                }
            },
            Stored::At(last) => {
                let elapsed = now.saturating_sub(last);
                if self.exceeds_timeout(elapsed) {
                    let idle_for = Duration::from_millis(elapsed.unsigned_abs());
                    info!(idle_for_ms = elapsed, "Session idle past timeout");
                    self.logout()?;
                    return Ok(CheckOutcome::LoggedOut { idle_for });
                }
                Some(last)
            }
        };

        self.write(now)?;
        debug!(now, ?previous, "Session refreshed");
        Ok(CheckOutcome::Refreshed { previous, now })
    }

    /// Remove the stored timestamp and redirect to the logout target
    ///
    /// The redirect happens even if removal fails; the removal error is
    /// returned afterwards.
    pub fn logout(&self) -> Result<()> {
        let removed = self.store.remove(&self.config.storage_key);
        if let Err(e) = &removed {
            warn!(error = %e, "Failed to clear last-activity value before logout");
        }

        info!(logout_path = %self.config.logout_path, "Redirecting to logout");
        self.redirect.redirect(&self.config.logout_path)?;
        removed
    }

    /// Record user activity without checking the timeout
    pub fn record_activity(&self) -> Result<i64> {
        let now = self.clock.now_millis();
        self.write(now)?;
        Ok(now)
    }

    /// Last recorded activity, `None` when absent or unreadable
    pub fn last_activity(&self) -> Result<Option<i64>> {
        Ok(match self.read()? {
            Stored::At(last) => Some(last),
            Stored::Absent | Stored::Malformed(_) => None,
        })
    }

    /// Time since the last recorded activity, zero if it lies in the future
    pub fn idle_for(&self) -> Result<Option<Duration>> {
        let now = self.clock.now_millis();
        Ok(self.last_activity()?.map(|last| {
            Duration::from_millis(u64::try_from(now.saturating_sub(last)).unwrap_or(0))
        }))
    }

    /// Time left before the session counts as idle
    pub fn remaining(&self) -> Result<Option<Duration>> {
        let timeout = self.config.idle_timeout();
        Ok(self
            .idle_for()?
            .map(|idle| timeout.saturating_sub(idle)))
    }

    fn exceeds_timeout(&self, elapsed: i64) -> bool {
        u64::try_from(elapsed).is_ok_and(|elapsed| elapsed > self.config.idle_timeout_ms)
    }

    fn read(&self) -> Result<Stored> {
        Ok(match self.store.get(&self.config.storage_key)? {
            None => Stored::Absent,
            Some(raw) => match timestamp::parse(&raw) {
                Some(last) => Stored::At(last),
                None => Stored::Malformed(raw),
            },
        })
    }

    fn write(&self, now: i64) -> Result<()> {
        self.store
            .set(&self.config.storage_key, &timestamp::format(now))
    }
}
