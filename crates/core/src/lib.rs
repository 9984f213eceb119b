//! Idle session watchdog core
//!
//! Platform-neutral pieces: the [`IdleTimer`] and the storage, clock and
//! redirect seams it is built on.

pub mod clock;
pub mod config;
pub mod errors;
pub mod redirect;
pub mod storage;
pub mod timer;
pub mod timestamp;
pub mod validation;


pub use clock::{Clock, SystemClock};
pub use config::{MalformedPolicy, WatchdogConfig};
pub use errors::{Error, Result};
pub use redirect::Redirect;
pub use storage::{ActivityStore, MemoryStore};
pub use timer::{CheckOutcome, IdleTimer};
pub use validation::ValidateConfig;

#[cfg(any(test, feature = "tests"))]
pub use clock::ManualClock;
#[cfg(any(test, feature = "tests"))]
pub use redirect::RecordingRedirect;
