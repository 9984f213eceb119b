//! Navigation strategy used when a session expires

use crate::Result;
use std::rc::Rc;

/// Sends the user somewhere else, usually a full page navigation
#[cfg_attr(test, mockall::automock)]
pub trait Redirect {
    fn redirect(&self, target: &str) -> Result<()>;
}

impl<T: Redirect + ?Sized> Redirect for Rc<T> {
    fn redirect(&self, target: &str) -> Result<()> {
        (**self).redirect(target)
    }
}

impl<T: Redirect + ?Sized> Redirect for &T {
    fn redirect(&self, target: &str) -> Result<()> {
        (**self).redirect(target)
    }
}

#[cfg(any(test, feature = "tests"))]
pub use recording::RecordingRedirect;

#[cfg(any(test, feature = "tests"))]
mod recording {
    use super::Redirect;
    use crate::Result;
    use std::cell::RefCell;

    /// Records every target instead of navigating
    #[derive(Debug, Default)]
    pub struct RecordingRedirect {
        visited: RefCell<Vec<String>>,
    }

    impl RecordingRedirect {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn visited(&self) -> Vec<String> {
            self.visited.borrow().clone()
        }

        pub fn last(&self) -> Option<String> {
            self.visited.borrow().last().cloned()
        }

        pub fn count(&self) -> usize {
            self.visited.borrow().len()
        }
    }

    impl Redirect for RecordingRedirect {
        fn redirect(&self, target: &str) -> Result<()> {
            self.visited.borrow_mut().push(target.to_string());
            Ok(())
        }
    }
}
