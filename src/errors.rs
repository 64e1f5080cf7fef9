//! Errors of subscribers notification.

use std::{error::Error, fmt, rc::Rc};

use derive_more::Display;

/// Result returned by every subscriber callback.
pub type CallbackResult = Result<(), CallbackError>;

/// Error returned by a subscriber callback.
///
/// Any [`Error`] converts into it, so `?` operator works inside callbacks.
#[derive(Clone, Debug, Display)]
#[display(fmt = "{}", _0)]
pub struct CallbackError(Rc<dyn Error>);

impl CallbackError {
    /// Creates a new [`CallbackError`] carrying the provided message only.
    pub fn new<M: Into<String>>(msg: M) -> Self {
        Self(Rc::new(Message(msg.into())))
    }

    /// Returns the underlying [`Error`].
    #[inline]
    pub fn get_ref(&self) -> &(dyn Error + 'static) {
        self.0.as_ref()
    }
}

impl<E: Error + 'static> From<E> for CallbackError {
    #[inline]
    fn from(err: E) -> Self {
        Self(Rc::new(err))
    }
}

/// Plain-text [`Error`] created by [`CallbackError::new`].
#[derive(Debug, Display)]
struct Message(String);

impl Error for Message {}

/// Error of a [`Container`] write, when some of the notified subscribers
/// failed.
///
/// All the callbacks queued by the write are awaited before this error is
/// returned, and every failure is kept in the order the subscribers were
/// registered in.
///
/// [`Container`]: crate::Container
#[derive(Clone, Debug)]
pub struct NotifyError {
    /// Failures of the subscriber callbacks.
    failures: Vec<CallbackError>,
}

impl NotifyError {
    /// Creates a new [`NotifyError`] out of the collected `failures`.
    pub(crate) fn new(failures: Vec<CallbackError>) -> Self {
        Self { failures }
    }

    /// Returns all the failures of the subscriber callbacks.
    #[inline]
    pub fn failures(&self) -> &[CallbackError] {
        &self.failures
    }

    /// Returns the failure of the earliest registered subscriber.
    #[inline]
    pub fn first(&self) -> Option<&CallbackError> {
        self.failures.first()
    }
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} subscriber(s) failed to handle update",
            self.failures.len(),
        )?;
        if let Some(first) = self.first() {
            write!(f, ": {}", first)?;
        }
        Ok(())
    }
}

impl Error for NotifyError {}
