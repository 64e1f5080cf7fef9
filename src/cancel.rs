//! One-shot cancellation signal used to cancel subscriptions from outside.

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
};

/// ID of a listener registered with [`CancelSignal::on_cancel`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ListenerId(u64);

/// Owner side of a [`CancelSignal`].
///
/// ```
/// use containerized_state::CancelController;
///
/// let controller = CancelController::new();
/// let signal = controller.signal();
/// assert!(!signal.is_cancelled());
///
/// controller.cancel();
/// assert!(signal.is_cancelled());
/// ```
#[derive(Debug, Default)]
pub struct CancelController {
    /// [`CancelSignal`] fired by this [`CancelController`].
    signal: CancelSignal,
}

impl CancelController {
    /// Creates a new [`CancelController`] with a not cancelled
    /// [`CancelSignal`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the [`CancelSignal`] controlled by this [`CancelController`].
    #[inline]
    pub fn signal(&self) -> CancelSignal {
        self.signal.clone()
    }

    /// Cancels the [`CancelSignal`], calling all its listeners once.
    ///
    /// Does nothing if it has been cancelled already.
    pub fn cancel(&self) {
        self.signal.fire();
    }
}

/// Cancellation token which may be observed by any number of listeners.
#[derive(Clone, Default)]
pub struct CancelSignal(Rc<Inner>);

/// Shared state of a [`CancelSignal`].
#[derive(Default)]
struct Inner {
    /// Indicator whether the signal has been fired.
    cancelled: Cell<bool>,

    /// Listeners waiting for the signal to fire.
    listeners: RefCell<Vec<(ListenerId, Box<dyn FnOnce()>)>>,

    /// Sequence of [`ListenerId`]s.
    last_id: Cell<u64>,
}

impl CancelSignal {
    /// Returns a [`CancelSignal`] which is cancelled already.
    pub fn cancelled() -> Self {
        let signal = Self::default();
        signal.0.cancelled.set(true);
        signal
    }

    /// Indicates whether this [`CancelSignal`] has been cancelled.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.cancelled.get()
    }

    /// Registers a one-shot `listener` called when this [`CancelSignal`] is
    /// cancelled.
    ///
    /// The `listener` is never called if the signal is cancelled already.
    pub fn on_cancel<F>(&self, listener: F) -> ListenerId
    where
        F: FnOnce() + 'static,
    {
        let id = ListenerId(self.0.last_id.get() + 1);
        self.0.last_id.set(id.0);
        if !self.is_cancelled() {
            self.0.listeners.borrow_mut().push((id, Box::new(listener)));
        }
        id
    }

    /// Removes the listener with the provided [`ListenerId`].
    ///
    /// Returns `false` if there was no such listener (it has been removed or
    /// fired already).
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.0.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    /// Returns count of the listeners waiting for this [`CancelSignal`].
    #[inline]
    pub fn listeners_count(&self) -> usize {
        self.0.listeners.borrow().len()
    }

    /// Returns a [`WeakCancelSignal`] pointing to this [`CancelSignal`].
    pub(crate) fn downgrade(&self) -> WeakCancelSignal {
        WeakCancelSignal(Rc::downgrade(&self.0))
    }

    /// Marks this [`CancelSignal`] as cancelled and calls all its listeners.
    fn fire(&self) {
        if self.0.cancelled.replace(true) {
            return;
        }
        // Listeners are allowed to touch this signal again.
        let listeners = self.0.listeners.take();
        log::debug!("Cancelling {} listener(s)", listeners.len());
        for (_, listener) in listeners {
            (listener)();
        }
    }
}

impl fmt::Debug for CancelSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelSignal")
            .field("cancelled", &self.is_cancelled())
            .field("listeners", &self.listeners_count())
            .finish()
    }
}

/// Weak reference to a [`CancelSignal`], not keeping it alive.
#[derive(Clone, Debug)]
pub(crate) struct WeakCancelSignal(Weak<Inner>);

impl WeakCancelSignal {
    /// Upgrades this [`WeakCancelSignal`] into a [`CancelSignal`], if it's
    /// still alive.
    #[inline]
    pub(crate) fn upgrade(&self) -> Option<CancelSignal> {
        self.0.upgrade().map(CancelSignal)
    }
}
