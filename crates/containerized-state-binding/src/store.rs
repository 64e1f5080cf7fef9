//! Binding of an external store to a view.

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

use containerized_state::{Identical, Unsubscribe};
use futures::{channel::mpsc, stream::LocalBoxStream};

/// Snapshot of an external store kept up to date for a view.
///
/// Every store change not producing an [`Identical`] snapshot re-renders the
/// view: the cached snapshot is replaced, [`Binding::renders()`] is
/// incremented and the new snapshot is emitted into all
/// [`Binding::changes()`] streams.
///
/// The store is unsubscribed from once this [`Binding`] is dropped.
pub struct Binding<S> {
    /// State shared with the store change callback.
    state: Rc<State<S>>,

    /// Removes the store change callback.
    unsubscribe: Unsubscribe,
}

/// State of a [`Binding`].
struct State<S> {
    /// Last read snapshot.
    snapshot: RefCell<S>,

    /// Count of re-renders since creation.
    renders: Cell<usize>,

    /// Subscribers of [`Binding::changes()`].
    subs: RefCell<Vec<mpsc::UnboundedSender<S>>>,
}

impl<S: Clone + Identical> State<S> {
    /// Re-renders with the provided `snapshot` unless it's [`Identical`] to
    /// the cached one.
    fn refresh(&self, snapshot: S) {
        if self.snapshot.borrow().identical(&snapshot) {
            return;
        }
        let _ = self.snapshot.replace(snapshot.clone());
        self.renders.set(self.renders.get() + 1);
        self.subs
            .borrow_mut()
            .retain(|sub| sub.unbounded_send(snapshot.clone()).is_ok());
    }
}

/// Binds an external store to a view.
///
/// `subscribe` receives a callback to be called on every store change, and
/// returns [`Unsubscribe`] removing it. `get_snapshot` reads the current
/// snapshot of the store synchronously.
pub fn sync_external_store<S, F, G>(subscribe: F, get_snapshot: G) -> Binding<S>
where
    S: Clone + Identical + 'static,
    F: FnOnce(Rc<dyn Fn()>) -> Unsubscribe,
    G: Fn() -> S + 'static,
{
    let state = Rc::new(State {
        snapshot: RefCell::new(get_snapshot()),
        renders: Cell::new(0),
        subs: RefCell::new(Vec::new()),
    });

    let on_change: Rc<dyn Fn()> = Rc::new({
        let state = Rc::downgrade(&state);
        move || {
            if let Some(state) = state.upgrade() {
                state.refresh(get_snapshot());
            }
        }
    });
    let unsubscribe = subscribe(on_change);

    Binding { state, unsubscribe }
}

impl<S: Clone> Binding<S> {
    /// Returns the last rendered snapshot.
    #[inline]
    pub fn current(&self) -> S {
        self.state.snapshot.borrow().clone()
    }

    /// Returns count of re-renders since this [`Binding`] was created.
    #[inline]
    pub fn renders(&self) -> usize {
        self.state.renders.get()
    }

    /// Renders the last snapshot with the provided function.
    pub fn render<R, F: FnOnce(&S) -> R>(&self, f: F) -> R {
        f(&self.current())
    }

    /// Returns [`Stream`] of the re-rendered snapshots.
    ///
    /// The [`Stream`] ends once this [`Binding`] is dropped.
    ///
    /// [`Stream`]: futures::Stream
    pub fn changes(&self) -> LocalBoxStream<'static, S>
    where
        S: 'static,
    {
        let (tx, rx) = mpsc::unbounded();
        self.state.subs.borrow_mut().push(tx);
        Box::pin(rx)
    }
}

impl<S> Drop for Binding<S> {
    fn drop(&mut self) {
        self.unsubscribe.unsubscribe();
        log::trace!(
            "Binding dropped after {} render(s)",
            self.state.renders.get(),
        );
    }
}

impl<S: fmt::Debug> fmt::Debug for Binding<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("snapshot", &*self.state.snapshot.borrow())
            .field("renders", &self.state.renders.get())
            .finish()
    }
}
