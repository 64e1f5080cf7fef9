//! Subscriptions to [`Container`] updates.
//!
//! [`Container`]: crate::Container

use std::{fmt, rc::Rc};

use futures::future::LocalBoxFuture;

use crate::{CallbackResult, CancelSignal};

/// Future returned by a subscriber callback.
pub(crate) type Pending = LocalBoxFuture<'static, CallbackResult>;

/// Custom equality function of a computed subscription.
pub type EqualityFn<P> = Rc<dyn Fn(&P, &P) -> bool>;

/// Subscriber of a [`Container`].
///
/// [`Container`]: crate::Container
pub(crate) enum Subscriber<T> {
    /// Subscriber receiving every new value.
    Plain(Rc<dyn Fn(T) -> Pending>),

    /// Subscriber receiving a value computed out of the new one.
    ///
    /// Decides on its own whether the computed value has been changed between
    /// the provided previous and next values, and calls its callback only if
    /// so.
    Computed(Rc<dyn Fn(&T, &T) -> Option<Pending>>),
}

impl<T> Clone for Subscriber<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Plain(cb) => Self::Plain(Rc::clone(cb)),
            Self::Computed(emit) => Self::Computed(Rc::clone(emit)),
        }
    }
}

impl<T> fmt::Debug for Subscriber<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(_) => write!(f, "Subscriber::Plain"),
            Self::Computed(_) => write!(f, "Subscriber::Computed"),
        }
    }
}

/// Options of a plain subscription.
#[derive(Clone, Debug, Default)]
pub struct SubscribeOptions {
    /// [`CancelSignal`] removing the subscription once cancelled.
    pub cancel: Option<CancelSignal>,
}

impl SubscribeOptions {
    /// Removes the subscription once the provided [`CancelSignal`] is
    /// cancelled.
    #[inline]
    pub fn cancel_on(mut self, signal: CancelSignal) -> Self {
        self.cancel = Some(signal);
        self
    }
}

/// Options of a computed subscription.
pub struct ComputedOptions<P> {
    /// [`CancelSignal`] removing the subscription once cancelled.
    pub cancel: Option<CancelSignal>,

    /// Custom equality of the computed values.
    ///
    /// [`Identical`] is used if [`None`].
    ///
    /// [`Identical`]: crate::Identical
    pub equals: Option<EqualityFn<P>>,
}

impl<P> Default for ComputedOptions<P> {
    fn default() -> Self {
        Self {
            cancel: None,
            equals: None,
        }
    }
}

impl<P> ComputedOptions<P> {
    /// Removes the subscription once the provided [`CancelSignal`] is
    /// cancelled.
    #[inline]
    pub fn cancel_on(mut self, signal: CancelSignal) -> Self {
        self.cancel = Some(signal);
        self
    }

    /// Sets custom equality function deciding whether the computed value has
    /// been changed.
    #[inline]
    pub fn equals<F>(mut self, equals: F) -> Self
    where
        F: Fn(&P, &P) -> bool + 'static,
    {
        self.equals = Some(Rc::new(equals));
        self
    }
}

impl<P> fmt::Debug for ComputedOptions<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComputedOptions")
            .field("cancel", &self.cancel)
            .field("equals", &self.equals.is_some())
            .finish()
    }
}

/// Handle removing a subscription.
///
/// Removal is idempotent: only the first [`Unsubscribe::unsubscribe`] call
/// has an effect. Dropping this handle doesn't remove the subscription.
#[derive(Clone)]
pub struct Unsubscribe(Rc<dyn Fn()>);

impl Unsubscribe {
    /// Wraps the provided removal function.
    ///
    /// The `remove` function must tolerate being called more than once.
    pub fn new<F: Fn() + 'static>(remove: F) -> Self {
        Self(Rc::new(remove))
    }

    /// Removes the subscription.
    #[inline]
    pub fn unsubscribe(&self) {
        (self.0)();
    }
}

impl fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unsubscribe").finish()
    }
}
