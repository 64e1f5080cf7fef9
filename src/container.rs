//! Observable [`Container`] awaiting its subscribers on every write.

use std::{
    cell::{Cell, RefCell},
    fmt,
    future::Future,
    pin::Pin,
    rc::{Rc, Weak},
    task::{Context, Poll},
};

use futures::future::{self, FutureExt as _, LocalBoxFuture};
use tracerr::Traced;

use crate::{
    cancel::WeakCancelSignal,
    subscription::{Pending, Subscriber},
    CallbackResult, CancelSignal, ComputedOptions, Identical, ListenerId,
    NotifyError, SubscribeOptions, Unsubscribe,
};

/// Result of notifying [`Container`] subscribers about a write.
pub type NotifyResult = Result<(), Traced<NotifyError>>;

/// Mutable cell notifying its subscribers about every change of its value.
///
/// [`Container`] is a handle: its clones share the same value and the same
/// subscribers.
///
/// Writes assign the new value immediately, invoke callbacks of all the
/// subscribers due to be notified, and return a [`Notified`] future resolving
/// once every invoked callback has settled.
pub struct Container<T>(Rc<Inner<T>>);

/// Shared state of a [`Container`].
struct Inner<T> {
    /// Current value.
    value: RefCell<T>,

    /// Value this [`Container`] has been created with.
    initial_value: T,

    /// Active subscribers along with their IDs, in registration order.
    subs: RefCell<Vec<(u64, Subscriber<T>)>>,

    /// Sequence of subscriber IDs.
    last_id: Cell<u64>,
}

impl<T> Clone for Container<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for Container<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("value", &*self.0.value.borrow())
            .field("subscriptions", &self.0.subs.borrow().len())
            .finish()
    }
}

impl<T: Clone + 'static> Container<T> {
    /// Creates a new [`Container`] holding the provided `value`.
    pub fn new(value: T) -> Self {
        Self(Rc::new(Inner {
            value: RefCell::new(value.clone()),
            initial_value: value,
            subs: RefCell::new(Vec::new()),
            last_id: Cell::new(0),
        }))
    }

    /// Creates a new [`Container`] holding the value produced by the provided
    /// `init` function.
    ///
    /// `init` is called once, right away.
    #[inline]
    pub fn from_fn<F: FnOnce() -> T>(init: F) -> Self {
        Self::new(init())
    }

    /// Returns a snapshot of the current value.
    #[inline]
    pub fn get_value(&self) -> T {
        self.0.value.borrow().clone()
    }

    /// Returns count of the active subscriptions.
    #[inline]
    pub fn subscriptions_count(&self) -> usize {
        self.0.subs.borrow().len()
    }
}

impl<T: Clone + Identical + 'static> Container<T> {
    /// Sets the `new_value` and notifies subscribers about it.
    ///
    /// The value is assigned before this method returns, so it's observable
    /// via [`Container::get_value()`] (from subscribers as well) even if the
    /// returned [`Notified`] is never awaited. Callbacks of the due subscribers
    /// are called before this method returns too, but futures returned by them
    /// are driven by the returned [`Notified`] only.
    ///
    /// Plain subscribers are notified unless the `new_value` is
    /// [`Identical`] to the previous one. Computed subscribers are notified
    /// unless their computed values are equal.
    pub fn set_value(&self, new_value: T) -> Notified {
        let prev_value = self.0.value.replace(new_value.clone());
        let changed = !prev_value.identical(&new_value);

        // No borrow is held while callbacks run, so they may touch this
        // `Container` again.
        let subs: Vec<_> = self
            .0
            .subs
            .borrow()
            .iter()
            .map(|(_, sub)| sub.clone())
            .collect();

        let mut pending = Vec::new();
        for sub in &subs {
            match sub {
                Subscriber::Plain(cb) => {
                    if changed {
                        pending.push(cb(new_value.clone()));
                    }
                }
                Subscriber::Computed(emit) => {
                    if let Some(fut) = emit(&prev_value, &new_value) {
                        pending.push(fut);
                    }
                }
            }
        }
        log::trace!(
            "Notifying {} of {} subscriber(s) about update",
            pending.len(),
            subs.len(),
        );

        Notified::all(pending)
    }

    /// Sets a new value computed by the provided function out of the current
    /// one.
    ///
    /// See [`Container::set_value()`] for details.
    pub fn update<F: FnOnce(&T) -> T>(&self, f: F) -> Notified {
        let current = self.get_value();
        self.set_value(f(&current))
    }

    /// Restores the value this [`Container`] has been created with.
    ///
    /// Subscribers are notified the same way as on
    /// [`Container::set_value()`].
    #[inline]
    pub fn reset(&self) -> Notified {
        self.set_value(self.0.initial_value.clone())
    }

    /// Subscribes to the value changes.
    ///
    /// See [`Container::subscribe_with()`] for details.
    #[inline]
    pub fn subscribe<F, Fut>(&self, callback: F) -> Unsubscribe
    where
        F: Fn(T) -> Fut + 'static,
        Fut: Future<Output = CallbackResult> + 'static,
    {
        self.subscribe_with(callback, SubscribeOptions::default())
    }

    /// Subscribes to the value changes with the provided
    /// [`SubscribeOptions`].
    ///
    /// The `callback` is called with every new value not [`Identical`] to the
    /// previous one. Writes are completed only when the [`Future`] returned by
    /// the `callback` is resolved.
    ///
    /// Returns [`Unsubscribe`] handle removing the subscription.
    pub fn subscribe_with<F, Fut>(
        &self,
        callback: F,
        options: SubscribeOptions,
    ) -> Unsubscribe
    where
        F: Fn(T) -> Fut + 'static,
        Fut: Future<Output = CallbackResult> + 'static,
    {
        let cb = move |value: T| -> Pending { Box::pin(callback(value)) };
        self.register(Subscriber::Plain(Rc::new(cb)), options.cancel)
    }

    /// Subscribes to changes of a value computed out of this [`Container`]'s
    /// value.
    ///
    /// See [`Container::computed_subscribe_with()`] for details.
    #[inline]
    pub fn computed_subscribe<P, C, F, Fut>(
        &self,
        compute: C,
        callback: F,
    ) -> Unsubscribe
    where
        P: Identical + 'static,
        C: Fn(&T) -> P + 'static,
        F: Fn(P) -> Fut + 'static,
        Fut: Future<Output = CallbackResult> + 'static,
    {
        self.computed_subscribe_with(
            compute,
            callback,
            ComputedOptions::default(),
        )
    }

    /// Subscribes to changes of a value computed out of this [`Container`]'s
    /// value, with the provided [`ComputedOptions`].
    ///
    /// On every write, the `compute` function is called both for the previous
    /// and the new values, and the `callback` is called with the new computed
    /// value only if they differ. They're compared with
    /// [`ComputedOptions::equals`] function if any, or with [`Identical`]
    /// otherwise.
    ///
    /// Returns [`Unsubscribe`] handle removing the subscription.
    pub fn computed_subscribe_with<P, C, F, Fut>(
        &self,
        compute: C,
        callback: F,
        options: ComputedOptions<P>,
    ) -> Unsubscribe
    where
        P: Identical + 'static,
        C: Fn(&T) -> P + 'static,
        F: Fn(P) -> Fut + 'static,
        Fut: Future<Output = CallbackResult> + 'static,
    {
        let ComputedOptions { cancel, equals } = options;
        let emit = move |prev: &T, next: &T| -> Option<Pending> {
            let prev = compute(prev);
            let next = compute(next);
            let unchanged = match &equals {
                Some(equals) => equals(&prev, &next),
                None => prev.identical(&next),
            };
            if unchanged {
                None
            } else {
                Some(Box::pin(callback(next)))
            }
        };
        self.register(Subscriber::Computed(Rc::new(emit)), cancel)
    }

    /// Adds the provided [`Subscriber`] and returns [`Unsubscribe`] removing
    /// it.
    ///
    /// If a [`CancelSignal`] is provided, then the [`Subscriber`] is removed
    /// once it's cancelled, or right away if it's cancelled already.
    fn register(
        &self,
        sub: Subscriber<T>,
        cancel: Option<CancelSignal>,
    ) -> Unsubscribe {
        let id = self.0.last_id.get() + 1;
        self.0.last_id.set(id);
        self.0.subs.borrow_mut().push((id, sub));
        log::debug!("Subscriber {} added", id);

        let listener = Rc::new(Cell::new(None));
        let unsubscribe = Unsubscribe::new({
            let inner = Rc::downgrade(&self.0);
            let signal = cancel.as_ref().map(CancelSignal::downgrade);
            let listener = Rc::clone(&listener);
            move || remove(&inner, id, signal.as_ref(), &listener)
        });

        if let Some(signal) = cancel {
            if signal.is_cancelled() {
                unsubscribe.unsubscribe();
            } else {
                listener.set(Some(signal.on_cancel({
                    let unsubscribe = unsubscribe.clone();
                    move || unsubscribe.unsubscribe()
                })));
            }
        }

        unsubscribe
    }
}

/// Removes the [`Subscriber`] with the provided `id` and detaches its
/// cancellation `listener`, if any.
fn remove<T>(
    inner: &Weak<Inner<T>>,
    id: u64,
    signal: Option<&WeakCancelSignal>,
    listener: &Cell<Option<ListenerId>>,
) {
    if let Some(inner) = inner.upgrade() {
        let mut subs = inner.subs.borrow_mut();
        let before = subs.len();
        subs.retain(|(sub_id, _)| *sub_id != id);
        if subs.len() != before {
            log::debug!("Subscriber {} removed", id);
        }
    }
    if let Some(listener) = listener.take() {
        if let Some(signal) = signal.and_then(WeakCancelSignal::upgrade) {
            let _ = signal.remove_listener(listener);
        }
    }
}

/// [`Future`] resolving when all the subscribers notified by a
/// [`Container`] write have processed the update.
///
/// Resolves with an error if any of them failed. All the callbacks are awaited
/// in any case, and the error contains all their failures.
#[must_use = "subscribers are not awaited unless `.await`ed or polled"]
pub struct Notified(LocalBoxFuture<'static, NotifyResult>);

impl Notified {
    /// Joins all the provided `pending` callbacks.
    fn all(pending: Vec<Pending>) -> Self {
        if pending.is_empty() {
            return Self(Box::pin(future::ok(())));
        }
        Self(Box::pin(future::join_all(pending).map(|results| {
            let failures: Vec<_> =
                results.into_iter().filter_map(Result::err).collect();
            if failures.is_empty() {
                Ok(())
            } else {
                Err(tracerr::new!(NotifyError::new(failures)))
            }
        })))
    }
}

impl From<LocalBoxFuture<'static, NotifyResult>> for Notified {
    #[inline]
    fn from(fut: LocalBoxFuture<'static, NotifyResult>) -> Self {
        Self(fut)
    }
}

impl Future for Notified {
    type Output = NotifyResult;

    #[inline]
    fn poll(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Self::Output> {
        self.0.as_mut().poll(cx)
    }
}

impl fmt::Debug for Notified {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notified").finish()
    }
}

#[cfg(test)]
mod spec {
    use std::{
        cell::{Cell, RefCell},
        rc::Rc,
        time::Duration,
    };

    use futures::{future, poll, task::Poll};
    use tokio::time::{sleep, Instant};

    use crate::{
        CallbackError, CallbackResult, CancelController, CancelSignal,
        ComputedOptions, Container, NotifyError, SubscribeOptions,
    };

    type Ready = future::Ready<CallbackResult>;

    /// Returns a subscriber recording all the values it's called with.
    fn recorder<T: 'static>() -> (Rc<RefCell<Vec<T>>>, impl Fn(T) -> Ready) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let cb = {
            let calls = Rc::clone(&calls);
            move |value| {
                calls.borrow_mut().push(value);
                future::ok(())
            }
        };
        (calls, cb)
    }

    #[derive(Clone, Debug, PartialEq)]
    struct State {
        a: i32,
        b: i32,
    }

    #[test]
    fn holds_initial_value() {
        assert_eq!(Container::new(42).get_value(), 42);

        let calls = Cell::new(0);
        let container = Container::from_fn(|| {
            calls.set(calls.get() + 1);
            "lazy".to_owned()
        });
        assert_eq!(calls.get(), 1);
        assert_eq!(container.get_value(), "lazy");
    }

    #[tokio::test]
    async fn notifies_subscribers_on_change() {
        let container = Container::new(42);
        let (calls, cb) = recorder();
        let _ = container.subscribe(cb);

        container.set_value(24).await.unwrap();

        assert_eq!(container.get_value(), 24);
        assert_eq!(*calls.borrow(), vec![24]);
    }

    #[tokio::test]
    async fn doesnt_notify_if_value_is_identical() {
        let container = Container::new(42);
        let (calls, cb) = recorder();
        let _ = container.subscribe(cb);

        container.set_value(42).await.unwrap();

        assert!(calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn distinct_allocations_are_different_values() {
        let state = Rc::new(State { a: 1, b: 2 });
        let container = Container::new(Rc::clone(&state));
        let (calls, cb) = recorder();
        let _ = container.subscribe(cb);

        container.set_value(Rc::clone(&state)).await.unwrap();
        assert!(calls.borrow().is_empty());

        container
            .set_value(Rc::new(State { a: 1, b: 2 }))
            .await
            .unwrap();
        assert_eq!(calls.borrow().len(), 1);
    }

    #[tokio::test]
    async fn notifies_computed_subscribers_if_computed_value_changes() {
        let container = Container::new(42);
        let (calls, cb) = recorder();
        let _ = container.computed_subscribe(|v| v + 1, cb);

        container.set_value(43).await.unwrap();

        assert_eq!(*calls.borrow(), vec![44]);
    }

    #[tokio::test]
    async fn computed_subscriber_ignores_unrelated_changes() {
        let container = Container::new(Rc::new(State { a: 1, b: 1 }));
        let (calls, cb) = recorder();
        let _ = container.computed_subscribe(|s| s.a, cb);

        container
            .set_value(Rc::new(State { a: 1, b: 2 }))
            .await
            .unwrap();
        assert!(calls.borrow().is_empty());

        container
            .set_value(Rc::new(State { a: 5, b: 2 }))
            .await
            .unwrap();
        assert_eq!(*calls.borrow(), vec![5]);
    }

    #[tokio::test]
    async fn uses_custom_equality_for_computed_subscribers() {
        let container = Container::new(42);
        let (calls, cb) = recorder();
        let _ = container.computed_subscribe_with(
            |v| v % 2,
            cb,
            ComputedOptions::<i32>::default().equals(|a, b| a == b),
        );

        container.set_value(44).await.unwrap();
        assert!(calls.borrow().is_empty());

        container.set_value(45).await.unwrap();
        assert_eq!(*calls.borrow(), vec![1]);
    }

    #[tokio::test]
    async fn custom_equality_overrides_identity() {
        let container = Container::new(Rc::new(vec![1, 2]));
        let (calls, cb) = recorder();
        let _ = container.computed_subscribe_with(
            Rc::clone,
            cb,
            ComputedOptions::<Rc<Vec<i32>>>::default()
                .equals(|a, b| a.len() == b.len()),
        );

        container.set_value(Rc::new(vec![3, 4])).await.unwrap();
        assert!(calls.borrow().is_empty());

        container.set_value(Rc::new(vec![3, 4, 5])).await.unwrap();
        assert_eq!(calls.borrow().len(), 1);
    }

    #[tokio::test]
    async fn absent_equality_falls_back_to_identity() {
        let container = Container::new(1);
        let (calls, cb) = recorder();
        let _ = container.computed_subscribe_with(
            |v| v * 10,
            cb,
            ComputedOptions {
                cancel: None,
                equals: None,
            },
        );

        container.set_value(1).await.unwrap();
        container.set_value(2).await.unwrap();

        assert_eq!(*calls.borrow(), vec![20]);
    }

    #[tokio::test]
    async fn unsubscribes() {
        let container = Container::new(42);
        let (plain_calls, plain_cb) = recorder();
        let (computed_calls, computed_cb) = recorder();
        let plain = container.subscribe(plain_cb);
        let computed = container.computed_subscribe(|v| v + 1, computed_cb);

        plain.unsubscribe();
        computed.unsubscribe();
        container.set_value(24).await.unwrap();

        assert!(plain_calls.borrow().is_empty());
        assert!(computed_calls.borrow().is_empty());
        assert_eq!(container.subscriptions_count(), 0);
    }

    #[tokio::test]
    async fn unsubscribe_is_idempotent() {
        let container = Container::new(0);
        let (_, first_cb) = recorder();
        let (second_calls, second_cb) = recorder();
        let first = container.subscribe(first_cb);
        let _ = container.subscribe(second_cb);

        first.unsubscribe();
        first.unsubscribe();
        assert_eq!(container.subscriptions_count(), 1);

        container.set_value(1).await.unwrap();
        assert_eq!(*second_calls.borrow(), vec![1]);
    }

    #[test]
    fn unsubscribe_outlives_container() {
        let container = Container::new(0);
        let unsubscribe = container.subscribe(|_| future::ok(()));
        drop(container);

        unsubscribe.unsubscribe();
    }

    #[tokio::test]
    async fn already_cancelled_signal_never_notifies() {
        let container = Container::new(42);
        let signal = CancelSignal::cancelled();
        let (plain_calls, plain_cb) = recorder();
        let (computed_calls, computed_cb) = recorder();

        let _ = container.subscribe_with(
            plain_cb,
            SubscribeOptions::default().cancel_on(signal.clone()),
        );
        let _ = container.computed_subscribe_with(
            |v| v + 1,
            computed_cb,
            ComputedOptions::default().cancel_on(signal.clone()),
        );
        assert_eq!(container.subscriptions_count(), 0);

        container.set_value(24).await.unwrap();
        container.set_value(25).await.unwrap();

        assert!(plain_calls.borrow().is_empty());
        assert!(computed_calls.borrow().is_empty());
        assert_eq!(signal.listeners_count(), 0);
    }

    #[tokio::test]
    async fn cancellation_before_write_prevents_notifications() {
        let container = Container::new(42);
        let controller = CancelController::new();
        let (plain_calls, plain_cb) = recorder();
        let (computed_calls, computed_cb) = recorder();
        let _ = container.subscribe_with(
            plain_cb,
            SubscribeOptions::default().cancel_on(controller.signal()),
        );
        let _ = container.computed_subscribe_with(
            |v| v + 1,
            computed_cb,
            ComputedOptions::default().cancel_on(controller.signal()),
        );
        assert_eq!(controller.signal().listeners_count(), 2);

        controller.cancel();
        container.set_value(24).await.unwrap();
        container.set_value(25).await.unwrap();

        assert!(plain_calls.borrow().is_empty());
        assert!(computed_calls.borrow().is_empty());
        assert_eq!(container.subscriptions_count(), 0);
    }

    #[tokio::test]
    async fn unsubscribe_detaches_cancellation_listener() {
        let container = Container::new(0);
        let controller = CancelController::new();
        let unsubscribe = container.subscribe_with(
            |_| future::ok(()),
            SubscribeOptions::default().cancel_on(controller.signal()),
        );
        assert_eq!(controller.signal().listeners_count(), 1);

        unsubscribe.unsubscribe();
        assert_eq!(controller.signal().listeners_count(), 0);

        controller.cancel();
        unsubscribe.unsubscribe();
        assert_eq!(container.subscriptions_count(), 0);
    }

    #[tokio::test]
    async fn cancellation_doesnt_abort_queued_callbacks() {
        let container = Container::new(0);
        let controller = CancelController::new();
        let finished = Rc::new(Cell::new(false));
        let _ = container.subscribe_with(
            {
                let finished = Rc::clone(&finished);
                move |_| {
                    let finished = Rc::clone(&finished);
                    async move {
                        sleep(Duration::from_millis(20)).await;
                        finished.set(true);
                        Ok(())
                    }
                }
            },
            SubscribeOptions::default().cancel_on(controller.signal()),
        );

        let notified = container.set_value(1);
        controller.cancel();
        notified.await.unwrap();

        assert!(finished.get());
        assert_eq!(container.subscriptions_count(), 0);
    }

    #[tokio::test]
    async fn waits_for_all_async_subscribers() {
        let container = Container::new(42);
        let invoked = Rc::new(RefCell::new(Vec::new()));
        let completed = Rc::new(RefCell::new(Vec::new()));
        for delay in [150_u64, 50].iter().copied() {
            let invoked = Rc::clone(&invoked);
            let completed = Rc::clone(&completed);
            let _ = container.subscribe(move |value| {
                invoked.borrow_mut().push(value);
                let completed = Rc::clone(&completed);
                async move {
                    sleep(Duration::from_millis(delay)).await;
                    completed.borrow_mut().push(delay);
                    Ok(())
                }
            });
        }

        let start = Instant::now();
        let mut notified = container.set_value(24);
        assert_eq!(*invoked.borrow(), vec![24, 24]);
        assert!(poll!(&mut notified).is_pending());

        notified.await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(150));
        assert_eq!(*completed.borrow(), vec![50, 150]);
    }

    #[tokio::test]
    async fn value_is_assigned_before_subscribers_run() {
        let container = Container::new(0);
        let seen = Rc::new(Cell::new(None));
        let _ = container.subscribe({
            let container = container.clone();
            let seen = Rc::clone(&seen);
            move |_| {
                seen.set(Some(container.get_value()));
                future::ok(())
            }
        });

        let notified = container.set_value(7);
        assert_eq!(container.get_value(), 7);
        assert_eq!(seen.get(), Some(7));
        notified.await.unwrap();
    }

    #[tokio::test]
    async fn unawaited_write_still_assigns_value() {
        let container = Container::new(1);
        let (calls, cb) = recorder();
        let _ = container.subscribe(cb);

        drop(container.set_value(2));

        assert_eq!(container.get_value(), 2);
        assert_eq!(*calls.borrow(), vec![2]);
    }

    #[tokio::test]
    async fn resets_to_initial_value() {
        let container = Container::new(10);
        let (calls, cb) = recorder();
        let _ = container.subscribe(cb);

        container.set_value(99).await.unwrap();
        container.reset().await.unwrap();

        assert_eq!(container.get_value(), 10);
        assert_eq!(*calls.borrow(), vec![99, 10]);

        container.reset().await.unwrap();
        assert_eq!(*calls.borrow(), vec![99, 10]);
    }

    #[tokio::test]
    async fn updates_from_current_value() {
        let container = Container::new(1);
        let (calls, cb) = recorder();
        let _ = container.subscribe(cb);

        container.update(|v| v + 1).await.unwrap();
        container.update(|v| v * 10).await.unwrap();

        assert_eq!(*calls.borrow(), vec![2, 20]);
    }

    #[tokio::test]
    async fn failures_are_collected_after_all_callbacks_settle() {
        let container = Container::new(0);
        let slow_completed = Rc::new(Cell::new(false));
        let _ = container.subscribe(|_| async {
            Err(CallbackError::new("first failure"))
        });
        let _ = container.subscribe({
            let slow_completed = Rc::clone(&slow_completed);
            move |_| {
                let slow_completed = Rc::clone(&slow_completed);
                async move {
                    sleep(Duration::from_millis(30)).await;
                    slow_completed.set(true);
                    Ok(())
                }
            }
        });
        let _ = container.computed_subscribe(|v| v * 2, |_| async {
            Err(CallbackError::new("second failure"))
        });

        let err = container.set_value(1).await.unwrap_err();

        assert!(slow_completed.get());
        let err: &NotifyError = err.as_ref();
        assert_eq!(err.failures().len(), 2);
        assert_eq!(err.first().unwrap().to_string(), "first failure");
        assert_eq!(err.failures()[1].to_string(), "second failure");
        assert_eq!(container.get_value(), 1);
    }

    #[tokio::test]
    async fn subscribers_added_during_write_wait_for_next_one() {
        let container = Container::new(0);
        let (late_calls, late_cb) = recorder();
        let late_cb = Rc::new(late_cb);
        let _ = container.subscribe({
            let container = container.clone();
            let subscribed = Cell::new(false);
            move |_| {
                if !subscribed.replace(true) {
                    let late_cb = Rc::clone(&late_cb);
                    let _ = container.subscribe(move |v| late_cb(v));
                }
                future::ok(())
            }
        });

        container.set_value(1).await.unwrap();
        assert!(late_calls.borrow().is_empty());

        container.set_value(2).await.unwrap();
        assert_eq!(*late_calls.borrow(), vec![2]);
    }

    #[tokio::test]
    async fn resolves_instantly_without_due_subscribers() {
        let container = Container::new(0);
        let _ = container.subscribe(|_| future::pending());

        assert!(matches!(poll!(container.set_value(0)), Poll::Ready(Ok(()))));
    }
}
