//! Bindings of [`Container`]s to views.

use std::{cell::RefCell, rc::Rc};

use containerized_state::{
    ComputedOptions, Container, EqualityFn, Identical, Notified,
};
use futures::future;

use crate::{sync_external_store, Binding};

/// Binds the value of the provided [`Container`] to a view.
///
/// The view is re-rendered on every value change.
pub fn use_value<T>(container: &Container<T>) -> Binding<T>
where
    T: Clone + Identical + 'static,
{
    let source = container.clone();
    sync_external_store(
        |on_change| {
            container.subscribe(move |_| {
                on_change();
                future::ok(())
            })
        },
        move || source.get_value(),
    )
}

/// Binds a value computed out of the provided [`Container`]'s value to a
/// view.
///
/// The view is re-rendered only when the computed value changes. Computed
/// values are compared with the provided `equals` function if any, or with
/// [`Identical`] otherwise.
pub fn use_computed_value<T, P, C>(
    container: &Container<T>,
    compute: C,
    equals: Option<EqualityFn<P>>,
) -> Binding<P>
where
    T: Clone + Identical + 'static,
    P: Clone + Identical + 'static,
    C: Fn(&T) -> P + 'static,
{
    let latest = Rc::new(RefCell::new(compute(&container.get_value())));
    let snapshot = Rc::clone(&latest);
    sync_external_store(
        |on_change| {
            container.computed_subscribe_with(
                compute,
                move |computed| {
                    *latest.borrow_mut() = computed;
                    on_change();
                    future::ok(())
                },
                ComputedOptions {
                    cancel: None,
                    equals,
                },
            )
        },
        move || snapshot.borrow().clone(),
    )
}

/// Writer of a [`Container`]'s value for views.
#[derive(Clone, Debug)]
pub struct Updater<T>(Container<T>);

impl<T: Clone + Identical + 'static> Updater<T> {
    /// Sets the provided `value`.
    ///
    /// See [`Container::set_value()`] for details.
    #[inline]
    pub fn set(&self, value: T) -> Notified {
        self.0.set_value(value)
    }

    /// Sets a new value computed by the provided function out of the current
    /// one.
    ///
    /// See [`Container::update()`] for details.
    #[inline]
    pub fn update<F: FnOnce(&T) -> T>(&self, f: F) -> Notified {
        self.0.update(f)
    }
}

/// Returns [`Updater`] writing into the provided [`Container`].
#[inline]
pub fn use_update<T>(container: &Container<T>) -> Updater<T> {
    Updater(container.clone())
}
