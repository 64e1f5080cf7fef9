//! Observable state container awaiting its subscribers.
//!
//!
//!
//!
//! # Reading and writing
//!
//! ```
//! use containerized_state::Container;
//! # use futures::executor;
//!
//! # executor::block_on(async {
//! let counter = Container::new(0);
//! assert_eq!(counter.get_value(), 0);
//!
//! // The value is assigned right away, the returned future resolves once all
//! // the subscribers have processed the update:
//! counter.set_value(1).await.unwrap();
//! assert_eq!(counter.get_value(), 1);
//!
//! counter.update(|v| v + 1).await.unwrap();
//! assert_eq!(counter.get_value(), 2);
//!
//! // Back to the value `Container` has been created with:
//! counter.reset().await.unwrap();
//! assert_eq!(counter.get_value(), 0);
//! # });
//! ```
//!
//!
//!
//!
//! # Subscribing to changes
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//!
//! use containerized_state::Container;
//! # use futures::{executor, future};
//!
//! # executor::block_on(async {
//! let counter = Container::new(0);
//! let seen = Rc::new(RefCell::new(Vec::new()));
//!
//! let unsubscribe = counter.subscribe({
//!     let seen = Rc::clone(&seen);
//!     move |value| {
//!         seen.borrow_mut().push(value);
//!         future::ok(())
//!     }
//! });
//!
//! counter.set_value(1).await.unwrap();
//! // Same value, so nobody is notified:
//! counter.set_value(1).await.unwrap();
//!
//! unsubscribe.unsubscribe();
//! counter.set_value(2).await.unwrap();
//!
//! assert_eq!(*seen.borrow(), vec![1]);
//! # });
//! ```
//!
//!
//!
//!
//! # Subscribing to computed values
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//!
//! use containerized_state::{ComputedOptions, Container};
//! # use futures::{executor, future};
//!
//! # executor::block_on(async {
//! let numbers = Container::new(42);
//! let parity = Rc::new(RefCell::new(Vec::new()));
//!
//! let _ = numbers.computed_subscribe_with(
//!     |v| v % 2,
//!     {
//!         let parity = Rc::clone(&parity);
//!         move |p| {
//!             parity.borrow_mut().push(p);
//!             future::ok(())
//!         }
//!     },
//!     ComputedOptions::<i32>::default().equals(|a, b| a == b),
//! );
//!
//! numbers.set_value(44).await.unwrap();
//! numbers.set_value(45).await.unwrap();
//!
//! assert_eq!(*parity.borrow(), vec![1]);
//! # });
//! ```
//!
//!
//!
//!
//! # Cancelling subscriptions
//!
//! ```
//! use containerized_state::{CancelController, Container, SubscribeOptions};
//! # use futures::{executor, future};
//!
//! # executor::block_on(async {
//! let container = Container::new("draft");
//! let controller = CancelController::new();
//!
//! let _ = container.subscribe_with(
//!     |_| future::ok(()),
//!     SubscribeOptions::default().cancel_on(controller.signal()),
//! );
//! assert_eq!(container.subscriptions_count(), 1);
//!
//! controller.cancel();
//! assert_eq!(container.subscriptions_count(), 0);
//! # });
//! ```

#![deny(
    missing_debug_implementations,
    nonstandard_style,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![warn(
    missing_docs,
    unreachable_pub,
    unused_import_braces,
    unused_labels,
    unused_qualifications
)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

mod cancel;
mod container;
mod errors;
mod identical;
mod subscription;

#[doc(inline)]
pub use self::{
    cancel::{CancelController, CancelSignal, ListenerId},
    container::{Container, Notified, NotifyResult},
    errors::{CallbackError, CallbackResult, NotifyError},
    identical::Identical,
    subscription::{
        ComputedOptions, EqualityFn, SubscribeOptions, Unsubscribe,
    },
};
