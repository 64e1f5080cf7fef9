//! View bindings of [`containerized_state::Container`]s.
//!
//! A view renders a snapshot of a store, and is re-rendered whenever the store
//! produces a new snapshot. [`sync_external_store()`] adapts any store to
//! that model, and the `use_*` functions apply it to [`Container`]s.
//!
//! ```
//! use containerized_state::Container;
//! use containerized_state_binding::{use_computed_value, use_update, use_value};
//! # use futures::executor;
//!
//! # executor::block_on(async {
//! let counter = Container::new(1);
//! let value = use_value(&counter);
//! let parity = use_computed_value(&counter, |v| v % 2 == 0, None);
//! let update = use_update(&counter);
//!
//! update.update(|v| v + 2).await.unwrap();
//! assert_eq!(value.current(), 3);
//! assert_eq!(value.renders(), 1);
//! // Still odd:
//! assert_eq!(parity.renders(), 0);
//!
//! update.set(4).await.unwrap();
//! assert_eq!(parity.render(|even| if *even { "even" } else { "odd" }), "even");
//! # });
//! ```
//!
//! [`Container`]: containerized_state::Container

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

mod hooks;
mod store;

#[doc(inline)]
pub use self::{
    hooks::{use_computed_value, use_update, use_value, Updater},
    store::{sync_external_store, Binding},
};
