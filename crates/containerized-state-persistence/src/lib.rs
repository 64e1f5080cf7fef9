//! Persistence of [`containerized_state::Container`] values.
//!
//! ```
//! use containerized_state::Container;
//! use containerized_state_persistence::{
//!     MemoryStorage, PersistenceConfig, Persistent, Storage as _,
//! };
//! # use futures::executor;
//!
//! # executor::block_on(async {
//! let storage = MemoryStorage::new();
//!
//! let (counter, loaded) = Persistent::attach(
//!     Container::new(0),
//!     storage.clone(),
//!     PersistenceConfig::new("counter"),
//! );
//! // Nothing has been persisted yet:
//! loaded.await.unwrap();
//! counter.set_value(42).await.unwrap();
//! assert!(storage.get_item("counter").unwrap().is_some());
//!
//! // Restored after restart:
//! let (restored, loaded) = Persistent::attach(
//!     Container::new(0),
//!     storage,
//!     PersistenceConfig::new("counter"),
//! );
//! loaded.await.unwrap();
//! assert_eq!(restored.get_value(), 42);
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

mod conf;
mod persistent;
mod storage;

#[doc(inline)]
pub use self::{
    conf::{PersistenceConfig, CONF_PATH_ENV_VAR_NAME},
    persistent::{Persistent, StoredData},
    storage::{MemoryStorage, Storage, StorageError},
};
