//! [`Container`] decorator persisting its value into a [`Storage`].

use std::{convert::TryFrom as _, fmt, future::Future, rc::Rc, time::Duration};

use chrono::Utc;
use containerized_state::{
    CallbackResult, ComputedOptions, Container, Identical, Notified,
    NotifyResult, SubscribeOptions, Unsubscribe,
};
use derive_more::{Display, From};
use futures::future::{self, LocalBoxFuture};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracerr::Traced;

use crate::{PersistenceConfig, Storage, StorageError};

/// Payload persisted into a [`Storage`].
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct StoredData<T> {
    /// Persisted value.
    pub value: T,

    /// Time the value has been persisted at, in milliseconds since Unix
    /// epoch.
    pub timestamp: i64,
}

/// Reason a persisted value can't be loaded.
#[derive(Debug, Display, From)]
enum LoadError {
    /// [`Storage`] backend failed to read.
    #[display(fmt = "Storage failed: {}", _0)]
    Storage(StorageError),

    /// Payload is not a valid [`StoredData`].
    #[display(fmt = "Malformed payload: {}", _0)]
    Malformed(serde_json::Error),
}

/// [`Container`] whose value is persisted into a [`Storage`].
///
/// Every successful write saves the new value along with the current
/// timestamp, and every successful reset removes the saved value. [`Storage`]
/// failures never fail writes, they're only logged.
pub struct Persistent<T, S> {
    /// Decorated [`Container`].
    container: Container<T>,

    /// Backend the value is persisted into.
    storage: Rc<S>,

    /// Key the value is persisted under.
    key: Rc<str>,

    /// Time during which a persisted value may be loaded back.
    ttl: Option<Duration>,
}

impl<T, S> Clone for Persistent<T, S> {
    fn clone(&self) -> Self {
        Self {
            container: self.container.clone(),
            storage: Rc::clone(&self.storage),
            key: Rc::clone(&self.key),
            ttl: self.ttl,
        }
    }
}

impl<T: fmt::Debug, S> fmt::Debug for Persistent<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Persistent")
            .field("container", &self.container)
            .field("key", &self.key)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl<T, S> Persistent<T, S>
where
    T: Clone + Identical + Serialize + DeserializeOwned + 'static,
    S: Storage + 'static,
{
    /// Attaches the provided [`Storage`] to the provided [`Container`].
    ///
    /// If a not yet expired value is persisted under the configured key, it's
    /// written into the [`Container`] right away, so its subscribers are
    /// notified about it. Expired values are removed from the [`Storage`].
    /// Malformed or unreadable values are ignored.
    ///
    /// Returns the attached [`Persistent`] along with the [`Notified`] of the
    /// loaded value write. The [`Persistent`] stays attached regardless of
    /// how the subscribers process the loaded value.
    pub fn attach(
        container: Container<T>,
        storage: S,
        config: PersistenceConfig,
    ) -> (Self, Notified) {
        let this = Self {
            container,
            storage: Rc::new(storage),
            key: Rc::from(config.key.as_ref()),
            ttl: config.ttl(),
        };

        let hydrated = match this.load() {
            Ok(Some(value)) => {
                log::debug!("Loaded persisted value of '{}'", this.key);
                this.container.set_value(value)
            }
            Ok(None) => Self::nothing_loaded(),
            Err(e) => {
                log::debug!(
                    "Ignoring persisted value of '{}': {}",
                    this.key,
                    e,
                );
                Self::nothing_loaded()
            }
        };

        (this, hydrated)
    }

    /// Returns [`Notified`] of a write that never happened.
    fn nothing_loaded() -> Notified {
        let fut: LocalBoxFuture<'static, NotifyResult> =
            Box::pin(future::ok(()));
        fut.into()
    }

    /// Returns the decorated [`Container`].
    ///
    /// Writes made directly into it are not persisted.
    #[inline]
    pub fn container(&self) -> &Container<T> {
        &self.container
    }

    /// Returns a snapshot of the current value.
    #[inline]
    pub fn get_value(&self) -> T {
        self.container.get_value()
    }

    /// Sets the `new_value` the same way as [`Container::set_value()`] does,
    /// and persists it once all the subscribers have processed it
    /// successfully.
    pub fn set_value(&self, new_value: T) -> Notified {
        let written = self.container.set_value(new_value.clone());
        let storage = Rc::clone(&self.storage);
        let key = Rc::clone(&self.key);

        let fut: LocalBoxFuture<'static, NotifyResult> =
            Box::pin(async move {
                let res: NotifyResult =
                    written.await.map_err(tracerr::wrap!());
                if res.is_ok() {
                    save(&*storage, &key, new_value);
                }
                res
            });
        fut.into()
    }

    /// Sets a new value computed by the provided function out of the current
    /// one, and persists it.
    ///
    /// See [`Persistent::set_value()`] for details.
    pub fn update<F: FnOnce(&T) -> T>(&self, f: F) -> Notified {
        self.set_value(f(&self.get_value()))
    }

    /// Restores the value the [`Container`] has been created with, and
    /// removes the persisted value once all the subscribers have processed it
    /// successfully.
    pub fn reset(&self) -> Notified {
        let written = self.container.reset();
        let storage = Rc::clone(&self.storage);
        let key = Rc::clone(&self.key);

        let fut: LocalBoxFuture<'static, NotifyResult> =
            Box::pin(async move {
                let res: NotifyResult =
                    written.await.map_err(tracerr::wrap!());
                if res.is_ok() {
                    if let Err(e) = storage.remove_item(&key) {
                        log::warn!(
                            "Failed to remove persisted value of '{}': {}",
                            key,
                            e,
                        );
                    }
                }
                res
            });
        fut.into()
    }

    /// Subscribes to the value changes.
    ///
    /// See [`Container::subscribe()`] for details.
    #[inline]
    pub fn subscribe<F, Fut>(&self, callback: F) -> Unsubscribe
    where
        F: Fn(T) -> Fut + 'static,
        Fut: Future<Output = CallbackResult> + 'static,
    {
        self.container.subscribe(callback)
    }

    /// Subscribes to the value changes with the provided
    /// [`SubscribeOptions`].
    ///
    /// See [`Container::subscribe_with()`] for details.
    #[inline]
    pub fn subscribe_with<F, Fut>(
        &self,
        callback: F,
        options: SubscribeOptions,
    ) -> Unsubscribe
    where
        F: Fn(T) -> Fut + 'static,
        Fut: Future<Output = CallbackResult> + 'static,
    {
        self.container.subscribe_with(callback, options)
    }

    /// Subscribes to changes of a value computed out of the current value.
    ///
    /// See [`Container::computed_subscribe()`] for details.
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
        self.container.computed_subscribe(compute, callback)
    }

    /// Subscribes to changes of a value computed out of the current value,
    /// with the provided [`ComputedOptions`].
    ///
    /// See [`Container::computed_subscribe_with()`] for details.
    #[inline]
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
        self.container
            .computed_subscribe_with(compute, callback, options)
    }

    /// Reads the persisted value, if it's present and not expired.
    ///
    /// Expired value is removed from the [`Storage`].
    fn load(&self) -> Result<Option<T>, Traced<LoadError>> {
        let payload = match self
            .storage
            .get_item(&self.key)
            .map_err(tracerr::from_and_wrap!())?
        {
            Some(payload) => payload,
            None => return Ok(None),
        };
        let data: StoredData<T> = serde_json::from_str(&payload)
            .map_err(tracerr::from_and_wrap!())?;

        if let Some(ttl) = self.ttl {
            let now = Utc::now().timestamp_millis();
            if is_expired(now, data.timestamp, ttl) {
                log::debug!(
                    "Persisted value of '{}' expired, stored at {} ms",
                    self.key,
                    data.timestamp,
                );
                if let Err(e) = self.storage.remove_item(&self.key) {
                    log::warn!(
                        "Failed to remove expired value of '{}': {}",
                        self.key,
                        e,
                    );
                }
                return Ok(None);
            }
        }

        Ok(Some(data.value))
    }
}

/// Indicates whether a value persisted at the `timestamp` is older than the
/// `ttl` at the `now` moment (both in milliseconds since Unix epoch).
///
/// Values persisted exactly `ttl` ago are not expired yet.
fn is_expired(now: i64, timestamp: i64, ttl: Duration) -> bool {
    let ttl = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
    now.saturating_sub(timestamp) > ttl
}

/// Persists the provided `value` under the provided `key`, stamped with the
/// current time.
fn save<T: Serialize, S: Storage + ?Sized>(storage: &S, key: &str, value: T) {
    let data = StoredData {
        value,
        timestamp: Utc::now().timestamp_millis(),
    };
    let res = serde_json::to_string(&data)
        .map_err(|e| StorageError::new(e.to_string()))
        .and_then(|payload| storage.set_item(key, &payload));
    if let Err(e) = res {
        log::warn!("Failed to persist value of '{}': {}", key, e);
    }
}
