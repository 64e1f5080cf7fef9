//! Key-value storage backends.

use std::{borrow::Cow, cell::RefCell, collections::HashMap, rc::Rc};

use derive_more::Display;

/// Failure of a [`Storage`] backend.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[display(fmt = "{}", _0)]
pub struct StorageError(Cow<'static, str>);

impl StorageError {
    /// Creates a new [`StorageError`] with the provided message.
    #[inline]
    pub fn new<M: Into<Cow<'static, str>>>(msg: M) -> Self {
        Self(msg.into())
    }
}

/// Key-value storage with string values, like a browser's `localStorage`.
#[cfg_attr(test, mockall::automock)]
pub trait Storage {
    /// Returns the value stored under the provided `key`, if any.
    ///
    /// # Errors
    ///
    /// If the backend is unavailable.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores the `value` under the provided `key`, replacing the previous
    /// one.
    ///
    /// # Errors
    ///
    /// If the backend is unavailable or full.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes the value stored under the provided `key`, if any.
    ///
    /// # Errors
    ///
    /// If the backend is unavailable.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory [`Storage`].
///
/// Clones share the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage(Rc<RefCell<HashMap<String, String>>>);

impl MemoryStorage {
    /// Creates a new empty [`MemoryStorage`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns count of the stored entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Indicates whether nothing is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.0.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _ = self.0.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let _ = self.0.borrow_mut().remove(key);
        Ok(())
    }
}
