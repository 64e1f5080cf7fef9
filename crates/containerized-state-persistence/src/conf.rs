//! Persistence settings.

use std::{borrow::Cow, env, time::Duration};

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// Name of the environment variable holding a path to the configuration file
/// read by [`PersistenceConfig::parse()`].
pub const CONF_PATH_ENV_VAR_NAME: &str = "CONTAINERIZED_STATE_CONF";

/// Settings of a [`Persistent`] container.
///
/// [`Persistent`]: crate::Persistent
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, SmartDefault)]
#[serde(default)]
pub struct PersistenceConfig {
    /// Key the value is stored under.
    ///
    /// Defaults to `state`.
    #[default("state")]
    pub key: Cow<'static, str>,

    /// Time during which a stored value may be loaded back.
    ///
    /// Stored values never expire if [`None`] or zero.
    #[serde(with = "humantime_serde")]
    pub ttl: Option<Duration>,
}

impl PersistenceConfig {
    /// Creates a new [`PersistenceConfig`] storing the value under the
    /// provided `key`, without TTL.
    #[inline]
    pub fn new<K: Into<Cow<'static, str>>>(key: K) -> Self {
        Self {
            key: key.into(),
            ttl: None,
        }
    }

    /// Sets TTL of the stored values.
    #[inline]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Returns effective TTL of the stored values, if any.
    #[inline]
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl.filter(|ttl| *ttl != Duration::from_secs(0))
    }

    /// Creates a new [`PersistenceConfig`] applying values from the following
    /// sources, in that order:
    /// - default values;
    /// - configuration file, the path of which is given by the
    ///   [`CONF_PATH_ENV_VAR_NAME`] environment variable;
    /// - environment variables prefixed with `env_prefix` (`<PREFIX>_KEY`,
    ///   `<PREFIX>_TTL`).
    ///
    /// # Errors
    ///
    /// If the configuration file can't be read, or some value is malformed.
    pub fn parse(env_prefix: &str) -> Result<Self, ConfigError> {
        let mut cfg = Config::new();

        if let Ok(path) = env::var(CONF_PATH_ENV_VAR_NAME) {
            cfg.merge(File::with_name(&path))?;
        }

        cfg.merge(Environment::with_prefix(env_prefix).separator("__"))?;

        cfg.try_into()
    }
}
