//! Startup configuration: Pushover credentials, doorbell pin, debounce.
//!
//! Credentials come from a TOML file, optionally overridden by the
//! `PIBELL_TOKEN` / `PIBELL_USER` environment variables so unit files can
//! keep secrets out of the filesystem. Everything is read once at startup;
//! nothing is re-read while the monitor runs.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::core::errors::{BellError, Result};

/// Default doorbell input, BCM numbering.
pub const DEFAULT_PIN: u8 = 25;

/// Default refractory period after a ring, in seconds.
pub const DEFAULT_DEBOUNCE_SECS: u64 = 10;

/// Highest BCM GPIO exposed on the 40-pin header.
const MAX_BCM_PIN: u8 = 27;

/// Environment override for the application token.
pub const ENV_TOKEN: &str = "PIBELL_TOKEN";

/// Environment override for the user key.
pub const ENV_USER: &str = "PIBELL_USER";

/// Pushover API credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Application token issued by Pushover.
    pub token: String,
    /// User (recipient) key the notification is addressed to.
    pub user: String,
}

/// Monitor configuration, deserialized from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Pushover application token.
    pub token: String,
    /// Pushover user key.
    pub user: String,
    /// Doorbell input pin, BCM numbering.
    pub pin: u8,
    /// Refractory period after a ring, in seconds.
    pub debounce_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: String::new(),
            user: String::new(),
            pin: DEFAULT_PIN,
            debounce_secs: DEFAULT_DEBOUNCE_SECS,
        }
    }
}

impl Config {
    /// Load configuration: explicit path, or the first file on the search
    /// path, or built-in defaults — then apply environment overrides.
    ///
    /// # Errors
    /// Returns [`BellError::MissingConfig`] when an explicit path does not
    /// exist, and IO/parse errors for an unreadable or malformed file.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(BellError::MissingConfig {
                        path: path.to_path_buf(),
                    });
                }
                Self::from_path(path)?
            }
            None => match Self::default_path() {
                Some(path) => Self::from_path(&path)?,
                None => Self::default(),
            },
        };
        config.apply_overrides(std::env::vars());
        Ok(config)
    }

    /// Parse a configuration file.
    ///
    /// # Errors
    /// Returns an IO error when the file cannot be read and a parse error
    /// when the TOML is malformed or carries unknown keys.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| BellError::io(path, source))?;
        Ok(toml::from_str(&raw)?)
    }

    /// First existing file on the search path:
    /// `$XDG_CONFIG_HOME/pibell/config.toml`, `~/.config/pibell/config.toml`,
    /// `/etc/pibell/config.toml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        let candidates = [
            std::env::var_os("XDG_CONFIG_HOME")
                .map(|dir| PathBuf::from(dir).join("pibell/config.toml")),
            std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config/pibell/config.toml")),
            Some(PathBuf::from("/etc/pibell/config.toml")),
        ];
        candidates.into_iter().flatten().find(|path| path.exists())
    }

    /// Apply recognized environment overrides (`PIBELL_TOKEN`,
    /// `PIBELL_USER`) from an arbitrary variable iterator.
    ///
    /// Taking the variables as an argument keeps this a pure function;
    /// callers pass `std::env::vars()` and tests pass fixtures.
    pub fn apply_overrides<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            match key.as_str() {
                ENV_TOKEN => self.token = value,
                ENV_USER => self.user = value,
                _ => {}
            }
        }
    }

    /// Validate the configuration before the monitor starts.
    ///
    /// # Errors
    /// Returns [`BellError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(invalid(format!(
                "token is required (set `token` in the config file or {ENV_TOKEN})"
            )));
        }
        if self.user.trim().is_empty() {
            return Err(invalid(format!(
                "user is required (set `user` in the config file or {ENV_USER})"
            )));
        }
        if self.pin > MAX_BCM_PIN {
            return Err(invalid(format!(
                "pin {} is outside the BCM header range 0-{MAX_BCM_PIN}",
                self.pin
            )));
        }
        if self.debounce_secs == 0 || self.debounce_secs > 3600 {
            return Err(invalid(format!(
                "debounce_secs {} is outside the accepted range 1-3600",
                self.debounce_secs
            )));
        }
        Ok(())
    }

    /// Refractory period as a [`Duration`].
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_secs(self.debounce_secs)
    }

    /// Credentials pair for building notifications.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials {
            token: self.token.clone(),
            user: self.user.clone(),
        }
    }
}

fn invalid(details: String) -> BellError {
    BellError::InvalidConfig { details }
}
