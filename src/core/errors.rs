//! BELL-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, BellError>;

/// Top-level error type for the doorbell monitor.
///
/// Setup failures (config, GPIO, signal registration) are fatal: the process
/// exits before the wait loop starts. [`BellError::NotifySend`] is the one
/// transient class — it is reported and the loop continues.
#[derive(Debug, Error)]
pub enum BellError {
    #[error("[BELL-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[BELL-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[BELL-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[BELL-1101] unsupported platform: {details}")]
    UnsupportedPlatform { details: String },

    #[error("[BELL-2001] cannot configure GPIO pin {pin}: {details}")]
    GpioConfigure { pin: u8, details: String },

    #[error("[BELL-2002] GPIO edge wait failed: {details}")]
    GpioWait { details: String },

    #[error("[BELL-2101] notification send failure: {details}")]
    NotifySend { details: String },

    #[error("[BELL-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[BELL-3900] runtime failure: {details}")]
    Runtime { details: String },
}

impl BellError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "BELL-1001",
            Self::MissingConfig { .. } => "BELL-1002",
            Self::ConfigParse { .. } => "BELL-1003",
            Self::UnsupportedPlatform { .. } => "BELL-1101",
            Self::GpioConfigure { .. } => "BELL-2001",
            Self::GpioWait { .. } => "BELL-2002",
            Self::NotifySend { .. } => "BELL-2101",
            Self::Io { .. } => "BELL-3002",
            Self::Runtime { .. } => "BELL-3900",
        }
    }

    /// Whether the monitor loop survives this failure.
    ///
    /// Only send failures are transient: they are logged and the loop
    /// re-arms. Everything else aborts the process.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::NotifySend { .. })
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<toml::de::Error> for BellError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}

impl From<reqwest::Error> for BellError {
    fn from(value: reqwest::Error) -> Self {
        Self::NotifySend {
            details: value.to_string(),
        }
    }
}
