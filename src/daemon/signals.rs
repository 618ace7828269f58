//! Cooperative shutdown on SIGINT / SIGTERM.
//!
//! The handler only flips an atomic flag; the monitor observes it between
//! blocking slices and unwinds normally, so the GPIO pin is released
//! through the usual `Drop` path instead of being abandoned mid-wait.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use signal_hook::consts::{SIGINT, SIGTERM};

use crate::core::errors::{BellError, Result};

/// Shared shutdown request flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct ShutdownFlag {
    requested: Arc<AtomicBool>,
}

impl ShutdownFlag {
    /// Fresh, unset flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register SIGINT and SIGTERM to set this flag.
    ///
    /// # Errors
    /// Returns a runtime error when a handler cannot be installed.
    pub fn install(&self) -> Result<()> {
        for sig in [SIGINT, SIGTERM] {
            signal_hook::flag::register(sig, Arc::clone(&self.requested)).map_err(|err| {
                BellError::Runtime {
                    details: format!("cannot install handler for signal {sig}: {err}"),
                }
            })?;
        }
        Ok(())
    }

    /// Whether shutdown has been requested.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Request shutdown from process context (tests, embedding).
    pub fn trigger(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }
}
