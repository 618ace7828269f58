//! Doorbell input seam.
//!
//! The monitor never touches GPIO directly; it talks to a [`BellInput`],
//! and the hardware adapter lives in [`bcm`]. Tests drive the loop with a
//! scripted implementation instead of a pin.

use std::time::Duration;

use crate::core::errors::Result;

/// Result of one bounded wait on the doorbell input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The falling edge fired — somebody pressed the bell.
    Pressed,
    /// The timeout elapsed with no press.
    TimedOut,
}

/// A source of doorbell presses.
///
/// The contract mirrors an edge-triggered interrupt line: presses that occur
/// while nobody is waiting are not queued for later — [`BellInput::rearm`]
/// discards them before a fresh wait begins.
pub trait BellInput {
    /// Discard any press recorded while the monitor was not waiting.
    ///
    /// # Errors
    /// Failures are fatal: the wait facility is unusable.
    fn rearm(&mut self) -> Result<()>;

    /// Block until a press or until `timeout` elapses.
    ///
    /// A press wakes the wait immediately; the timeout only bounds how long
    /// the caller goes without a chance to observe a shutdown request. A
    /// wait cut short by a signal reports [`WaitOutcome::TimedOut`] for the
    /// same reason: the caller re-checks its flag and either exits cleanly
    /// or just waits again.
    ///
    /// # Errors
    /// Failures are fatal: the wait facility is unusable.
    fn wait_for_press(&mut self, timeout: Duration) -> Result<WaitOutcome>;
}

#[cfg(all(feature = "hardware", target_os = "linux"))]
pub mod bcm;
