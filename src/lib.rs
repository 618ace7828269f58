//! pibell — Raspberry Pi doorbell monitor that pushes a Pushover
//! notification on every ring.
//!
//! The whole program is one blocking loop: wait for a falling edge on the
//! doorbell pin, POST one form-encoded notification to Pushover, sleep a
//! fixed debounce interval, re-arm. The GPIO facility and the HTTPS
//! transport sit behind the [`gpio::BellInput`] and [`notify::Notifier`]
//! seams so the loop can be exercised without hardware or network.
//!
//! ```text
//!   BCM pin (pull-up) ──▶ BellInput ──▶ DoorbellMonitor ──▶ Notifier ──▶ Pushover
//! ```

pub mod core;
pub mod daemon;
pub mod gpio;
pub mod notify;

#[cfg(feature = "cli")]
pub mod cli_app;

pub use crate::core::config::{Config, Credentials};
pub use crate::core::errors::{BellError, Result};
pub use crate::daemon::loop_main::DoorbellMonitor;
pub use crate::daemon::signals::ShutdownFlag;
pub use crate::gpio::{BellInput, WaitOutcome};
pub use crate::notify::{Delivery, Notification, Notifier};
