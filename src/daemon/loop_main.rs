//! The doorbell monitoring loop.
//!
//! One thread, one loop: arm the pin, block until a press or a shutdown
//! request, send one notification, hold off for the debounce window,
//! repeat. Presses that land while a send or the debounce pause is in
//! flight are dropped on the next arm, which is what debouncing means
//! here: at most one notification per window.

use std::thread;
use std::time::{Duration, Instant};

use log::{error, info, warn};

use crate::core::config::Credentials;
use crate::core::errors::Result;
use crate::daemon::signals::ShutdownFlag;
use crate::gpio::{BellInput, WaitOutcome};
use crate::notify::{Notification, Notifier};

/// Slice length for the blocking press wait. The pin adapter blocks for
/// one slice at a time so the loop can observe a shutdown request; edge
/// events arriving inside a slice are latched by the kernel, not lost.
const WAIT_SLICE: Duration = Duration::from_millis(200);

/// Slice length for the debounce pause, same reasoning as [`WAIT_SLICE`].
const PAUSE_SLICE: Duration = Duration::from_millis(250);

/// Why a press wait returned.
enum Wake {
    /// A falling edge was observed.
    Pressed,
    /// A shutdown request was observed before any edge.
    ShutdownRequested,
}

/// Ties a bell input to a notifier and runs the trigger/notify/debounce
/// cycle until shutdown is requested.
pub struct DoorbellMonitor<B, N> {
    bell: B,
    notifier: N,
    credentials: Credentials,
    debounce: Duration,
    shutdown: ShutdownFlag,
}

impl<B: BellInput, N: Notifier> DoorbellMonitor<B, N> {
    /// Assemble a monitor. Nothing blocks until [`run`](Self::run).
    pub fn new(
        bell: B,
        notifier: N,
        credentials: Credentials,
        debounce: Duration,
        shutdown: ShutdownFlag,
    ) -> Self {
        Self {
            bell,
            notifier,
            credentials,
            debounce,
            shutdown,
        }
    }

    /// Run the monitoring loop until shutdown is requested.
    ///
    /// # Errors
    /// Returns the underlying pin error when arming or waiting fails;
    /// notification failures are logged and never end the loop.
    pub fn run(mut self) -> Result<()> {
        loop {
            info!("Waiting for doorbell...");
            match self.await_press()? {
                Wake::Pressed => {}
                Wake::ShutdownRequested => return Ok(()),
            }
            self.notify_once();
            self.debounce_pause();
            if self.shutdown.is_set() {
                return Ok(());
            }
        }
    }

    /// Arm the pin and block until a press or a shutdown request.
    fn await_press(&mut self) -> Result<Wake> {
        self.bell.rearm()?;
        loop {
            if self.shutdown.is_set() {
                return Ok(Wake::ShutdownRequested);
            }
            match self.bell.wait_for_press(WAIT_SLICE)? {
                WaitOutcome::Pressed => return Ok(Wake::Pressed),
                WaitOutcome::TimedOut => {}
            }
        }
    }

    /// Send one notification and report the outcome. Never fails the loop.
    fn notify_once(&self) {
        info!("Sending notification");
        let note = Notification::doorbell(&self.credentials);
        match self.notifier.notify(&note) {
            Ok(delivery) if delivery.is_success() => info!("{delivery}"),
            Ok(delivery) => warn!("{delivery}"),
            Err(err) if err.is_transient() => warn!("notification not delivered: {err}"),
            Err(err) => error!("notification not delivered: {err}"),
        }
    }

    /// Sleep out the debounce window, waking early on shutdown.
    fn debounce_pause(&self) {
        let deadline = Instant::now() + self.debounce;
        while !self.shutdown.is_set() {
            let Some(remaining) = deadline.checked_duration_since(Instant::now()) else {
                return;
            };
            if remaining.is_zero() {
                return;
            }
            thread::sleep(remaining.min(PAUSE_SLICE));
        }
    }
}
