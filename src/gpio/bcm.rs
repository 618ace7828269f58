//! rppal-backed doorbell pin.
//!
//! ## Hardware
//!
//! The bell switch sits between the BCM-numbered input and ground; the
//! internal pull-up holds the line high at rest, so a closure reads as a
//! falling edge. The interrupt is armed once at configure time and stays
//! armed for the life of the process — re-arming only drains events that
//! fired while the monitor was busy sending or sleeping.

use std::io;
use std::time::Duration;

use rppal::gpio::{Gpio, InputPin, Level, Trigger};

use crate::core::errors::{BellError, Result};
use crate::gpio::{BellInput, WaitOutcome};

/// The doorbell input: one pull-up pin with a falling-edge interrupt.
pub struct BellPin {
    pin: InputPin,
}

impl BellPin {
    /// Claim the pin, enable the pull-up, and arm the falling-edge
    /// interrupt. Must complete before the monitor loop starts.
    ///
    /// # Errors
    /// Returns [`BellError::GpioConfigure`] when the GPIO peripheral is
    /// absent, the pin is taken, or access is denied — all fatal.
    pub fn configure(bcm: u8) -> Result<Self> {
        let gpio = Gpio::new().map_err(|err| configure_error(bcm, &err))?;
        let mut pin = gpio
            .get(bcm)
            .map_err(|err| configure_error(bcm, &err))?
            .into_input_pullup();
        pin.set_interrupt(Trigger::FallingEdge)
            .map_err(|err| configure_error(bcm, &err))?;
        Ok(Self { pin })
    }
}

impl BellInput for BellPin {
    fn rearm(&mut self) -> Result<()> {
        // reset = true drops interrupt events cached while we were not
        // waiting, the same one-shot arming a bare wait-for-edge call has.
        wait_outcome(self.pin.poll_interrupt(true, Some(Duration::ZERO)))?;
        Ok(())
    }

    fn wait_for_press(&mut self, timeout: Duration) -> Result<WaitOutcome> {
        wait_outcome(self.pin.poll_interrupt(false, Some(timeout)))
    }
}

impl Drop for BellPin {
    fn drop(&mut self) {
        // Best-effort release; rppal restores the pin mode itself when the
        // InputPin drops.
        let _ = self.pin.clear_interrupt();
    }
}

/// Map one poll of the interrupt facility to a wait outcome.
///
/// A poll cut short by a signal (`EINTR` out of the kernel wait) reads as
/// an empty wait, not a failure: the handler that interrupted it has
/// already set the shutdown flag, and the caller's next flag check exits
/// cleanly. Every other failure is fatal.
fn wait_outcome(poll: rppal::gpio::Result<Option<Level>>) -> Result<WaitOutcome> {
    match poll {
        Ok(Some(_)) => Ok(WaitOutcome::Pressed),
        Ok(None) => Ok(WaitOutcome::TimedOut),
        Err(rppal::gpio::Error::Io(err)) if err.kind() == io::ErrorKind::Interrupted => {
            Ok(WaitOutcome::TimedOut)
        }
        Err(err) => Err(wait_error(&err)),
    }
}

fn configure_error(pin: u8, err: &rppal::gpio::Error) -> BellError {
    BellError::GpioConfigure {
        pin,
        details: err.to_string(),
    }
}

fn wait_error(err: &rppal::gpio::Error) -> BellError {
    BellError::GpioWait {
        details: err.to_string(),
    }
}
