//! Daemon subsystem: the monitoring loop and signal handling.

pub mod loop_main;
pub mod signals;
