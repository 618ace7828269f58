//! Core building blocks: configuration and BELL-coded errors.

pub mod config;
pub mod errors;
