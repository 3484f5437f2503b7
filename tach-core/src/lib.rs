//! Core logic for the lathe tachometer, independent of the target hardware.
//!
//! Everything that can be exercised without a board lives here:
//!
//! - [`capture`] - shared pulse-interval accumulator fed from edge context
//! - [`rpm`] - RPM estimation (timeout, mean interval, filtering) and
//!   surface speed
//! - [`input`] - button line state and short/long press classification
//! - [`menu`] - settings menu state machine
//! - [`settings`] - persistent settings record, stepping rules, flash codec
//! - [`format`] - display text builders
//! - [`config`] - timing constants and estimator thresholds
//!
//! The firmware crate wires these to GPIO edges, the flash driver and the
//! OLED. Unit tests run on the host: `cargo test -p tach-core`.

#![cfg_attr(not(test), no_std)]

pub mod capture;
pub mod config;
pub mod format;
pub mod input;
pub mod menu;
pub mod rpm;
pub mod settings;
