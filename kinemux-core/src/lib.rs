//! Board-agnostic core logic for the kinemux firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Device traits (motion sensor, clock, LED matrix, button)
//! - Mode table and its validation
//! - Mode controller (hardware reconfiguration on mode entry)
//! - Event loop state machine (button edge, data pump, CSV framing)
//! - Display pulse feedback
//! - Sensor record formatting

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod event_loop;
pub mod feedback;
pub mod hardware;
pub mod input;
pub mod record;
pub mod state;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{Mode, ModeSpec, ModeTable, Sink, Source};
pub use controller::ModeController;
pub use event_loop::{EventLoop, TickOutcome, TickReport, DEBOUNCE_MS};
pub use hardware::Hardware;
pub use record::{Record, CSV_HEADER};
