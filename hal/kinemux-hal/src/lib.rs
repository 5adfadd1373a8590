//! Kinemux Hardware Abstraction Layer
//!
//! This crate defines the peripheral traits the board-agnostic core is
//! written against. Chip-specific HALs implement them so the same mode
//! logic runs on the micro:bit and under host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (kinemux-firmware)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  kinemux-core (mode logic)              │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  kinemux-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ kinemux-hal-  │
//!             │     nrf       │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`uart::UartTx`] - Serial (USB bridge) transmit
//! - [`radio::Radio`] - Short-range packet radio

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod radio;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::{ActiveLow, InputPin, OutputPin};
pub use radio::{Radio, RadioConfig, RADIO_MAX_PAYLOAD};
pub use uart::{UartConfig, UartTx, SERIAL_BAUDRATE};
