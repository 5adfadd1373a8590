//! nRF52833-specific HAL for the micro:bit v2
//!
//! embassy-nrf drivers for the board, implementing the shared
//! `kinemux-hal` traits where the mode loop uses them directly:
//!
//! - GPIO newtypes for the button and LED matrix lines
//! - async UARTE transmitter for the USB serial bridge
//! - async RADIO driver used as a datagram pipe
//! - Uptime clock backed by the embassy time driver
//! - micro:bit v2 pin map

#![no_std]

pub mod board;
pub mod clock;
pub mod gpio;
pub mod radio;
pub mod uart;

pub use clock::UptimeClock;
pub use gpio::{NrfInput, NrfOutput};
pub use radio::{Frame, NrfRadio, RadioError, MAX_FRAME_LEN};
pub use uart::{UarteSerial, UartError};
