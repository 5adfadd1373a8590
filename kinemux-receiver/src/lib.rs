//! Host-side receiver for the kinemux firmware
//!
//! Finds the micro:bit's USB serial port (the interface chip enumerates
//! as a CMSIS-DAP device) and copies the CSV lines it sends to stdout or
//! a file until interrupted.

pub mod discovery;
pub mod error;
pub mod stream;

pub use discovery::{find_device, list_ports, DeviceMatcher, PortEntry, DEFAULT_PRODUCT};
pub use error::ReceiverError;
pub use stream::{open_port, stream_lines, StreamStats, DEFAULT_BAUD};
