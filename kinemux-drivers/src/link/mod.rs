//! Queue front ends for the serial link and the packet radio
//!
//! The mode loop is synchronous and must never wait on a transfer. These
//! types implement its [`UartTx`](kinemux_hal::UartTx) and
//! [`Radio`](kinemux_hal::Radio) traits with `try_send`/`try_receive` on
//! embassy-sync channels. Async tasks on the other end own the
//! peripherals and await the transfers.

pub mod radio;
pub mod serial;

use heapless::Vec;
use kinemux_core::record::RECORD_CAPACITY;

pub use radio::{QueuedRadio, RadioRequest};
pub use serial::QueuedSerial;

/// One outgoing line (a header or a record)
pub type Line = Vec<u8, RECORD_CAPACITY>;

/// Why a queued link did not accept or produce a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError<E> {
    /// Used before the mode configured or powered it
    NotConfigured,
    /// Longer than a line slot or the radio payload limit
    TooLong,
    /// The task on the other end has fallen behind
    QueueFull,
    /// The radio task could not receive a frame
    Receive(E),
}

fn to_line<E>(data: &[u8], max_len: usize) -> Result<Line, LinkError<E>> {
    if data.len() > max_len {
        return Err(LinkError::TooLong);
    }
    Line::from_slice(data).map_err(|_| LinkError::TooLong)
}
