//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use kinemux_core::traits::Image;
use kinemux_drivers::link::{Line, QueuedRadio, QueuedSerial, RadioRequest};
use kinemux_hal_nrf::{Frame, RadioError, MAX_FRAME_LEN};

/// Lines waiting for the serial task
const SERIAL_QUEUE_SIZE: usize = 8;

/// Requests waiting for the radio task
const RADIO_QUEUE_SIZE: usize = 8;

/// Received frames waiting for the mode task
const RADIO_RX_QUEUE_SIZE: usize = 8;

/// What the matrix task should display
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum MatrixCommand {
    /// Enable the matrix and show this frame
    Show(Image),
    /// Blank the matrix and stop scanning
    Off,
}

/// Mode task's serial link
pub type BoardSerial = QueuedSerial<'static, CriticalSectionRawMutex, SERIAL_QUEUE_SIZE>;

/// Mode task's radio
pub type BoardRadio = QueuedRadio<
    'static,
    CriticalSectionRawMutex,
    RadioError,
    MAX_FRAME_LEN,
    RADIO_QUEUE_SIZE,
    RADIO_RX_QUEUE_SIZE,
>;

/// Latest frame for the matrix task (updated by the mode task)
///
/// Only the most recent command matters; intermediate frames are dropped.
pub static MATRIX_CMD: Signal<CriticalSectionRawMutex, MatrixCommand> = Signal::new();

/// Lines for the host serial link (mode task -> serial task)
pub static SERIAL_TX: Channel<CriticalSectionRawMutex, Line, SERIAL_QUEUE_SIZE> = Channel::new();

/// Radio power and transmit requests (mode task -> radio task)
pub static RADIO_REQUEST: Channel<CriticalSectionRawMutex, RadioRequest, RADIO_QUEUE_SIZE> =
    Channel::new();

/// Received frames and receive errors (radio task -> mode task)
pub static RADIO_RX: Channel<
    CriticalSectionRawMutex,
    Result<Frame, RadioError>,
    RADIO_RX_QUEUE_SIZE,
> = Channel::new();
