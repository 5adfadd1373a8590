//! UART serial communication abstractions
//!
//! The board streams CSV lines to the host over the interface chip's
//! USB serial bridge. Only the transmit direction is used.

/// Fixed baud rate of the host link
pub const SERIAL_BAUDRATE: u32 = 115_200;

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// (Re)initialise the peripheral with the given configuration
    ///
    /// Configuration is infallible at this layer; a peripheral that
    /// cannot be configured is a fatal condition for the implementation.
    fn configure(&mut self, config: &UartConfig);

    /// Hand data to the transmitter
    ///
    /// Implementations may queue the data and return before it is on the
    /// wire. An error means the data was not accepted and will not be
    /// sent.
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: SERIAL_BAUDRATE,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}
