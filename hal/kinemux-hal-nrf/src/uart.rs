//! UARTE transmitter for the host serial link
//!
//! The micro:bit routes UARTE0 TX to the interface chip, which presents it
//! to the host as a USB CDC serial port.

use embassy_nrf::uarte::{self, UarteTx};

/// Errors from the UARTE peripheral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartError {
    /// DMA transfer failed
    Transfer,
}

impl From<uarte::Error> for UartError {
    fn from(_: uarte::Error) -> Self {
        UartError::Transfer
    }
}

/// Build the UARTE configuration for the host link (115200 8N1)
pub fn host_link_config() -> uarte::Config {
    let mut config = uarte::Config::default();
    config.baudrate = uarte::Baudrate::BAUD115200;
    config.parity = uarte::Parity::EXCLUDED;
    config
}

/// Transmit half of UARTE0, built once at boot with [`host_link_config`]
pub struct UarteSerial<'d> {
    tx: UarteTx<'d>,
}

impl<'d> UarteSerial<'d> {
    pub fn new(tx: UarteTx<'d>) -> Self {
        Self { tx }
    }

    /// Write `data` and wait for the DMA transfer to end
    pub async fn write(&mut self, data: &[u8]) -> Result<(), UartError> {
        // Copies through RAM when `data` lives in flash
        self.tx.write(data).await?;
        Ok(())
    }
}
