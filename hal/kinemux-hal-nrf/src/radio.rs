//! RADIO peripheral as a datagram radio
//!
//! Uses the embassy-nrf IEEE 802.15.4 driver as a plain packet pipe:
//! one CSV line per frame, no acknowledgement, no addressing. Both ends
//! must run this firmware on the same channel.
//!
//! Send and receive are async; the firmware's radio task owns the
//! driver and awaits them.

use embassy_nrf::radio::ieee802154::{Packet, Radio as Ieee802154};
use heapless::Vec;
use kinemux_hal::RadioConfig;

/// Largest payload one frame carries, in bytes
pub const MAX_FRAME_LEN: usize = Packet::CAPACITY as usize;

/// A received frame payload, at its full length
pub type Frame = Vec<u8, MAX_FRAME_LEN>;

/// IEEE 802.15.4 channels are numbered 11-26
const CHANNEL_BASE: u8 = 11;
const CHANNEL_COUNT: u8 = 16;

/// Errors from the radio driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioError {
    /// Payload larger than the configured maximum
    TooLong,
    /// Channel busy or CRC mismatch
    Transfer,
}

pub struct NrfRadio<'d> {
    radio: Ieee802154<'d>,
    max_payload_len: usize,
}

impl<'d> NrfRadio<'d> {
    pub fn new(radio: Ieee802154<'d>) -> Self {
        let mut radio = Self {
            radio,
            max_payload_len: 0,
        };
        radio.configure(&RadioConfig::default());
        radio
    }

    /// Apply channel, power and payload limit for the next transfer
    pub fn configure(&mut self, config: &RadioConfig) {
        let channel = CHANNEL_BASE + config.channel % CHANNEL_COUNT;
        self.radio.set_channel(channel);
        self.radio.set_transmission_power(config.tx_power_dbm);
        self.max_payload_len = (config.max_payload_len as usize).min(MAX_FRAME_LEN);
    }

    /// Send one frame after a clear-channel check
    pub async fn send(&mut self, payload: &[u8]) -> Result<(), RadioError> {
        if payload.len() > self.max_payload_len {
            return Err(RadioError::TooLong);
        }
        let mut packet = Packet::new();
        packet.copy_from_slice(payload);
        self.radio
            .try_send(&mut packet)
            .await
            .map_err(|_| RadioError::Transfer)
    }

    /// Wait for the next frame with a valid CRC
    ///
    /// Dropping the future stops the receiver.
    pub async fn receive(&mut self) -> Result<Frame, RadioError> {
        let mut packet = Packet::new();
        self.radio
            .receive(&mut packet)
            .await
            .map_err(|_| RadioError::Transfer)?;
        Frame::from_slice(&packet).map_err(|_| RadioError::TooLong)
    }
}
