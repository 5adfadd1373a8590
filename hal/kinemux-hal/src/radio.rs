//! Short-range packet radio abstraction
//!
//! Point-to-point, unacknowledged datagrams between two boards. The
//! radio carries the same CSV text the serial link does.

/// Maximum payload length the radio is configured for, in bytes
pub const RADIO_MAX_PAYLOAD: usize = 100;

/// Radio configuration applied when a mode needs the radio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RadioConfig {
    /// Maximum payload length in bytes
    pub max_payload_len: u8,
    /// RF channel
    pub channel: u8,
    /// Transmit power in dBm
    pub tx_power_dbm: i8,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            max_payload_len: RADIO_MAX_PAYLOAD as u8,
            channel: 17,
            tx_power_dbm: 0,
        }
    }
}

/// Packet radio
///
/// Power and configuration calls are infallible at this layer. Send and
/// receive report errors so the caller can log them; neither retries.
pub trait Radio {
    /// Error type for send/receive operations
    type Error;

    /// Apply a configuration (takes effect on the next power-on)
    fn configure(&mut self, config: &RadioConfig);

    /// Power the radio on and start listening
    fn power_on(&mut self);

    /// Power the radio off, discarding any queued packets
    fn power_off(&mut self);

    /// Check if the radio is powered
    fn is_on(&self) -> bool;

    /// Send one datagram (fire-and-forget)
    fn send(&mut self, payload: &[u8]) -> Result<(), Self::Error>;

    /// Take the next received datagram, if any, without waiting
    ///
    /// Returns `Ok(Some(len))` where `len` is the full payload length, or
    /// `Ok(None)` when nothing has been received. At most `buf.len()`
    /// bytes are copied; a `len` larger than `buf.len()` means the
    /// datagram did not fit.
    fn receive(&mut self, buf: &mut [u8]) -> Result<Option<usize>, Self::Error>;
}
