//! Packet radio as a pair of queues
//!
//! Power changes and sends share one ordered request queue, so a
//! session's last frames go out before the radio is switched off.
//! Received frames come back on a second queue at their full length.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Channel, TrySendError};
use heapless::Vec;
use kinemux_hal::{Radio, RadioConfig};

use super::{to_line, Line, LinkError};

/// Work for the radio task, applied in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RadioRequest {
    /// Apply this configuration and listen
    On(RadioConfig),
    /// Stop listening
    Off,
    /// Transmit one frame
    Send(Line),
}

/// Packet radio driven by a radio task
///
/// - `E`: receive error reported by the task
/// - `F`: largest frame the task can hear
/// - `Q`, `R`: request and receive queue depths
pub struct QueuedRadio<'a, M: RawMutex, E, const F: usize, const Q: usize, const R: usize> {
    requests: &'a Channel<M, RadioRequest, Q>,
    received: &'a Channel<M, Result<Vec<u8, F>, E>, R>,
    config: RadioConfig,
    on: bool,
}

impl<'a, M: RawMutex, E, const F: usize, const Q: usize, const R: usize>
    QueuedRadio<'a, M, E, F, Q, R>
{
    pub fn new(
        requests: &'a Channel<M, RadioRequest, Q>,
        received: &'a Channel<M, Result<Vec<u8, F>, E>, R>,
    ) -> Self {
        Self {
            requests,
            received,
            config: RadioConfig::default(),
            on: false,
        }
    }

    /// Queue a power request; pending sends are dropped to make room
    fn request(&self, request: RadioRequest) {
        if let Err(TrySendError::Full(request)) = self.requests.try_send(request) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Radio queue full, dropping pending frames");
            self.requests.clear();
            self.requests.try_send(request).ok();
        }
    }
}

impl<M: RawMutex, E, const F: usize, const Q: usize, const R: usize> Radio
    for QueuedRadio<'_, M, E, F, Q, R>
{
    type Error = LinkError<E>;

    fn configure(&mut self, config: &RadioConfig) {
        self.config = *config;
    }

    fn power_on(&mut self) {
        self.received.clear();
        self.request(RadioRequest::On(self.config));
        self.on = true;
    }

    fn power_off(&mut self) {
        self.on = false;
        self.request(RadioRequest::Off);
        self.received.clear();
    }

    fn is_on(&self) -> bool {
        self.on
    }

    fn send(&mut self, payload: &[u8]) -> Result<(), Self::Error> {
        if !self.on {
            return Err(LinkError::NotConfigured);
        }
        let line = to_line::<E>(payload, self.config.max_payload_len as usize)?;
        self.requests
            .try_send(RadioRequest::Send(line))
            .map_err(|_| LinkError::QueueFull)
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<Option<usize>, Self::Error> {
        if !self.on {
            return Ok(None);
        }
        match self.received.try_receive() {
            Ok(Ok(frame)) => {
                let copied = frame.len().min(buf.len());
                buf[..copied].copy_from_slice(&frame[..copied]);
                Ok(Some(frame.len()))
            }
            Ok(Err(e)) => Err(LinkError::Receive(e)),
            Err(_) => Ok(None),
        }
    }
}
