//! Radio task
//!
//! Owns the RADIO peripheral. Requests from the mode task are applied in
//! order; while the radio is on, the task listens between them and
//! queues every frame it hears.

use defmt::*;
use embassy_futures::select::{select, Either};
use kinemux_drivers::link::RadioRequest;
use kinemux_hal_nrf::{Frame, NrfRadio, RadioError};

use crate::channels::{RADIO_REQUEST, RADIO_RX};

#[embassy_executor::task]
pub async fn radio_task(mut radio: NrfRadio<'static>) {
    info!("Radio task started");

    let mut listening = false;

    loop {
        let request = if listening {
            // A request cancels the receive in progress
            match select(RADIO_REQUEST.receive(), radio.receive()).await {
                Either::First(request) => request,
                Either::Second(received) => {
                    forward(received);
                    continue;
                }
            }
        } else {
            RADIO_REQUEST.receive().await
        };

        match request {
            RadioRequest::On(config) => {
                radio.configure(&config);
                listening = true;
                debug!("Radio listening on channel {}", config.channel);
            }
            RadioRequest::Off => {
                listening = false;
                debug!("Radio off");
            }
            RadioRequest::Send(line) => {
                if let Err(e) = radio.send(&line).await {
                    warn!("Radio send failed: {}", e);
                }
            }
        }
    }
}

fn forward(received: Result<Frame, RadioError>) {
    if RADIO_RX.try_send(received).is_err() {
        trace!("Radio RX queue full, frame dropped");
    }
}
