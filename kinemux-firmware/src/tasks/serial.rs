//! Serial task
//!
//! Writes queued lines to the host link, one DMA transfer per line.

use defmt::*;
use kinemux_hal_nrf::UarteSerial;

use crate::channels::SERIAL_TX;

#[embassy_executor::task]
pub async fn serial_task(mut link: UarteSerial<'static>) {
    info!("Serial task started");

    loop {
        let line = SERIAL_TX.receive().await;
        if let Err(e) = link.write(&line).await {
            warn!("Serial write failed: {}", e);
        }
    }
}
