//! LED matrix scan task
//!
//! Drives the row/column multiplex at a fixed tick and picks up new
//! frames from [`MATRIX_CMD`] between slots.

use defmt::*;
use embassy_time::{Duration, Ticker};
use kinemux_drivers::matrix::MatrixScanner;
use kinemux_hal_nrf::board::MatrixPins;

use crate::channels::{MatrixCommand, MATRIX_CMD};

/// Time per scan slot in microseconds
pub const SCAN_TICK_US: u64 = 100;

#[embassy_executor::task]
pub async fn matrix_task(pins: MatrixPins<'static>) {
    info!("Matrix task started");

    let MatrixPins { rows, cols } = pins;
    let mut scanner = MatrixScanner::new(rows, cols);
    let mut ticker = Ticker::every(Duration::from_micros(SCAN_TICK_US));

    loop {
        if let Some(cmd) = MATRIX_CMD.try_take() {
            match cmd {
                MatrixCommand::Show(image) => {
                    scanner.set_image(&image);
                    scanner.set_enabled(true);
                }
                MatrixCommand::Off => {
                    debug!("Matrix off");
                    scanner.set_enabled(false);
                }
            }
        }

        scanner.tick();
        ticker.next().await;
    }
}
