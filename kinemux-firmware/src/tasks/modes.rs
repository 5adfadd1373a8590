//! Mode task
//!
//! Runs the mode event loop: one step per iteration, then sleeps for
//! whatever the step asked for (the mode interval, or the debounce delay
//! after a switch). A step only touches queues and the I2C sensor, so it
//! never holds the executor for a serial or radio transfer.

use defmt::*;
use embassy_nrf::twim::Twim;
use embassy_time::Timer;
use kinemux_core::event_loop::SourceFault;
use kinemux_core::{EventLoop, Hardware, ModeTable, TickOutcome, TickReport};
use kinemux_drivers::sensor::Lsm303agr;
use kinemux_hal::ActiveLow;
use kinemux_hal_nrf::{NrfInput, UptimeClock};

use crate::channels::{BoardRadio, BoardSerial};
use crate::display::SignalMatrix;

/// Concrete device set for the micro:bit v2
pub type BoardHardware = Hardware<
    ActiveLow<NrfInput<'static>>,
    Lsm303agr<Twim<'static>>,
    UptimeClock,
    BoardRadio,
    BoardSerial,
    SignalMatrix,
>;

#[embassy_executor::task]
pub async fn mode_task(mut hw: BoardHardware, table: ModeTable) {
    info!("Mode task started");

    let mut event_loop = EventLoop::new(table);

    loop {
        let report = event_loop.step(&mut hw);
        log_report(&report);
        Timer::after_millis(report.sleep_ms as u64).await;
    }
}

fn log_report(report: &TickReport) {
    match report.outcome {
        TickOutcome::ModeEntered(mode) => {
            info!("Mode: {} (next step in {} ms)", mode.name(), report.sleep_ms);
        }
        TickOutcome::NoData => {}
        TickOutcome::SourceFault(SourceFault::Sensor(e)) => {
            warn!("Sensor read failed: {}", e);
        }
        TickOutcome::SourceFault(fault) => {
            debug!("Source fault: {}", fault);
        }
        TickOutcome::Delivered {
            counter,
            header_sent,
            sink_failed,
        } => {
            if sink_failed {
                warn!("Record {} not delivered", counter);
            } else if header_sent {
                info!("Session header sent");
            } else {
                trace!("Record {} delivered", counter);
            }
        }
    }
}
