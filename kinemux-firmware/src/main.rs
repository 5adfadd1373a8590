//! Kinemux - micro:bit Data Acquisition Firmware
//!
//! Main firmware binary for the nRF52833-based micro:bit v2.
//! Button A cycles between four modes, each routing one source to one sink:
//!
//! | Mode     | Source  | Sink   | Icon    |
//! |----------|---------|--------|---------|
//! | idle     | -       | -      | -       |
//! | relay    | radio   | serial | heart   |
//! | log      | sensors | serial | arrow S |
//! | transmit | sensors | radio  | arrow E |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_nrf::peripherals::{RADIO, TWISPI0, UARTE0};
use embassy_nrf::radio::ieee802154::Radio as Ieee802154;
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::uarte::{self, UarteTx};
use embassy_nrf::{bind_interrupts, radio};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use kinemux_core::Hardware;
use kinemux_drivers::sensor::Lsm303agr;
use kinemux_hal::ActiveLow;
use kinemux_hal_nrf::board::MatrixPins;
use kinemux_hal_nrf::uart::host_link_config;
use kinemux_hal_nrf::{NrfInput, NrfRadio, UarteSerial, UptimeClock};

use crate::channels::{BoardRadio, BoardSerial, RADIO_REQUEST, RADIO_RX, SERIAL_TX};
use crate::display::SignalMatrix;

mod channels;
mod config;
mod display;
mod tasks;

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<TWISPI0>;
    UARTE0 => uarte::InterruptHandler<UARTE0>;
    RADIO => radio::InterruptHandler<RADIO>;
});

/// TWIM copies writes through this when the source is in flash
static TWIM_TX_BUF: StaticCell<[u8; 16]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Kinemux firmware starting...");

    let p = embassy_nrf::init(Default::default());
    info!("Peripherals initialized");

    let table = config::mode_table();
    info!("Mode table:");
    config::log_mode_table(&table);

    // Internal I2C bus: LSM303AGR
    let tx_buf = TWIM_TX_BUF.init([0u8; 16]);
    let mut twim_config = twim::Config::default();
    twim_config.frequency = twim::Frequency::K400;
    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_16, p.P0_08, twim_config, tx_buf);

    let mut sensor = Lsm303agr::new(i2c);
    match sensor.init() {
        Ok(()) => info!("LSM303AGR initialized"),
        // Keep running: log mode reports the fault on every read
        Err(e) => error!("LSM303AGR init failed: {}", e),
    }

    // USB serial bridge via the interface chip
    let uart = UarteTx::new(p.UARTE0, Irqs, p.P0_06, host_link_config());
    let serial = UarteSerial::new(uart);

    let radio = NrfRadio::new(Ieee802154::new(p.RADIO, Irqs));

    let button = ActiveLow(NrfInput::new(p.P0_14.into()));

    let matrix_pins = MatrixPins::new(
        [
            p.P0_21.into(),
            p.P0_22.into(),
            p.P0_15.into(),
            p.P0_24.into(),
            p.P0_19.into(),
        ],
        [
            p.P0_28.into(),
            p.P0_11.into(),
            p.P0_31.into(),
            p.P1_05.into(),
            p.P0_30.into(),
        ],
    );

    let hw = Hardware::new(
        button,
        sensor,
        UptimeClock,
        BoardRadio::new(&RADIO_REQUEST, &RADIO_RX),
        BoardSerial::new(&SERIAL_TX),
        SignalMatrix::default(),
    );

    spawner.spawn(tasks::matrix_task(matrix_pins)).unwrap();
    spawner.spawn(tasks::serial_task(serial)).unwrap();
    spawner.spawn(tasks::radio_task(radio)).unwrap();
    spawner.spawn(tasks::mode_task(hw, table)).unwrap();

    info!("All tasks spawned");
}
