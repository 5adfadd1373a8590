//! micro:bit v2 pin map
//!
//! | Signal        | Pin   |
//! |---------------|-------|
//! | Button A      | P0.14 |
//! | I2C SCL (int) | P0.08 |
//! | I2C SDA (int) | P0.16 |
//! | UART TX       | P0.06 |
//! | Rows 1-5      | P0.21, P0.22, P0.15, P0.24, P0.19 |
//! | Cols 1-5      | P0.28, P0.11, P0.31, P1.05, P0.30 |

use embassy_nrf::gpio::{AnyPin, Level};
use embassy_nrf::Peri;
use kinemux_core::traits::MATRIX_SIZE;

use crate::gpio::NrfOutput;

/// LED matrix lines, rows first
pub struct MatrixPins<'d> {
    pub rows: [NrfOutput<'d>; MATRIX_SIZE],
    pub cols: [NrfOutput<'d>; MATRIX_SIZE],
}

impl<'d> MatrixPins<'d> {
    /// Rows start low (deselected), columns high (dark)
    pub fn new(rows: [Peri<'d, AnyPin>; MATRIX_SIZE], cols: [Peri<'d, AnyPin>; MATRIX_SIZE]) -> Self {
        Self {
            rows: rows.map(|p| NrfOutput::new(p, Level::Low)),
            cols: cols.map(|p| NrfOutput::new(p, Level::High)),
        }
    }
}
