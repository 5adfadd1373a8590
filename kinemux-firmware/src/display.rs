//! LED matrix front end for the mode task
//!
//! Frames are handed to the matrix task over [`MATRIX_CMD`]; the scan
//! itself runs there at a fixed tick.

use kinemux_core::traits::{Image, LedMatrix};

use crate::channels::{MatrixCommand, MATRIX_CMD};

#[derive(Default)]
pub struct SignalMatrix {
    on: bool,
}

impl LedMatrix for SignalMatrix {
    fn power_on(&mut self) {
        self.on = true;
    }

    fn power_off(&mut self) {
        self.on = false;
        MATRIX_CMD.signal(MatrixCommand::Off);
    }

    fn is_on(&self) -> bool {
        self.on
    }

    fn show(&mut self, image: &Image) {
        if self.on {
            MATRIX_CMD.signal(MatrixCommand::Show(*image));
        }
    }
}
