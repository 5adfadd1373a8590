//! GPIO newtypes implementing the shared pin traits

use embassy_nrf::gpio::{AnyPin, Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::Peri;
use kinemux_hal::{InputPin, OutputPin};

/// Floating input (the micro:bit buttons have external pull-ups)
pub struct NrfInput<'d>(Input<'d>);

impl<'d> NrfInput<'d> {
    pub fn new(pin: Peri<'d, AnyPin>) -> Self {
        Self(Input::new(pin, Pull::None))
    }
}

impl InputPin for NrfInput<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// Push-pull output
pub struct NrfOutput<'d>(Output<'d>);

impl<'d> NrfOutput<'d> {
    pub fn new(pin: Peri<'d, AnyPin>, initial: Level) -> Self {
        Self(Output::new(pin, initial, OutputDrive::Standard))
    }
}

impl OutputPin for NrfOutput<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }
}
