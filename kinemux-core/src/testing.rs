//! In-memory fakes for the hardware traits, shared by the unit tests

use std::cell::Cell;
use std::collections::VecDeque;
use std::string::String;
use std::vec::Vec;

use kinemux_hal::{Radio, RadioConfig, UartConfig, UartTx};

use crate::hardware::Hardware;
use crate::input::Button;
use crate::traits::{Clock, Gesture, Image, LedMatrix, MotionSensor, SensorError, Vector3};

pub type TestHardware =
    Hardware<FakeButton, FakeSensor, FakeClock, FakeRadio, FakeSerial, FakeDisplay>;

pub fn fake_hardware() -> TestHardware {
    Hardware::new(
        FakeButton::default(),
        FakeSensor::default(),
        FakeClock::at(0),
        FakeRadio::default(),
        FakeSerial::default(),
        FakeDisplay::default(),
    )
}

#[derive(Default)]
pub struct FakeButton {
    pub pressed: bool,
}

impl Button for FakeButton {
    fn is_pressed(&mut self) -> bool {
        self.pressed
    }
}

#[derive(Default)]
pub struct FakeSensor {
    pub acc: Vector3,
    pub mag: Vector3,
    pub heading: u16,
    pub gesture: Gesture,
    /// Applied to every read
    pub fault: Option<SensorError>,
    /// Per-read script consumed before `fault`; `None` entries succeed
    pub script: VecDeque<Option<SensorError>>,
    pub reads: u32,
}

impl MotionSensor for FakeSensor {
    fn acceleration(&mut self) -> Result<Vector3, SensorError> {
        self.reads += 1;
        let fault = self.script.pop_front().unwrap_or(self.fault);
        match fault {
            Some(e) => Err(e),
            None => Ok(Vector3::new(self.acc.x + self.reads as i32, self.acc.y, self.acc.z)),
        }
    }

    fn magnetic_field(&mut self) -> Result<Vector3, SensorError> {
        Ok(self.mag)
    }

    fn heading(&mut self) -> Result<u16, SensorError> {
        Ok(self.heading)
    }

    fn gesture(&mut self) -> Gesture {
        self.gesture
    }
}

pub struct FakeClock {
    pub ms: Cell<u32>,
}

impl FakeClock {
    pub fn at(ms: u32) -> Self {
        Self { ms: Cell::new(ms) }
    }
}

impl Clock for FakeClock {
    fn uptime_ms(&self) -> u32 {
        self.ms.get()
    }
}

#[derive(Default)]
pub struct FakeRadio {
    pub on: bool,
    pub config: Option<RadioConfig>,
    pub sent: Vec<Vec<u8>>,
    /// Per-poll script; `None` entries mean nothing received
    pub inbox: VecDeque<Option<Vec<u8>>>,
    pub fail_send: bool,
    pub fail_receive: bool,
}

impl Radio for FakeRadio {
    type Error = ();

    fn configure(&mut self, config: &RadioConfig) {
        self.config = Some(*config);
    }

    fn power_on(&mut self) {
        self.on = true;
    }

    fn power_off(&mut self) {
        self.on = false;
    }

    fn is_on(&self) -> bool {
        self.on
    }

    fn send(&mut self, payload: &[u8]) -> Result<(), ()> {
        assert!(self.on, "send with radio off");
        if self.fail_send {
            return Err(());
        }
        self.sent.push(payload.to_vec());
        Ok(())
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<Option<usize>, ()> {
        if !self.on {
            return Ok(None);
        }
        if self.fail_receive {
            return Err(());
        }
        match self.inbox.pop_front() {
            Some(Some(payload)) => {
                let copied = payload.len().min(buf.len());
                buf[..copied].copy_from_slice(&payload[..copied]);
                Ok(Some(payload.len()))
            }
            _ => Ok(None),
        }
    }
}

#[derive(Default)]
pub struct FakeSerial {
    pub config: Option<UartConfig>,
    pub written: Vec<Vec<u8>>,
    pub fail: bool,
}

impl FakeSerial {
    pub fn lines(&self) -> Vec<String> {
        self.written
            .iter()
            .map(|w| String::from_utf8(w.clone()).unwrap())
            .collect()
    }
}

impl UartTx for FakeSerial {
    type Error = ();

    fn configure(&mut self, config: &UartConfig) {
        self.config = Some(*config);
    }

    fn write(&mut self, data: &[u8]) -> Result<(), ()> {
        assert!(self.config.is_some(), "write before serial init");
        if self.fail {
            return Err(());
        }
        self.written.push(data.to_vec());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeDisplay {
    pub on: bool,
    pub shown: Vec<Image>,
}

impl LedMatrix for FakeDisplay {
    fn power_on(&mut self) {
        self.on = true;
    }

    fn power_off(&mut self) {
        self.on = false;
    }

    fn is_on(&self) -> bool {
        self.on
    }

    fn show(&mut self, image: &Image) {
        self.shown.push(*image);
    }
}
