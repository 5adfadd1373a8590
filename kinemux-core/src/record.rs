//! CSV records
//!
//! Wire format, board → host, one line per record:
//!
//! ```text
//! Time,AccX,AccY,AccZ,MagX,MagY,MagZ,Heading,Gesture
//! 630894,-144,-144,-992,5025,2712,38849,255,face up
//! ```
//!
//! The header is sent once per mode session, before the first record.

use core::fmt::Write;

use heapless::String;
use kinemux_hal::radio::RADIO_MAX_PAYLOAD;

use crate::traits::{Clock, Gesture, MotionSensor, SensorError, Vector3};

/// Header line, emitted once per session
pub const CSV_HEADER: &str = "Time,AccX,AccY,AccZ,MagX,MagY,MagZ,Heading,Gesture\n";

/// Maximum record length in bytes
///
/// Matches the radio payload limit so a record always fits one datagram.
pub const RECORD_CAPACITY: usize = RADIO_MAX_PAYLOAD;

/// One newline-terminated line of text, owned by whoever polled it
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Record(String<RECORD_CAPACITY>);

impl Record {
    /// Wrap a received payload
    ///
    /// Returns `None` if the payload is empty, not UTF-8, or too long.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.is_empty() {
            return None;
        }
        let text = core::str::from_utf8(bytes).ok()?;
        let mut line = String::new();
        line.push_str(text).ok()?;
        Some(Self(line))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One poll of the onboard sensors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    /// Milliseconds since boot
    pub time_ms: u32,
    /// Acceleration, milli-g
    pub acc: Vector3,
    /// Magnetic field, nanotesla
    pub mag: Vector3,
    /// Compass heading, degrees
    pub heading: u16,
    pub gesture: Gesture,
}

impl Sample {
    /// Format as a CSV data line
    ///
    /// The widest possible line is 97 bytes, so this cannot overflow
    /// [`RECORD_CAPACITY`].
    pub fn to_record(&self) -> Record {
        let mut line: String<RECORD_CAPACITY> = String::new();
        writeln!(
            line,
            "{},{},{},{},{},{},{},{},{}",
            self.time_ms,
            self.acc.x,
            self.acc.y,
            self.acc.z,
            self.mag.x,
            self.mag.y,
            self.mag.z,
            self.heading,
            self.gesture.label()
        )
        .ok();
        Record(line)
    }
}

/// Poll the sensors and clock once
///
/// Any sensor failure (including "no new sample yet") yields no record.
pub fn read_sample<S, C>(sensor: &mut S, clock: &C) -> Result<Sample, SensorError>
where
    S: MotionSensor,
    C: Clock,
{
    let time_ms = clock.uptime_ms();
    let acc = sensor.acceleration()?;
    let mag = sensor.magnetic_field()?;
    let gesture = sensor.gesture();
    let heading = sensor.heading()?;

    Ok(Sample {
        time_ms,
        acc,
        mag,
        heading,
        gesture,
    })
}

/// Poll the sensors and format the result as a record
pub fn read_record<S, C>(sensor: &mut S, clock: &C) -> Result<Record, SensorError>
where
    S: MotionSensor,
    C: Clock,
{
    read_sample(sensor, clock).map(|s| s.to_record())
}
