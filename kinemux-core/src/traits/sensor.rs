//! Motion sensor and clock traits

/// Errors that can occur reading the motion sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// No new sample since the last read
    NotReady,
    /// Bus transaction failed
    Bus,
    /// Device did not identify as expected
    WrongDevice,
}

/// Three-axis reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vector3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Vector3 {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Gesture reported alongside each sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    /// No gesture detected
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
    FaceUp,
    FaceDown,
    Freefall,
    ThreeG,
    SixG,
    EightG,
    Shake,
}

impl Gesture {
    /// Label written into the Gesture column
    pub const fn label(self) -> &'static str {
        match self {
            Gesture::None => "",
            Gesture::Up => "up",
            Gesture::Down => "down",
            Gesture::Left => "left",
            Gesture::Right => "right",
            Gesture::FaceUp => "face up",
            Gesture::FaceDown => "face down",
            Gesture::Freefall => "freefall",
            Gesture::ThreeG => "3g",
            Gesture::SixG => "6g",
            Gesture::EightG => "8g",
            Gesture::Shake => "shake",
        }
    }
}

/// Combined accelerometer / magnetometer
///
/// Takes `&mut self` because reads are bus transactions.
pub trait MotionSensor {
    /// Acceleration in milli-g
    fn acceleration(&mut self) -> Result<Vector3, SensorError>;

    /// Magnetic field in nanotesla
    fn magnetic_field(&mut self) -> Result<Vector3, SensorError>;

    /// Compass heading in whole degrees, 0-359
    fn heading(&mut self) -> Result<u16, SensorError>;

    /// Gesture currently being performed
    fn gesture(&mut self) -> Gesture;
}

/// Monotonic time since boot
pub trait Clock {
    /// Milliseconds since boot
    fn uptime_ms(&self) -> u32;
}
