//! Gesture classification from accelerometer samples
//!
//! Each sample is classified on its own; a posture (tilt, face up/down,
//! freefall) only becomes the reported gesture once it has been seen on
//! [`GESTURE_CONFIRM_SAMPLES`] consecutive samples. Impulses (3g, 6g, 8g,
//! shake) are reported immediately.

use kinemux_core::traits::{Gesture, Vector3};

/// Consecutive samples needed to confirm a posture
pub const GESTURE_CONFIRM_SAMPLES: u8 = 5;

/// Tolerance around ±1g for tilt postures, milli-g
pub const TILT_TOLERANCE_MG: i32 = 200;

/// Below this magnitude the board is falling, milli-g
pub const FREEFALL_THRESHOLD_MG: i32 = 400;

/// Per-axis change between samples that counts as a shake, milli-g
pub const SHAKE_THRESHOLD_MG: i32 = 1500;

/// Classify one sample given the previous one
pub fn classify(acc: Vector3, previous: Option<Vector3>) -> Gesture {
    let magnitude_sq = square(acc.x) + square(acc.y) + square(acc.z);

    if magnitude_sq < square(FREEFALL_THRESHOLD_MG) {
        return Gesture::Freefall;
    }
    if magnitude_sq > square(8000) {
        return Gesture::EightG;
    }
    if magnitude_sq > square(6000) {
        return Gesture::SixG;
    }
    if magnitude_sq > square(3000) {
        return Gesture::ThreeG;
    }

    if let Some(prev) = previous {
        let jerk = (acc.x - prev.x)
            .abs()
            .max((acc.y - prev.y).abs())
            .max((acc.z - prev.z).abs());
        if jerk > SHAKE_THRESHOLD_MG {
            return Gesture::Shake;
        }
    }

    let near = 1000 - TILT_TOLERANCE_MG;
    if acc.x < -near {
        Gesture::Left
    } else if acc.x > near {
        Gesture::Right
    } else if acc.y < -near {
        Gesture::Down
    } else if acc.y > near {
        Gesture::Up
    } else if acc.z < -near {
        Gesture::FaceUp
    } else if acc.z > near {
        Gesture::FaceDown
    } else {
        Gesture::None
    }
}

fn square(v: i32) -> i64 {
    (v as i64) * (v as i64)
}

fn is_impulse(gesture: Gesture) -> bool {
    matches!(
        gesture,
        Gesture::ThreeG | Gesture::SixG | Gesture::EightG | Gesture::Shake
    )
}

/// Debounced gesture state fed one sample at a time
#[derive(Debug, Clone, Default)]
pub struct GestureDetector {
    previous: Option<Vector3>,
    candidate: Gesture,
    seen: u8,
    current: Gesture,
}

impl GestureDetector {
    pub const fn new() -> Self {
        Self {
            previous: None,
            candidate: Gesture::None,
            seen: 0,
            current: Gesture::None,
        }
    }

    /// Feed a new sample, returning the reported gesture
    pub fn update(&mut self, acc: Vector3) -> Gesture {
        let observed = classify(acc, self.previous);
        self.previous = Some(acc);

        if is_impulse(observed) {
            self.candidate = observed;
            self.seen = GESTURE_CONFIRM_SAMPLES;
            self.current = observed;
            return self.current;
        }

        if observed == self.candidate {
            self.seen = self.seen.saturating_add(1);
        } else {
            self.candidate = observed;
            self.seen = 1;
        }

        if self.seen >= GESTURE_CONFIRM_SAMPLES {
            self.current = observed;
        }
        self.current
    }

    /// Most recently confirmed gesture
    pub fn current(&self) -> Gesture {
        self.current
    }
}
