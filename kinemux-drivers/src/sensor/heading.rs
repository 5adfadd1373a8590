//! Tilt-compensated compass heading
//!
//! Roll and pitch come from the gravity vector; the magnetic field is
//! rotated back into the horizontal plane before taking the bearing.
//! Heading 0 is magnetic north along +X, increasing clockwise.

use kinemux_core::traits::Vector3;
use micromath::F32Ext;

/// Heading in whole degrees, 0-359
pub fn compass_heading(acc: Vector3, mag: Vector3) -> u16 {
    let (ax, ay, az) = (acc.x as f32, acc.y as f32, acc.z as f32);
    let (mx, my, mz) = (mag.x as f32, mag.y as f32, mag.z as f32);

    let roll = ay.atan2(az);
    let (sr, cr) = (roll.sin(), roll.cos());
    let pitch = (-ax).atan2(ay * sr + az * cr);
    let (sp, cp) = (pitch.sin(), pitch.cos());

    let bx = mx * cp + my * sp * sr + mz * sp * cr;
    let by = my * cr - mz * sr;

    let degrees = (-by).atan2(bx).to_degrees();
    let wrapped = if degrees < 0.0 { degrees + 360.0 } else { degrees };
    let rounded = (wrapped + 0.5) as u16;
    if rounded >= 360 {
        rounded - 360
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL: Vector3 = Vector3::new(0, 0, 1000);

    fn angle_diff(a: u16, b: u16) -> u16 {
        let d = (a as i32 - b as i32).rem_euclid(360) as u16;
        d.min(360 - d)
    }

    #[test]
    fn test_cardinal_points_level() {
        let cases = [
            (Vector3::new(1000, 0, 0), 0),
            (Vector3::new(0, -1000, 0), 90),
            (Vector3::new(-1000, 0, 0), 180),
            (Vector3::new(0, 1000, 0), 270),
        ];
        for (mag, expected) in cases {
            let h = compass_heading(LEVEL, mag);
            assert!(angle_diff(h, expected) <= 2, "{} vs {}", h, expected);
        }
    }

    #[test]
    fn test_vertical_field_ignored_when_level() {
        let h = compass_heading(LEVEL, Vector3::new(1000, 0, 5000));
        assert!(angle_diff(h, 0) <= 2);
    }

    #[test]
    fn test_always_in_range() {
        for x in [-3000, -1, 0, 1, 3000] {
            for y in [-3000, -1, 0, 1, 3000] {
                let h = compass_heading(Vector3::new(120, -340, 900), Vector3::new(x, y, 400));
                assert!(h < 360);
            }
        }
    }
}
