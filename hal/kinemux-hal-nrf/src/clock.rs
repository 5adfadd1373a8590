//! Uptime clock

use embassy_time::Instant;
use kinemux_core::traits::Clock;

/// Milliseconds since boot from the RTC1 time driver
///
/// Truncates to 32 bits, so it wraps after about 49.7 days.
#[derive(Debug, Clone, Copy, Default)]
pub struct UptimeClock;

impl Clock for UptimeClock {
    fn uptime_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}
