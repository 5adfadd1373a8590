//! Row-multiplexed 5×5 LED matrix with per-pixel brightness
//!
//! Rows are driven high to select; columns are driven low to light a
//! pixel. Each row is held for [`SCAN_SLOTS`] ticks and a pixel at level
//! `n` is lit for the first `n` of them, giving ten brightness levels
//! (0 = off).
//!
//! The caller drives [`MatrixScanner::tick`] from a periodic timer. At a
//! 100 µs tick one full frame takes 4.5 ms.

use kinemux_core::traits::{Image, MATRIX_SIZE, MAX_BRIGHTNESS};
use kinemux_hal::OutputPin;

/// Time slots per row
pub const SCAN_SLOTS: u8 = MAX_BRIGHTNESS;

pub struct MatrixScanner<R, C> {
    rows: [R; MATRIX_SIZE],
    cols: [C; MATRIX_SIZE],
    image: Image,
    enabled: bool,
    row: usize,
    slot: u8,
}

impl<R: OutputPin, C: OutputPin> MatrixScanner<R, C> {
    /// Take ownership of the pins and blank the matrix
    pub fn new(rows: [R; MATRIX_SIZE], cols: [C; MATRIX_SIZE]) -> Self {
        let mut scanner = Self {
            rows,
            cols,
            image: Image::BLANK,
            enabled: false,
            row: 0,
            slot: 0,
        };
        scanner.blank();
        scanner
    }

    pub fn set_image(&mut self, image: &Image) {
        self.image = *image;
    }

    /// Enable or disable output; disabled leaves every LED dark
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.blank();
        }
    }

    /// Advance one slot and drive the pins for it
    pub fn tick(&mut self) {
        if !self.enabled {
            return;
        }

        self.rows[self.row].set_low();

        self.slot += 1;
        if self.slot >= SCAN_SLOTS {
            self.slot = 0;
            self.row = (self.row + 1) % MATRIX_SIZE;
        }

        for (x, col) in self.cols.iter_mut().enumerate() {
            let lit = self.image.pixel(x, self.row) > self.slot;
            col.set_state(!lit);
        }
        self.rows[self.row].set_high();
    }

    fn blank(&mut self) {
        for row in self.rows.iter_mut() {
            row.set_low();
        }
        for col in self.cols.iter_mut() {
            col.set_high();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[derive(Clone, Copy)]
    struct Pin<'a>(&'a Cell<bool>);

    impl OutputPin for Pin<'_> {
        fn set_high(&mut self) {
            self.0.set(true);
        }

        fn set_low(&mut self) {
            self.0.set(false);
        }
    }

    struct Bench {
        rows: [Cell<bool>; MATRIX_SIZE],
        cols: [Cell<bool>; MATRIX_SIZE],
    }

    impl Bench {
        fn new() -> Self {
            Self {
                rows: Default::default(),
                cols: Default::default(),
            }
        }

        fn scanner(&self) -> MatrixScanner<Pin<'_>, Pin<'_>> {
            MatrixScanner::new(
                core::array::from_fn(|i| Pin(&self.rows[i])),
                core::array::from_fn(|i| Pin(&self.cols[i])),
            )
        }

        fn lit(&self, x: usize, y: usize) -> bool {
            self.rows[y].get() && !self.cols[x].get()
        }

        fn dark(&self) -> bool {
            (0..MATRIX_SIZE).all(|y| (0..MATRIX_SIZE).all(|x| !self.lit(x, y)))
        }
    }

    fn one_pixel(x: usize, y: usize, level: u8) -> Image {
        let mut rows = [[0u8; MATRIX_SIZE]; MATRIX_SIZE];
        rows[y][x] = level;
        Image::from_rows(rows)
    }

    #[test]
    fn test_new_and_disabled_are_dark() {
        let bench = Bench::new();
        let mut scanner = bench.scanner();
        assert!(bench.dark());

        scanner.set_image(&one_pixel(0, 0, 9));
        for _ in 0..100 {
            scanner.tick();
        }
        assert!(bench.dark());
    }

    #[test]
    fn test_only_one_row_selected() {
        let bench = Bench::new();
        let mut scanner = bench.scanner();
        scanner.set_image(&Image::from_rows([[9; MATRIX_SIZE]; MATRIX_SIZE]));
        scanner.set_enabled(true);
        for _ in 0..(SCAN_SLOTS as usize * MATRIX_SIZE * 2) {
            scanner.tick();
            let selected = bench.rows.iter().filter(|r| r.get()).count();
            assert_eq!(selected, 1);
        }
    }

    #[test]
    fn test_duty_cycle_tracks_level() {
        for level in 0..=MAX_BRIGHTNESS {
            let bench = Bench::new();
            let mut scanner = bench.scanner();
            scanner.set_image(&one_pixel(2, 3, level));
            scanner.set_enabled(true);

            let frame = SCAN_SLOTS as usize * MATRIX_SIZE;
            let mut on = 0;
            for _ in 0..frame {
                scanner.tick();
                if bench.lit(2, 3) {
                    on += 1;
                }
                // No other pixel ever lights
                assert!(!bench.lit(1, 3) && !bench.lit(2, 2));
            }
            assert_eq!(on, level as usize);
        }
    }

    #[test]
    fn test_disable_blanks_immediately() {
        let bench = Bench::new();
        let mut scanner = bench.scanner();
        scanner.set_image(&Image::from_rows([[9; MATRIX_SIZE]; MATRIX_SIZE]));
        scanner.set_enabled(true);
        scanner.tick();
        assert!(!bench.dark());

        scanner.set_enabled(false);
        assert!(bench.dark());
    }
}
