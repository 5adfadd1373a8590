//! LED matrix display trait and images

/// Highest pixel brightness level
pub const MAX_BRIGHTNESS: u8 = 9;

/// Matrix width and height in pixels
pub const MATRIX_SIZE: usize = 5;

/// 5×5 image with per-pixel brightness 0-9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Image {
    pixels: [[u8; MATRIX_SIZE]; MATRIX_SIZE],
}

impl Image {
    /// All pixels off
    pub const BLANK: Self = Self {
        pixels: [[0; MATRIX_SIZE]; MATRIX_SIZE],
    };

    /// Build an image from rows of brightness levels
    ///
    /// Levels above [`MAX_BRIGHTNESS`] are clamped.
    pub const fn from_rows(rows: [[u8; MATRIX_SIZE]; MATRIX_SIZE]) -> Self {
        let mut pixels = rows;
        let mut y = 0;
        while y < MATRIX_SIZE {
            let mut x = 0;
            while x < MATRIX_SIZE {
                if pixels[y][x] > MAX_BRIGHTNESS {
                    pixels[y][x] = MAX_BRIGHTNESS;
                }
                x += 1;
            }
            y += 1;
        }
        Self { pixels }
    }

    /// Brightness of the pixel at column `x`, row `y`
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[y][x]
    }

    /// Rows of brightness levels
    pub fn rows(&self) -> &[[u8; MATRIX_SIZE]; MATRIX_SIZE] {
        &self.pixels
    }

    /// Scale every pixel by `brightness` (clamped to 0.0-1.0)
    ///
    /// Each level is rounded to the nearest integer.
    pub fn scaled(&self, brightness: f32) -> Self {
        let factor = brightness.clamp(0.0, 1.0);
        let mut out = *self;
        for row in out.pixels.iter_mut() {
            for px in row.iter_mut() {
                *px = ((*px as f32) * factor + 0.5) as u8;
            }
        }
        out
    }

    /// Check if every pixel is off
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().flatten().all(|&p| p == 0)
    }
}

/// Built-in mode icons
pub mod icons {
    use super::Image;

    pub const HEART: Image = Image::from_rows([
        [0, 9, 0, 9, 0],
        [9, 9, 9, 9, 9],
        [9, 9, 9, 9, 9],
        [0, 9, 9, 9, 0],
        [0, 0, 9, 0, 0],
    ]);

    pub const ARROW_S: Image = Image::from_rows([
        [0, 0, 9, 0, 0],
        [0, 0, 9, 0, 0],
        [9, 0, 9, 0, 9],
        [0, 9, 9, 9, 0],
        [0, 0, 9, 0, 0],
    ]);

    pub const ARROW_E: Image = Image::from_rows([
        [0, 0, 9, 0, 0],
        [0, 0, 0, 9, 0],
        [9, 9, 9, 9, 9],
        [0, 0, 0, 9, 0],
        [0, 0, 9, 0, 0],
    ]);
}

/// LED matrix display
///
/// Power and rendering calls are infallible at this layer.
pub trait LedMatrix {
    /// Enable the matrix driver
    fn power_on(&mut self);

    /// Disable the matrix driver; all LEDs go dark
    fn power_off(&mut self);

    /// Check if the matrix driver is enabled
    fn is_on(&self) -> bool;

    /// Show an image until the next call
    fn show(&mut self, image: &Image);

    /// Turn every pixel off, leaving the driver enabled
    fn clear(&mut self) {
        self.show(&Image::BLANK);
    }
}
