use std::fmt;

use serde::Serialize;

use crate::TintError;

/// Channel values that may carry a fractional part, e.g. an averaged color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_rgb8(self) -> [u8; 3] {
        [to_byte(self.r), to_byte(self.g), to_byte(self.b)]
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        [to_byte(self.r), to_byte(self.g), to_byte(self.b), to_byte(self.a)]
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(px: [u8; 4]) -> Self {
        Self::new(px[0].into(), px[1].into(), px[2].into(), px[3].into())
    }
}

/// Formats as `rgba(r,g,b,a)` with the raw channel means, alpha included on the 0-255 scale.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileAverage {
    pub color: Rgba,
    /// Number of pixels that contributed to the mean.
    pub count: usize,
}

/// Per-channel arithmetic mean of `pixels`.
pub fn average(pixels: &[[u8; 4]]) -> Result<TileAverage, TintError> {
    if pixels.is_empty() {
        return Err(TintError::EmptyTile);
    }

    let mut sum = [0u64; 4];
    for px in pixels {
        for (acc, &value) in sum.iter_mut().zip(px) {
            *acc += u64::from(value);
        }
    }

    let count = pixels.len();
    let n = count as f64;
    let mean = |total: u64| total as f64 / n;
    let color = Rgba::new(mean(sum[0]), mean(sum[1]), mean(sum[2]), mean(sum[3]));

    Ok(TileAverage { color, count })
}

fn to_byte(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}
