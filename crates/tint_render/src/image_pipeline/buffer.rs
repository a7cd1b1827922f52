use image::{DynamicImage, RgbaImage};

use crate::TintError;

/// Number of interleaved channels per pixel (red, green, blue, alpha).
pub const CHANNELS: usize = 4;

/// Owned RGBA8 raster with interleaved channels in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps `data` as a `width` x `height` raster.
    ///
    /// Fails when either dimension is zero or the channel array does not hold exactly
    /// `width * height * 4` values.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, TintError> {
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(TintError::BufferLength { expected, actual: data.len() });
        }

        Ok(Self { width, height, data })
    }

    /// Raster where every pixel holds `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, TintError> {
        let len = checked_len(width, height)?;
        let data = rgba.iter().copied().cycle().take(len).collect();
        Ok(Self { width, height, data })
    }

    pub fn from_dynamic(image: &DynamicImage) -> Result<Self, TintError> {
        Self::try_from(image.to_rgba8())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    pub(crate) fn index(&self, x: usize, y: usize) -> usize {
        (y * self.width as usize + x) * CHANNELS
    }

    /// Channel values of the pixel at column `x`, row `y`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let idx = self.index(x, y);
        [self.data[idx], self.data[idx + 1], self.data[idx + 2], self.data[idx + 3]]
    }

    /// Overwrites all four channels of one pixel.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        let idx = self.index(x, y);
        self.data[idx..idx + CHANNELS].copy_from_slice(&rgba);
    }

    pub fn into_rgba_image(self) -> RgbaImage {
        let (width, height) = (self.width, self.height);
        let image = RgbaImage::from_raw(width, height, self.data);
        debug_assert!(image.is_some(), "pixel buffer length out of sync with {width}x{height}");
        // Unreachable while `new`/`filled` validate the length; release builds degrade to a
        // blank image rather than panic inside a conversion.
        image.unwrap_or_else(|| RgbaImage::new(width, height))
    }
}

impl TryFrom<RgbaImage> for PixelBuffer {
    type Error = TintError;

    fn try_from(image: RgbaImage) -> Result<Self, Self::Error> {
        let (width, height) = image.dimensions();
        Self::new(width, height, image.into_raw())
    }
}

fn checked_len(width: u32, height: u32) -> Result<usize, TintError> {
    if width == 0 || height == 0 {
        return Err(TintError::InvalidDimensions { width, height });
    }

    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(CHANNELS))
        .ok_or(TintError::InvalidDimensions { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_dimensions() {
        assert!(matches!(
            PixelBuffer::new(0, 4, Vec::new()),
            Err(TintError::InvalidDimensions { width: 0, height: 4 })
        ));
        assert!(matches!(
            PixelBuffer::filled(3, 0, [0; 4]),
            Err(TintError::InvalidDimensions { width: 3, height: 0 })
        ));
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = PixelBuffer::new(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(err, TintError::BufferLength { expected: 16, actual: 15 }));
    }

    #[test]
    fn pixel_access_is_row_major() {
        let data: Vec<u8> = (0..24).collect();
        let mut buffer = PixelBuffer::new(3, 2, data).unwrap();
        assert_eq!(buffer.pixel(0, 0), [0, 1, 2, 3]);
        assert_eq!(buffer.pixel(2, 0), [8, 9, 10, 11]);
        assert_eq!(buffer.pixel(1, 1), [16, 17, 18, 19]);

        buffer.set_pixel(1, 1, [200, 201, 202, 203]);
        assert_eq!(buffer.pixel(1, 1), [200, 201, 202, 203]);
        assert_eq!(buffer.pixel(2, 1), [20, 21, 22, 23]);
    }

    #[test]
    fn filled_repeats_color() {
        let buffer = PixelBuffer::filled(4, 3, [10, 20, 30, 40]).unwrap();
        assert_eq!(buffer.as_raw().len(), 48);
        assert!(buffer.as_raw().chunks(4).all(|px| px == [10, 20, 30, 40]));
    }

    #[test]
    fn converts_to_image_with_same_pixels() {
        let data: Vec<u8> = (0..32).collect();
        let image = PixelBuffer::new(4, 2, data.clone()).unwrap().into_rgba_image();
        assert_eq!(image.get_pixel(3, 1).0, [28, 29, 30, 31]);
        assert_eq!(image.into_raw(), data);
    }

    #[test]
    fn round_trips_through_image_crate() {
        let buffer = PixelBuffer::filled(5, 2, [1, 2, 3, 4]).unwrap();
        let image = buffer.clone().into_rgba_image();
        assert_eq!(image.dimensions(), (5, 2));
        assert_eq!(PixelBuffer::try_from(image).unwrap(), buffer);
    }
}
