mod image_pipeline;
mod mosaic;

use std::path::Path;

use image::{DynamicImage, RgbaImage};

pub use image_pipeline::{
    blur::{blurred, gaussian_blur},
    buffer::PixelBuffer,
    kernel::GaussianKernel,
    loader::{load_buffer, load_image},
};
pub use mosaic::{
    average::{average, Rgba, TileAverage},
    grid::{color_grid, ColorGrid},
    text::{BlockCell, TextBlocks, DEFAULT_TEXT},
    tile::{sample_tiles, Tile, TileGrid},
};

#[derive(Debug, thiserror::Error)]
pub enum TintError {
    #[error("failed to load image: {0}")]
    Image(#[from] image::ImageError),
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("pixel buffer holds {actual} channel values, expected {expected}")]
    BufferLength { expected: usize, actual: usize },
    #[error("font size must be positive")]
    InvalidFontSize,
    #[error("cannot average an empty tile")]
    EmptyTile,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlurOptions {
    /// Blur strength. The kernel spans `floor(radius * 3)` pixels on each side.
    pub radius: f32,
}

impl Default for BlurOptions {
    fn default() -> Self {
        Self { radius: 2.0 }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GridOptions {
    /// Edge length in pixels of the square tile behind each glyph.
    pub font_size: u32,
    /// Characters cycled over the grid when rendering text blocks.
    pub text: String,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self { font_size: 12, text: DEFAULT_TEXT.to_owned() }
    }
}

#[derive(Default)]
pub struct TintRenderer;

impl TintRenderer {
    pub fn blur_path<P: AsRef<Path>>(
        &self,
        path: P,
        options: BlurOptions,
    ) -> Result<RgbaImage, TintError> {
        let image = load_image(path.as_ref())?;
        self.blur_image(&image, options)
    }

    pub fn blur_image(
        &self,
        image: &DynamicImage,
        options: BlurOptions,
    ) -> Result<RgbaImage, TintError> {
        let mut buffer = PixelBuffer::from_dynamic(image)?;
        gaussian_blur(&mut buffer, options.radius);
        Ok(buffer.into_rgba_image())
    }

    pub fn color_grid_path<P: AsRef<Path>>(
        &self,
        path: P,
        options: &GridOptions,
    ) -> Result<ColorGrid, TintError> {
        let buffer = load_buffer(path.as_ref())?;
        color_grid(&buffer, options.font_size)
    }

    pub fn color_grid_image(
        &self,
        image: &DynamicImage,
        options: &GridOptions,
    ) -> Result<ColorGrid, TintError> {
        let buffer = PixelBuffer::from_dynamic(image)?;
        color_grid(&buffer, options.font_size)
    }

    /// Colored text blocks for `image`, optionally blurring it before the tiles are averaged.
    pub fn text_blocks_image(
        &self,
        image: &DynamicImage,
        options: &GridOptions,
        blur: Option<BlurOptions>,
    ) -> Result<TextBlocks, TintError> {
        let mut buffer = PixelBuffer::from_dynamic(image)?;
        if let Some(blur) = blur {
            gaussian_blur(&mut buffer, blur.radius);
        }

        let grid = color_grid(&buffer, options.font_size)?;
        Ok(TextBlocks::new(&grid, &options.text))
    }
}
