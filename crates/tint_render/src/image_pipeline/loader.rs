use std::path::Path;

use image::{DynamicImage, GenericImageView};
use log::debug;

use super::buffer::PixelBuffer;
use crate::TintError;

pub fn load_image(path: &Path) -> Result<DynamicImage, TintError> {
    let image = image::open(path)?;
    let (w, h) = image.dimensions();
    debug!("loaded image {}x{} from {}", w, h, path.display());
    Ok(image)
}

pub fn load_buffer(path: &Path) -> Result<PixelBuffer, TintError> {
    PixelBuffer::from_dynamic(&load_image(path)?)
}
