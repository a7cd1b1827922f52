use log::debug;

use super::average::{average, TileAverage};
use crate::image_pipeline::buffer::PixelBuffer;
use crate::TintError;

/// Square block of `font_size * font_size` pixels cut from a raster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    pub row: usize,
    pub column: usize,
    /// Pixels of the block in row-major order.
    pub pixels: Vec<[u8; 4]>,
}

impl Tile {
    pub fn average(&self) -> Result<TileAverage, TintError> {
        average(&self.pixels)
    }
}

#[derive(Clone, Debug, Default)]
pub struct TileGrid {
    rows: usize,
    columns: usize,
    font_size: u32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&Tile> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.tiles.get(row * self.columns + column)
    }

    /// Tiles in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter()
    }
}

/// Splits `buffer` into `font_size` squares.
///
/// Column and row counts are floor divided, so pixels past the last whole tile on either
/// axis are not sampled. An axis shorter than one tile gets zero tiles, leaving the grid empty.
pub fn sample_tiles(buffer: &PixelBuffer, font_size: u32) -> Result<TileGrid, TintError> {
    if font_size == 0 {
        return Err(TintError::InvalidFontSize);
    }

    let size = font_size as usize;
    let columns = buffer.width() as usize / size;
    let rows = buffer.height() as usize / size;
    debug!(
        "sampling {}x{} tiles of {}px from {}x{} image",
        columns,
        rows,
        size,
        buffer.width(),
        buffer.height()
    );

    let mut tiles = Vec::with_capacity(rows * columns);
    for row in 0..rows {
        for column in 0..columns {
            let x0 = column * size;
            let y0 = row * size;
            let mut pixels = Vec::with_capacity(size * size);
            for dy in 0..size {
                for dx in 0..size {
                    pixels.push(buffer.pixel(x0 + dx, y0 + dy));
                }
            }
            tiles.push(Tile { row, column, pixels });
        }
    }

    Ok(TileGrid { rows, columns, font_size, tiles })
}
