use serde::Serialize;

use super::average::Rgba;
use super::tile::sample_tiles;
use crate::image_pipeline::buffer::PixelBuffer;
use crate::TintError;

/// Average color of every tile, `rows` x `columns`, row-major.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColorGrid {
    pub columns: usize,
    pub rows: usize,
    pub cells: Vec<Rgba>,
}

impl ColorGrid {
    pub fn new(columns: usize, rows: usize, cells: Vec<Rgba>) -> Self {
        assert_eq!(columns * rows, cells.len());
        Self { columns, rows, cells }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, row: usize, column: usize) -> Option<Rgba> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.cells.get(row * self.columns + column).copied()
    }

    /// One slice per row; rows are empty when the image is narrower than one tile.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgba]> + '_ {
        let columns = self.columns;
        (0..self.rows).map(move |row| &self.cells[row * columns..(row + 1) * columns])
    }

    /// Every cell formatted as an `rgba(r,g,b,a)` string.
    pub fn css_rows(&self) -> Vec<Vec<String>> {
        self.rows().map(|row| row.iter().map(Rgba::to_string).collect()).collect()
    }
}

/// Averages each `font_size` tile of `buffer` into one color.
pub fn color_grid(buffer: &PixelBuffer, font_size: u32) -> Result<ColorGrid, TintError> {
    let tiles = sample_tiles(buffer, font_size)?;
    let cells = tiles
        .iter()
        .map(|tile| tile.average().map(|avg| avg.color))
        .collect::<Result<Vec<_>, TintError>>()?;
    Ok(ColorGrid::new(tiles.columns(), tiles.rows(), cells))
}
