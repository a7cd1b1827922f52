use std::fmt::Write;

use super::average::Rgba;
use super::grid::ColorGrid;

/// Glyph used when no text is supplied.
pub const DEFAULT_TEXT: &str = "█";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockCell {
    pub ch: char,
    pub color: Rgba,
}

/// A color grid with one glyph per cell, ready to be drawn as colored text.
#[derive(Clone, Debug)]
pub struct TextBlocks {
    pub columns: usize,
    pub rows: usize,
    pub cells: Vec<BlockCell>,
}

impl TextBlocks {
    /// Pairs every cell of `grid` with the next character of `text`, cycling as needed.
    ///
    /// Whitespace and control characters are skipped; an effectively empty text falls back
    /// to [`DEFAULT_TEXT`].
    pub fn new(grid: &ColorGrid, text: &str) -> Self {
        let mut glyphs: Vec<char> =
            text.chars().filter(|ch| !ch.is_whitespace() && !ch.is_control()).collect();
        if glyphs.is_empty() {
            glyphs = DEFAULT_TEXT.chars().collect();
        }

        let cells = grid
            .cells
            .iter()
            .zip(glyphs.iter().cycle())
            .map(|(&color, &ch)| BlockCell { ch, color })
            .collect();

        Self { columns: grid.columns, rows: grid.rows, cells }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[BlockCell]> + '_ {
        let columns = self.columns;
        (0..self.rows).map(move |row| &self.cells[row * columns..(row + 1) * columns])
    }

    /// Rows of glyphs without color.
    pub fn plain_rows(&self) -> impl Iterator<Item = String> + '_ {
        self.rows().map(|row| row.iter().map(|cell| cell.ch).collect())
    }

    /// Rows with 24-bit ANSI foreground colors, each terminated by a reset.
    pub fn ansi_rows(&self) -> impl Iterator<Item = String> + '_ {
        self.rows().map(|row| {
            let mut line = String::with_capacity(row.len() * 20);
            for cell in row {
                let [r, g, b] = cell.color.to_rgb8();
                let _ = write!(line, "\x1b[38;2;{r};{g};{b}m{}", cell.ch);
            }
            line.push_str("\x1b[0m");
            line
        })
    }
}
