pub mod average;
pub mod grid;
pub mod text;
pub mod tile;
