pub mod blur;
pub mod buffer;
pub mod kernel;
pub mod loader;
