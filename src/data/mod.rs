//! UFO conversion and output

pub mod conversions;
pub mod ufo;

pub use conversions::{to_contours, to_norad_glyph};
pub use ufo::{assemble_font, write_ufo};

#[cfg(test)]
pub use ufo::load_ufo_from_path;
