//! Pixelstroke
pub mod core;
pub mod data;
pub mod font_source;
pub mod geometry;
pub mod glyphs;
pub mod logging;
pub mod rendering;
