//! Outline rendering
//!
//! - Closed primitives for strokes, caps, dots and hearts
//! - Grid to primitive rendering
//! - Overlap removal and normalization

pub mod overlap;
pub mod primitives;
pub mod stroke;

// Re-export commonly used items
pub use overlap::{filled_area, BooleanUnion, OverlapResolver, PolygonUnion};
pub use primitives::signed_area;
pub use stroke::{GridLayout, Primitive, PrimitiveKind, RenderedGrid, StrokeRenderer, StrokeStyle};
