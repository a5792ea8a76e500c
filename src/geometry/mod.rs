//! Pixel grid geometry: cells, letterform templates, stroke edges and joints

pub mod edges;
pub mod grid;
pub mod joints;
pub mod pattern;
pub mod pattern_tables;

// Re-export commonly used items
pub use edges::{Edge, EdgeKind, EdgeRules};
pub use grid::{Cell, GridError, GridPoint, PixelGrid};
pub use joints::{classify_joints, edges_per_point, JointState};
pub use pattern::{PatternEntry, PatternError, PatternSet, PatternTemplate, Symbol};
