//! Grid to raw outline rendering
//!
//! Turns one pixel grid into a list of possibly overlapping primitives:
//! a stroke per edge, a cap per joint, a dot per isolated cell and a heart
//! per special cell. Overlaps are left for the resolver.

use super::primitives;
use crate::geometry::{
    classify_joints, Cell, Edge, EdgeKind, EdgeRules, GridPoint, JointState, PixelGrid,
};
use kurbo::{BezPath, Point};
use std::collections::BTreeMap;

/// Scale and stroke weight shared by every glyph of a font weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Design units per grid cell
    pub size: f64,
    /// Perpendicular thickness of every stroke
    pub stroke_width: f64,
}

impl StrokeStyle {
    pub fn new(size: f64, stroke_width: f64) -> Self {
        Self { size, stroke_width }
    }

    pub fn half_width(&self) -> f64 {
        self.stroke_width / 2.0
    }

    /// Isolated cells are drawn larger than a joint cap
    pub fn dot_radius(&self) -> f64 {
        self.half_width() * 1.5
    }
}

/// Placement of one grid inside a glyph
#[derive(Debug, Clone, Copy)]
pub struct GridLayout<'a> {
    pub grid: &'a PixelGrid,
    pub diagonals: bool,
    /// Rows below the baseline
    pub descent: f64,
    /// Empty cells added on the left
    pub left_margin: f64,
}

impl<'a> GridLayout<'a> {
    pub fn new(grid: &'a PixelGrid) -> Self {
        Self {
            grid,
            diagonals: true,
            descent: 0.0,
            left_margin: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Stroke(EdgeKind),
    Cap,
    Dot,
    Heart,
}

#[derive(Debug, Clone)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    pub path: BezPath,
}

/// Raw output of rendering one grid
#[derive(Debug, Clone, Default)]
pub struct RenderedGrid {
    pub edges: Vec<Edge>,
    pub joints: BTreeMap<GridPoint, JointState>,
    pub primitives: Vec<Primitive>,
    /// Right-hand edge of the grid in glyph space
    pub extent: f64,
}

impl RenderedGrid {
    pub fn paths(&self) -> impl Iterator<Item = &BezPath> + '_ {
        self.primitives.iter().map(|primitive| &primitive.path)
    }

    pub fn count(&self, kind: PrimitiveKind) -> usize {
        self.primitives
            .iter()
            .filter(|primitive| primitive.kind == kind)
            .count()
    }
}

/// Maps lattice points to design-space coordinates
#[derive(Debug, Clone, Copy)]
struct Frame {
    size: f64,
    top: f64,
    left: f64,
}

impl Frame {
    fn point(&self, point: GridPoint) -> Point {
        let half = self.size / 2.0;
        Point::new(
            point.col as f64 * self.size + half + self.left,
            self.top - point.row as f64 * self.size + half,
        )
    }
}

/// Renders grids with a fixed style and edge rule set
#[derive(Debug, Clone, Copy)]
pub struct StrokeRenderer<'a> {
    style: StrokeStyle,
    rules: &'a EdgeRules,
}

impl<'a> StrokeRenderer<'a> {
    pub fn new(style: StrokeStyle, rules: &'a EdgeRules) -> Self {
        Self { style, rules }
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    /// Render a grid whose left edge starts `x_offset` units into the glyph.
    /// Returns the primitives together with the new right-hand extent.
    pub fn render(&self, layout: &GridLayout<'_>, x_offset: f64) -> RenderedGrid {
        let grid = layout.grid;
        if grid.is_empty() {
            return RenderedGrid {
                extent: x_offset,
                ..RenderedGrid::default()
            };
        }

        let size = self.style.size;
        let half = self.style.half_width();
        let frame = Frame {
            size,
            top: (grid.rows() as f64 - layout.descent) * size,
            left: layout.left_margin * size + x_offset,
        };

        let edges = self.rules.extract(grid, layout.diagonals);
        let joints = classify_joints(&edges);

        let mut emitted: Vec<Primitive> = edges
            .iter()
            .map(|edge| Primitive {
                kind: PrimitiveKind::Stroke(edge.kind),
                path: primitives::stroke(
                    edge.kind,
                    frame.point(edge.start),
                    frame.point(edge.end),
                    half,
                ),
            })
            .collect();

        for (row, col, cell) in grid.cells() {
            let point = GridPoint::new(col, row);
            let center = frame.point(point);
            match cell {
                Cell::Filled if grid.filled_neighbors(row, col) == 0 => {
                    emitted.push(Primitive {
                        kind: PrimitiveKind::Dot,
                        path: primitives::circle(center, self.style.dot_radius()),
                    });
                }
                Cell::Filled => {
                    // Filled cells whose strokes were all suppressed still get a cap.
                    if joints.get(&point) == Some(&JointState::None) {
                        continue;
                    }
                    emitted.push(Primitive {
                        kind: PrimitiveKind::Cap,
                        path: primitives::octagon(center, half),
                    });
                }
                Cell::Special => emitted.push(Primitive {
                    kind: PrimitiveKind::Heart,
                    path: primitives::heart(center, half),
                }),
                Cell::Empty => {}
            }
        }

        RenderedGrid {
            edges,
            joints,
            primitives: emitted,
            extent: x_offset + grid.cols() as f64 * size,
        }
    }
}
