//! Joint classification
//!
//! Decides which lattice points need cap geometry. A point sitting in the
//! middle of a straight horizontal or vertical run needs nothing, everything
//! else (ends, corners, branches) gets a cap.

use super::edges::{Edge, EdgeKind};
use super::grid::GridPoint;
use std::collections::BTreeMap;

/// Geometry required at a lattice point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointState {
    /// Straight pass-through, the strokes already cover the point
    None,
    Cap,
}

/// Index every edge under both of its endpoints
pub fn edges_per_point(edges: &[Edge]) -> BTreeMap<GridPoint, Vec<Edge>> {
    let mut index: BTreeMap<GridPoint, Vec<Edge>> = BTreeMap::new();
    for edge in edges {
        for point in edge.points() {
            index.entry(point).or_default().push(*edge);
        }
    }
    index
}

/// Classify every point touched by at least one edge
pub fn classify_joints(edges: &[Edge]) -> BTreeMap<GridPoint, JointState> {
    edges_per_point(edges)
        .into_iter()
        .map(|(point, incident)| (point, classify(&incident)))
        .collect()
}

fn classify(incident: &[Edge]) -> JointState {
    match incident {
        [first, second] if is_straight_run(first.kind, second.kind) => JointState::None,
        _ => JointState::Cap,
    }
}

fn is_straight_run(a: EdgeKind, b: EdgeKind) -> bool {
    matches!(
        (a, b),
        (EdgeKind::Horizontal, EdgeKind::Horizontal) | (EdgeKind::Vertical, EdgeKind::Vertical)
    )
}
