//! Closed outline primitives
//!
//! Every function returns a fresh single-contour [`BezPath`] wound clockwise
//! (y axis pointing up), so overlapping primitives union cleanly.

use crate::geometry::EdgeKind;
use kurbo::{BezPath, PathEl, Point};
use std::f64::consts::SQRT_2;

/// (4/3)(sqrt(2) - 1), control point distance for a quarter circle
const CIRCLE_KAPPA: f64 = 0.5522847498;

/// Heart outline in units of the scaled radius, clockwise from the notch
const HEART: [(f64, f64); 8] = [
    (0.0, 0.9),
    (0.8, 1.6),
    (1.6, 0.9),
    (1.6, 0.2),
    (0.0, -1.0),
    (-1.6, 0.2),
    (-1.6, 0.9),
    (-0.8, 1.6),
];
const HEART_SCALE: f64 = 1.3;

fn polygon(points: impl IntoIterator<Item = Point>) -> BezPath {
    let mut path = BezPath::new();
    for (index, point) in points.into_iter().enumerate() {
        if index == 0 {
            path.move_to(point);
        } else {
            path.line_to(point);
        }
    }
    path.close_path();
    path
}

/// Quadrilateral of width `2 * half` centered on the segment `start..end`.
///
/// `start` is the upper (or left) end of the edge. Diagonal strokes offset
/// their corners by `half / sqrt(2)` on both axes, which keeps the
/// perpendicular thickness at `2 * half`.
pub fn stroke(kind: EdgeKind, start: Point, end: Point, half: f64) -> BezPath {
    let diagonal = half / SQRT_2;
    match kind {
        EdgeKind::Vertical => polygon([
            Point::new(start.x - half, start.y),
            Point::new(start.x + half, start.y),
            Point::new(start.x + half, end.y),
            Point::new(start.x - half, end.y),
        ]),
        EdgeKind::Horizontal => polygon([
            Point::new(start.x, start.y - half),
            Point::new(start.x, start.y + half),
            Point::new(end.x, start.y + half),
            Point::new(end.x, start.y - half),
        ]),
        EdgeKind::DiagonalDescending => polygon([
            Point::new(start.x - diagonal, start.y - diagonal),
            Point::new(start.x + diagonal, start.y + diagonal),
            Point::new(end.x + diagonal, end.y + diagonal),
            Point::new(end.x - diagonal, end.y - diagonal),
        ]),
        EdgeKind::DiagonalAscending => polygon([
            Point::new(start.x - diagonal, start.y + diagonal),
            Point::new(start.x + diagonal, start.y - diagonal),
            Point::new(end.x + diagonal, end.y - diagonal),
            Point::new(end.x - diagonal, end.y + diagonal),
        ]),
    }
}

/// Axis-aligned regular octagon whose flat faces sit `radius` from the center
pub fn octagon(center: Point, radius: f64) -> BezPath {
    let far = (1.0 + SQRT_2) / 2.0;
    let side = radius / far;
    let unit = [
        (0.5, far),
        (far, 0.5),
        (far, -0.5),
        (0.5, -far),
        (-0.5, -far),
        (-far, -0.5),
        (-far, 0.5),
        (-0.5, far),
    ];
    polygon(
        unit.iter()
            .map(|&(x, y)| Point::new(center.x + side * x, center.y + side * y)),
    )
}

/// Circle built from four cubic arcs, starting at the top
pub fn circle(center: Point, radius: f64) -> BezPath {
    let (x, y) = (center.x, center.y);
    let k = radius * CIRCLE_KAPPA;
    let mut path = BezPath::new();
    path.move_to((x, y + radius));
    path.curve_to((x + k, y + radius), (x + radius, y + k), (x + radius, y));
    path.curve_to((x + radius, y - k), (x + k, y - radius), (x, y - radius));
    path.curve_to((x - k, y - radius), (x - radius, y - k), (x - radius, y));
    path.curve_to((x - radius, y + k), (x - k, y + radius), (x, y + radius));
    path.close_path();
    path
}

pub fn heart(center: Point, radius: f64) -> BezPath {
    let scale = radius * HEART_SCALE;
    polygon(
        HEART
            .iter()
            .map(|&(x, y)| Point::new(center.x + scale * x, center.y + scale * y)),
    )
}

/// Shoelace area of the on-curve polygon of every subpath in `path`.
/// Negative for clockwise contours.
pub fn signed_area(path: &BezPath) -> f64 {
    let mut area = 0.0;
    let mut first = Point::ZERO;
    let mut current = Point::ZERO;
    for el in path.elements() {
        let next = match *el {
            PathEl::MoveTo(p) => {
                area += current.x * first.y - first.x * current.y;
                first = p;
                current = p;
                continue;
            }
            PathEl::LineTo(p)
            | PathEl::QuadTo(_, p)
            | PathEl::CurveTo(_, _, p) => p,
            PathEl::ClosePath => first,
        };
        area += current.x * next.y - next.x * current.y;
        current = next;
    }
    area += current.x * first.y - first.x * current.y;
    area / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertices(path: &BezPath) -> Vec<Point> {
        path.elements()
            .iter()
            .filter_map(|el| match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    /// Distance between the two long sides of a stroke quad
    fn stroke_width(path: &BezPath) -> f64 {
        let v = vertices(path);
        let along = v[3] - v[0];
        let across = v[1] - v[0];
        let direction = along / along.hypot();
        (across - direction * across.dot(direction)).hypot()
    }

    #[test]
    fn strokes_have_four_vertices_and_uniform_width() {
        let start = Point::new(100.0, 500.0);
        let cases = [
            (EdgeKind::Horizontal, Point::new(300.0, 500.0)),
            (EdgeKind::Vertical, Point::new(100.0, 300.0)),
            (EdgeKind::DiagonalDescending, Point::new(300.0, 300.0)),
            (EdgeKind::DiagonalAscending, Point::new(-100.0, 300.0)),
        ];
        for (kind, end) in cases {
            let path = stroke(kind, start, end, 96.0);
            assert_eq!(vertices(&path).len(), 4, "{kind:?}");
            assert!((stroke_width(&path) - 192.0).abs() < 1e-9, "{kind:?}");
        }
    }

    #[test]
    fn every_primitive_winds_clockwise() {
        let center = Point::new(50.0, 50.0);
        let start = Point::new(0.0, 0.0);
        let paths = [
            stroke(EdgeKind::Horizontal, start, Point::new(10.0, 0.0), 2.0),
            stroke(EdgeKind::Vertical, start, Point::new(0.0, -10.0), 2.0),
            stroke(EdgeKind::DiagonalDescending, start, Point::new(10.0, -10.0), 2.0),
            stroke(EdgeKind::DiagonalAscending, start, Point::new(-10.0, -10.0), 2.0),
            octagon(center, 5.0),
            circle(center, 5.0),
            heart(center, 5.0),
        ];
        for path in &paths {
            assert!(signed_area(path) < 0.0);
        }
    }

    #[test]
    fn octagon_faces_touch_the_radius() {
        let path = octagon(Point::ZERO, 96.0);
        let v = vertices(&path);
        assert_eq!(v.len(), 8);
        let top = v.iter().map(|p| p.y).fold(f64::MIN, f64::max);
        let right = v.iter().map(|p| p.x).fold(f64::MIN, f64::max);
        assert!((top - 96.0).abs() < 1e-9);
        assert!((right - 96.0).abs() < 1e-9);
        let expected = 8.0 * 96.0 * 96.0 * (SQRT_2 - 1.0);
        assert!((signed_area(&path).abs() - expected).abs() < 1e-6);
    }

    #[test]
    fn circle_is_four_closed_arcs() {
        let path = circle(Point::new(10.0, 10.0), 144.0);
        let curves = path
            .elements()
            .iter()
            .filter(|el| matches!(el, PathEl::CurveTo(..)))
            .count();
        assert_eq!(curves, 4);
        assert_eq!(path.elements().last(), Some(&PathEl::ClosePath));
    }
}
