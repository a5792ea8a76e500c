//! Overlap removal
//!
//! Raw glyph primitives overlap freely. The resolver replaces them with the
//! boundary of their union under the nonzero fill rule: outer contours wind
//! clockwise and holes counter-clockwise, nothing overlaps, and every
//! coordinate lands on the integer design grid.
//!
//! The union itself sits behind [`BooleanUnion`]; the default runs on
//! `geo`'s polygon boolean operations.

use geo::{BooleanOps, Coord, Intersects, LineString, MultiPolygon, Polygon};
use kurbo::{BezPath, CubicBez, ParamCurve, PathEl, Point, QuadBez};

/// Quantization applied to every flattened vertex, in steps per unit
const SNAP: f64 = 1024.0;
/// Points closer than this to the line through their neighbors are dropped
const COLLINEAR_EPSILON: f64 = 1e-4;
/// Upper bound on union and rounding rounds before the outline settles
const MAX_PASSES: usize = 4;

/// A boolean union over closed contours
pub trait BooleanUnion: Send + Sync {
    /// Union of the filled areas of `contours` (nonzero fill rule)
    fn union(&self, contours: &[BezPath]) -> Vec<BezPath>;
}

/// Polygon union on top of `geo`.
///
/// Curves are flattened first. Clockwise rings are filled regions and
/// counter-clockwise rings are holes in the smallest filled ring around them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonUnion {
    /// Maximum distance between a curve and its flattened polyline
    pub tolerance: f64,
}

impl Default for PolygonUnion {
    fn default() -> Self {
        Self { tolerance: 0.25 }
    }
}

type Ring = Vec<Point>;
type Key = (i64, i64);

fn key(p: Point) -> Key {
    ((p.x * SNAP).round() as i64, (p.y * SNAP).round() as i64)
}

fn snap(p: Point) -> Point {
    Point::new((p.x * SNAP).round() / SNAP, (p.y * SNAP).round() / SNAP)
}

fn curve_steps(control_spread: f64, tolerance: f64) -> usize {
    ((0.75 * control_spread / tolerance).sqrt().ceil() as usize).clamp(1, 128)
}

/// Flatten closed contours into snapped polygons
fn flatten(contours: &[BezPath], tolerance: f64) -> Vec<Ring> {
    let mut rings = Vec::new();
    for path in contours {
        let mut ring: Ring = Vec::new();
        let mut current = Point::ZERO;
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => {
                    finish_ring(&mut rings, std::mem::take(&mut ring));
                    ring.push(snap(p));
                    current = p;
                }
                PathEl::LineTo(p) => {
                    ring.push(snap(p));
                    current = p;
                }
                PathEl::QuadTo(c, p) => {
                    let quad = QuadBez::new(current, c, p);
                    let spread = (current.to_vec2() - c.to_vec2() * 2.0 + p.to_vec2()).hypot();
                    let steps = curve_steps(spread, tolerance);
                    for i in 1..=steps {
                        ring.push(snap(quad.eval(i as f64 / steps as f64)));
                    }
                    current = p;
                }
                PathEl::CurveTo(c1, c2, p) => {
                    let cubic = CubicBez::new(current, c1, c2, p);
                    let spread = (current.to_vec2() - c1.to_vec2() * 2.0 + c2.to_vec2())
                        .hypot()
                        .max((c1.to_vec2() - c2.to_vec2() * 2.0 + p.to_vec2()).hypot());
                    let steps = curve_steps(spread, tolerance);
                    for i in 1..=steps {
                        ring.push(snap(cubic.eval(i as f64 / steps as f64)));
                    }
                    current = p;
                }
                PathEl::ClosePath => {
                    finish_ring(&mut rings, std::mem::take(&mut ring));
                }
            }
        }
        finish_ring(&mut rings, ring);
    }
    rings
}

fn finish_ring(rings: &mut Vec<Ring>, mut ring: Ring) {
    ring.dedup_by_key(|p| key(*p));
    while ring.len() > 1 && key(ring[0]) == key(ring[ring.len() - 1]) {
        ring.pop();
    }
    if ring.len() >= 3 {
        rings.push(ring);
    }
}

/// Signed shoelace area, negative for clockwise rings
fn ring_area(ring: &Ring) -> f64 {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let (a, b) = (ring[i], ring[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        / 2.0
}

fn to_line_string(ring: &Ring) -> LineString {
    ring.iter().map(|p| Coord { x: p.x, y: p.y }).collect::<Vec<_>>().into()
}

/// Ring of a `geo` line string without the repeated closing point, wound
/// clockwise when `clockwise` is set
fn from_line_string(line: &LineString, clockwise: bool) -> Ring {
    let mut ring: Ring = line.coords().map(|c| Point::new(c.x, c.y)).collect();
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    if (ring_area(&ring) < 0.0) != clockwise {
        ring.reverse();
    }
    ring
}

/// Pair every hole with the smallest filled ring that holds it
fn to_polygons(rings: Vec<Ring>) -> Vec<Polygon> {
    let (filled, holes): (Vec<Ring>, Vec<Ring>) =
        rings.into_iter().partition(|ring| ring_area(ring) < 0.0);
    let mut polygons: Vec<(f64, Polygon)> = filled
        .iter()
        .map(|ring| (ring_area(ring).abs(), Polygon::new(to_line_string(ring), Vec::new())))
        .collect();

    for hole in holes {
        let inside = Coord {
            x: hole[0].x,
            y: hole[0].y,
        };
        let owner = polygons
            .iter_mut()
            .filter(|(_, polygon)| polygon.intersects(&inside))
            .min_by(|a, b| a.0.total_cmp(&b.0));
        match owner {
            Some((_, polygon)) => polygon.interiors_push(to_line_string(&hole)),
            None => tracing::trace!("dropping a hole outside every filled contour"),
        }
    }
    polygons.into_iter().map(|(_, polygon)| polygon).collect()
}

fn from_multi_polygon(merged: &MultiPolygon) -> Vec<Ring> {
    merged
        .iter()
        .flat_map(|polygon| {
            std::iter::once(from_line_string(polygon.exterior(), true)).chain(
                polygon
                    .interiors()
                    .iter()
                    .map(|interior| from_line_string(interior, false)),
            )
        })
        .collect()
}

/// Remove vertices lying on the line through their neighbors
fn simplify(mut ring: Ring, epsilon: f64) -> Option<Ring> {
    let mut changed = true;
    while changed && ring.len() >= 3 {
        changed = false;
        let mut i = 0;
        while i < ring.len() && ring.len() >= 3 {
            let n = ring.len();
            let prev = ring[(i + n - 1) % n];
            let here = ring[i];
            let next = ring[(i + 1) % n];
            let span = next - prev;
            let offset = (here - prev).cross(span).abs();
            let degenerate = span.hypot() == 0.0 || offset / span.hypot() <= epsilon;
            if here == prev || degenerate {
                ring.remove(i);
                changed = true;
            } else {
                i += 1;
            }
        }
    }
    (ring.len() >= 3 && ring_area(&ring).abs() > 0.0).then_some(ring)
}

fn to_path(ring: &Ring) -> BezPath {
    let mut path = BezPath::new();
    for (index, &point) in ring.iter().enumerate() {
        if index == 0 {
            path.move_to(point);
        } else {
            path.line_to(point);
        }
    }
    path.close_path();
    path
}

impl BooleanUnion for PolygonUnion {
    fn union(&self, contours: &[BezPath]) -> Vec<BezPath> {
        let mut polygons = to_polygons(flatten(contours, self.tolerance)).into_iter();
        let Some(first) = polygons.next() else {
            return Vec::new();
        };
        let merged = polygons.fold(MultiPolygon::new(vec![first]), |merged, polygon| {
            merged.union(&polygon)
        });
        from_multi_polygon(&merged)
            .into_iter()
            .filter_map(|ring| simplify(ring, COLLINEAR_EPSILON))
            .map(|ring| to_path(&ring))
            .collect()
    }
}

/// Flattened polygon vertices of each closed contour
pub fn contour_vertices(contours: &[BezPath], tolerance: f64) -> Vec<Vec<Point>> {
    flatten(contours, tolerance)
}

/// Total signed area of a contour set after flattening. Clockwise filled
/// regions count as positive.
pub fn filled_area(contours: &[BezPath], tolerance: f64) -> f64 {
    -flatten(contours, tolerance).iter().map(ring_area).sum::<f64>()
}

/// Union followed by rounding to integer coordinates and a canonical
/// start vertex and contour order.
///
/// Rounding can make rings touch again, so union and rounding repeat until
/// the outline stops changing. Resolving a resolved outline returns it
/// unchanged.
#[derive(Debug, Clone, Default)]
pub struct OverlapResolver<U = PolygonUnion> {
    union: U,
}

impl OverlapResolver<PolygonUnion> {
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            union: PolygonUnion { tolerance },
        }
    }
}

impl<U: BooleanUnion> OverlapResolver<U> {
    pub fn new(union: U) -> Self {
        Self { union }
    }

    pub fn resolve(&self, contours: &[BezPath]) -> Vec<BezPath> {
        if contours.is_empty() {
            return Vec::new();
        }
        let mut rings = self.settle(contours);
        for _ in 1..MAX_PASSES {
            let paths: Vec<BezPath> = rings.iter().map(to_path).collect();
            let next = self.settle(&paths);
            if next == rings {
                break;
            }
            rings = next;
        }
        rings.iter().map(to_path).collect()
    }

    /// One union and rounding round, in canonical order
    fn settle(&self, contours: &[BezPath]) -> Vec<Ring> {
        let merged = self.union.union(contours);
        let mut rings: Vec<Ring> = contour_vertices(&merged, f64::INFINITY)
            .into_iter()
            .filter_map(|ring| {
                let mut rounded: Ring = ring
                    .into_iter()
                    .map(|p| Point::new(p.x.round(), p.y.round()))
                    .collect();
                rounded.dedup();
                while rounded.len() > 1 && rounded.first() == rounded.last() {
                    rounded.pop();
                }
                simplify(rounded, 0.0)
            })
            .map(normalize_start)
            .collect();
        rings.sort_by(|a, b| compare_points(a[0], b[0]).then(a.len().cmp(&b.len())));
        rings
    }
}

fn compare_points(a: Point, b: Point) -> std::cmp::Ordering {
    a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y))
}

/// Rotate a ring so it starts at its lowest-left vertex
fn normalize_start(mut ring: Ring) -> Ring {
    if let Some(start) = (0..ring.len()).min_by(|&i, &j| compare_points(ring[i], ring[j])) {
        ring.rotate_left(start);
    }
    ring
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::primitives::{self, signed_area};
    use kurbo::Rect;
    use std::f64::consts::PI;

    /// Clockwise rectangle (y up)
    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> BezPath {
        let mut path = BezPath::new();
        path.move_to((x0, y0));
        path.line_to((x0, y1));
        path.line_to((x1, y1));
        path.line_to((x1, y0));
        path.close_path();
        path
    }

    /// Counter-clockwise rectangle, a hole under the nonzero rule
    fn hole(x0: f64, y0: f64, x1: f64, y1: f64) -> BezPath {
        let mut path = BezPath::new();
        path.move_to((x0, y0));
        path.line_to((x1, y0));
        path.line_to((x1, y1));
        path.line_to((x0, y1));
        path.close_path();
        path
    }

    fn area(contours: &[BezPath]) -> f64 {
        filled_area(contours, 0.25)
    }

    #[test]
    fn empty_input_resolves_to_nothing() {
        let resolver = OverlapResolver::with_tolerance(0.25);
        assert!(resolver.resolve(&[]).is_empty());
        assert!(PolygonUnion::default().union(&[BezPath::new()]).is_empty());
    }

    #[test]
    fn overlapping_squares_merge_into_one_contour() {
        let resolved = OverlapResolver::with_tolerance(0.25).resolve(&[
            rect(0.0, 0.0, 20.0, 20.0),
            rect(10.0, 10.0, 30.0, 30.0),
        ]);
        assert_eq!(resolved.len(), 1);
        assert!((area(&resolved) - 700.0).abs() < 1e-9);
        assert!(signed_area(&resolved[0]) < 0.0);
    }

    #[test]
    fn disjoint_contours_stay_separate() {
        let resolved = OverlapResolver::with_tolerance(0.25).resolve(&[
            rect(0.0, 0.0, 10.0, 10.0),
            rect(20.0, 0.0, 30.0, 10.0),
        ]);
        assert_eq!(resolved.len(), 2);
        assert!((area(&resolved) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn shared_edges_are_removed() {
        let resolved = OverlapResolver::with_tolerance(0.25).resolve(&[
            rect(0.0, 0.0, 10.0, 10.0),
            rect(10.0, 0.0, 20.0, 10.0),
        ]);
        assert_eq!(resolved.len(), 1);
        let vertices = contour_vertices(&resolved, 0.25);
        assert_eq!(vertices[0].len(), 4);
    }

    #[test]
    fn contained_contours_disappear() {
        let resolved = OverlapResolver::with_tolerance(0.25).resolve(&[
            rect(0.0, 0.0, 40.0, 40.0),
            rect(10.0, 10.0, 20.0, 20.0),
        ]);
        assert_eq!(resolved.len(), 1);
        assert!((area(&resolved) - 1600.0).abs() < 1e-9);
    }

    #[test]
    fn holes_are_computed_not_assumed_away() {
        let resolved = OverlapResolver::with_tolerance(0.25).resolve(&[
            rect(0.0, 0.0, 40.0, 40.0),
            hole(10.0, 10.0, 30.0, 30.0),
        ]);
        assert_eq!(resolved.len(), 2);
        assert!((area(&resolved) - 1200.0).abs() < 1e-9);
        let orientations: Vec<bool> = resolved.iter().map(|p| signed_area(p) < 0.0).collect();
        assert!(orientations.contains(&true) && orientations.contains(&false));
    }

    #[test]
    fn a_ring_of_strokes_keeps_its_counter() {
        // Four bars around a square window
        let resolved = OverlapResolver::with_tolerance(0.25).resolve(&[
            rect(0.0, 0.0, 40.0, 10.0),
            rect(0.0, 30.0, 40.0, 40.0),
            rect(0.0, 0.0, 10.0, 40.0),
            rect(30.0, 0.0, 40.0, 40.0),
        ]);
        assert_eq!(resolved.len(), 2);
        assert!((area(&resolved) - 1200.0).abs() < 1e-9);
    }

    #[test]
    fn resolving_twice_changes_nothing() {
        let resolver = OverlapResolver::with_tolerance(0.25);
        let raw = vec![
            primitives::stroke(
                crate::geometry::EdgeKind::DiagonalDescending,
                Point::new(100.0, 500.0),
                Point::new(300.0, 300.0),
                96.0,
            ),
            primitives::octagon(Point::new(100.0, 500.0), 96.0),
            primitives::octagon(Point::new(300.0, 300.0), 96.0),
            primitives::circle(Point::new(700.0, 500.0), 144.0),
            rect(250.0, 250.0, 600.0, 320.0),
        ];
        let once = resolver.resolve(&raw);
        let twice = resolver.resolve(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn resolved_area_matches_union_area() {
        let raw = vec![
            rect(0.0, 0.0, 100.0, 20.0),
            rect(40.0, -50.0, 60.0, 70.0),
        ];
        let resolved = OverlapResolver::with_tolerance(0.25).resolve(&raw);
        // 2000 + 2400 - 400 of overlap
        assert!((area(&resolved) - 4000.0).abs() < 1e-9);
        assert_eq!(resolved.len(), 1);
    }

    #[test]
    fn output_is_rounded_to_integers() {
        let resolved = OverlapResolver::with_tolerance(0.25).resolve(&[rect(0.4, 0.6, 10.2, 9.7)]);
        for ring in contour_vertices(&resolved, 0.25) {
            for p in ring {
                assert_eq!(p.x, p.x.round());
                assert_eq!(p.y, p.y.round());
            }
        }
        assert_eq!(resolved.len(), 1);
        let bounds = kurbo::Shape::bounding_box(&resolved[0]);
        assert_eq!(bounds, Rect::new(0.0, 1.0, 10.0, 10.0));
    }

    #[test]
    fn circles_flatten_within_tolerance() {
        let circle = primitives::circle(Point::ZERO, 144.0);
        let flattened = area(&[circle]);
        let exact = PI * 144.0 * 144.0;
        assert!((flattened - exact).abs() / exact < 0.01);
    }
}
