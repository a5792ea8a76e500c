//! UFO format conversion utilities
//!
//! Conversion between built glyphs (kurbo paths) and the norad UFO types.
//! Pure data transformation, no I/O.

use crate::glyphs::{BuiltGlyph, GlyphError};
use kurbo::{BezPath, PathEl, Point};
use norad::{Contour, ContourPoint, PointType};

/// Convert a built glyph to a norad glyph, validating its name and codepoint
pub fn to_norad_glyph(glyph: &BuiltGlyph) -> Result<norad::Glyph, GlyphError> {
    let name: norad::Name = glyph.name.parse().map_err(|_| GlyphError::InvalidName {
        glyph: glyph.name.clone(),
    })?;
    let mut norad_glyph = norad::Glyph::new(&name);
    norad_glyph.width = glyph.advance;

    if let Some(codepoint) = glyph.codepoint {
        let character = char::from_u32(codepoint).ok_or_else(|| GlyphError::InvalidCodepoint {
            glyph: glyph.name.clone(),
            codepoint,
        })?;
        norad_glyph.codepoints.insert(character);
    }

    norad_glyph.contours = glyph.contours.iter().flat_map(to_contours).collect();
    Ok(norad_glyph)
}

/// Convert a norad glyph back into a built glyph
#[cfg(test)]
pub fn from_norad_glyph(norad_glyph: &norad::Glyph) -> BuiltGlyph {
    BuiltGlyph {
        name: norad_glyph.name().to_string(),
        codepoint: norad_glyph.codepoints.iter().next().map(u32::from),
        contours: norad_glyph.contours.iter().map(to_bezpath).collect(),
        advance: norad_glyph.width,
    }
}

/// Split a path into one norad contour per closed subpath.
///
/// The closing segment's type is carried by the first point, as UFO
/// contours are cyclic.
pub fn to_contours(path: &BezPath) -> Vec<Contour> {
    let mut contours = Vec::new();
    let mut start: Option<Point> = None;
    let mut points: Vec<ContourPoint> = Vec::new();
    let mut closing = PointType::Line;

    let mut finish = |start: Option<Point>, points: &mut Vec<ContourPoint>, closing: PointType| {
        let Some(first) = start else {
            return;
        };
        // Drop an explicit return to the start point
        if let Some(last) = points.last() {
            if last.typ != PointType::OffCurve && last.x == first.x && last.y == first.y {
                points.pop();
            }
        }
        let mut contour_points = Vec::with_capacity(points.len() + 1);
        contour_points.push(contour_point(first, closing));
        contour_points.append(points);
        contours.push(Contour::new(contour_points, None));
    };

    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                finish(start.take(), &mut points, closing.clone());
                start = Some(p);
                closing = PointType::Line;
            }
            PathEl::LineTo(p) => {
                points.push(contour_point(p, PointType::Line));
                closing = PointType::Line;
            }
            PathEl::QuadTo(a, p) => {
                points.push(contour_point(a, PointType::OffCurve));
                points.push(contour_point(p, PointType::QCurve));
                closing = PointType::QCurve;
            }
            PathEl::CurveTo(a, b, p) => {
                points.push(contour_point(a, PointType::OffCurve));
                points.push(contour_point(b, PointType::OffCurve));
                points.push(contour_point(p, PointType::Curve));
                closing = PointType::Curve;
            }
            PathEl::ClosePath => {
                // A close after curves returns with a straight line unless
                // the last curve already landed on the start point
                let returns_home = points
                    .last()
                    .zip(start)
                    .is_some_and(|(last, first)| last.x == first.x && last.y == first.y);
                if !returns_home {
                    closing = PointType::Line;
                }
                finish(start.take(), &mut points, closing.clone());
            }
        }
    }
    finish(start, &mut points, closing);
    contours
}

fn contour_point(p: Point, typ: PointType) -> ContourPoint {
    ContourPoint::new(p.x, p.y, typ, false, None, None)
}

/// Convert a cyclic norad contour to a closed path
#[cfg(test)]
pub fn to_bezpath(contour: &Contour) -> BezPath {
    let mut path = BezPath::new();
    let points = &contour.points;
    let Some(start) = points
        .iter()
        .position(|point| point.typ != PointType::OffCurve)
    else {
        return path;
    };

    // Walk from the first on-curve point all the way around back to it
    let first = &points[start];
    path.move_to((first.x, first.y));
    let mut pending: Vec<Point> = Vec::new();
    for offset in 1..=points.len() {
        let point = &points[(start + offset) % points.len()];
        let pt = Point::new(point.x, point.y);
        match point.typ {
            PointType::OffCurve => pending.push(pt),
            // The final straight segment is implied by closing the path
            PointType::Move | PointType::Line if offset == points.len() => {}
            PointType::Move | PointType::Line => path.line_to(pt),
            PointType::Curve => match pending.as_slice() {
                [] => path.line_to(pt),
                [c] => path.quad_to(*c, pt),
                [.., c1, c2] => path.curve_to(*c1, *c2, pt),
            },
            PointType::QCurve => {
                // Implied on-curve points sit between consecutive off-curves
                for (i, &control) in pending.iter().enumerate() {
                    let end = match pending.get(i + 1) {
                        Some(next) => control.midpoint(*next),
                        None => pt,
                    };
                    path.quad_to(control, end);
                }
                if pending.is_empty() {
                    path.line_to(pt);
                }
            }
        }
        if point.typ != PointType::OffCurve {
            pending.clear();
        }
    }
    path.close_path();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::primitives;

    fn square() -> BezPath {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((0.0, 10.0));
        path.line_to((10.0, 10.0));
        path.line_to((10.0, 0.0));
        path.close_path();
        path
    }

    fn glyph(name: &str, codepoint: Option<u32>) -> BuiltGlyph {
        BuiltGlyph {
            name: name.to_string(),
            codepoint,
            contours: vec![square()],
            advance: 600.0,
        }
    }

    #[test]
    fn polygons_become_line_contours() {
        let contours = to_contours(&square());
        assert_eq!(contours.len(), 1);
        let points = &contours[0].points;
        assert_eq!(points.len(), 4);
        assert!(points.iter().all(|point| point.typ == PointType::Line));
    }

    #[test]
    fn circles_keep_their_curves() {
        let circle = primitives::circle(Point::new(50.0, 50.0), 10.0);
        let contours = to_contours(&circle);
        let points = &contours[0].points;
        assert_eq!(points.len(), 12);
        assert_eq!(points[0].typ, PointType::Curve);
        assert_eq!(to_bezpath(&contours[0]), circle);
    }

    #[test]
    fn polygons_survive_a_round_trip() {
        let contour = &to_contours(&square())[0];
        assert_eq!(to_bezpath(contour), square());
    }

    #[test]
    fn glyphs_carry_names_codepoints_and_advance() {
        let norad_glyph = to_norad_glyph(&glyph("A", Some(65))).unwrap();
        assert_eq!(norad_glyph.name().as_str(), "A");
        assert_eq!(norad_glyph.width, 600.0);
        assert!(norad_glyph.codepoints.contains('A'));
        assert_eq!(from_norad_glyph(&norad_glyph), glyph("A", Some(65)));
    }

    #[test]
    fn invalid_names_and_codepoints_are_glyph_errors() {
        let error = to_norad_glyph(&glyph("", None)).unwrap_err();
        assert!(matches!(error, GlyphError::InvalidName { .. }));

        let error = to_norad_glyph(&glyph("surrogate", Some(0xD800))).unwrap_err();
        assert!(matches!(error, GlyphError::InvalidCodepoint { .. }));
    }
}
