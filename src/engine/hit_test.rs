// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Hit testing of annotations, marquee selection and transform handles.

use super::bounds::{get_annotation_bounding_box, get_annotations_bounding_box, BoundingBox};
use super::shapes::{box_canvas_frame, text_box_size};
use crate::config::{EngineConfig, MIN_HIT_TOLERANCE};
use crate::models::annotation::{Annotation, BoxShape, Point, Shape};
use crate::util::geometry::{normalized_to_canvas, rotate_about, RenderedRect};

/// Radii below this many pixels make an ellipse unhittable.
const DEGENERATE_RADIUS: f64 = 1e-6;

/// Transform handle of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    ScaleTopLeft,
    ScaleTopRight,
    ScaleBottomLeft,
    ScaleBottomRight,
    Rotate,
    /// Anywhere inside the selection box that is not a handle.
    Move,
}

/// Hit area of a handle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleRect {
    pub handle: Handle,
    pub bounds: BoundingBox,
}

/// Square of side `size` centred on `center`.
fn handle_square(center: Point, size: f64) -> BoundingBox {
    let half = size / 2.0;
    BoundingBox {
        start: Point::new(center.x - half, center.y - half),
        end: Point::new(center.x + half, center.y + half),
    }
}

/// Hit areas of the rotate handle and the four corner scale handles.
///
/// Empty when nothing with geometry is selected.
pub fn handle_rects(selected: &[Annotation], rect: &RenderedRect, scale_y: f64, config: &EngineConfig) -> Vec<HandleRect> {
    let Some(bbox) = get_annotations_bounding_box(selected, rect, scale_y) else {
        return Vec::new();
    };
    let size = config.handle_size;
    let rotate_anchor = Point::new(bbox.center().x, bbox.start.y - config.rotate_handle_offset);

    vec![
        HandleRect {
            handle: Handle::Rotate,
            bounds: handle_square(rotate_anchor, size),
        },
        HandleRect {
            handle: Handle::ScaleTopLeft,
            bounds: handle_square(bbox.start, size),
        },
        HandleRect {
            handle: Handle::ScaleTopRight,
            bounds: handle_square(Point::new(bbox.end.x, bbox.start.y), size),
        },
        HandleRect {
            handle: Handle::ScaleBottomLeft,
            bounds: handle_square(Point::new(bbox.start.x, bbox.end.y), size),
        },
        HandleRect {
            handle: Handle::ScaleBottomRight,
            bounds: handle_square(bbox.end, size),
        },
    ]
}

/// Which handle of the selection lies under a canvas point.
///
/// Handles win over the selection body; a point inside the combined box
/// but on no handle reports [`Handle::Move`].
pub fn get_handle_under_point(
    point: Point,
    selected: &[Annotation],
    rect: &RenderedRect,
    scale_y: f64,
    config: &EngineConfig,
) -> Option<Handle> {
    if let Some(hit) = handle_rects(selected, rect, scale_y, config)
        .into_iter()
        .find(|h| h.bounds.contains(&point))
    {
        return Some(hit.handle);
    }

    let bbox = get_annotations_bounding_box(selected, rect, scale_y)?;
    bbox.contains(&point).then_some(Handle::Move)
}

/// Squared distance from `p` to the segment `a`-`b`.
pub fn point_segment_distance_squared(p: Point, a: Point, b: Point) -> f64 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len_sq = abx * abx + aby * aby;
    if len_sq == 0.0 {
        return p.distance_squared(&a);
    }
    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0);
    let projection = Point::new(a.x + abx * t, a.y + aby * t);
    p.distance_squared(&projection)
}

/// Point in the box's own unrotated frame, relative to its centre.
fn to_local_frame(point: Point, shape: &BoxShape, rect: &RenderedRect) -> (f64, f64, f64, f64) {
    let (center, hw, hh) = box_canvas_frame(shape, rect);
    let local = rotate_about(point, center, -shape.rotation);
    (local.x - center.x, local.y - center.y, hw, hh)
}

fn stroke_tolerance(line_width: f64) -> f64 {
    line_width.max(MIN_HIT_TOLERANCE)
}

/// Whether a normalized point lies on an annotation.
///
/// Boxes and text use containment, ellipses their equation, and arrows
/// and freehand strokes a distance tolerance of `max(5, lineWidth)` pixels.
pub fn is_point_in_annotation(point: Point, annotation: &Annotation, rect: &RenderedRect, scale_y: f64) -> bool {
    let p = normalized_to_canvas(point, rect);

    match &annotation.shape {
        Shape::Rectangle(b) | Shape::Image(b) | Shape::Video(b) => {
            let (dx, dy, hw, hh) = to_local_frame(p, b, rect);
            dx.abs() <= hw && dy.abs() <= hh
        }
        Shape::Ellipse(b) => {
            let (dx, dy, rx, ry) = to_local_frame(p, b, rect);
            if rx < DEGENERATE_RADIUS || ry < DEGENERATE_RADIUS {
                return false;
            }
            (dx / rx).powi(2) + (dy / ry).powi(2) <= 1.0
        }
        Shape::Arrow { start, end } => {
            let tolerance = stroke_tolerance(annotation.line_width);
            let a = normalized_to_canvas(*start, rect);
            let b = normalized_to_canvas(*end, rect);
            point_segment_distance_squared(p, a, b) <= tolerance * tolerance
        }
        Shape::Freehand { points } => {
            let tolerance = stroke_tolerance(annotation.line_width);
            let canvas: Vec<Point> = points.iter().map(|q| normalized_to_canvas(*q, rect)).collect();
            match canvas.as_slice() {
                [] => false,
                [only] => p.distance_squared(only) <= tolerance * tolerance,
                _ => canvas
                    .windows(2)
                    .any(|w| point_segment_distance_squared(p, w[0], w[1]) <= tolerance * tolerance),
            }
        }
        Shape::Text {
            position,
            text,
            font_size,
        } => {
            let origin = normalized_to_canvas(*position, rect);
            let (w, h) = text_box_size(text, *font_size, scale_y);
            p.x >= origin.x && p.x <= origin.x + w && p.y >= origin.y && p.y <= origin.y + h
        }
    }
}

/// Whether an annotation's box overlaps a marquee given in normalized corners.
///
/// Partial overlap selects; touching edges do not.
pub fn is_annotation_in_marquee(annotation: &Annotation, marquee: &BoundingBox, rect: &RenderedRect, scale_y: f64) -> bool {
    let Some(bbox) = get_annotation_bounding_box(annotation, rect, scale_y) else {
        return false;
    };
    let marquee = BoundingBox::from_corners(normalized_to_canvas(marquee.start, rect), normalized_to_canvas(marquee.end, rect));
    bbox.overlaps(&marquee)
}

/// Index of the topmost annotation on `frame` under a normalized point.
///
/// Later annotations are drawn above earlier ones, so the search runs
/// back to front.
pub fn find_annotation_at(
    point: Point,
    annotations: &[Annotation],
    frame: u32,
    rect: &RenderedRect,
    scale_y: f64,
) -> Option<usize> {
    annotations
        .iter()
        .enumerate()
        .rev()
        .find(|(_, a)| a.frame == frame && is_point_in_annotation(point, a, rect, scale_y))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::geometry::canvas_to_normalized;

    fn rect() -> RenderedRect {
        RenderedRect::new(0.0, 0.0, 1000.0, 500.0)
    }

    fn rectangle(rotation: f64) -> Annotation {
        // 200 x 100 px centred at (500, 250)
        Annotation::new("r", 0, Shape::Rectangle(BoxShape::new(Point::new(0.5, 0.5), 0.2, 0.2).rotated(rotation)))
    }

    fn at(x: f64, y: f64) -> Point {
        canvas_to_normalized(Point::new(x, y), &rect())
    }

    #[test]
    fn test_unrotated_rectangle_matches_plain_box_test() {
        let annotation = rectangle(0.0);
        let plain = BoundingBox::from_corners(Point::new(400.0, 200.0), Point::new(600.0, 300.0));
        for x in (355..=645).step_by(30) {
            for y in (155..=345).step_by(30) {
                let p = Point::new(x as f64, y as f64);
                assert_eq!(
                    is_point_in_annotation(at(p.x, p.y), &annotation, &rect(), 1.0),
                    plain.contains(&p),
                    "mismatch at {:?}",
                    p
                );
            }
        }
    }

    #[test]
    fn test_rotation_invariance() {
        let theta = 0.6;
        let center = Point::new(500.0, 250.0);
        let kinds: [fn(BoxShape) -> Shape; 4] = [Shape::Rectangle, Shape::Ellipse, Shape::Image, Shape::Video];
        for make in kinds {
            // 200 x 100 px centred at (500, 250)
            let shape = |rotation| {
                Annotation::new("s", 0, make(BoxShape::new(Point::new(0.5, 0.5), 0.2, 0.2).rotated(rotation)))
            };
            let (unrotated, rotated) = (shape(0.0), shape(theta));
            assert!(is_point_in_annotation(at(590.0, 240.0), &unrotated, &rect(), 1.0));
            for (x, y) in [(590.0, 240.0), (610.0, 250.0), (500.0, 295.0), (420.0, 210.0), (380.0, 250.0)] {
                let p = Point::new(x, y);
                let q = rotate_about(p, center, theta);
                assert_eq!(
                    is_point_in_annotation(at(p.x, p.y), &unrotated, &rect(), 1.0),
                    is_point_in_annotation(at(q.x, q.y), &rotated, &rect(), 1.0),
                    "{:?} mismatch at {:?}",
                    unrotated.kind(),
                    p
                );
            }
        }
    }

    #[test]
    fn test_rotated_ellipse_uses_its_own_axes() {
        let upright = BoxShape::new(Point::new(0.5, 0.5), 0.2, 0.2).rotated(std::f64::consts::FRAC_PI_2);
        let ellipse = Annotation::new("e", 0, Shape::Ellipse(upright));
        // Long axis now runs vertically: 150..350 in y, 450..550 in x
        assert!(is_point_in_annotation(at(500.0, 340.0), &ellipse, &rect(), 1.0));
        assert!(!is_point_in_annotation(at(590.0, 250.0), &ellipse, &rect(), 1.0));
    }

    #[test]
    fn test_ellipse_excludes_box_corners() {
        let ellipse = Annotation::new("e", 0, Shape::Ellipse(BoxShape::new(Point::new(0.5, 0.5), 0.2, 0.2)));
        assert!(is_point_in_annotation(at(500.0, 250.0), &ellipse, &rect(), 1.0));
        assert!(is_point_in_annotation(at(599.0, 250.0), &ellipse, &rect(), 1.0));
        assert!(!is_point_in_annotation(at(595.0, 295.0), &ellipse, &rect(), 1.0));
    }

    #[test]
    fn test_degenerate_ellipse_never_hits() {
        let ellipse = Annotation::new("e", 0, Shape::Ellipse(BoxShape::new(Point::new(0.5, 0.5), 0.0, 0.2)));
        assert!(!is_point_in_annotation(Point::new(0.5, 0.5), &ellipse, &rect(), 1.0));
    }

    #[test]
    fn test_arrow_tolerance_has_floor() {
        let arrow = Annotation::new(
            "a",
            0,
            Shape::Arrow {
                start: Point::new(0.1, 0.5),
                end: Point::new(0.5, 0.5),
            },
        )
        .with_line_width(1.0);
        assert!(is_point_in_annotation(at(300.0, 254.0), &arrow, &rect(), 1.0));
        assert!(!is_point_in_annotation(at(300.0, 256.0), &arrow, &rect(), 1.0));

        let thick = arrow.clone().with_line_width(12.0);
        assert!(is_point_in_annotation(at(300.0, 261.0), &thick, &rect(), 1.0));
        // Beyond the end cap
        assert!(!is_point_in_annotation(at(520.0, 250.0), &thick, &rect(), 1.0));
    }

    #[test]
    fn test_freehand_hits_any_segment() {
        let stroke = Annotation::new(
            "f",
            0,
            Shape::Freehand {
                points: vec![Point::new(0.1, 0.1), Point::new(0.2, 0.1), Point::new(0.2, 0.3)],
            },
        );
        assert!(is_point_in_annotation(at(202.0, 100.0), &stroke, &rect(), 1.0));
        assert!(!is_point_in_annotation(at(150.0, 120.0), &stroke, &rect(), 1.0));
    }

    #[test]
    fn test_text_hit_box() {
        let text = Annotation::new(
            "t",
            0,
            Shape::Text {
                position: Point::new(0.1, 0.1),
                text: "hello".to_string(),
                font_size: 20.0,
            },
        );
        // 5 * 20 * 0.6 = 60 px wide, 20 px tall
        assert!(is_point_in_annotation(at(155.0, 65.0), &text, &rect(), 1.0));
        assert!(!is_point_in_annotation(at(165.0, 65.0), &text, &rect(), 1.0));
    }

    #[test]
    fn test_marquee_selection() {
        let annotation = rectangle(0.0);
        let full = BoundingBox::from_corners(at(300.0, 100.0), at(700.0, 400.0));
        // Dragged from bottom-right to top-left, covering only part of the shape
        let partial = BoundingBox {
            start: at(450.0, 280.0),
            end: at(350.0, 150.0),
        };
        let outside = BoundingBox::from_corners(at(700.0, 350.0), at(900.0, 450.0));

        assert!(is_annotation_in_marquee(&annotation, &full, &rect(), 1.0));
        assert!(is_annotation_in_marquee(&annotation, &partial, &rect(), 1.0));
        assert!(!is_annotation_in_marquee(&annotation, &outside, &rect(), 1.0));
    }

    #[test]
    fn test_marquee_touching_edge_does_not_select() {
        let annotation = rectangle(0.0);
        let touching = BoundingBox::from_corners(at(600.0, 200.0), at(700.0, 300.0));
        assert!(!is_annotation_in_marquee(&annotation, &touching, &rect(), 1.0));
    }

    #[test]
    fn test_handles_take_priority_over_move() {
        let selected = vec![rectangle(0.0)];
        let config = EngineConfig::default();
        let handle = |x, y| get_handle_under_point(Point::new(x, y), &selected, &rect(), 1.0, &config);

        assert_eq!(handle(401.0, 201.0), Some(Handle::ScaleTopLeft));
        assert_eq!(handle(600.0, 200.0), Some(Handle::ScaleTopRight));
        assert_eq!(handle(398.0, 302.0), Some(Handle::ScaleBottomLeft));
        assert_eq!(handle(603.0, 303.0), Some(Handle::ScaleBottomRight));
        assert_eq!(handle(500.0, 175.0), Some(Handle::Rotate));
        assert_eq!(handle(500.0, 250.0), Some(Handle::Move));
        assert_eq!(handle(700.0, 250.0), None);
        assert_eq!(get_handle_under_point(Point::new(0.0, 0.0), &[], &rect(), 1.0, &config), None);
    }

    #[test]
    fn test_topmost_annotation_wins() {
        let lower = rectangle(0.0);
        let mut upper = rectangle(0.0);
        upper.id = "upper".to_string();
        let mut other_frame = rectangle(0.0);
        other_frame.frame = 3;
        let annotations = vec![lower, upper, other_frame];

        assert_eq!(find_annotation_at(Point::new(0.5, 0.5), &annotations, 0, &rect(), 1.0), Some(1));
        assert_eq!(find_annotation_at(Point::new(0.5, 0.5), &annotations, 3, &rect(), 1.0), Some(2));
        assert_eq!(find_annotation_at(Point::new(0.05, 0.05), &annotations, 0, &rect(), 1.0), None);
    }
}
