// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Canvas-space outline points of each annotation type.

use crate::config::TEXT_WIDTH_FACTOR;
use crate::models::annotation::{Annotation, BoxShape, Point, Shape};
use crate::util::geometry::{normalized_to_canvas, rotate_about, RenderedRect};

/// Approximate size of a text block in canvas pixels.
///
/// Glyph widths are not measured; the average glyph is taken to be
/// `TEXT_WIDTH_FACTOR` of the font size.
pub fn text_box_size(text: &str, font_size: f64, scale_y: f64) -> (f64, f64) {
    let width = text.chars().count() as f64 * font_size * TEXT_WIDTH_FACTOR;
    let height = font_size * scale_y;
    (width, height)
}

/// Centre and half extents of a box shape in canvas pixels.
pub(crate) fn box_canvas_frame(shape: &BoxShape, rect: &RenderedRect) -> (Point, f64, f64) {
    let center = normalized_to_canvas(shape.center, rect);
    let half_width = shape.width * rect.width / 2.0;
    let half_height = shape.height * rect.height / 2.0;
    (center, half_width, half_height)
}

fn box_corners(shape: &BoxShape, rect: &RenderedRect) -> Vec<Point> {
    let (center, hw, hh) = box_canvas_frame(shape, rect);
    [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)]
        .into_iter()
        .map(|(dx, dy)| rotate_about(Point::new(center.x + dx, center.y + dy), center, shape.rotation))
        .collect()
}

/// Defining canvas-space points of an annotation.
///
/// Boxes return their four rotated corners (top-left, top-right,
/// bottom-right, bottom-left before rotation), arrows their endpoints,
/// freehand strokes every path point and text the corners of its
/// approximate block.
pub fn get_annotation_points(annotation: &Annotation, rect: &RenderedRect, scale_y: f64) -> Vec<Point> {
    match &annotation.shape {
        Shape::Rectangle(b) | Shape::Ellipse(b) | Shape::Image(b) | Shape::Video(b) => box_corners(b, rect),
        Shape::Arrow { start, end } => vec![normalized_to_canvas(*start, rect), normalized_to_canvas(*end, rect)],
        Shape::Freehand { points } => points.iter().map(|p| normalized_to_canvas(*p, rect)).collect(),
        Shape::Text {
            position,
            text,
            font_size,
        } => {
            let origin = normalized_to_canvas(*position, rect);
            let (w, h) = text_box_size(text, *font_size, scale_y);
            vec![
                origin,
                Point::new(origin.x + w, origin.y),
                Point::new(origin.x + w, origin.y + h),
                Point::new(origin.x, origin.y + h),
            ]
        }
    }
}
