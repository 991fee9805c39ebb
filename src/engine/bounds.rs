// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Axis-aligned bounding boxes of annotations and selections.

use super::shapes::get_annotation_points;
use crate::models::annotation::{Annotation, Point};
use crate::util::geometry::RenderedRect;
use serde::{Deserialize, Serialize};

/// Axis-aligned box in canvas space. `start` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub start: Point,
    pub end: Point,
}

impl BoundingBox {
    /// Build a box from two arbitrary corners, reordering them.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            start: Point::new(a.x.min(b.x), a.y.min(b.y)),
            end: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn width(&self) -> f64 {
        self.end.x - self.start.x
    }

    pub fn height(&self) -> f64 {
        self.end.y - self.start.y
    }

    pub fn center(&self) -> Point {
        Point::new((self.start.x + self.end.x) / 2.0, (self.start.y + self.end.y) / 2.0)
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            start: Point::new(self.start.x + dx, self.start.y + dy),
            end: Point::new(self.end.x + dx, self.end.y + dy),
        }
    }

    /// Inclusive containment.
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.start.x && point.x <= self.end.x && point.y >= self.start.y && point.y <= self.end.y
    }

    /// Strict overlap: boxes that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.start.x < other.end.x && self.end.x > other.start.x && self.start.y < other.end.y && self.end.y > other.start.y
    }
}

/// Min/max reduction over a list of points; `None` when the list is empty.
pub fn get_axis_aligned_bounding_box(points: &[Point]) -> Option<BoundingBox> {
    let first = points.first()?;
    let mut bbox = BoundingBox {
        start: *first,
        end: *first,
    };
    for p in &points[1..] {
        bbox.start.x = bbox.start.x.min(p.x);
        bbox.start.y = bbox.start.y.min(p.y);
        bbox.end.x = bbox.end.x.max(p.x);
        bbox.end.y = bbox.end.y.max(p.y);
    }
    Some(bbox)
}

pub fn get_annotation_bounding_box(annotation: &Annotation, rect: &RenderedRect, scale_y: f64) -> Option<BoundingBox> {
    get_axis_aligned_bounding_box(&get_annotation_points(annotation, rect, scale_y))
}

/// Combined box over every point of every annotation.
///
/// Rotation is already baked into each shape's corner points, so this is
/// the reduction over all of them rather than a union of per-shape boxes.
pub fn get_annotations_bounding_box(annotations: &[Annotation], rect: &RenderedRect, scale_y: f64) -> Option<BoundingBox> {
    let points: Vec<Point> = annotations
        .iter()
        .flat_map(|a| get_annotation_points(a, rect, scale_y))
        .collect();
    get_axis_aligned_bounding_box(&points)
}
