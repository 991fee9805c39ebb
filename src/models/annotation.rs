// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data structures.
//!
//! This module defines the annotation records drawn over video frames:
//! boxes (rectangle, ellipse, embedded image/video), arrows, freehand
//! strokes and text labels. All positions are stored in normalized
//! coordinates relative to the rendered video rectangle.

use serde::{Deserialize, Serialize};

/// A 2D point.
///
/// Used both for normalized coordinates (0.0 to 1.0 of the rendered video
/// rect) and canvas pixel coordinates. Conversions live in
/// [`crate::util::geometry`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance to another point in the same space.
    pub fn distance_squared(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: &Point) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// Geometry shared by rectangles, ellipses and embedded media boxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxShape {
    pub center: Point,
    /// Fraction of the rendered width.
    pub width: f64,
    /// Fraction of the rendered height.
    pub height: f64,
    /// Radians, clockwise in canvas space (y grows downwards).
    #[serde(default)]
    pub rotation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
}

impl BoxShape {
    pub fn new(center: Point, width: f64, height: f64) -> Self {
        Self {
            center,
            width,
            height,
            rotation: 0.0,
            fill_opacity: None,
        }
    }

    pub fn rotated(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Shape-specific part of an annotation, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Shape {
    Rectangle(BoxShape),
    Ellipse(BoxShape),
    Image(BoxShape),
    Video(BoxShape),
    Arrow {
        start: Point,
        end: Point,
    },
    Freehand {
        points: Vec<Point>,
    },
    #[serde(rename_all = "camelCase")]
    Text {
        /// Top-left corner of the text block.
        position: Point,
        text: String,
        font_size: f64,
    },
}

/// Type of annotation, without its geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnnotationKind {
    Rectangle,
    Ellipse,
    Arrow,
    Freehand,
    Text,
    Image,
    Video,
}

impl Shape {
    pub fn kind(&self) -> AnnotationKind {
        match self {
            Shape::Rectangle(_) => AnnotationKind::Rectangle,
            Shape::Ellipse(_) => AnnotationKind::Ellipse,
            Shape::Image(_) => AnnotationKind::Image,
            Shape::Video(_) => AnnotationKind::Video,
            Shape::Arrow { .. } => AnnotationKind::Arrow,
            Shape::Freehand { .. } => AnnotationKind::Freehand,
            Shape::Text { .. } => AnnotationKind::Text,
        }
    }

    /// Box geometry for rectangle, ellipse, image and video shapes.
    pub fn as_box(&self) -> Option<&BoxShape> {
        match self {
            Shape::Rectangle(b) | Shape::Ellipse(b) | Shape::Image(b) | Shape::Video(b) => Some(b),
            _ => None,
        }
    }
}

/// A single annotation drawn on one video frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub id: String,
    /// Video frame index the annotation belongs to.
    pub frame: u32,
    pub color: String,
    /// Stroke width in canvas pixels.
    pub line_width: f64,
    #[serde(flatten)]
    pub shape: Shape,
}

impl Annotation {
    /// Create a new annotation with default stroke styling.
    pub fn new(id: impl Into<String>, frame: u32, shape: Shape) -> Self {
        Self {
            id: id.into(),
            frame,
            color: "#ff3b30".to_string(),
            line_width: 3.0,
            shape,
        }
    }

    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn kind(&self) -> AnnotationKind {
        self.shape.kind()
    }

    /// Freehand strokes need at least two points to be kept.
    pub fn is_persistable(&self) -> bool {
        match &self.shape {
            Shape::Freehand { points } => points.len() >= 2,
            Shape::Text { text, .. } => !text.trim().is_empty(),
            _ => true,
        }
    }
}
