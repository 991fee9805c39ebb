// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the coordinate mapping between the on-screen
//! canvas (pixels) and normalized annotation coordinates, which are
//! fractions of the letterboxed video rectangle.

use crate::models::annotation::Point;
use serde::{Deserialize, Serialize};

/// Size of a container or of a video's intrinsic frame, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The on-screen pixel rectangle occupied by the video after "contain" fitting.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderedRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RenderedRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

/// Fit a video inside its container, preserving aspect ratio ("object-fit: contain").
///
/// The fitted rectangle is centred in the container. A container or video
/// with a zero dimension yields an empty rect at the container centre.
pub fn get_rendered_rect(container: Size, video: Size) -> RenderedRect {
    if container.width <= 0.0 || container.height <= 0.0 || video.width <= 0.0 || video.height <= 0.0 {
        return RenderedRect::new(container.width.max(0.0) / 2.0, container.height.max(0.0) / 2.0, 0.0, 0.0);
    }

    let container_aspect = container.width / container.height;
    let video_aspect = video.width / video.height;

    let (width, height) = if container_aspect > video_aspect {
        // Container is wider - height is the binding constraint
        (container.height * video_aspect, container.height)
    } else {
        // Container is taller - width is the binding constraint
        (container.width, container.width / video_aspect)
    };

    RenderedRect {
        x: (container.width - width) / 2.0,
        y: (container.height - height) / 2.0,
        width,
        height,
    }
}

/// Convert canvas pixel coordinates to normalized coordinates (0.0 to 1.0).
///
/// The point is clamped to the rect first, so the result is always inside
/// the unit square even when the pointer has left the video area.
pub fn canvas_to_normalized(point: Point, rect: &RenderedRect) -> Point {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return Point::new(0.0, 0.0);
    }
    let x = point.x.clamp(rect.x, rect.right());
    let y = point.y.clamp(rect.y, rect.bottom());
    Point {
        x: (x - rect.x) / rect.width,
        y: (y - rect.y) / rect.height,
    }
}

/// Convert canvas pixel coordinates to normalized coordinates without clamping.
///
/// Used while a transform is in flight, where shapes may temporarily sit
/// outside the video area.
pub fn canvas_to_normalized_unclamped(point: Point, rect: &RenderedRect) -> Point {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return Point::new(0.0, 0.0);
    }
    Point {
        x: (point.x - rect.x) / rect.width,
        y: (point.y - rect.y) / rect.height,
    }
}

/// Convert normalized coordinates to canvas pixel coordinates.
pub fn normalized_to_canvas(point: Point, rect: &RenderedRect) -> Point {
    Point {
        x: rect.x + point.x * rect.width,
        y: rect.y + point.y * rect.height,
    }
}

/// Rotate `point` about `pivot` by `angle` radians.
pub fn rotate_about(point: Point, pivot: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    let dx = point.x - pivot.x;
    let dy = point.y - pivot.y;
    Point {
        x: pivot.x + dx * cos - dy * sin,
        y: pivot.y + dx * sin + dy * cos,
    }
}
