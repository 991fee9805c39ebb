// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Move, rotate and scale gestures over a selection of annotations.
//!
//! A gesture starts with [`start_transform`], which snapshots the selection
//! and fixes the pivot (the centre of the combined bounding box). Each
//! pointer move calls [`apply_transform`] with the current pointer; the
//! output is always recomputed from the snapshot and the total pointer
//! displacement, so repeated moves never accumulate rounding drift. The
//! gesture ends when the caller drops the state, committing the last output
//! or discarding it.

use super::bounds::{get_annotations_bounding_box, BoundingBox};
use super::hit_test::Handle;
use super::snapping::{snap_selection, AlignmentGuide};
use crate::config::EngineConfig;
use crate::models::annotation::{Annotation, Point, Shape};
use crate::util::geometry::{canvas_to_normalized_unclamped, normalized_to_canvas, rotate_about, RenderedRect};

/// Pivot offsets shorter than this (in pixels) leave an axis unscaled.
const MIN_SCALE_OFFSET: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Kind of gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformAction {
    Move,
    Rotate,
    Scale(Corner),
}

impl From<Handle> for TransformAction {
    fn from(handle: Handle) -> Self {
        match handle {
            Handle::Move => TransformAction::Move,
            Handle::Rotate => TransformAction::Rotate,
            Handle::ScaleTopLeft => TransformAction::Scale(Corner::TopLeft),
            Handle::ScaleTopRight => TransformAction::Scale(Corner::TopRight),
            Handle::ScaleBottomLeft => TransformAction::Scale(Corner::BottomLeft),
            Handle::ScaleBottomRight => TransformAction::Scale(Corner::BottomRight),
        }
    }
}

/// Snapshot of a gesture, created at drag start and dropped at drag end.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformState {
    pub action: TransformAction,
    /// Deep copy of the selection when the drag started.
    pub initial_annotations: Vec<Annotation>,
    /// Pointer position at drag start, canvas pixels.
    pub start_point: Point,
    /// Centre of the combined box at drag start, canvas pixels.
    pub pivot: Point,
    pub initial_bounds: BoundingBox,
    pub initial_width: f64,
    pub initial_height: f64,
    pub preserve_aspect_ratio: bool,
}

impl TransformState {
    /// Same gesture with the aspect-ratio lock toggled (modifier key).
    pub fn with_preserve_aspect_ratio(self, preserve_aspect_ratio: bool) -> Self {
        Self {
            preserve_aspect_ratio,
            ..self
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.initial_annotations.iter().any(|a| a.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.initial_annotations.iter().map(|a| a.id.as_str())
    }
}

/// Begin a gesture over `annotations`.
///
/// Returns `None` when the selection has no geometry to pivot about.
pub fn start_transform(
    action: TransformAction,
    annotations: &[Annotation],
    start_point: Point,
    rect: &RenderedRect,
    scale_y: f64,
) -> Option<TransformState> {
    let bounds = get_annotations_bounding_box(annotations, rect, scale_y)?;
    log::debug!(
        "Starting {:?} of {} annotation(s) at ({:.1}, {:.1})",
        action,
        annotations.len(),
        start_point.x,
        start_point.y
    );
    Some(TransformState {
        action,
        initial_annotations: annotations.to_vec(),
        start_point,
        pivot: bounds.center(),
        initial_bounds: bounds,
        initial_width: bounds.width(),
        initial_height: bounds.height(),
        preserve_aspect_ratio: false,
    })
}

/// Apply `f` to every stored position of a shape.
fn map_positions(shape: &Shape, f: impl Fn(Point) -> Point) -> Shape {
    let mut shape = shape.clone();
    match &mut shape {
        Shape::Rectangle(b) | Shape::Ellipse(b) | Shape::Image(b) | Shape::Video(b) => b.center = f(b.center),
        Shape::Arrow { start, end } => {
            *start = f(*start);
            *end = f(*end);
        }
        Shape::Freehand { points } => points.iter_mut().for_each(|p| *p = f(*p)),
        Shape::Text { position, .. } => *position = f(*position),
    }
    shape
}

/// Run a canvas-space mapping on a normalized position.
fn via_canvas(p: Point, rect: &RenderedRect, f: impl Fn(Point) -> Point) -> Point {
    canvas_to_normalized_unclamped(f(normalized_to_canvas(p, rect)), rect)
}

/// Per-axis scale factors from the pointer's offset to the pivot.
fn scale_factors(state: &TransformState, current: Point) -> (f64, f64) {
    let factor = |start: f64, now: f64| {
        if start.abs() < MIN_SCALE_OFFSET {
            1.0
        } else {
            now / start
        }
    };
    let sx = factor(state.start_point.x - state.pivot.x, current.x - state.pivot.x);
    let sy = factor(state.start_point.y - state.pivot.y, current.y - state.pivot.y);

    if state.preserve_aspect_ratio {
        let uniform = sx.abs().max(sy.abs());
        (uniform.copysign(sx), uniform.copysign(sy))
    } else {
        (sx, sy)
    }
}

fn translate(annotation: &Annotation, dx: f64, dy: f64) -> Annotation {
    Annotation {
        shape: map_positions(&annotation.shape, |p| Point::new(p.x + dx, p.y + dy)),
        ..annotation.clone()
    }
}

fn rotate(annotation: &Annotation, pivot: Point, angle: f64, rect: &RenderedRect) -> Annotation {
    let mut shape = map_positions(&annotation.shape, |p| via_canvas(p, rect, |c| rotate_about(c, pivot, angle)));
    if let Shape::Rectangle(b) | Shape::Ellipse(b) | Shape::Image(b) | Shape::Video(b) = &mut shape {
        b.rotation += angle;
    }
    Annotation {
        shape,
        ..annotation.clone()
    }
}

fn scale(annotation: &Annotation, pivot: Point, sx: f64, sy: f64, rect: &RenderedRect) -> Annotation {
    let mut shape = map_positions(&annotation.shape, |p| {
        via_canvas(p, rect, |c| Point::new(pivot.x + (c.x - pivot.x) * sx, pivot.y + (c.y - pivot.y) * sy))
    });
    match &mut shape {
        Shape::Rectangle(b) | Shape::Ellipse(b) | Shape::Image(b) | Shape::Video(b) => {
            b.width *= sx.abs();
            b.height *= sy.abs();
        }
        Shape::Text { font_size, .. } => *font_size *= sy.abs(),
        Shape::Arrow { .. } | Shape::Freehand { .. } => {}
    }
    Annotation {
        shape,
        ..annotation.clone()
    }
}

/// Transformed selection for the current canvas pointer position.
pub fn apply_transform(state: &TransformState, current_point: Point, rect: &RenderedRect) -> Vec<Annotation> {
    if current_point == state.start_point || rect.width <= 0.0 || rect.height <= 0.0 {
        return state.initial_annotations.clone();
    }

    let initial = &state.initial_annotations;
    match state.action {
        TransformAction::Move => {
            let dx = (current_point.x - state.start_point.x) / rect.width;
            let dy = (current_point.y - state.start_point.y) / rect.height;
            initial.iter().map(|a| translate(a, dx, dy)).collect()
        }
        TransformAction::Rotate => {
            let pivot = state.pivot;
            let angle = (current_point.y - pivot.y).atan2(current_point.x - pivot.x)
                - (state.start_point.y - pivot.y).atan2(state.start_point.x - pivot.x);
            initial.iter().map(|a| rotate(a, pivot, angle, rect)).collect()
        }
        TransformAction::Scale(_) => {
            let (sx, sy) = scale_factors(state, current_point);
            initial.iter().map(|a| scale(a, state.pivot, sx, sy, rect)).collect()
        }
    }
}

/// Move gesture with alignment snapping.
///
/// `frame_annotations` are all annotations on the current frame; the
/// selection being moved is skipped. Non-move gestures pass through
/// [`apply_transform`] without guides.
pub fn move_with_snap(
    state: &TransformState,
    current_point: Point,
    frame_annotations: &[Annotation],
    rect: &RenderedRect,
    scale_y: f64,
    config: &EngineConfig,
) -> (Vec<Annotation>, Vec<AlignmentGuide>) {
    if state.action != TransformAction::Move {
        return (apply_transform(state, current_point, rect), Vec::new());
    }

    let others: Vec<Annotation> = frame_annotations
        .iter()
        .filter(|a| !state.contains(&a.id))
        .cloned()
        .collect();
    let proposed = state.initial_bounds.translate(
        current_point.x - state.start_point.x,
        current_point.y - state.start_point.y,
    );
    let snap = snap_selection(&proposed, &others, rect, scale_y, config);
    let corrected = Point::new(current_point.x + snap.offset.x, current_point.y + snap.offset.y);

    (apply_transform(state, corrected, rect), snap.guides)
}
