// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Alignment, snapping and equal-spacing guides for drag gestures.
//!
//! Everything here is a pure function of the proposed position and the
//! other objects on the current frame. Guides are recomputed from scratch
//! on every pointer move; nothing is remembered between moves.

use super::bounds::{get_annotation_bounding_box, BoundingBox};
use crate::config::EngineConfig;
use crate::models::annotation::{Annotation, Point};
use crate::util::geometry::RenderedRect;
use serde::{Deserialize, Serialize};

/// Slack below which two candidate snaps count as equally close.
const TIE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideOrientation {
    /// A line of constant x.
    Vertical,
    /// A line of constant y.
    Horizontal,
}

/// Tick marks and label of an equal-spacing guide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EqualSpacing {
    /// Tick positions along the guide.
    pub ticks: [f64; 2],
    /// Gap in canvas pixels, shown as the label.
    pub distance: f64,
}

/// Visual guide line in canvas space.
///
/// `position` is the constant coordinate; `start`/`end` span the other one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentGuide {
    pub orientation: GuideOrientation,
    pub position: f64,
    pub start: f64,
    pub end: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<EqualSpacing>,
}

/// Correction to apply to a proposed position, and the guides to draw.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SnapResult {
    /// Canvas-pixel offset to add to the proposed position.
    pub offset: Point,
    pub guides: Vec<AlignmentGuide>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn cross(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    fn min(self, b: &BoundingBox) -> f64 {
        match self {
            Axis::X => b.start.x,
            Axis::Y => b.start.y,
        }
    }

    fn max(self, b: &BoundingBox) -> f64 {
        match self {
            Axis::X => b.end.x,
            Axis::Y => b.end.y,
        }
    }

    fn mid(self, b: &BoundingBox) -> f64 {
        (self.min(b) + self.max(b)) / 2.0
    }

    fn extent(self, b: &BoundingBox) -> f64 {
        self.max(b) - self.min(b)
    }

    /// Guides marking a position on this axis run along the other one.
    fn orientation(self) -> GuideOrientation {
        match self {
            Axis::X => GuideOrientation::Vertical,
            Axis::Y => GuideOrientation::Horizontal,
        }
    }

    fn translate(self, b: &BoundingBox, delta: f64) -> BoundingBox {
        match self {
            Axis::X => b.translate(delta, 0.0),
            Axis::Y => b.translate(0.0, delta),
        }
    }
}

/// Candidate line on one axis with its span on the other axis.
#[derive(Debug, Clone, Copy)]
struct Line {
    position: f64,
    span: (f64, f64),
}

/// Centre first, then the two edges. Centre matches win ties.
fn lines(b: &BoundingBox, axis: Axis) -> [Line; 3] {
    let span = (axis.cross().min(b), axis.cross().max(b));
    [axis.mid(b), axis.min(b), axis.max(b)].map(|position| Line { position, span })
}

/// Closest target line to any of the proposed box's lines, within `threshold`.
fn find_alignment(axis: Axis, proposed: &BoundingBox, targets: &[BoundingBox], threshold: f64) -> Option<(f64, Line)> {
    let own = lines(proposed, axis);
    let mut best: Option<(f64, Line)> = None;

    for target in targets.iter().flat_map(|t| lines(t, axis)) {
        for line in &own {
            let delta = target.position - line.position;
            if delta.abs() > threshold {
                continue;
            }
            let closer = match best {
                Some((d, _)) => delta.abs() < d.abs() - TIE_EPSILON,
                None => true,
            };
            if closer {
                best = Some((delta, target));
            }
        }
    }
    best
}

/// Neighbours straddling the proposed box on one axis.
struct SpacingMatch {
    shift: f64,
    before: BoundingBox,
    after: BoundingBox,
}

/// Position that centres the proposed box between its nearest neighbours.
///
/// Only neighbours whose centre on the cross axis lies within `band` of the
/// proposed box's centre take part.
fn find_equal_spacing(
    axis: Axis,
    proposed: &BoundingBox,
    others: &[BoundingBox],
    band: f64,
    threshold: f64,
) -> Option<SpacingMatch> {
    let cross = axis.cross();
    let center = axis.mid(proposed);
    let row: Vec<&BoundingBox> = others
        .iter()
        .filter(|o| (cross.mid(o) - cross.mid(proposed)).abs() <= band)
        .collect();

    let before = row
        .iter()
        .filter(|o| axis.mid(o) < center)
        .max_by(|a, b| axis.max(a).total_cmp(&axis.max(b)))?;
    let after = row
        .iter()
        .filter(|o| axis.mid(o) > center)
        .min_by(|a, b| axis.min(a).total_cmp(&axis.min(b)))?;

    let room = axis.min(after) - axis.max(before) - axis.extent(proposed);
    if room < 0.0 {
        return None;
    }

    let target_min = axis.max(before) + room / 2.0;
    let shift = target_min - axis.min(proposed);
    (shift.abs() <= threshold).then(|| SpacingMatch {
        shift,
        before: **before,
        after: **after,
    })
}

fn spacing_guides(axis: Axis, placed: &BoundingBox, spacing: &SpacingMatch) -> [AlignmentGuide; 2] {
    let position = axis.cross().mid(placed);
    let gap = |start: f64, end: f64| AlignmentGuide {
        orientation: axis.cross().orientation(),
        position,
        start,
        end,
        spacing: Some(EqualSpacing {
            ticks: [start, end],
            distance: end - start,
        }),
    };
    [
        gap(axis.max(&spacing.before), axis.min(placed)),
        gap(axis.max(placed), axis.min(&spacing.after)),
    ]
}

fn alignment_guide(axis: Axis, placed: &BoundingBox, target: &Line) -> AlignmentGuide {
    let cross = axis.cross();
    AlignmentGuide {
        orientation: axis.orientation(),
        position: target.position,
        start: target.span.0.min(cross.min(placed)),
        end: target.span.1.max(cross.max(placed)),
        spacing: None,
    }
}

fn container_box(rect: &RenderedRect) -> BoundingBox {
    BoundingBox {
        start: Point::new(rect.x, rect.y),
        end: Point::new(rect.right(), rect.bottom()),
    }
}

/// Snap a proposed box against other boxes and the container.
///
/// Each axis snaps at most once: an equal-spacing match overrides an
/// alignment match on the same axis.
fn snap_box(
    proposed: &BoundingBox,
    others: &[BoundingBox],
    rect: &RenderedRect,
    bands: (f64, f64),
    threshold: f64,
) -> SnapResult {
    let mut targets = others.to_vec();
    targets.push(container_box(rect));

    let mut result = SnapResult::default();
    let mut placed = *proposed;
    let mut pending = Vec::new();

    for (axis, band) in [(Axis::X, bands.0), (Axis::Y, bands.1)] {
        let spacing = find_equal_spacing(axis, proposed, others, band, threshold);
        let alignment = find_alignment(axis, proposed, &targets, threshold);

        let shift = match (&spacing, &alignment) {
            (Some(s), _) => s.shift,
            (None, Some((delta, _))) => *delta,
            (None, None) => continue,
        };
        log::trace!("snap {:?} by {:.2}px (equal spacing: {})", axis, shift, spacing.is_some());

        placed = axis.translate(&placed, shift);
        match axis {
            Axis::X => result.offset.x = shift,
            Axis::Y => result.offset.y = shift,
        }
        pending.push((axis, spacing, alignment));
    }

    // Guide extents use the final box, after both axes have moved.
    for (axis, spacing, alignment) in pending {
        match (spacing, alignment) {
            (Some(s), _) => result.guides.extend(spacing_guides(axis, &placed, &s)),
            (None, Some((_, target))) => result.guides.push(alignment_guide(axis, &placed, &target)),
            (None, None) => {}
        }
    }
    result
}

/// Snap a dragged selection's proposed canvas box.
///
/// `others` are the other annotations on the current frame; the selection
/// itself must not be among them.
pub fn snap_selection(
    proposed: &BoundingBox,
    others: &[Annotation],
    rect: &RenderedRect,
    scale_y: f64,
    config: &EngineConfig,
) -> SnapResult {
    let boxes: Vec<BoundingBox> = others
        .iter()
        .filter_map(|a| get_annotation_bounding_box(a, rect, scale_y))
        .collect();
    let bands = (
        proposed.height() * config.spacing_band_ratio,
        proposed.width() * config.spacing_band_ratio,
    );
    snap_box(proposed, &boxes, rect, bands, config.snap_threshold)
}

/// Snap a dragged comment marker's proposed canvas position.
///
/// Markers are points, so same-row neighbours are picked with a fixed band.
pub fn snap_comment_marker(proposed: Point, other_markers: &[Point], rect: &RenderedRect, config: &EngineConfig) -> SnapResult {
    let as_box = |p: Point| BoundingBox { start: p, end: p };
    let boxes: Vec<BoundingBox> = other_markers.iter().map(|p| as_box(*p)).collect();
    let band = config.marker_spacing_band;
    snap_box(&as_box(proposed), &boxes, rect, (band, band), config.snap_threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::{BoxShape, Shape};
    use crate::util::geometry::canvas_to_normalized;

    fn rect() -> RenderedRect {
        RenderedRect::new(0.0, 0.0, 1000.0, 500.0)
    }

    /// 40x40 px square centred on a canvas point.
    fn square(id: &str, cx: f64, cy: f64) -> Annotation {
        let center = canvas_to_normalized(Point::new(cx, cy), &rect());
        Annotation::new(id, 0, Shape::Rectangle(BoxShape::new(center, 0.04, 0.08)))
    }

    fn square_box(cx: f64, cy: f64) -> BoundingBox {
        BoundingBox::from_corners(Point::new(cx - 20.0, cy - 20.0), Point::new(cx + 20.0, cy + 20.0))
    }

    fn vertical(guides: &[AlignmentGuide]) -> Vec<&AlignmentGuide> {
        guides
            .iter()
            .filter(|g| g.orientation == GuideOrientation::Vertical)
            .collect()
    }

    #[test]
    fn test_centre_snaps_to_neighbour() {
        let others = vec![square("b", 200.0, 150.0)];
        let result = snap_selection(&square_box(198.0, 150.0), &others, &rect(), 1.0, &EngineConfig::default());

        assert!((result.offset.x - 2.0).abs() < 1e-9);
        let v = vertical(&result.guides);
        assert_eq!(v.len(), 1);
        assert!((v[0].position - 200.0).abs() < 1e-9);
        assert!(v[0].spacing.is_none());
    }

    #[test]
    fn test_nothing_within_threshold() {
        let others = vec![square("b", 200.0, 400.0)];
        let result = snap_selection(&square_box(260.0, 150.0), &others, &rect(), 1.0, &EngineConfig::default());
        assert_eq!(result.offset, Point::new(0.0, 0.0));
        assert!(result.guides.is_empty());
    }

    #[test]
    fn test_container_edges_are_targets() {
        let result = snap_selection(&square_box(24.0, 250.0), &[], &rect(), 1.0, &EngineConfig::default());
        // Left edge at 4 snaps to the container's left edge at 0
        assert!((result.offset.x + 4.0).abs() < 1e-9);
        // Centre y already on the container centre
        assert_eq!(result.offset.y, 0.0);
        assert_eq!(result.guides.len(), 2);
    }

    #[test]
    fn test_closest_target_wins() {
        let others = vec![square("near", 203.0, 400.0), square("far", 205.0, 100.0)];
        let result = snap_selection(&square_box(201.0, 250.0), &others, &rect(), 1.0, &EngineConfig::default());
        assert!((result.offset.x - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_guide_spans_target_and_selection() {
        let others = vec![square("b", 200.0, 100.0)];
        let result = snap_selection(&square_box(203.0, 300.0), &others, &rect(), 1.0, &EngineConfig::default());
        let v = vertical(&result.guides);
        assert_eq!(v.len(), 1);
        assert!((v[0].start - 80.0).abs() < 1e-9);
        assert!((v[0].end - 320.0).abs() < 1e-9);
    }

    #[test]
    fn test_equal_spacing_between_neighbours() {
        let others = vec![square("left", 100.0, 150.0), square("right", 500.0, 150.0)];
        let result = snap_selection(&square_box(303.0, 150.0), &others, &rect(), 1.0, &EngineConfig::default());

        assert!((result.offset.x + 3.0).abs() < 1e-9);
        let spaced: Vec<_> = result.guides.iter().filter(|g| g.spacing.is_some()).collect();
        assert_eq!(spaced.len(), 2);
        for guide in spaced {
            assert_eq!(guide.orientation, GuideOrientation::Horizontal);
            assert!((guide.spacing.unwrap().distance - 160.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_equal_spacing_overrides_alignment_on_same_axis() {
        // "stray" sits on another row, so it is an alignment target only
        let others = vec![
            square("left", 100.0, 150.0),
            square("right", 500.0, 150.0),
            square("stray", 305.0, 400.0),
        ];
        let result = snap_selection(&square_box(303.0, 150.0), &others, &rect(), 1.0, &EngineConfig::default());

        assert!((result.offset.x + 3.0).abs() < 1e-9);
        assert!(vertical(&result.guides).is_empty());
        assert_eq!(result.guides.iter().filter(|g| g.spacing.is_some()).count(), 2);
    }

    #[test]
    fn test_equal_spacing_in_a_column() {
        let others = vec![square("top", 300.0, 60.0), square("bottom", 300.0, 420.0)];
        let result = snap_selection(&square_box(300.0, 243.0), &others, &rect(), 1.0, &EngineConfig::default());

        // Gaps 80..220 and 260..400
        assert!((result.offset.y + 3.0).abs() < 1e-9);
        assert_eq!(result.offset.x, 0.0);
        let spaced: Vec<_> = result.guides.iter().filter(|g| g.spacing.is_some()).collect();
        assert_eq!(spaced.len(), 2);
        for guide in &spaced {
            assert_eq!(guide.orientation, GuideOrientation::Vertical);
            assert!((guide.position - 300.0).abs() < 1e-9);
            assert!((guide.spacing.unwrap().distance - 140.0).abs() < 1e-9);
        }
        assert!(result
            .guides
            .iter()
            .all(|g| g.orientation == GuideOrientation::Vertical));
    }

    #[test]
    fn test_equal_spacing_ignores_other_rows() {
        let others = vec![square("left", 100.0, 150.0), square("right", 500.0, 400.0)];
        let result = snap_selection(&square_box(303.0, 150.0), &others, &rect(), 1.0, &EngineConfig::default());
        assert!(result.guides.iter().all(|g| g.spacing.is_none()));
        assert_eq!(result.offset.x, 0.0);
    }

    #[test]
    fn test_comment_marker_alignment() {
        let markers = [Point::new(300.0, 100.0)];
        let result = snap_comment_marker(Point::new(304.0, 420.0), &markers, &rect(), &EngineConfig::default());
        assert!((result.offset.x + 4.0).abs() < 1e-9);
        assert_eq!(vertical(&result.guides).len(), 1);
    }

    #[test]
    fn test_comment_marker_equal_spacing_uses_fixed_band() {
        let markers = [Point::new(100.0, 200.0), Point::new(300.0, 208.0)];
        let result = snap_comment_marker(Point::new(197.0, 203.0), &markers, &rect(), &EngineConfig::default());
        assert!((result.offset.x - 3.0).abs() < 1e-9);
        assert_eq!(result.guides.iter().filter(|g| g.spacing.is_some()).count(), 2);

        let far_row = [Point::new(100.0, 200.0), Point::new(300.0, 230.0)];
        let result = snap_comment_marker(Point::new(197.0, 203.0), &far_row, &rect(), &EngineConfig::default());
        assert!(result.guides.iter().all(|g| g.spacing.is_none()));
    }
}
