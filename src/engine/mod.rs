// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Canvas geometry engine.
//!
//! Pure functions over annotation records and the rendered video rect:
//! outline points, bounding boxes, hit testing, transform gestures and
//! alignment snapping.

pub mod bounds;
pub mod hit_test;
pub mod shapes;
pub mod snapping;
pub mod transform;

pub use bounds::{get_annotation_bounding_box, get_annotations_bounding_box, get_axis_aligned_bounding_box, BoundingBox};
pub use hit_test::{
    find_annotation_at, get_handle_under_point, handle_rects, is_annotation_in_marquee, is_point_in_annotation, Handle,
    HandleRect,
};
pub use shapes::get_annotation_points;
pub use snapping::{snap_comment_marker, snap_selection, AlignmentGuide, EqualSpacing, GuideOrientation, SnapResult};
pub use transform::{apply_transform, move_with_snap, start_transform, Corner, TransformAction, TransformState};
