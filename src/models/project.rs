// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Review scene state.
//!
//! A scene is one video revision under review: its intrinsic frame size,
//! the annotations drawn on its frames and the positioned comment markers.

use super::annotation::{Annotation, Point};
use crate::util::geometry::Size;
use serde::{Deserialize, Serialize};

/// A comment pinned to a position on a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentMarker {
    pub id: String,
    pub frame: u32,
    /// Normalized position.
    pub position: Point,
}

/// Complete scene data for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewScene {
    pub media_file: String,
    pub frame_width: u32,
    pub frame_height: u32,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub comments: Vec<CommentMarker>,
}

impl ReviewScene {
    /// Create a new scene with the given media file and dimensions.
    pub fn new(media_file: String, frame_width: u32, frame_height: u32) -> Self {
        Self {
            media_file,
            frame_width,
            frame_height,
            annotations: Vec::new(),
            comments: Vec::new(),
        }
    }

    pub fn video_size(&self) -> Size {
        Size::new(self.frame_width as f64, self.frame_height as f64)
    }

    /// Annotations drawn on `frame`, in drawing order.
    pub fn annotations_on_frame(&self, frame: u32) -> Vec<Annotation> {
        self.annotations.iter().filter(|a| a.frame == frame).cloned().collect()
    }

    pub fn comments_on_frame(&self, frame: u32) -> impl Iterator<Item = &CommentMarker> {
        self.comments.iter().filter(move |c| c.frame == frame)
    }

    /// Replace annotations by id with the committed results of a gesture.
    pub fn commit_annotations(&mut self, updated: &[Annotation]) {
        for annotation in updated {
            if let Some(existing) = self.annotations.iter_mut().find(|a| a.id == annotation.id) {
                *existing = annotation.clone();
            }
        }
        log::debug!("Committed {} annotation(s)", updated.len());
    }

    /// Last frame index that carries an annotation or comment.
    pub fn last_annotated_frame(&self) -> Option<u32> {
        self.annotations
            .iter()
            .map(|a| a.frame)
            .chain(self.comments.iter().map(|c| c.frame))
            .max()
    }
}
