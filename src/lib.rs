// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! VIDMARK - video review canvas engine
//!
//! Geometry for annotations drawn over letterboxed video frames: mapping
//! between canvas pixels and normalized coordinates, hit testing, marquee
//! selection, move/rotate/scale gestures and alignment guides.

pub mod config;
pub mod engine;
pub mod io;
pub mod models;
pub mod util;

pub use config::EngineConfig;
pub use models::annotation::{Annotation, AnnotationKind, BoxShape, Point, Shape};
pub use util::geometry::{RenderedRect, Size};
