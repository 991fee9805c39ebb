// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Poster frame loading.
//!
//! The viewer shows a still frame behind the annotations. Its pixel size
//! stands in for the video's intrinsic dimensions when fitting the
//! rendered rect.

use anyhow::{Context, Result};
use std::path::Path;

/// Decoded RGBA poster frame.
pub struct PosterFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Load an image file as an RGBA poster frame.
pub fn load_poster_frame(path: &Path) -> Result<PosterFrame> {
    let img = image::open(path).with_context(|| format!("Failed to open image {}", path.display()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::info!("Loaded poster frame {} ({}x{})", path.display(), width, height);

    Ok(PosterFrame {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}
