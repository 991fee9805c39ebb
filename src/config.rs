// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Tunable constants for hit testing, handles and snapping.
//!
//! Every field has a default, so a config file only needs the values it
//! wants to override.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Glyph-width heuristic used for text bounding boxes (`len * font_size * factor`).
pub const TEXT_WIDTH_FACTOR: f64 = 0.6;

/// Floor for stroke hit tolerance on arrows and freehand paths, in pixels.
pub const MIN_HIT_TOLERANCE: f64 = 5.0;

/// Distance in pixels under which a dragged edge or centre snaps to a target.
pub const SNAP_THRESHOLD: f64 = 6.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_snap_threshold")]
    pub snap_threshold: f64,
    /// Side of the square hit area of each corner handle, in pixels.
    #[serde(default = "default_handle_size")]
    pub handle_size: f64,
    /// Distance of the rotate handle above the selection's top edge.
    #[serde(default = "default_rotate_handle_offset")]
    pub rotate_handle_offset: f64,
    /// Fraction of the dragged box's extent used to pick same-row neighbours.
    #[serde(default = "default_spacing_band_ratio")]
    pub spacing_band_ratio: f64,
    /// Same-row band for comment markers, in pixels.
    #[serde(default = "default_marker_spacing_band")]
    pub marker_spacing_band: f64,
}

// Default value functions
fn default_snap_threshold() -> f64 {
    SNAP_THRESHOLD
}

fn default_handle_size() -> f64 {
    8.0
}

fn default_rotate_handle_offset() -> f64 {
    25.0
}

fn default_spacing_band_ratio() -> f64 {
    0.3
}

fn default_marker_spacing_band() -> f64 {
    10.0
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            snap_threshold: default_snap_threshold(),
            handle_size: default_handle_size(),
            rotate_handle_offset: default_rotate_handle_offset(),
            spacing_band_ratio: default_spacing_band_ratio(),
            marker_spacing_band: default_marker_spacing_band(),
        }
    }
}

impl EngineConfig {
    /// Parse a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config = serde_json::from_str(json).context("Invalid engine config")?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Load from the path in `VIDMARK_CONFIG`, falling back to defaults.
    pub fn from_env() -> Self {
        match std::env::var_os("VIDMARK_CONFIG") {
            Some(path) => match Self::load(Path::new(&path)) {
                Ok(config) => {
                    log::info!("Loaded engine config from {}", Path::new(&path).display());
                    config
                }
                Err(e) => {
                    log::warn!("{:#}; using defaults", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}
