// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Review scene import.
//!
//! This module reads review scenes in YAML and JSON formats so the viewer
//! can be pointed at a fixture without any backend.

use crate::models::project::ReviewScene;
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Parse a scene from a YAML document.
pub fn parse_yaml(yaml: &str) -> Result<ReviewScene> {
    let data = serde_yaml::from_str(yaml)?;
    Ok(data)
}

/// Parse a scene from a JSON document.
pub fn parse_json(json: &str) -> Result<ReviewScene> {
    let data = serde_json::from_str(json)?;
    Ok(data)
}

/// Import a scene, picking the format from the file extension.
pub fn import_scene(path: &Path) -> Result<ReviewScene> {
    let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let extension = path.extension().and_then(|s| s.to_str());
    let scene = match extension {
        Some("yaml") | Some("yml") => parse_yaml(&text),
        Some("json") => parse_json(&text),
        _ => bail!("Unsupported file extension: {:?}", extension),
    }
    .with_context(|| format!("Failed to parse {}", path.display()))?;

    log::info!("Imported {} annotations from {}", scene.annotations.len(), path.display());
    Ok(scene)
}
