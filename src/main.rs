// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! VIDMARK - Video Review Canvas
//!
//! A desktop viewer for drawing and arranging review annotations over a
//! video frame, built on the vidmark geometry engine.

mod app;
mod ui;

use anyhow::Result;
use app::ReviewApp;
use vidmark::EngineConfig;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = EngineConfig::from_env();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("VIDMARK - Video Review Canvas"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "VIDMARK",
        options,
        Box::new(move |_cc| Ok(Box::new(ReviewApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
