// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar and tool selection UI.
//!
//! This module provides the toolbar interface for selecting drawing
//! tools for the review canvas.

use crate::app::Tool;

const TOOLS: [(Tool, &str); 7] = [
    (Tool::Select, "⬆ Select"),
    (Tool::Rectangle, "▭ Rectangle"),
    (Tool::Ellipse, "◯ Ellipse"),
    (Tool::Arrow, "➚ Arrow"),
    (Tool::Freehand, "✏ Freehand"),
    (Tool::Text, "T Text"),
    (Tool::Comment, "💬 Comment"),
];

/// Display the toolbar with tool selection buttons.
pub fn show(ui: &mut egui::Ui, current_tool: &mut Tool) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Tools:");

        ui.separator();

        for (tool, label) in TOOLS {
            if ui.selectable_label(*current_tool == tool, label).clicked() {
                *current_tool = tool;
            }
        }

        ui.separator();

        // Tool description
        let tool_text = match current_tool {
            Tool::Select => "Click or drag a marquee to select; drag handles to scale, rotate or move (Shift locks aspect)",
            Tool::Rectangle | Tool::Ellipse => "Drag to draw from corner to corner",
            Tool::Arrow => "Drag from tail to head",
            Tool::Freehand => "Drag to sketch a stroke",
            Tool::Text => "Click to place the text from the properties panel",
            Tool::Comment => "Click to pin a comment marker",
        };

        ui.label(egui::RichText::new(tool_text).italics().weak());
    });
}
