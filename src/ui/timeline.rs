// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Frame stepper.
//!
//! Annotations belong to a single frame; this control picks the frame
//! whose annotations are shown and edited.

/// Display the frame controls. Returns true when the frame changed.
pub fn show(ui: &mut egui::Ui, frame: &mut u32, last_frame: u32) -> bool {
    let before = *frame;
    ui.horizontal(|ui| {
        if ui.button("⏮").clicked() {
            *frame = 0;
        }
        if ui.button("◀").clicked() {
            *frame = frame.saturating_sub(1);
        }
        ui.add(egui::DragValue::new(frame).range(0..=last_frame).prefix("frame "));
        if ui.button("▶").clicked() {
            *frame = (*frame + 1).min(last_frame);
        }
        ui.label(egui::RichText::new(format!("of {}", last_frame)).weak());
    });
    *frame != before
}
