// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation list and drawing style panel.

use vidmark::models::annotation::Annotation;

/// Result of properties panel interaction.
pub enum PropertiesAction {
    None,
    SelectAnnotation(String),
    DeleteAnnotation(String),
}

/// Style applied to newly drawn annotations.
pub struct DrawStyle {
    pub color: egui::Color32,
    pub line_width: f32,
    pub font_size: f32,
    pub text: String,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            color: egui::Color32::from_rgb(255, 59, 48),
            line_width: 3.0,
            font_size: 36.0,
            text: "Note".to_string(),
        }
    }
}

impl DrawStyle {
    pub fn hex_color(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.color.r(), self.color.g(), self.color.b())
    }
}

/// Display the style controls and the annotations on the current frame.
pub fn show(
    ui: &mut egui::Ui,
    style: &mut DrawStyle,
    frame_annotations: &[Annotation],
    selected_ids: &[String],
) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    ui.heading("Style");
    ui.horizontal(|ui| {
        ui.label("Color");
        ui.color_edit_button_srgba(&mut style.color);
    });
    ui.add(egui::Slider::new(&mut style.line_width, 1.0..=20.0).text("Line width"));
    ui.add(egui::Slider::new(&mut style.font_size, 8.0..=120.0).text("Font size"));
    ui.horizontal(|ui| {
        ui.label("Text");
        ui.text_edit_singleline(&mut style.text);
    });

    ui.separator();
    ui.heading(format!("Frame annotations ({})", frame_annotations.len()));

    egui::ScrollArea::vertical().show(ui, |ui| {
        for annotation in frame_annotations {
            let is_selected = selected_ids.contains(&annotation.id);
            ui.horizontal(|ui| {
                let label = format!("{:?} {}", annotation.kind(), annotation.id);
                if ui.selectable_label(is_selected, label).clicked() {
                    action = PropertiesAction::SelectAnnotation(annotation.id.clone());
                }
                if ui.small_button("🗑").clicked() {
                    action = PropertiesAction::DeleteAnnotation(annotation.id.clone());
                }
            });
        }
    });

    action
}
