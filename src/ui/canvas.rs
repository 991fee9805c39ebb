// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Review canvas: poster frame, annotations, selection handles and guides.
//!
//! The canvas only paints and translates pointer input into canvas-local
//! events. All gesture state lives in the app.

use vidmark::config::EngineConfig;
use vidmark::engine::{
    get_annotation_points, get_annotations_bounding_box, handle_rects, AlignmentGuide, BoundingBox, GuideOrientation,
    Handle,
};
use vidmark::models::{annotation::Annotation, annotation::Point, annotation::Shape, project::CommentMarker};
use vidmark::util::geometry::{get_rendered_rect, normalized_to_canvas, RenderedRect, Size};

/// Radius of a comment marker pin, in pixels.
pub const MARKER_RADIUS: f32 = 8.0;

const GUIDE_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 0, 170);
const SELECTION_COLOR: egui::Color32 = egui::Color32::from_rgb(80, 160, 255);

/// Pointer events in canvas-local pixels.
pub enum CanvasAction {
    None,
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
}

/// Everything the canvas needs to paint one frame.
pub struct CanvasView<'a> {
    pub video_size: Size,
    pub poster: Option<&'a egui::TextureHandle>,
    /// Annotations on the current frame, with any in-flight gesture applied.
    pub annotations: &'a [Annotation],
    pub selected: &'a [Annotation],
    pub in_progress: Option<&'a Annotation>,
    pub comments: &'a [CommentMarker],
    pub guides: &'a [AlignmentGuide],
    /// Marquee in canvas pixels.
    pub marquee: Option<BoundingBox>,
    pub config: &'a EngineConfig,
}

/// Canvas geometry for the current layout, handed back to the app.
#[derive(Debug, Clone, Copy)]
pub struct CanvasLayout {
    pub rect: RenderedRect,
    pub scale_y: f64,
}

/// Display the canvas and report pointer interaction.
pub fn show(ui: &mut egui::Ui, view: &CanvasView) -> (CanvasLayout, CanvasAction) {
    let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
    let area = response.rect;
    painter.rect_filled(area, 0.0, egui::Color32::from_gray(40));

    let rect = get_rendered_rect(Size::new(area.width() as f64, area.height() as f64), view.video_size);
    let scale_y = if view.video_size.height > 0.0 {
        rect.height / view.video_size.height
    } else {
        1.0
    };
    let layout = CanvasLayout { rect, scale_y };
    let to_screen = |p: Point| area.min + egui::vec2(p.x as f32, p.y as f32);

    let video_rect = egui::Rect::from_min_size(
        to_screen(Point::new(rect.x, rect.y)),
        egui::vec2(rect.width as f32, rect.height as f32),
    );
    match view.poster {
        Some(texture) => {
            painter.image(
                texture.id(),
                video_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
        None => {
            painter.rect_filled(video_rect, 0.0, egui::Color32::from_gray(20));
        }
    }

    let painter = painter.with_clip_rect(area);
    for annotation in view.annotations {
        draw_annotation(&painter, annotation, &layout, &to_screen);
    }
    if let Some(annotation) = view.in_progress {
        draw_annotation(&painter, annotation, &layout, &to_screen);
    }
    for marker in view.comments {
        let center = to_screen(normalized_to_canvas(marker.position, &rect));
        painter.circle_filled(center, MARKER_RADIUS, egui::Color32::from_rgb(255, 204, 0));
        painter.circle_stroke(center, MARKER_RADIUS, egui::Stroke::new(1.0, egui::Color32::BLACK));
    }

    draw_selection(&painter, view, &layout, &to_screen);
    for guide in view.guides {
        draw_guide(&painter, guide, &to_screen);
    }
    if let Some(marquee) = view.marquee {
        let r = egui::Rect::from_min_max(to_screen(marquee.start), to_screen(marquee.end));
        painter.rect_filled(r, 0.0, SELECTION_COLOR.gamma_multiply(0.15));
        painter.rect_stroke(r, 0.0, egui::Stroke::new(1.0, SELECTION_COLOR));
    }

    let local = |pos: egui::Pos2| Point::new((pos.x - area.min.x) as f64, (pos.y - area.min.y) as f64);
    let (pressed, down, released, moving, pos) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_down(),
            i.pointer.primary_released(),
            i.pointer.is_moving(),
            i.pointer.interact_pos(),
        )
    });

    let action = match pos {
        Some(pos) if pressed && response.hovered() => CanvasAction::PointerDown(local(pos)),
        Some(pos) if released => CanvasAction::PointerUp(local(pos)),
        Some(pos) if down && moving => CanvasAction::PointerMove(local(pos)),
        _ => CanvasAction::None,
    };

    (layout, action)
}

/// Parse `#rrggbb` colors, falling back to red.
fn parse_color(hex: &str) -> egui::Color32 {
    let hex = hex.trim_start_matches('#');
    let channel = |i: usize| hex.get(i..i + 2).and_then(|c| u8::from_str_radix(c, 16).ok());
    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) if hex.len() == 6 => egui::Color32::from_rgb(r, g, b),
        _ => egui::Color32::from_rgb(255, 59, 48),
    }
}

fn draw_annotation(
    painter: &egui::Painter,
    annotation: &Annotation,
    layout: &CanvasLayout,
    to_screen: &impl Fn(Point) -> egui::Pos2,
) {
    let color = parse_color(&annotation.color);
    let stroke = egui::Stroke::new(annotation.line_width as f32, color);
    let rect = &layout.rect;

    match &annotation.shape {
        Shape::Rectangle(b) => {
            let corners: Vec<egui::Pos2> = get_annotation_points(annotation, rect, layout.scale_y)
                .into_iter()
                .map(to_screen)
                .collect();
            if let Some(opacity) = b.fill_opacity {
                painter.add(egui::Shape::convex_polygon(
                    corners.clone(),
                    color.gamma_multiply(opacity as f32),
                    egui::Stroke::NONE,
                ));
            }
            painter.add(egui::Shape::closed_line(corners, stroke));
        }
        Shape::Ellipse(b) => {
            let center = normalized_to_canvas(b.center, rect);
            let (rx, ry) = (b.width * rect.width / 2.0, b.height * rect.height / 2.0);
            let (sin, cos) = b.rotation.sin_cos();
            let outline: Vec<egui::Pos2> = (0..48)
                .map(|i| {
                    let t = i as f64 / 48.0 * std::f64::consts::TAU;
                    let (dx, dy) = (rx * t.cos(), ry * t.sin());
                    to_screen(Point::new(center.x + dx * cos - dy * sin, center.y + dx * sin + dy * cos))
                })
                .collect();
            painter.add(egui::Shape::closed_line(outline, stroke));
        }
        Shape::Image(_) | Shape::Video(_) => {
            let corners: Vec<egui::Pos2> = get_annotation_points(annotation, rect, layout.scale_y)
                .into_iter()
                .map(to_screen)
                .collect();
            painter.line_segment([corners[0], corners[2]], egui::Stroke::new(1.0, color));
            painter.line_segment([corners[1], corners[3]], egui::Stroke::new(1.0, color));
            painter.add(egui::Shape::closed_line(corners, stroke));
        }
        Shape::Arrow { start, end } => {
            let a = to_screen(normalized_to_canvas(*start, rect));
            let b = to_screen(normalized_to_canvas(*end, rect));
            painter.line_segment([a, b], stroke);
            let dir = (b - a).normalized();
            let head = 12.0 + annotation.line_width as f32 * 2.0;
            for side in [-1.0f32, 1.0] {
                let wing = egui::emath::Rot2::from_angle(side * 0.5) * -dir * head;
                painter.line_segment([b, b + wing], stroke);
            }
        }
        Shape::Freehand { points } => {
            let path: Vec<egui::Pos2> = points.iter().map(|p| to_screen(normalized_to_canvas(*p, rect))).collect();
            painter.add(egui::Shape::line(path, stroke));
        }
        Shape::Text {
            position,
            text,
            font_size,
        } => {
            painter.text(
                to_screen(normalized_to_canvas(*position, rect)),
                egui::Align2::LEFT_TOP,
                text,
                egui::FontId::proportional((font_size * layout.scale_y) as f32),
                color,
            );
        }
    }
}

fn draw_selection(
    painter: &egui::Painter,
    view: &CanvasView,
    layout: &CanvasLayout,
    to_screen: &impl Fn(Point) -> egui::Pos2,
) {
    let Some(bbox) = get_annotations_bounding_box(view.selected, &layout.rect, layout.scale_y) else {
        return;
    };
    let outline = egui::Rect::from_min_max(to_screen(bbox.start), to_screen(bbox.end));
    painter.rect_stroke(outline, 0.0, egui::Stroke::new(1.0, SELECTION_COLOR));

    for handle in handle_rects(view.selected, &layout.rect, layout.scale_y, view.config) {
        let r = egui::Rect::from_min_max(to_screen(handle.bounds.start), to_screen(handle.bounds.end));
        if handle.handle == Handle::Rotate {
            painter.line_segment(
                [r.center_bottom(), egui::pos2(outline.center().x, outline.top())],
                egui::Stroke::new(1.0, SELECTION_COLOR),
            );
            painter.circle_filled(r.center(), r.width() / 2.0, egui::Color32::WHITE);
            painter.circle_stroke(r.center(), r.width() / 2.0, egui::Stroke::new(1.0, SELECTION_COLOR));
        } else {
            painter.rect_filled(r, 0.0, egui::Color32::WHITE);
            painter.rect_stroke(r, 0.0, egui::Stroke::new(1.0, SELECTION_COLOR));
        }
    }
}

fn draw_guide(painter: &egui::Painter, guide: &AlignmentGuide, to_screen: &impl Fn(Point) -> egui::Pos2) {
    let at = |along: f64| match guide.orientation {
        GuideOrientation::Vertical => to_screen(Point::new(guide.position, along)),
        GuideOrientation::Horizontal => to_screen(Point::new(along, guide.position)),
    };
    let stroke = egui::Stroke::new(1.0, GUIDE_COLOR);
    painter.line_segment([at(guide.start), at(guide.end)], stroke);

    let Some(spacing) = guide.spacing else {
        return;
    };
    let tick = match guide.orientation {
        GuideOrientation::Vertical => egui::vec2(4.0, 0.0),
        GuideOrientation::Horizontal => egui::vec2(0.0, 4.0),
    };
    for t in spacing.ticks {
        let p = at(t);
        painter.line_segment([p - tick, p + tick], stroke);
    }
    let middle = at((spacing.ticks[0] + spacing.ticks[1]) / 2.0);
    painter.text(
        middle - tick * 2.0,
        egui::Align2::CENTER_BOTTOM,
        format!("{:.0}", spacing.distance),
        egui::FontId::monospace(10.0),
        GUIDE_COLOR,
    );
}
