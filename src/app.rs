// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the review viewer: it owns the scene, the current
//! frame and selection, and runs pointer gestures through the geometry
//! engine. Each gesture is a short-lived value created on pointer-down and
//! consumed on pointer-up.

use crate::ui::canvas::{self, CanvasAction, CanvasLayout, CanvasView, MARKER_RADIUS};
use crate::ui::{properties, timeline, toolbar};
use std::sync::mpsc::{channel, Receiver};
use vidmark::config::EngineConfig;
use vidmark::engine::{
    find_annotation_at, get_handle_under_point, is_annotation_in_marquee, move_with_snap, snap_comment_marker,
    start_transform, AlignmentGuide, BoundingBox, TransformAction, TransformState,
};
use vidmark::io::media::PosterFrame;
use vidmark::models::{
    annotation::{Annotation, BoxShape, Point, Shape},
    project::{CommentMarker, ReviewScene},
};
use vidmark::util::geometry::{canvas_to_normalized, normalized_to_canvas};

/// Marquees smaller than this (in pixels) count as a click on empty space.
const MIN_MARQUEE: f64 = 3.0;
/// Shapes smaller than this (in pixels) are dropped when drawing ends.
const MIN_SHAPE: f64 = 3.0;
/// Spacing between recorded freehand points, in pixels.
const FREEHAND_STEP: f64 = 2.0;
const HISTORY_LIMIT: usize = 50;

/// History system for undo/redo functionality.
struct History<T> {
    /// Undo stack (past states)
    undo_stack: Vec<T>,
    /// Redo stack (future states after undo)
    redo_stack: Vec<T>,
    max_size: usize,
}

impl<T> History<T> {
    fn new(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size,
        }
    }

    /// Save current state before making a change
    fn push(&mut self, state: T) {
        self.undo_stack.push(state);
        if self.undo_stack.len() > self.max_size {
            self.undo_stack.remove(0);
        }
        // Clear redo stack when new action is performed
        self.redo_stack.clear();
    }

    fn undo(&mut self, current: T) -> Option<T> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    fn redo(&mut self, current: T) -> Option<T> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

/// Annotations and comments at one point in time.
#[derive(Clone)]
struct Snapshot {
    annotations: Vec<Annotation>,
    comments: Vec<CommentMarker>,
}

/// Current drawing tool selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Select,
    Rectangle,
    Ellipse,
    Arrow,
    Freehand,
    Text,
    Comment,
}

/// Pointer gesture in progress.
enum Gesture {
    Transform(TransformState),
    /// Canvas-space corners of the marquee.
    Marquee { origin: Point, current: Point },
    /// Normalized point where drawing started.
    Draw { origin: Point },
    Marker {
        id: String,
        /// Pointer at drag start, canvas pixels.
        start: Point,
        /// Marker position at drag start, canvas pixels.
        initial: Point,
        /// Normalized position at drag start, restored on cancel.
        original: Point,
    },
}

/// Result of background loading.
struct LoadedData {
    poster: Option<PosterFrame>,
    scene: ReviewScene,
}

/// Main application state.
pub struct ReviewApp {
    current_tool: Tool,
    scene: ReviewScene,
    current_frame: u32,
    /// Ids of selected annotations on the current frame.
    selected: Vec<String>,
    poster_texture: Option<egui::TextureHandle>,
    in_progress: Option<Annotation>,
    gesture: Option<Gesture>,
    /// Live output of the transform gesture, replacing stored annotations by id.
    preview: Vec<Annotation>,
    guides: Vec<AlignmentGuide>,
    style: properties::DrawStyle,
    history: History<Snapshot>,
    loader: Option<Receiver<Result<LoadedData, String>>>,
    loading_message: Option<String>,
    next_id: usize,
    config: EngineConfig,
}

impl ReviewApp {
    /// Create a viewer with an empty 1080p scene.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            current_tool: Tool::Select,
            scene: ReviewScene::new(String::new(), 1920, 1080),
            current_frame: 0,
            selected: Vec::new(),
            poster_texture: None,
            in_progress: None,
            gesture: None,
            preview: Vec::new(),
            guides: Vec::new(),
            style: properties::DrawStyle::default(),
            history: History::new(HISTORY_LIMIT),
            loader: None,
            loading_message: None,
            next_id: 0,
            config,
        }
    }

    fn new_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            annotations: self.scene.annotations.clone(),
            comments: self.scene.comments.clone(),
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.scene.annotations = snapshot.annotations;
        self.scene.comments = snapshot.comments;
        self.selected.clear();
    }

    /// Save the scene to history before making a change
    fn save_to_history(&mut self) {
        let snapshot = self.snapshot();
        self.history.push(snapshot);
    }

    fn undo(&mut self) {
        if self.gesture.is_some() {
            return;
        }
        let current = self.snapshot();
        if let Some(previous) = self.history.undo(current) {
            self.restore(previous);
            log::info!("Undo");
        }
    }

    fn redo(&mut self) {
        if self.gesture.is_some() {
            return;
        }
        let current = self.snapshot();
        if let Some(next) = self.history.redo(current) {
            self.restore(next);
            log::info!("Redo");
        }
    }

    /// Annotations on the current frame with the live gesture output applied.
    fn frame_annotations(&self) -> Vec<Annotation> {
        self.scene
            .annotations_on_frame(self.current_frame)
            .into_iter()
            .map(|a| match self.preview.iter().find(|p| p.id == a.id) {
                Some(p) => p.clone(),
                None => a,
            })
            .collect()
    }

    fn selected_annotations(&self) -> Vec<Annotation> {
        self.frame_annotations()
            .into_iter()
            .filter(|a| self.selected.contains(&a.id))
            .collect()
    }

    fn delete_selected(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        self.save_to_history();
        let selected = std::mem::take(&mut self.selected);
        self.scene.annotations.retain(|a| !selected.contains(&a.id));
        log::info!("Deleted {} annotation(s), total: {}", selected.len(), self.scene.annotations.len());
    }

    fn delete_annotation(&mut self, id: &str) {
        self.save_to_history();
        self.scene.annotations.retain(|a| a.id != id);
        self.selected.retain(|s| s != id);
        log::info!("Deleted annotation {}, total: {}", id, self.scene.annotations.len());
    }

    fn set_frame(&mut self, frame: u32) {
        self.cancel_gesture();
        self.current_frame = frame;
        self.selected.clear();
    }

    /// Abandon the gesture in progress without committing anything.
    fn cancel_gesture(&mut self) {
        if let Some(Gesture::Marker { id, original, .. }) = &self.gesture {
            if let Some(marker) = self.scene.comments.iter_mut().find(|c| &c.id == id) {
                marker.position = *original;
            }
        }
        if self.gesture.take().is_some() {
            log::debug!("Gesture cancelled");
        }
        self.preview.clear();
        self.guides.clear();
        self.in_progress = None;
    }

    fn begin_transform(&mut self, action: TransformAction, selection: &[Annotation], point: Point, layout: &CanvasLayout) {
        if let Some(state) = start_transform(action, selection, point, &layout.rect, layout.scale_y) {
            self.gesture = Some(Gesture::Transform(state));
        }
    }

    fn marker_at(&self, point: Point, layout: &CanvasLayout) -> Option<&CommentMarker> {
        let radius = MARKER_RADIUS as f64;
        self.scene
            .comments_on_frame(self.current_frame)
            .filter(|c| normalized_to_canvas(c.position, &layout.rect).distance(&point) <= radius)
            .last()
    }

    fn handle_pointer_down(&mut self, point: Point, layout: &CanvasLayout, shift: bool) {
        let rect = layout.rect;
        let normalized = canvas_to_normalized(point, &rect);

        match self.current_tool {
            Tool::Select => {
                let selection = self.selected_annotations();
                if let Some(handle) = get_handle_under_point(point, &selection, &rect, layout.scale_y, &self.config) {
                    self.begin_transform(handle.into(), &selection, point, layout);
                    return;
                }

                if let Some(marker) = self.marker_at(point, layout) {
                    let gesture = Gesture::Marker {
                        id: marker.id.clone(),
                        start: point,
                        initial: normalized_to_canvas(marker.position, &rect),
                        original: marker.position,
                    };
                    self.gesture = Some(gesture);
                    return;
                }

                let frame_annotations = self.frame_annotations();
                let hit = if rect.contains(&point) {
                    find_annotation_at(normalized, &frame_annotations, self.current_frame, &rect, layout.scale_y)
                } else {
                    None
                };

                match hit {
                    Some(idx) => {
                        let id = frame_annotations[idx].id.clone();
                        if shift {
                            if !self.selected.contains(&id) {
                                self.selected.push(id);
                            }
                        } else {
                            self.selected = vec![id];
                        }
                        let selection = self.selected_annotations();
                        self.begin_transform(TransformAction::Move, &selection, point, layout);
                    }
                    None => {
                        if !shift {
                            self.selected.clear();
                        }
                        self.gesture = Some(Gesture::Marquee {
                            origin: point,
                            current: point,
                        });
                    }
                }
            }
            Tool::Comment => {
                self.save_to_history();
                let id = self.new_id("comment");
                self.scene.comments.push(CommentMarker {
                    id,
                    frame: self.current_frame,
                    position: normalized,
                });
            }
            Tool::Text => {
                if self.style.text.trim().is_empty() {
                    return;
                }
                let id = self.new_id("text");
                let annotation = Annotation::new(
                    id.clone(),
                    self.current_frame,
                    Shape::Text {
                        position: normalized,
                        text: self.style.text.clone(),
                        font_size: self.style.font_size as f64,
                    },
                )
                .with_color(self.style.hex_color());
                self.save_to_history();
                self.scene.annotations.push(annotation);
                self.selected = vec![id];
            }
            Tool::Rectangle | Tool::Ellipse | Tool::Arrow | Tool::Freehand => {
                let shape = match self.current_tool {
                    Tool::Rectangle => Shape::Rectangle(BoxShape::new(normalized, 0.0, 0.0)),
                    Tool::Ellipse => Shape::Ellipse(BoxShape::new(normalized, 0.0, 0.0)),
                    Tool::Arrow => Shape::Arrow {
                        start: normalized,
                        end: normalized,
                    },
                    _ => Shape::Freehand {
                        points: vec![normalized],
                    },
                };
                let id = self.new_id("shape");
                self.in_progress = Some(
                    Annotation::new(id, self.current_frame, shape)
                        .with_color(self.style.hex_color())
                        .with_line_width(self.style.line_width as f64),
                );
                self.gesture = Some(Gesture::Draw { origin: normalized });
            }
        }
    }

    fn handle_pointer_move(&mut self, point: Point, layout: &CanvasLayout, shift: bool) {
        let rect = layout.rect;
        let Some(gesture) = self.gesture.take() else {
            return;
        };

        let gesture = match gesture {
            Gesture::Transform(state) => {
                let state = state.with_preserve_aspect_ratio(shift);
                let frame_annotations = self.scene.annotations_on_frame(self.current_frame);
                let (preview, guides) =
                    move_with_snap(&state, point, &frame_annotations, &rect, layout.scale_y, &self.config);
                self.preview = preview;
                self.guides = guides;
                Gesture::Transform(state)
            }
            Gesture::Marquee { origin, .. } => Gesture::Marquee { origin, current: point },
            Gesture::Draw { origin } => {
                let current = canvas_to_normalized(point, &rect);
                if let Some(annotation) = &mut self.in_progress {
                    update_drawing(&mut annotation.shape, origin, current, &rect);
                }
                Gesture::Draw { origin }
            }
            Gesture::Marker {
                id,
                start,
                initial,
                original,
            } => {
                let proposed = Point::new(initial.x + point.x - start.x, initial.y + point.y - start.y);
                let others: Vec<Point> = self
                    .scene
                    .comments_on_frame(self.current_frame)
                    .filter(|c| c.id != id)
                    .map(|c| normalized_to_canvas(c.position, &rect))
                    .collect();
                let snap = snap_comment_marker(proposed, &others, &rect, &self.config);
                let snapped = Point::new(proposed.x + snap.offset.x, proposed.y + snap.offset.y);
                if let Some(marker) = self.scene.comments.iter_mut().find(|c| c.id == id) {
                    marker.position = canvas_to_normalized(snapped, &rect);
                }
                self.guides = snap.guides;
                Gesture::Marker {
                    id,
                    start,
                    initial,
                    original,
                }
            }
        };
        self.gesture = Some(gesture);
    }

    fn handle_pointer_up(&mut self, layout: &CanvasLayout, shift: bool) {
        let rect = layout.rect;
        match self.gesture.take() {
            Some(Gesture::Transform(state)) => {
                let committed = std::mem::take(&mut self.preview);
                if !committed.is_empty() && committed != state.initial_annotations {
                    self.save_to_history();
                    self.scene.commit_annotations(&committed);
                    let ids: Vec<&str> = state.ids().collect();
                    log::debug!("Finished {:?} of [{}]", state.action, ids.join(", "));
                }
            }
            Some(Gesture::Marquee { origin, current }) => {
                let drag = BoundingBox::from_corners(origin, current);
                if drag.width() >= MIN_MARQUEE || drag.height() >= MIN_MARQUEE {
                    let marquee = BoundingBox {
                        start: canvas_to_normalized(drag.start, &rect),
                        end: canvas_to_normalized(drag.end, &rect),
                    };
                    let hits: Vec<String> = self
                        .frame_annotations()
                        .iter()
                        .filter(|a| is_annotation_in_marquee(a, &marquee, &rect, layout.scale_y))
                        .map(|a| a.id.clone())
                        .collect();
                    if !shift {
                        self.selected.clear();
                    }
                    for id in hits {
                        if !self.selected.contains(&id) {
                            self.selected.push(id);
                        }
                    }
                    log::info!("Marquee selected {} annotation(s)", self.selected.len());
                }
            }
            Some(Gesture::Draw { .. }) => {
                if let Some(annotation) = self.in_progress.take() {
                    if is_drawn_enough(&annotation, layout) {
                        self.save_to_history();
                        self.selected = vec![annotation.id.clone()];
                        self.scene.annotations.push(annotation);
                        log::info!("Added annotation, total: {}", self.scene.annotations.len());
                    }
                }
            }
            Some(Gesture::Marker { id, original, .. }) => {
                // The marker moved live during the drag; record the scene as it was before.
                let mut before = self.snapshot();
                if let Some(marker) = before.comments.iter_mut().find(|c| c.id == id) {
                    if marker.position != original {
                        marker.position = original;
                        self.history.push(before);
                        log::debug!("Moved comment {}", id);
                    }
                }
            }
            None => {}
        }
        self.guides.clear();
    }

    /// Load a poster frame in the background and start a fresh scene for it.
    fn open_poster(&mut self, path: std::path::PathBuf) {
        let (sender, receiver) = channel();
        self.loader = Some(receiver);
        self.loading_message = Some("Loading poster frame...".to_string());

        std::thread::spawn(move || {
            let result = vidmark::io::media::load_poster_frame(&path)
                .map(|poster| {
                    let scene = ReviewScene::new(path.to_string_lossy().to_string(), poster.width, poster.height);
                    LoadedData {
                        poster: Some(poster),
                        scene,
                    }
                })
                .map_err(|e| format!("{:#}", e));
            let _ = sender.send(result);
        });
    }

    /// Import a scene (and its poster frame, when the media file is an image) in the background.
    fn open_scene(&mut self, path: std::path::PathBuf) {
        let (sender, receiver) = channel();
        self.loader = Some(receiver);
        self.loading_message = Some("Loading scene...".to_string());

        std::thread::spawn(move || {
            let result = vidmark::io::serialization::import_scene(&path)
                .map(|scene| {
                    let media = std::path::PathBuf::from(&scene.media_file);
                    let poster = match vidmark::io::media::load_poster_frame(&media) {
                        Ok(poster) => Some(poster),
                        Err(e) => {
                            log::warn!("No poster frame for scene: {:#}", e);
                            None
                        }
                    };
                    LoadedData { poster, scene }
                })
                .map_err(|e| format!("{:#}", e));
            let _ = sender.send(result);
        });
    }

    fn poll_loader(&mut self, ctx: &egui::Context) {
        let Some(receiver) = &self.loader else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            return;
        };
        self.loader = None;
        self.loading_message = None;

        match result {
            Ok(loaded) => {
                self.cancel_gesture();
                self.poster_texture = loaded.poster.map(|poster| {
                    let size = [poster.width as usize, poster.height as usize];
                    let image = egui::ColorImage::from_rgba_unmultiplied(size, &poster.pixels);
                    ctx.load_texture("poster_frame", image, egui::TextureOptions::LINEAR)
                });
                self.next_id = loaded.scene.annotations.len() + loaded.scene.comments.len();
                self.scene = loaded.scene;
                self.current_frame = 0;
                self.selected.clear();
                self.history.clear();
                log::info!("Scene loaded: {}", self.scene.media_file);
            }
            Err(e) => log::error!("Failed to load: {}", e),
        }
    }

    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            if self.gesture.is_some() {
                self.cancel_gesture();
            } else {
                self.selected.clear();
            }
        }

        // Only process if no text field is focused
        if ctx.wants_keyboard_input() {
            return;
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace)) {
            self.delete_selected();
        }
        if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Z) && !i.modifiers.shift) {
            self.undo();
        }
        if ctx.input(|i| {
            (i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Z))
                || (i.modifiers.command && i.key_pressed(egui::Key::Y))
        }) {
            self.redo();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowRight)) {
            self.set_frame(self.current_frame.saturating_add(1));
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowLeft)) {
            self.set_frame(self.current_frame.saturating_sub(1));
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Poster Frame...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["jpg", "jpeg", "png", "bmp"])
                            .pick_file()
                        {
                            self.open_poster(path);
                        }
                        ui.close_menu();
                    }
                    if ui.button("Open Scene...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Scenes", &["yaml", "yml", "json"])
                            .pick_file()
                        {
                            self.open_scene(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Edit", |ui| {
                    if ui
                        .add_enabled(self.history.can_undo(), egui::Button::new("Undo (Ctrl+Z)"))
                        .clicked()
                    {
                        self.undo();
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(self.history.can_redo(), egui::Button::new("Redo (Ctrl+Shift+Z)"))
                        .clicked()
                    {
                        self.redo();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui
                        .add_enabled(!self.selected.is_empty(), egui::Button::new("Delete Selected"))
                        .clicked()
                    {
                        self.delete_selected();
                        ui.close_menu();
                    }
                });
            });
        });
    }
}

/// Last frame offered by the timeline: some headroom past the annotated range.
fn timeline_end(last_annotated: Option<u32>, current_frame: u32) -> u32 {
    last_annotated.unwrap_or(0).max(current_frame).saturating_add(100)
}

/// Reshape an in-progress drawing from its origin to the current pointer.
fn update_drawing(shape: &mut Shape, origin: Point, current: Point, rect: &vidmark::RenderedRect) {
    match shape {
        Shape::Rectangle(b) | Shape::Ellipse(b) | Shape::Image(b) | Shape::Video(b) => {
            b.center = Point::new((origin.x + current.x) / 2.0, (origin.y + current.y) / 2.0);
            b.width = (current.x - origin.x).abs();
            b.height = (current.y - origin.y).abs();
        }
        Shape::Arrow { end, .. } => *end = current,
        Shape::Freehand { points } => {
            let far_enough = points.last().map_or(true, |last| {
                normalized_to_canvas(*last, rect).distance(&normalized_to_canvas(current, rect)) >= FREEHAND_STEP
            });
            if far_enough {
                points.push(current);
            }
        }
        Shape::Text { .. } => {}
    }
}

/// Whether a finished drawing is large enough to keep.
fn is_drawn_enough(annotation: &Annotation, layout: &CanvasLayout) -> bool {
    let rect = &layout.rect;
    match &annotation.shape {
        Shape::Rectangle(b) | Shape::Ellipse(b) | Shape::Image(b) | Shape::Video(b) => {
            b.width * rect.width >= MIN_SHAPE && b.height * rect.height >= MIN_SHAPE
        }
        Shape::Arrow { start, end } => {
            normalized_to_canvas(*start, rect).distance(&normalized_to_canvas(*end, rect)) >= MIN_SHAPE
        }
        Shape::Freehand { .. } | Shape::Text { .. } => annotation.is_persistable(),
    }
}

impl eframe::App for ReviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loader(ctx);

        // Request repaint if still loading (to update spinner)
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }

        self.menu_bar(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            toolbar::show(ui, &mut self.current_tool);
        });

        let last_frame = timeline_end(self.scene.last_annotated_frame(), self.current_frame);
        let mut frame = self.current_frame;
        let frame_changed = egui::TopBottomPanel::bottom("timeline")
            .show(ctx, |ui| timeline::show(ui, &mut frame, last_frame))
            .inner;
        if frame_changed {
            self.set_frame(frame);
        }

        let frame_annotations = self.frame_annotations();
        let properties_action = egui::SidePanel::right("properties")
            .default_width(250.0)
            .show(ctx, |ui| properties::show(ui, &mut self.style, &frame_annotations, &self.selected))
            .inner;
        match properties_action {
            properties::PropertiesAction::SelectAnnotation(id) => self.selected = vec![id],
            properties::PropertiesAction::DeleteAnnotation(id) => self.delete_annotation(&id),
            properties::PropertiesAction::None => {}
        }

        self.handle_keyboard(ctx);

        let frame_annotations = self.frame_annotations();
        let selected = self.selected_annotations();
        let comments: Vec<CommentMarker> = self.scene.comments_on_frame(self.current_frame).cloned().collect();
        let marquee = match &self.gesture {
            Some(Gesture::Marquee { origin, current }) => Some(BoundingBox::from_corners(*origin, *current)),
            _ => None,
        };

        let (layout, action) = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if let Some(message) = &self.loading_message {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.spinner();
                            ui.label(egui::RichText::new(message).size(16.0).color(egui::Color32::from_gray(200)));
                        });
                    });
                    return (None, CanvasAction::None);
                }
                let view = CanvasView {
                    video_size: self.scene.video_size(),
                    poster: self.poster_texture.as_ref(),
                    annotations: &frame_annotations,
                    selected: &selected,
                    in_progress: self.in_progress.as_ref(),
                    comments: &comments,
                    guides: &self.guides,
                    marquee,
                    config: &self.config,
                };
                let (layout, action) = canvas::show(ui, &view);
                (Some(layout), action)
            })
            .inner;

        let Some(layout) = layout else {
            return;
        };
        let shift = ctx.input(|i| i.modifiers.shift);
        match action {
            CanvasAction::PointerDown(point) => self.handle_pointer_down(point, &layout, shift),
            CanvasAction::PointerMove(point) => self.handle_pointer_move(point, &layout, shift),
            CanvasAction::PointerUp(_) => self.handle_pointer_up(&layout, shift),
            CanvasAction::None => {}
        }
    }
}
