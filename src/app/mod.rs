pub mod loader;

use std::{path::PathBuf, time::Duration};

use eframe::{
    egui::{self, Color32},
    App, Frame,
};

use crate::{drag::DragState, image_utils::LoadedSlide, ui::SliderMetrics};

use self::loader::{LoadPhase, Loader};

pub const STATUS_BAR_HEIGHT: f32 = 36.0;

struct SlideTexture {
    handle: egui::TextureHandle,
    display_size: egui::Vec2,
}

pub struct ImageSliderApp {
    metrics: SliderMetrics,
    loader: Loader,
    drag: DragState,
    textures: Vec<SlideTexture>,
}

impl ImageSliderApp {
    pub fn new(sources: Vec<PathBuf>, viewport: egui::Vec2, timeout: Duration) -> Self {
        let loader = Loader::new(&sources, viewport, timeout);
        let drag = DragState::new(viewport.x, sources.len());
        Self {
            metrics: SliderMetrics::new(viewport),
            loader,
            drag,
            textures: Vec::new(),
        }
    }

    /// Uploads the complete slide set in one pass the frame it arrives, so
    /// the surface never shows a subset of the slides.
    fn upload_textures(&mut self, ctx: &egui::Context, slides: Vec<LoadedSlide>) {
        self.textures = slides
            .into_iter()
            .map(|slide| SlideTexture {
                handle: ctx.load_texture(
                    format!("slide-{}", slide.index),
                    slide.pixels,
                    egui::TextureOptions::LINEAR,
                ),
                display_size: slide.display_size,
            })
            .collect();
    }

    fn handle_pointer(&mut self, response: &egui::Response) {
        if response.drag_started() {
            if let Some(pointer) = response.interact_pointer_pos() {
                self.drag.press(pointer.x);
            }
        } else if response.dragged() {
            if let Some(pointer) = response.interact_pointer_pos() {
                self.drag.drag_to(pointer.x);
            }
        } else if response.drag_stopped() {
            self.drag.release();
        }
    }

    fn draw_slides(&self, painter: &egui::Painter, surface: egui::Rect) {
        // The surface is cleared and repainted in full each frame; slides
        // never bleed outside it.
        let painter = painter.with_clip_rect(surface);
        painter.rect_filled(surface, 0.0, Color32::BLACK);

        for (index, texture) in self.textures.iter().enumerate() {
            let origin =
                self.metrics
                    .slide_origin(texture.display_size, index, self.drag.offset());
            if !self.metrics.is_visible(origin.x, texture.display_size.x) {
                continue;
            }
            painter.image(
                texture.handle.id(),
                egui::Rect::from_min_size(surface.min + origin.to_vec2(), texture.display_size),
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }
    }
}

impl App for ImageSliderApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut Frame) {
        let _ = frame;

        self.loader.poll();
        if let Some(slides) = self.loader.take_slides() {
            self.upload_textures(ctx, slides);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(self.metrics.viewport, egui::Sense::click_and_drag());
                self.handle_pointer(&response);
                self.draw_slides(&painter, response.rect);

                if self.drag.is_dragging() {
                    ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
                }

                let (status_response, status_painter) = ui.allocate_painter(
                    egui::vec2(self.metrics.viewport.x, STATUS_BAR_HEIGHT),
                    egui::Sense::hover(),
                );
                let status_color = match self.loader.phase() {
                    LoadPhase::Failed(_) => Color32::LIGHT_RED,
                    _ => Color32::from_gray(200),
                };
                status_painter.text(
                    status_response.rect.center(),
                    egui::Align2::CENTER_CENTER,
                    self.loader.status_line(),
                    egui::FontId::monospace(16.0),
                    status_color,
                );
            });

        // Keep polling while decodes are in flight; one coalesced repaint
        // request at a time. Once ready, egui repaints on input alone.
        if matches!(self.loader.phase(), LoadPhase::Loading) {
            ctx.request_repaint_after(Duration::from_millis(16));
        }
    }
}
