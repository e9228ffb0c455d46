use eframe::egui::{self, Pos2, Vec2};

/// Layout math for the fixed-size drawing surface.
pub struct SliderMetrics {
    pub viewport: Vec2,
}

impl SliderMetrics {
    pub fn new(viewport: Vec2) -> Self {
        Self { viewport }
    }

    /// Top-left corner of slide `index`, relative to the surface origin.
    /// Each slide is centered within its own viewport-wide slot.
    pub fn slide_origin(&self, display_size: Vec2, index: usize, offset: f32) -> Pos2 {
        let center_x = (self.viewport.x - display_size.x) / 2.0;
        let center_y = (self.viewport.y - display_size.y) / 2.0;
        egui::pos2(center_x + self.viewport.x * index as f32 + offset, center_y)
    }

    /// Draw-time cull: a slide counts as visible while any part of it
    /// overlaps the surface horizontally.
    pub fn is_visible(&self, x: f32, display_width: f32) -> bool {
        x > -display_width && x < self.viewport.x
    }
}

/// Uniformly scale `image_size` to fit `available`, up or down, preserving
/// aspect ratio. Returns the fitted size and the scale factor.
pub fn fit_within(image_size: Vec2, available: Vec2) -> (Vec2, f32) {
    let safe_size = egui::vec2(image_size.x.max(1.0), image_size.y.max(1.0));
    let scale = (available.x / safe_size.x)
        .min(available.y / safe_size.y)
        .max(0.01);
    (safe_size * scale, scale)
}
