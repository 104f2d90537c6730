use serde::{Deserialize, Serialize};

/// Drawable area in logical pixels plus the display's pixel density.
///
/// The renderer draws at `render_size()`: the logical size scaled by the
/// device pixel ratio, capped at `max_pixel_ratio` so high-density displays
/// do not multiply the fill cost without bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub device_pixel_ratio: f32,
    pub max_pixel_ratio: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720, 1.0)
    }
}

impl Viewport {
    pub const DEFAULT_MAX_PIXEL_RATIO: f32 = 2.0;

    pub fn new(width: u32, height: u32, device_pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
            max_pixel_ratio: Self::DEFAULT_MAX_PIXEL_RATIO,
        }
    }

    pub fn with_max_pixel_ratio(mut self, max: f32) -> Self {
        self.max_pixel_ratio = max;
        self
    }

    pub fn resize(&mut self, width: u32, height: u32, device_pixel_ratio: f32) {
        self.width = width;
        self.height = height;
        self.device_pixel_ratio = device_pixel_ratio;
        tracing::debug!(
            width,
            height,
            device_pixel_ratio,
            pixel_ratio = self.pixel_ratio(),
            "viewport resized"
        );
    }

    /// Width over height. Height is treated as at least one pixel.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn pixel_ratio(&self) -> f32 {
        let dpr = if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio
        } else {
            1.0
        };
        dpr.min(self.max_pixel_ratio)
    }

    /// Size of the offscreen render target in physical pixels, never zero.
    pub fn render_size(&self) -> (u32, u32) {
        let ratio = self.pixel_ratio();
        let scale = |v: u32| ((v as f32 * ratio).round() as u32).max(1);
        (scale(self.width), scale(self.height))
    }
}
