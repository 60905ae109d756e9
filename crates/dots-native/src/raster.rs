//! CPU raster surface built on tiny-skia.

use std::path::Path;

use dots_core::{Rect, Rgb, Surface};
use glam::Vec2;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// Raster errors
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("Failed to create a {width}x{height} pixmap")]
    PixmapCreationFailed { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

// Cubic control offset approximating a quarter circle.
const KAPPA: f32 = 0.552_284_8;

pub struct PixmapSurface {
    pixmap: Pixmap,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        let pixmap =
            Pixmap::new(width, height).ok_or(RasterError::PixmapCreationFailed { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn clear(&mut self, color: Rgb) {
        self.pixmap.fill(skia_color(color));
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), RasterError> {
        self.pixmap
            .save_png(path)
            .map_err(|e| RasterError::Encode(e.to_string()))
    }
}

fn skia_color(c: Rgb) -> Color {
    Color::from_rgba8(c.r, c.g, c.b, 255)
}

fn paint(color: Rgb) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(color));
    paint.anti_alias = true;
    paint
}

impl Surface for PixmapSurface {
    fn fill_round_rect(&mut self, rect: Rect, radius: f32, color: Rgb) {
        let Rect { x, y, w, h } = rect;
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
        let k = r * KAPPA;

        let mut pb = PathBuilder::new();
        pb.move_to(x + r, y);
        pb.line_to(x + w - r, y);
        pb.cubic_to(x + w - r + k, y, x + w, y + r - k, x + w, y + r);
        pb.line_to(x + w, y + h - r);
        pb.cubic_to(x + w, y + h - r + k, x + w - r + k, y + h, x + w - r, y + h);
        pb.line_to(x + r, y + h);
        pb.cubic_to(x + r - k, y + h, x, y + h - r + k, x, y + h - r);
        pb.line_to(x, y + r);
        pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
        pb.close();

        if let Some(path) = pb.finish() {
            self.pixmap.fill_path(
                &path,
                &paint(color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgb) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        if let Some(path) = pb.finish() {
            let stroke = Stroke {
                width: 1.0,
                ..Stroke::default()
            };
            self.pixmap
                .stroke_path(&path, &paint(color), &stroke, Transform::identity(), None);
        }
    }
}
