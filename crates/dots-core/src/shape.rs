use glam::Vec2;

use crate::constants::DEFAULT_BASE_SIZE;
use crate::geometry::Rect;
use crate::surface::Surface;

/// 8-bit sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// `#rrggbb`, as accepted by canvas fill/stroke styles.
    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// One animated dot.
///
/// The pose is addressed by its top-left corner (`position`), while the
/// center stays fixed when the height changes. Width always equals the base
/// size, so a dot stretched by [`Shape::set_height_clamped`] becomes a
/// vertical pill.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    color: Rgb,
    base_size: f32,
    origin: Vec2,
    height: f32,
    scale: f32,
}

impl Shape {
    pub fn new(color: Rgb) -> Self {
        Self {
            color,
            base_size: DEFAULT_BASE_SIZE,
            origin: Vec2::ZERO,
            height: DEFAULT_BASE_SIZE,
            scale: 1.0,
        }
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn base_size(&self) -> f32 {
        self.base_size
    }

    /// Top-left corner of the unscaled footprint.
    pub fn position(&self) -> Vec2 {
        self.origin
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn center(&self) -> Vec2 {
        self.origin + Vec2::new(self.base_size / 2.0, self.height / 2.0)
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Reassigned on every surface (re)size.
    pub fn set_base_size(&mut self, size: f32) {
        let center = self.center();
        self.base_size = size.max(0.0);
        self.height = self.height.max(self.base_size);
        self.origin = center - Vec2::new(self.base_size / 2.0, self.height / 2.0);
    }

    /// Place the top-left corner at `(x, y)`.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.origin = Vec2::new(x, y);
    }

    pub fn move_to_point(&mut self, p: Vec2) {
        self.move_to(p.x, p.y);
    }

    /// Grow or shrink vertically around the current center; never below the
    /// base size.
    pub fn set_height_clamped(&mut self, h: f32) {
        let h = if h < self.base_size { self.base_size } else { h };
        self.origin.y -= (h - self.height) / 2.0;
        self.height = h;
    }

    pub fn set_scale(&mut self, s: f32) {
        self.scale = s.max(f32::EPSILON);
    }

    /// Base height, unit scale, top-left at the surface origin.
    pub fn reset_to_base(&mut self) {
        self.height = self.base_size;
        self.scale = 1.0;
        self.origin = Vec2::ZERO;
    }

    /// Drawn footprint: base size wide, current height tall, both scaled
    /// from the top-left corner.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.base_size * self.scale,
            self.height * self.scale,
        )
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        let rect = self.bounds();
        let radius = rect.w.min(rect.h) / 2.0;
        surface.fill_round_rect(rect, radius, self.color);
    }
}
