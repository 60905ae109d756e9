//! Drawing seam between the engine and whatever paints the dots.

use glam::Vec2;

use crate::geometry::Rect;
use crate::shape::Rgb;

/// A 2D target the engine paints into once per frame.
pub trait Surface {
    fn fill_round_rect(&mut self, rect: Rect, radius: f32, color: Rgb);
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgb);
}

/// Recorded draw call, for display-list style consumers and tests.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    RoundRect { rect: Rect, radius: f32, color: Rgb },
    Line { from: Vec2, to: Vec2, color: Rgb },
}

impl Surface for Vec<DrawCommand> {
    fn fill_round_rect(&mut self, rect: Rect, radius: f32, color: Rgb) {
        self.push(DrawCommand::RoundRect { rect, radius, color });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgb) {
        self.push(DrawCommand::Line { from, to, color });
    }
}
