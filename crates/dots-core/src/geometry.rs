//! Pure interpolation and 2D helpers shared by the choreographies.

use glam::Vec2;

/// Linear interpolation from `a` to `b` by `t`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Portion of the `from -> to` delta covered at fraction `t`.
///
/// Transitions add this to the live value every tick, so the step is always
/// measured against what is left of the distance rather than a fixed start.
#[inline]
pub fn fractional_step(from: f32, to: f32, t: f32) -> f32 {
    (to - from) * t
}

/// Rotate `point` around `pivot` by `angle` radians (counter-clockwise in a
/// y-up frame, clockwise on screen).
#[inline]
pub fn rotate_around_pivot(point: Vec2, pivot: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    let d = point - pivot;
    Vec2::new(cos * d.x - sin * d.y, sin * d.x + cos * d.y) + pivot
}

/// Axis-aligned rectangle in surface pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}
