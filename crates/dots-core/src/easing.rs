//! Interpolation curves applied to a driver's raw time fraction.

use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interpolator {
    Linear,
    /// Quadratic ease-in: slow start, fast end.
    Accelerate,
    /// Cosine ease-in-out.
    #[default]
    AccelerateDecelerate,
}

impl Interpolator {
    /// Map `t` (clamped to [0, 1]) onto the curve. Both endpoints are exact.
    #[inline]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Interpolator::Linear => t,
            Interpolator::Accelerate => t * t,
            Interpolator::AccelerateDecelerate => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else {
                    ((t + 1.0) * PI).cos() / 2.0 + 0.5
                }
            }
        }
    }
}
