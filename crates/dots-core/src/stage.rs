use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{DOT_COLORS, SHAPE_COUNT};
use crate::layout::Layout;
use crate::shape::{Rgb, Shape};

/// Everything a driver callback may touch during a tick.
///
/// The engine owns the single `Stage` and lends it to the active driver for
/// the duration of one `advance` call.
pub struct Stage {
    pub shapes: [Shape; SHAPE_COUNT],
    pub layout: Layout,
    pub input_level: f32,
    pub rng: StdRng,
}

impl Stage {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            shapes: DOT_COLORS.map(|hex| Shape::new(Rgb::from_hex(hex))),
            layout: Layout::default(),
            input_level: 0.0,
            rng,
        }
    }
}
