// Shared helpers for the engine integration tests.

#![allow(dead_code)]
use std::time::Duration;

use dots_core::{DotsEngine, Phase};

pub const FRAME: Duration = Duration::from_millis(16);

/// Tick until the engine leaves the resetting phase.
pub fn finish_reset(engine: &mut DotsEngine) {
    for _ in 0..1000 {
        if engine.phase() != Phase::Resetting {
            return;
        }
        engine.tick(FRAME);
    }
    panic!("reset never finished");
}

/// Tick until nothing is animating.
pub fn settle(engine: &mut DotsEngine) {
    for _ in 0..1000 {
        if !engine.is_animating() {
            return;
        }
        engine.tick(FRAME);
    }
    panic!("engine never settled");
}
