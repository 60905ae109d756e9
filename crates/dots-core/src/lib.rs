//! State-driven choreography engine for a four-dot assistant status
//! indicator.
//!
//! The host measures its surface with [`DotsEngine::init`], requests states
//! with [`DotsEngine::set_state`], feeds a microphone level through
//! [`DotsEngine::set_input_level`], and on every frame calls
//! [`DotsEngine::tick`] followed by [`DotsEngine::render`] into any
//! [`Surface`].

pub mod choreography;
pub mod constants;
pub mod driver;
pub mod easing;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod params;
pub mod shape;
pub mod stage;
pub mod state;
pub mod surface;

pub use constants::*;
pub use driver::{
    Advance, AnimationDriver, ContinuousDriver, Frame, Repeat, RepeatCount, RepeatMode,
    TimedDriver,
};
pub use easing::Interpolator;
pub use engine::DotsEngine;
pub use error::ParamsError;
pub use geometry::{fractional_step, lerp, rotate_around_pivot, Rect};
pub use layout::Layout;
pub use params::DotsParams;
pub use shape::{Rgb, Shape};
pub use stage::Stage;
pub use state::{Phase, State, UnknownState};
pub use surface::{DrawCommand, Surface};
