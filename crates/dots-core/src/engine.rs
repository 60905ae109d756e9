use std::time::Duration;

use glam::Vec2;

use crate::choreography;
use crate::constants::{GRID_LINE_COLOR, SHAPE_COUNT};
use crate::driver::{Advance, AnimationDriver};
use crate::error::ParamsError;
use crate::layout::Layout;
use crate::params::DotsParams;
use crate::shape::{Rgb, Shape};
use crate::stage::Stage;
use crate::state::{Phase, State};
use crate::surface::Surface;

/// Orchestrates the four dots: owns their poses, the current state and the
/// one driver allowed to animate them.
///
/// Single-threaded by construction. The host calls [`DotsEngine::tick`] from
/// its frame callback and [`DotsEngine::render`] whenever it repaints;
/// `set_state` cancels the running driver synchronously, so no stale tick
/// can land after a transition begins.
pub struct DotsEngine {
    stage: Stage,
    params: DotsParams,
    state: State,
    phase: Phase,
    driver: Option<Box<dyn AnimationDriver>>,
    redraw: Option<Box<dyn FnMut()>>,
}

impl Default for DotsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DotsEngine {
    pub fn new() -> Self {
        Self::build(DotsParams::default(), None)
    }

    pub fn with_params(params: DotsParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self::build(params, None))
    }

    /// Deterministic jitter for the user-speaking choreography.
    pub fn with_seed(params: DotsParams, seed: u64) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self::build(params, Some(seed)))
    }

    fn build(params: DotsParams, seed: Option<u64>) -> Self {
        Self {
            stage: Stage::new(seed),
            params,
            state: State::Unknown,
            phase: Phase::Uninitialized,
            driver: None,
            redraw: None,
        }
    }

    /// Called once per animation tick that changed the dots.
    pub fn set_redraw_listener(&mut self, listener: impl FnMut() + 'static) {
        self.redraw = Some(Box::new(listener));
    }

    /// Measure the surface, resize every dot and (re)enter Idle.
    ///
    /// Must run before the first render and again after every resize. The
    /// Idle entry is forced even when already idle so the poses follow the
    /// new grid.
    pub fn init(&mut self, surface_width: u32, surface_height: u32) {
        self.stage.layout =
            Layout::from_surface(surface_width, surface_height, self.params.grid_cells);
        let base = self.stage.layout.tile_width;
        for shape in self.stage.shapes.iter_mut() {
            shape.set_base_size(base);
        }
        log::info!(
            "[dots] init {}x{} tile={:.2}x{:.2} pivot=({:.2},{:.2})",
            surface_width,
            surface_height,
            self.stage.layout.tile_width,
            self.stage.layout.tile_height,
            self.stage.layout.pivot.x,
            self.stage.layout.pivot.y
        );
        self.state = State::Idle;
        self.enter(State::Idle);
    }

    /// Switch to `state`. Requesting the current state does nothing.
    pub fn set_state(&mut self, state: State) {
        if self.state == state {
            return;
        }
        if state == State::Unknown {
            log::warn!("[dots] ignoring request to re-enter {state}");
            return;
        }
        log::info!("[dots] state {} -> {}", self.state, state);
        self.state = state;
        self.enter(state);
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Amplitude consumed by the user-speaking choreography only.
    pub fn set_input_level(&mut self, level: f32) {
        self.stage.input_level = level;
    }

    pub fn input_level(&self) -> f32 {
        self.stage.input_level
    }

    pub fn set_debug_grid(&mut self, enabled: bool) {
        self.params.debug_grid = enabled;
    }

    pub fn params(&self) -> &DotsParams {
        &self.params
    }

    pub fn layout(&self) -> &Layout {
        &self.stage.layout
    }

    /// Blue, Red, Yellow, Green.
    pub fn shapes(&self) -> &[Shape; SHAPE_COUNT] {
        &self.stage.shapes
    }

    pub fn is_animating(&self) -> bool {
        self.driver.as_ref().is_some_and(|d| d.is_running())
    }

    /// Label of the running driver, e.g. `"reset-circle"` or `"think"`.
    pub fn active_driver(&self) -> Option<&'static str> {
        self.driver
            .as_ref()
            .filter(|d| d.is_running())
            .map(|d| d.label())
    }

    fn enter(&mut self, state: State) {
        self.cancel_driver();
        if !self.stage.layout.is_ready() {
            log::debug!("[dots] {state} requested before init; deferred");
            self.phase = Phase::Uninitialized;
            return;
        }
        match choreography::enter(state, &self.stage, &self.params) {
            Some(entry) => {
                self.phase = if entry.resetting {
                    Phase::Resetting
                } else {
                    Phase::Active
                };
                self.install(entry.driver);
            }
            None => self.phase = Phase::Settled,
        }
    }

    fn install(&mut self, mut driver: Box<dyn AnimationDriver>) {
        driver.start();
        self.driver = Some(driver);
    }

    fn cancel_driver(&mut self) {
        if let Some(mut driver) = self.driver.take() {
            driver.cancel();
        }
    }

    /// Advance the active driver by one frame of `dt`.
    ///
    /// Returns true, and notifies the redraw listener once, when the dots
    /// changed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Some(driver) = self.driver.as_mut() else {
            return false;
        };
        let changed = match driver.advance(dt, &mut self.stage) {
            Advance::Idle => false,
            Advance::Ticked => true,
            Advance::Finished(next) => {
                self.driver = None;
                match next {
                    Some(next) => {
                        self.phase = Phase::Active;
                        self.install(next);
                    }
                    None => self.phase = Phase::Settled,
                }
                true
            }
        };
        if changed {
            log::trace!("[dots] tick {:?} {:?}", dt, self.phase);
            if let Some(redraw) = self.redraw.as_mut() {
                redraw();
            }
        }
        changed
    }

    /// Paint the dots at their current poses, optionally over the tile grid.
    pub fn render(&self, surface: &mut dyn Surface) {
        if self.params.debug_grid {
            self.render_grid(surface);
        }
        for shape in &self.stage.shapes {
            shape.draw(surface);
        }
    }

    fn render_grid(&self, surface: &mut dyn Surface) {
        let layout = &self.stage.layout;
        let color = Rgb::from_hex(GRID_LINE_COLOR);
        for i in 0..=layout.cells {
            let x = i as f32 * layout.tile_width;
            let y = i as f32 * layout.tile_height;
            surface.draw_line(Vec2::new(x, 0.0), Vec2::new(x, layout.surface_height), color);
            surface.draw_line(Vec2::new(0.0, y), Vec2::new(layout.surface_width, y), color);
        }
    }
}
