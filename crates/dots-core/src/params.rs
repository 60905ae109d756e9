use std::time::Duration;

use crate::constants::*;
use crate::error::ParamsError;

/// Tunables for the choreographies. `Default` reproduces the stock look.
#[derive(Clone, Debug, PartialEq)]
pub struct DotsParams {
    pub grid_cells: u32,
    /// Duration of Idle and of both reset transitions.
    pub transition_duration: Duration,
    /// One pulse of the Replying ring.
    pub reply_duration: Duration,
    /// One shake of Incomprehension; played `1 + shake_repeats` times.
    pub shake_duration: Duration,
    pub shake_repeats: u32,
    pub rotation_step_degrees: f32,
    /// How long Thinking spins one way before reversing. `None` never reverses.
    pub think_reverse_period: Option<Duration>,
    pub listen_phase_step: f32,
    pub listen_activation_threshold: f32,
    pub speak_easing: f32,
    pub speak_jitter: f32,
    pub reply_amplitude: f32,
    pub circle_radius_tiles: f32,
    pub debug_grid: bool,
}

impl Default for DotsParams {
    fn default() -> Self {
        Self {
            grid_cells: GRID_CELLS,
            transition_duration: TRANSITION_DURATION,
            reply_duration: REPLY_DURATION,
            shake_duration: SHAKE_DURATION,
            shake_repeats: SHAKE_REPEATS,
            rotation_step_degrees: ROTATION_STEP_DEGREES,
            think_reverse_period: Some(THINK_REVERSE_PERIOD),
            listen_phase_step: LISTEN_PHASE_STEP,
            listen_activation_threshold: LISTEN_ACTIVATION_THRESHOLD,
            speak_easing: SPEAK_EASING,
            speak_jitter: SPEAK_JITTER,
            reply_amplitude: REPLY_AMPLITUDE,
            circle_radius_tiles: CIRCLE_RADIUS_TILES,
            debug_grid: false,
        }
    }
}

impl DotsParams {
    pub fn rotation_step_radians(&self) -> f32 {
        self.rotation_step_degrees.to_radians()
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.grid_cells == 0 {
            return Err(ParamsError::EmptyGrid);
        }
        let durations = [
            ("transition_duration", Some(self.transition_duration)),
            ("reply_duration", Some(self.reply_duration)),
            ("shake_duration", Some(self.shake_duration)),
            ("think_reverse_period", self.think_reverse_period),
        ];
        for (name, d) in durations {
            if d.is_some_and(|d| d.is_zero()) {
                return Err(ParamsError::ZeroDuration { name });
            }
        }
        let positive = [
            ("listen_phase_step", self.listen_phase_step),
            ("circle_radius_tiles", self.circle_radius_tiles),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ParamsError::NonPositive { name, value });
            }
        }
        let unit = [
            ("listen_activation_threshold", self.listen_activation_threshold),
            ("speak_easing", self.speak_easing),
            ("speak_jitter", self.speak_jitter),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(ParamsError::OutOfUnitRange { name, value });
            }
        }
        if !self.rotation_step_degrees.is_finite() {
            return Err(ParamsError::NonPositive {
                name: "rotation_step_degrees",
                value: self.rotation_step_degrees,
            });
        }
        if !self.reply_amplitude.is_finite() {
            return Err(ParamsError::NonPositive {
                name: "reply_amplitude",
                value: self.reply_amplitude,
            });
        }
        Ok(())
    }
}
