use dots_core::State;

/// What a key press asks the front-end to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    SetState(State),
    NextState,
    PreviousState,
    ToggleAutoAdvance,
    ToggleGrid,
    ToggleHelp,
    StartMicrophone,
}

#[inline]
pub fn state_for_digit(key: &str) -> Option<State> {
    match key {
        "1" => Some(State::Idle),
        "2" => Some(State::Listening),
        "3" => Some(State::UserSpeaking),
        "4" => Some(State::Thinking),
        "5" => Some(State::Replying),
        "6" => Some(State::Incomprehension),
        _ => None,
    }
}

pub fn action_for_key(key: &str) -> Option<KeyAction> {
    if let Some(state) = state_for_digit(key) {
        return Some(KeyAction::SetState(state));
    }
    match key {
        "ArrowDown" => Some(KeyAction::NextState),
        "ArrowUp" => Some(KeyAction::PreviousState),
        "a" | "A" => Some(KeyAction::ToggleAutoAdvance),
        "g" | "G" => Some(KeyAction::ToggleGrid),
        "h" | "H" => Some(KeyAction::ToggleHelp),
        "m" | "M" => Some(KeyAction::StartMicrophone),
        _ => None,
    }
}

/// Following state in the demo cycle, wrapping after Incomprehension.
/// Unknown counts as the slot before Idle.
pub fn next_state(current: State) -> State {
    let n = State::ALL.len();
    match State::ALL.iter().position(|s| *s == current) {
        Some(i) => State::ALL[(i + 1) % n],
        None => State::ALL[0],
    }
}

/// Preceding state in the demo cycle, wrapping before Idle.
pub fn previous_state(current: State) -> State {
    let n = State::ALL.len();
    match State::ALL.iter().position(|s| *s == current) {
        Some(i) => State::ALL[(i + n - 1) % n],
        None => State::ALL[n - 1],
    }
}

/// Fires once per `period` of accumulated frame time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    period_sec: f32,
    acc_sec: f32,
}

impl Interval {
    pub fn new(period_sec: f32) -> Self {
        Self {
            period_sec,
            acc_sec: 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.acc_sec = 0.0;
    }

    /// Number of whole periods completed by this step.
    pub fn advance(&mut self, dt_sec: f32) -> u32 {
        if self.period_sec <= 0.0 {
            return 0;
        }
        self.acc_sec += dt_sec.max(0.0);
        let mut fired = 0;
        while self.acc_sec >= self.period_sec {
            self.acc_sec -= self.period_sec;
            fired += 1;
        }
        fired
    }
}

/// Stand-in speech level when no microphone is open: a uniform sample in
/// `[0, 1)` scaled to the loudest level.
#[inline]
pub fn synthetic_level(unit: f32, max_level_px: f32) -> f32 {
    unit.clamp(0.0, 1.0) * max_level_px
}

/// Root mean square of a block of samples; 0 for an empty block.
#[inline]
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    (sum / samples.len() as f32).sqrt()
}

/// Map a raw RMS amplitude onto a dot height in pixels.
#[inline]
pub fn rms_to_level(rms: f32, gain: f32, max_level_px: f32) -> f32 {
    (rms * gain).clamp(0.0, 1.0) * max_level_px
}

/// One-pole smoothing so the level does not flicker frame to frame.
#[inline]
pub fn smooth_level(previous: f32, target: f32, alpha: f32) -> f32 {
    (1.0 - alpha) * previous + alpha * target
}
