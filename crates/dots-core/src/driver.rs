//! Timing strategies that call back into the choreographies once per frame.
//!
//! A driver owns two listeners: a tick listener that mutates the [`Stage`]
//! and an optional completion listener that may hand back the next driver
//! to run. Cancelling drops both listeners before the driver stops, so a
//! cancelled driver can never touch the stage again and never completes.

use std::time::Duration;

use crate::easing::Interpolator;
use crate::geometry::lerp;
use crate::stage::Stage;

pub type TickFn = Box<dyn FnMut(&Frame, &mut Stage)>;
pub type CompleteFn = Box<dyn FnOnce(&mut Stage) -> Option<Box<dyn AnimationDriver>>>;

/// What a tick listener sees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Frame {
    /// Eased fraction of the current iteration, in [0, 1].
    pub fraction: f32,
    /// Animated value: the driver's `from -> to` range at `fraction`.
    pub value: f32,
    /// Time since `start`.
    pub elapsed: Duration,
    /// Time since the previous tick.
    pub delta: Duration,
    pub iteration: u32,
    /// True while a reversing driver is playing backwards.
    pub reversed: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RepeatMode {
    #[default]
    Restart,
    Reverse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepeatCount {
    /// Extra iterations after the first.
    Finite(u32),
    Infinite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Repeat {
    pub mode: RepeatMode,
    pub count: RepeatCount,
}

impl Repeat {
    pub const ONCE: Repeat = Repeat {
        mode: RepeatMode::Restart,
        count: RepeatCount::Finite(0),
    };

    pub fn restart(count: RepeatCount) -> Self {
        Self {
            mode: RepeatMode::Restart,
            count,
        }
    }

    pub fn reverse(count: RepeatCount) -> Self {
        Self {
            mode: RepeatMode::Reverse,
            count,
        }
    }

    fn allows(&self, iteration: u32) -> bool {
        match self.count {
            RepeatCount::Infinite => true,
            RepeatCount::Finite(extra) => iteration < extra,
        }
    }

    fn is_backwards(&self, iteration: u32) -> bool {
        self.mode == RepeatMode::Reverse && iteration % 2 == 1
    }
}

impl Default for Repeat {
    fn default() -> Self {
        Self::ONCE
    }
}

/// Result of advancing a driver by one frame.
pub enum Advance {
    /// Not started, already finished, or cancelled.
    Idle,
    Ticked,
    /// The driver ran its last tick and its completion listener returned
    /// the driver to install next, if any.
    Finished(Option<Box<dyn AnimationDriver>>),
}

pub trait AnimationDriver {
    fn label(&self) -> &'static str;
    fn start(&mut self);
    /// Detach both listeners and stop. Never fires completion.
    fn cancel(&mut self);
    fn is_running(&self) -> bool;
    fn advance(&mut self, dt: Duration, stage: &mut Stage) -> Advance;
}

/// Duration-based, eased, optionally repeating driver.
pub struct TimedDriver {
    label: &'static str,
    duration: Duration,
    interpolator: Interpolator,
    from: f32,
    to: f32,
    repeat: Repeat,
    elapsed: Duration,
    total: Duration,
    iteration: u32,
    running: bool,
    on_tick: Option<TickFn>,
    on_complete: Option<CompleteFn>,
}

impl TimedDriver {
    pub fn new(label: &'static str, duration: Duration) -> Self {
        Self {
            label,
            duration,
            interpolator: Interpolator::default(),
            from: 0.0,
            to: 1.0,
            repeat: Repeat::ONCE,
            elapsed: Duration::ZERO,
            total: Duration::ZERO,
            iteration: 0,
            running: false,
            on_tick: None,
            on_complete: None,
        }
    }

    pub fn interpolator(mut self, interpolator: Interpolator) -> Self {
        self.interpolator = interpolator;
        self
    }

    /// Range reported through [`Frame::value`]; defaults to `0 -> 1`.
    pub fn values(mut self, from: f32, to: f32) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn on_tick(mut self, f: impl FnMut(&Frame, &mut Stage) + 'static) -> Self {
        self.on_tick = Some(Box::new(f));
        self
    }

    pub fn on_complete(
        mut self,
        f: impl FnOnce(&mut Stage) -> Option<Box<dyn AnimationDriver>> + 'static,
    ) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }
}

impl AnimationDriver for TimedDriver {
    fn label(&self) -> &'static str {
        self.label
    }

    fn start(&mut self) {
        self.elapsed = Duration::ZERO;
        self.total = Duration::ZERO;
        self.iteration = 0;
        self.running = true;
        log::debug!("[driver] start {} ({:?}, {:?})", self.label, self.duration, self.repeat);
    }

    fn cancel(&mut self) {
        self.on_tick = None;
        self.on_complete = None;
        if self.running {
            log::debug!("[driver] cancel {}", self.label);
        }
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn advance(&mut self, dt: Duration, stage: &mut Stage) -> Advance {
        if !self.running {
            return Advance::Idle;
        }
        self.total += dt;
        self.elapsed += dt;

        let done = if self.duration.is_zero() {
            true
        } else {
            while self.elapsed >= self.duration && self.repeat.allows(self.iteration) {
                self.elapsed -= self.duration;
                self.iteration += 1;
            }
            self.elapsed >= self.duration
        };

        let raw = if done {
            1.0
        } else {
            self.elapsed.as_secs_f32() / self.duration.as_secs_f32()
        };
        let reversed = self.repeat.is_backwards(self.iteration);
        let raw = if reversed { 1.0 - raw } else { raw };
        let fraction = self.interpolator.evaluate(raw);
        let frame = Frame {
            fraction,
            value: lerp(self.from, self.to, fraction),
            elapsed: self.total,
            delta: dt,
            iteration: self.iteration,
            reversed,
        };
        if let Some(tick) = self.on_tick.as_mut() {
            tick(&frame, stage);
        }

        if !done {
            return Advance::Ticked;
        }
        self.running = false;
        self.on_tick = None;
        log::debug!("[driver] finish {} after {:?}", self.label, self.total);
        let next = self.on_complete.take().and_then(|complete| complete(stage));
        Advance::Finished(next)
    }
}

/// Unbounded, time-based driver ticking once per frame.
///
/// With a `period`, the driver counts repeats: a reversing driver flips
/// [`Frame::reversed`] every period, and a finite repeat count ends it.
/// Without one it runs until cancelled.
pub struct ContinuousDriver {
    label: &'static str,
    period: Option<Duration>,
    repeat: Repeat,
    since_repeat: Duration,
    total: Duration,
    iteration: u32,
    running: bool,
    on_tick: Option<TickFn>,
    on_complete: Option<CompleteFn>,
}

impl ContinuousDriver {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            period: None,
            repeat: Repeat::restart(RepeatCount::Infinite),
            since_repeat: Duration::ZERO,
            total: Duration::ZERO,
            iteration: 0,
            running: false,
            on_tick: None,
            on_complete: None,
        }
    }

    /// Repeat every `period` according to `repeat`. A zero period is ignored.
    pub fn repeating(mut self, period: Option<Duration>, repeat: Repeat) -> Self {
        self.period = period.filter(|p| !p.is_zero());
        self.repeat = repeat;
        self
    }

    pub fn on_tick(mut self, f: impl FnMut(&Frame, &mut Stage) + 'static) -> Self {
        self.on_tick = Some(Box::new(f));
        self
    }

    pub fn on_complete(
        mut self,
        f: impl FnOnce(&mut Stage) -> Option<Box<dyn AnimationDriver>> + 'static,
    ) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }
}

impl AnimationDriver for ContinuousDriver {
    fn label(&self) -> &'static str {
        self.label
    }

    fn start(&mut self) {
        self.since_repeat = Duration::ZERO;
        self.total = Duration::ZERO;
        self.iteration = 0;
        self.running = true;
        log::debug!("[driver] start {} (continuous, period {:?})", self.label, self.period);
    }

    fn cancel(&mut self) {
        self.on_tick = None;
        self.on_complete = None;
        if self.running {
            log::debug!("[driver] cancel {}", self.label);
        }
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn advance(&mut self, dt: Duration, stage: &mut Stage) -> Advance {
        if !self.running {
            return Advance::Idle;
        }
        self.total += dt;

        let mut exhausted = false;
        let mut fraction = 0.0;
        if let Some(period) = self.period {
            self.since_repeat += dt;
            while self.since_repeat >= period {
                if !self.repeat.allows(self.iteration) {
                    exhausted = true;
                    break;
                }
                self.since_repeat -= period;
                self.iteration += 1;
            }
            fraction = (self.since_repeat.as_secs_f32() / period.as_secs_f32()).min(1.0);
        }

        if exhausted {
            self.running = false;
            self.on_tick = None;
            log::debug!("[driver] finish {} after {:?}", self.label, self.total);
            let next = self.on_complete.take().and_then(|complete| complete(stage));
            return Advance::Finished(next);
        }

        let frame = Frame {
            fraction,
            value: fraction,
            elapsed: self.total,
            delta: dt,
            iteration: self.iteration,
            reversed: self.repeat.is_backwards(self.iteration),
        };
        if let Some(tick) = self.on_tick.as_mut() {
            tick(&frame, stage);
        }
        Advance::Ticked
    }
}
