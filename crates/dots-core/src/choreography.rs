//! One choreography per state, plus the two reset transitions that put the
//! dots into a canonical pose before a choreography starts.
//!
//! Every builder returns a driver that has not been started yet; the engine
//! starts it and owns it until the next state change.

use std::f32::consts::TAU;
use std::time::Duration;

use glam::Vec2;
use rand::Rng;

use crate::constants::{HORIZONTAL_X_TILES, IDLE_POSITIONS_TILES, IDLE_SCALES, SHAPE_COUNT};
use crate::driver::{AnimationDriver, ContinuousDriver, Repeat, RepeatCount, TimedDriver};
use crate::easing::Interpolator;
use crate::geometry::{fractional_step, lerp, rotate_around_pivot};
use crate::layout::Layout;
use crate::params::DotsParams;
use crate::stage::Stage;
use crate::state::State;

/// Builds the driver to run once a reset has snapped the dots into place.
pub type Continuation = Box<dyn FnOnce(&Stage) -> Box<dyn AnimationDriver>>;

/// First driver of a state's entry procedure.
pub struct Entry {
    pub driver: Box<dyn AnimationDriver>,
    /// The driver is a reset; the choreography follows on completion.
    pub resetting: bool,
}

/// Entry procedure for `state`. `None` for [`State::Unknown`].
pub fn enter(state: State, stage: &Stage, params: &DotsParams) -> Option<Entry> {
    let layout = stage.layout;
    let p = params.clone();
    let driver = match state {
        State::Unknown => return None,
        State::Idle => {
            return Some(Entry {
                driver: idle(&layout, params),
                resetting: false,
            })
        }
        State::Listening => {
            reset_to_horizontal(&layout, params, Box::new(move |s: &Stage| listen(s, &p)))
        }
        State::UserSpeaking => {
            reset_to_horizontal(&layout, params, Box::new(move |_: &Stage| user_speak(&p)))
        }
        State::Incomprehension => reset_to_horizontal(
            &layout,
            params,
            Box::new(move |s: &Stage| incomprehension(s, &p)),
        ),
        State::Thinking => {
            reset_to_circle(&layout, params, Box::new(move |s: &Stage| think(&s.layout, &p)))
        }
        State::Replying => {
            reset_to_circle(&layout, params, Box::new(move |s: &Stage| reply(&s.layout, &p)))
        }
    };
    Some(Entry {
        driver,
        resetting: true,
    })
}

/// Eased move from the live poses to `targets`/`scales`, height back to base.
///
/// Each tick adds the eased fraction of the distance still left, then the
/// final tick snaps every shape onto its exact target.
fn transition(
    label: &'static str,
    duration: Duration,
    targets: [Vec2; SHAPE_COUNT],
    scales: [f32; SHAPE_COUNT],
) -> TimedDriver {
    TimedDriver::new(label, duration)
        .interpolator(Interpolator::Accelerate)
        .on_tick(move |frame, stage| {
            let f = frame.fraction;
            for (i, shape) in stage.shapes.iter_mut().enumerate() {
                let x = shape.x() + fractional_step(shape.x(), targets[i].x, f);
                let y = shape.y() + fractional_step(shape.y(), targets[i].y, f);
                let s = shape.scale() + fractional_step(shape.scale(), scales[i], f);
                let h = shape.height() + fractional_step(shape.height(), shape.base_size(), f);
                shape.move_to(x, y);
                shape.set_height_clamped(h);
                shape.set_scale(s);
            }
        })
}

fn snap(stage: &mut Stage, targets: &[Vec2; SHAPE_COUNT], scales: &[f32; SHAPE_COUNT]) {
    for (i, shape) in stage.shapes.iter_mut().enumerate() {
        shape.reset_to_base();
        shape.move_to_point(targets[i]);
        shape.set_scale(scales[i]);
    }
}

pub fn idle_targets(layout: &Layout) -> ([Vec2; SHAPE_COUNT], [f32; SHAPE_COUNT]) {
    (
        IDLE_POSITIONS_TILES.map(|[tx, ty]| layout.tiles(tx, ty)),
        IDLE_SCALES,
    )
}

pub fn horizontal_targets(layout: &Layout) -> [Vec2; SHAPE_COUNT] {
    HORIZONTAL_X_TILES.map(|tx| Vec2::new(layout.tile_width * tx, layout.pivot.y))
}

pub fn circle_targets(layout: &Layout, params: &DotsParams) -> [Vec2; SHAPE_COUNT] {
    let r = layout.tile_width * params.circle_radius_tiles;
    let c = layout.pivot;
    [
        Vec2::new(c.x - r, c.y),
        Vec2::new(c.x, c.y - r),
        Vec2::new(c.x + r, c.y),
        Vec2::new(c.x, c.y + r),
    ]
}

/// Resting pose: one large dot top-left, three small ones around it.
pub fn idle(layout: &Layout, params: &DotsParams) -> Box<dyn AnimationDriver> {
    let (targets, scales) = idle_targets(layout);
    Box::new(
        transition("idle", params.transition_duration, targets, scales).on_complete(
            move |stage| {
                snap(stage, &targets, &scales);
                None
            },
        ),
    )
}

pub fn reset_to_horizontal(
    layout: &Layout,
    params: &DotsParams,
    then: Continuation,
) -> Box<dyn AnimationDriver> {
    let targets = horizontal_targets(layout);
    let scales = [1.0; SHAPE_COUNT];
    Box::new(
        transition("reset-horizontal", params.transition_duration, targets, scales).on_complete(
            move |stage| {
                snap(stage, &targets, &scales);
                Some(then(&*stage))
            },
        ),
    )
}

pub fn reset_to_circle(
    layout: &Layout,
    params: &DotsParams,
    then: Continuation,
) -> Box<dyn AnimationDriver> {
    let targets = circle_targets(layout, params);
    let scales = [1.0; SHAPE_COUNT];
    Box::new(
        transition("reset-circle", params.transition_duration, targets, scales).on_complete(
            move |stage| {
                snap(stage, &targets, &scales);
                Some(then(&*stage))
            },
        ),
    )
}

/// Wave along the horizontal line. Dot 0 starts bobbing at once; each next
/// dot joins when its predecessor's bob passes the activation threshold.
pub fn listen(stage: &Stage, params: &DotsParams) -> Box<dyn AnimationDriver> {
    // A negative phase marks a dot that has not joined yet.
    let mut phases = [0.0_f32, -1.0, -1.0, -1.0];
    let amplitude = stage.layout.tile_height / 2.0;
    let center_y = stage.layout.pivot.y;
    let step = params.listen_phase_step;
    let threshold = params.listen_activation_threshold;

    Box::new(ContinuousDriver::new("listen").on_tick(move |_, stage| {
        for i in 0..SHAPE_COUNT {
            if phases[i] < 0.0 {
                continue;
            }
            let bob = phases[i].sin();
            let shape = &mut stage.shapes[i];
            shape.move_to(shape.x(), center_y + amplitude * bob);
            phases[i] = (phases[i] + step) % TAU;

            if bob > threshold && i + 1 < SHAPE_COUNT && phases[i + 1] < 0.0 {
                phases[i + 1] = 0.0;
            }
        }
    }))
}

/// Audio-reactive stretch: every tick each dot's height eases toward the
/// input level scaled by an independent random factor in `1 ± jitter`.
pub fn user_speak(params: &DotsParams) -> Box<dyn AnimationDriver> {
    let easing = params.speak_easing;
    let jitter = params.speak_jitter;

    Box::new(ContinuousDriver::new("user-speak").on_tick(move |_, stage| {
        let Stage {
            shapes,
            rng,
            input_level,
            ..
        } = stage;
        for shape in shapes.iter_mut() {
            let factor = 1.0 + rng.gen_range(-jitter..=jitter);
            let target = *input_level * factor;
            shape.set_height_clamped(lerp(shape.height(), target, easing));
        }
    }))
}

/// Continuous rotation of the ring around the pivot, reversing direction
/// every `think_reverse_period`.
pub fn think(layout: &Layout, params: &DotsParams) -> Box<dyn AnimationDriver> {
    let pivot = layout.pivot;
    let step = params.rotation_step_radians();

    Box::new(
        ContinuousDriver::new("think")
            .repeating(
                params.think_reverse_period,
                Repeat::reverse(RepeatCount::Infinite),
            )
            .on_tick(move |frame, stage| {
                let angle = if frame.reversed { -step } else { step };
                for shape in stage.shapes.iter_mut() {
                    shape.move_to_point(rotate_around_pivot(shape.position(), pivot, angle));
                }
            }),
    )
}

/// Rotating ring that pulses radially with `sin(value) * amplitude`.
pub fn reply(layout: &Layout, params: &DotsParams) -> Box<dyn AnimationDriver> {
    let pivot = layout.pivot;
    let step = params.rotation_step_radians();
    let amplitude = params.reply_amplitude;

    Box::new(
        TimedDriver::new("reply", params.reply_duration)
            .values(0.0, TAU)
            .interpolator(Interpolator::AccelerateDecelerate)
            .repeat(Repeat::restart(RepeatCount::Infinite))
            .on_tick(move |frame, stage| {
                let push = frame.value.sin() * amplitude;
                for shape in stage.shapes.iter_mut() {
                    let p = rotate_around_pivot(shape.position(), pivot, step);
                    let d = p - pivot;
                    let (sin, cos) = d.y.atan2(d.x).sin_cos();
                    shape.move_to_point(p + push * Vec2::new(cos, sin));
                }
            }),
    )
}

/// Quick sideways shake along the horizontal line, played
/// `1 + shake_repeats` times. Each tick displaces the live x by
/// `-swing * sin(value)`, so the offsets add up over the run.
pub fn incomprehension(stage: &Stage, params: &DotsParams) -> Box<dyn AnimationDriver> {
    let swing = stage.layout.tile_width / 2.0;

    Box::new(
        TimedDriver::new("incomprehension", params.shake_duration)
            .values(0.0, TAU)
            .interpolator(Interpolator::AccelerateDecelerate)
            .repeat(Repeat::restart(RepeatCount::Finite(params.shake_repeats)))
            .on_tick(move |frame, stage| {
                let offset = swing * frame.value.sin();
                for shape in stage.shapes.iter_mut() {
                    shape.move_to(shape.x() - offset, shape.y());
                }
            }),
    )
}
