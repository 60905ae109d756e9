// Host-side tests for the state machine and the per-state choreographies.

mod common;

use std::cell::Cell;
use std::f32::consts::TAU;
use std::rc::Rc;

use common::{finish_reset, settle, FRAME};
use dots_core::choreography::{circle_targets, horizontal_targets, idle_targets};
use dots_core::{
    rotate_around_pivot, DotsEngine, DotsParams, DrawCommand, Interpolator, Phase, Rgb, State,
    BLUE, GREEN, RED, YELLOW,
};
use glam::Vec2;

fn engine_at(size: u32) -> DotsEngine {
    let mut engine = DotsEngine::new();
    engine.init(size, size);
    engine
}

fn positions(engine: &DotsEngine) -> Vec<Vec2> {
    engine.shapes().iter().map(|s| s.position()).collect()
}

#[test]
fn init_derives_tile_grid_and_pivot() {
    let mut engine = DotsEngine::new();
    engine.init(900, 450);
    let layout = engine.layout();
    assert_eq!(layout.tile_width, 100.0);
    assert_eq!(layout.tile_height, 50.0);
    let expected = Vec2::new(
        4.5 * layout.tile_width - layout.tile_width / 2.0,
        4.5 * layout.tile_height - layout.tile_height / 2.0,
    );
    assert_eq!(layout.pivot, expected);
    assert_eq!(layout.pivot, Vec2::new(400.0, 200.0));
    for shape in engine.shapes() {
        assert_eq!(shape.base_size(), 100.0);
    }
    assert_eq!(engine.state(), State::Idle);
}

#[test]
fn idle_transition_lands_exactly_on_targets() {
    let mut engine = engine_at(900);
    assert_eq!(engine.phase(), Phase::Active);
    engine.set_state(State::Idle);
    settle(&mut engine);
    assert_eq!(engine.phase(), Phase::Settled);

    let blue = &engine.shapes()[0];
    assert_eq!(blue.position(), Vec2::new(200.0, 200.0));
    assert_eq!(blue.scale(), 3.0);

    let (targets, scales) = idle_targets(engine.layout());
    for (i, shape) in engine.shapes().iter().enumerate() {
        assert_eq!(shape.position(), targets[i], "shape {i}");
        assert_eq!(shape.scale(), scales[i], "shape {i}");
        assert_eq!(shape.height(), shape.base_size(), "shape {i}");
    }
}

#[test]
fn shapes_keep_palette_order() {
    let engine = engine_at(90);
    let colors: Vec<Rgb> = engine.shapes().iter().map(|s| s.color()).collect();
    assert_eq!(colors, [BLUE, RED, YELLOW, GREEN].map(Rgb::from_hex).to_vec());
}

#[test]
fn repeated_state_request_is_a_no_op() {
    for state in State::ALL {
        let mut engine = engine_at(900);
        settle(&mut engine);
        engine.set_state(state);
        for _ in 0..10 {
            engine.tick(FRAME);
        }
        let poses = positions(&engine);
        let phase = engine.phase();
        let driver = engine.active_driver();

        engine.set_state(state);

        assert_eq!(positions(&engine), poses, "{state}");
        assert_eq!(engine.phase(), phase, "{state}");
        assert_eq!(engine.active_driver(), driver, "{state}");
    }
}

#[test]
fn circle_states_reset_before_choreography() {
    let mut engine = engine_at(900);
    engine.set_state(State::Thinking);
    assert_eq!(engine.phase(), Phase::Resetting);
    assert_eq!(engine.active_driver(), Some("reset-circle"));

    finish_reset(&mut engine);
    assert_eq!(engine.phase(), Phase::Active);
    assert_eq!(engine.active_driver(), Some("think"));

    // The finishing tick snaps; the choreography has not ticked yet.
    let targets = circle_targets(engine.layout(), engine.params());
    assert_eq!(positions(&engine), targets.to_vec());
    for shape in engine.shapes() {
        assert_eq!(shape.scale(), 1.0);
        assert_eq!(shape.height(), shape.base_size());
    }
}

#[test]
fn horizontal_states_reset_before_choreography() {
    for (state, label) in [
        (State::Listening, "listen"),
        (State::UserSpeaking, "user-speak"),
        (State::Incomprehension, "incomprehension"),
    ] {
        let mut engine = engine_at(900);
        engine.set_state(state);
        assert_eq!(engine.active_driver(), Some("reset-horizontal"), "{state}");
        finish_reset(&mut engine);
        assert_eq!(engine.active_driver(), Some(label), "{state}");
        let targets = horizontal_targets(engine.layout());
        assert_eq!(positions(&engine), targets.to_vec(), "{state}");
    }
}

#[test]
fn switching_mid_reset_drops_the_pending_choreography() {
    let mut engine = engine_at(900);
    engine.set_state(State::Listening);
    for _ in 0..5 {
        engine.tick(FRAME);
    }
    engine.set_state(State::Replying);
    assert_eq!(engine.active_driver(), Some("reset-circle"));
    finish_reset(&mut engine);
    assert_eq!(engine.active_driver(), Some("reply"));
    let targets = circle_targets(engine.layout(), engine.params());
    assert_eq!(positions(&engine), targets.to_vec());
}

#[test]
fn listening_dots_join_one_after_another() {
    let mut engine = engine_at(900);
    engine.set_state(State::Listening);
    finish_reset(&mut engine);
    let center_y = engine.layout().pivot.y;

    let step = engine.params().listen_phase_step;
    let bound = ((0.5_f32).acos() / step).ceil() as usize;

    let mut still = 0;
    loop {
        engine.tick(FRAME);
        let shapes = engine.shapes();
        if shapes[1].y() != center_y {
            break;
        }
        still += 1;
        assert!(still < bound, "dot 1 never joined");
        // Dots further down the line wait for dot 1.
        assert_eq!(shapes[2].y(), center_y);
        assert_eq!(shapes[3].y(), center_y);
    }
    assert!(engine.shapes()[0].y() != center_y);

    let mut last = engine.shapes()[1].y();
    for _ in 0..5 {
        engine.tick(FRAME);
        let y = engine.shapes()[1].y();
        assert_ne!(y, last, "dot 1 stopped after joining");
        last = y;
    }
}

#[test]
fn listening_bob_stays_within_half_a_tile() {
    let mut engine = engine_at(900);
    engine.set_state(State::Listening);
    finish_reset(&mut engine);
    let center_y = engine.layout().pivot.y;
    let amplitude = engine.layout().tile_height / 2.0;
    for _ in 0..400 {
        engine.tick(FRAME);
        for shape in engine.shapes() {
            assert!((shape.y() - center_y).abs() <= amplitude + 1e-3);
        }
    }
}

#[test]
fn user_speaking_heights_chase_jittered_level() {
    let mut engine = DotsEngine::with_seed(DotsParams::default(), 7).expect("default params");
    engine.init(90, 90);
    engine.set_input_level(100.0);
    engine.set_state(State::UserSpeaking);
    finish_reset(&mut engine);

    let easing = engine.params().speak_easing;
    for _ in 0..60 {
        let before: Vec<f32> = engine.shapes().iter().map(|s| s.height()).collect();
        engine.tick(FRAME);
        for (shape, prev) in engine.shapes().iter().zip(before) {
            let low = prev + easing * (50.0 - prev);
            let high = prev + easing * (150.0 - prev);
            let h = shape.height();
            assert!(h >= shape.base_size());
            assert!(h >= low.max(shape.base_size()) - 1e-3, "{h} < {low}");
            assert!(h <= high + 1e-3, "{h} > {high}");
        }
    }
    let heights: Vec<f32> = engine.shapes().iter().map(|s| s.height()).collect();
    assert!(heights.iter().any(|h| *h != heights[0]), "jitter not independent");
    assert!(heights.iter().all(|h| (40.0..=160.0).contains(h)), "{heights:?}");
}

#[test]
fn user_speaking_ignores_negative_level() {
    let mut engine = DotsEngine::with_seed(DotsParams::default(), 3).expect("default params");
    engine.init(90, 90);
    engine.set_input_level(-40.0);
    engine.set_state(State::UserSpeaking);
    finish_reset(&mut engine);
    for _ in 0..30 {
        engine.tick(FRAME);
    }
    for shape in engine.shapes() {
        assert_eq!(shape.height(), shape.base_size());
    }
}

#[test]
fn thinking_rotates_each_dot_about_the_pivot() {
    let mut engine = engine_at(900);
    engine.set_state(State::Thinking);
    finish_reset(&mut engine);
    let pivot = engine.layout().pivot;
    let step = engine.params().rotation_step_radians();

    let before = positions(&engine);
    engine.tick(FRAME);
    for (shape, prev) in engine.shapes().iter().zip(before) {
        assert_eq!(shape.position(), rotate_around_pivot(prev, pivot, step));
    }
}

#[test]
fn thinking_reverses_after_its_period() {
    let params = DotsParams {
        think_reverse_period: Some(std::time::Duration::from_millis(160)),
        ..DotsParams::default()
    };
    let mut engine = DotsEngine::with_params(params).expect("valid params");
    engine.init(900, 900);
    engine.set_state(State::Thinking);
    finish_reset(&mut engine);
    let pivot = engine.layout().pivot;
    let step = engine.params().rotation_step_radians();

    // Nine frames run forward; the tenth completes the period and turns back.
    for _ in 0..9 {
        engine.tick(FRAME);
    }
    let before = positions(&engine);
    engine.tick(FRAME);
    for (shape, prev) in engine.shapes().iter().zip(&before) {
        assert_eq!(shape.position(), rotate_around_pivot(*prev, pivot, -step));
    }
}

#[test]
fn replying_ring_pulses_without_drifting() {
    let mut engine = engine_at(900);
    engine.set_state(State::Replying);
    finish_reset(&mut engine);
    let pivot = engine.layout().pivot;
    let radius = engine.layout().tile_width * engine.params().circle_radius_tiles;

    // 25 frames of 16ms make one 400ms pulse.
    let mut widest: f32 = 0.0;
    for _ in 0..10 {
        for _ in 0..25 {
            engine.tick(FRAME);
            for shape in engine.shapes() {
                widest = widest.max((shape.position() - pivot).length() - radius);
            }
        }
        for shape in engine.shapes() {
            let r = (shape.position() - pivot).length();
            assert!((r - radius).abs() < 0.5, "radius drifted to {r}");
        }
    }
    assert!(widest > 1.0, "ring never pulsed");
    assert_eq!(engine.active_driver(), Some("reply"));
}

#[test]
fn incomprehension_shake_accumulates_on_the_live_x() {
    let mut engine = engine_at(900);
    engine.set_state(State::Incomprehension);
    finish_reset(&mut engine);
    let line = horizontal_targets(engine.layout());
    let swing = engine.layout().tile_width / 2.0;
    let shake = |raw: f32| swing * (TAU * Interpolator::AccelerateDecelerate.evaluate(raw)).sin();

    let step = std::time::Duration::from_millis(10);
    engine.tick(step);
    let first: Vec<f32> = engine.shapes().iter().map(|s| s.x()).collect();
    engine.tick(step);
    for ((shape, target), x1) in engine.shapes().iter().zip(line).zip(first) {
        assert!((x1 - (target.x - shake(0.1))).abs() < 1e-3);
        assert!((shape.x() - (x1 - shake(0.2))).abs() < 1e-3);
        assert_eq!(shape.y(), target.y);
    }

    settle(&mut engine);
    assert_eq!(engine.phase(), Phase::Settled);
    for (shape, target) in engine.shapes().iter().zip(line) {
        assert_eq!(shape.y(), target.y);
    }
}

#[test]
fn incomprehension_plays_five_shakes() {
    let mut engine = engine_at(900);
    engine.set_state(State::Incomprehension);
    finish_reset(&mut engine);
    let mut ticks = 0;
    while engine.is_animating() {
        engine.tick(std::time::Duration::from_millis(10));
        ticks += 1;
    }
    // 1 + 4 repeats of 100ms at 10ms per frame.
    assert_eq!(ticks, 50);
}

#[test]
fn redraw_is_requested_once_per_changing_tick() {
    let mut engine = engine_at(900);
    let count = Rc::new(Cell::new(0));
    let seen = count.clone();
    engine.set_redraw_listener(move || seen.set(seen.get() + 1));

    assert!(engine.tick(FRAME));
    assert_eq!(count.get(), 1);
    settle(&mut engine);
    let after_settle = count.get();
    assert!(!engine.tick(FRAME));
    assert_eq!(count.get(), after_settle);
}

#[test]
fn state_requested_before_init_waits_for_the_surface() {
    let mut engine = DotsEngine::new();
    engine.set_state(State::Thinking);
    assert_eq!(engine.state(), State::Thinking);
    assert_eq!(engine.phase(), Phase::Uninitialized);
    assert!(!engine.tick(FRAME));
    assert!(!engine.is_animating());

    engine.init(900, 900);
    assert_eq!(engine.state(), State::Idle);
    assert_eq!(engine.active_driver(), Some("idle"));
}

#[test]
fn unknown_is_never_re_entered() {
    let mut engine = engine_at(900);
    engine.set_state(State::Unknown);
    assert_eq!(engine.state(), State::Idle);
}

#[test]
fn resize_relays_out_in_idle() {
    let mut engine = engine_at(900);
    settle(&mut engine);
    engine.set_state(State::Thinking);
    engine.tick(FRAME);
    engine.init(450, 450);
    assert_eq!(engine.state(), State::Idle);
    settle(&mut engine);
    let blue = &engine.shapes()[0];
    assert_eq!(blue.base_size(), 50.0);
    assert_eq!(blue.position(), Vec2::new(100.0, 100.0));
}

#[test]
fn render_paints_dots_over_optional_grid() {
    let mut engine = engine_at(900);
    settle(&mut engine);

    let mut plain: Vec<DrawCommand> = Vec::new();
    engine.render(&mut plain);
    assert_eq!(plain.len(), 4);
    match &plain[0] {
        DrawCommand::RoundRect { rect, radius, color } => {
            assert_eq!(*color, Rgb::from_hex(BLUE));
            assert_eq!((rect.x, rect.y), (200.0, 200.0));
            assert_eq!((rect.w, rect.h), (300.0, 300.0));
            assert_eq!(*radius, 150.0);
        }
        other => panic!("expected a dot, got {other:?}"),
    }

    engine.set_debug_grid(true);
    let mut gridded: Vec<DrawCommand> = Vec::new();
    engine.render(&mut gridded);
    let lines = gridded
        .iter()
        .filter(|c| matches!(c, DrawCommand::Line { .. }))
        .count();
    assert_eq!(lines, 20);
    assert!(matches!(gridded.last(), Some(DrawCommand::RoundRect { .. })));
}

#[test]
fn listening_phase_wraps_within_a_turn() {
    // One full turn at the default step takes ~90 ticks; run well past it.
    let mut engine = engine_at(900);
    engine.set_state(State::Listening);
    finish_reset(&mut engine);
    let turns = (TAU / engine.params().listen_phase_step).ceil() as usize;
    for _ in 0..turns * 3 {
        engine.tick(FRAME);
    }
    assert_eq!(engine.active_driver(), Some("listen"));
}
