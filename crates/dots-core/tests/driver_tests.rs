// Host-side tests for the timing strategies, driven against a bare stage.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use dots_core::{
    Advance, AnimationDriver, ContinuousDriver, Frame, Interpolator, Repeat, RepeatCount, Stage,
    TimedDriver,
};

const MS10: Duration = Duration::from_millis(10);

fn recorder() -> (Rc<RefCell<Vec<Frame>>>, impl FnMut(&Frame, &mut Stage) + 'static) {
    let frames = Rc::new(RefCell::new(Vec::new()));
    let sink = frames.clone();
    (frames, move |f: &Frame, _: &mut Stage| sink.borrow_mut().push(*f))
}

#[test]
fn timed_driver_reaches_exactly_one_and_completes_once() {
    let mut stage = Stage::new(Some(1));
    let (frames, tick) = recorder();
    let completed = Rc::new(Cell::new(0));
    let done = completed.clone();
    let mut driver = TimedDriver::new("t", Duration::from_millis(50))
        .interpolator(Interpolator::Accelerate)
        .on_tick(tick)
        .on_complete(move |_| {
            done.set(done.get() + 1);
            None
        });
    driver.start();

    let mut finished = 0;
    for _ in 0..10 {
        if let Advance::Finished(next) = driver.advance(MS10, &mut stage) {
            assert!(next.is_none());
            finished += 1;
        }
    }
    assert_eq!(finished, 1);
    assert_eq!(completed.get(), 1);
    let frames = frames.borrow();
    assert_eq!(frames.len(), 5);
    assert_eq!(frames.last().map(|f| f.fraction), Some(1.0));
    assert!(frames.windows(2).all(|w| w[0].fraction < w[1].fraction));
    assert!(!driver.is_running());
}

#[test]
fn cancel_detaches_listeners_and_skips_completion() {
    let mut stage = Stage::new(Some(1));
    let (frames, tick) = recorder();
    let completed = Rc::new(Cell::new(false));
    let done = completed.clone();
    let mut driver = TimedDriver::new("t", Duration::from_millis(30))
        .on_tick(tick)
        .on_complete(move |_| {
            done.set(true);
            None
        });
    driver.start();
    assert!(matches!(driver.advance(MS10, &mut stage), Advance::Ticked));
    driver.cancel();

    for _ in 0..10 {
        assert!(matches!(driver.advance(MS10, &mut stage), Advance::Idle));
    }
    assert_eq!(frames.borrow().len(), 1);
    assert!(!completed.get());

    // Restarting a cancelled driver runs with no listeners attached.
    driver.start();
    for _ in 0..5 {
        let _ = driver.advance(MS10, &mut stage);
    }
    assert_eq!(frames.borrow().len(), 1);
    assert!(!completed.get());
}

#[test]
fn completion_hands_over_the_next_driver() {
    let mut stage = Stage::new(Some(1));
    let mut driver = TimedDriver::new("first", MS10).on_complete(|_| {
        let next: Box<dyn AnimationDriver> = Box::new(ContinuousDriver::new("second"));
        Some(next)
    });
    driver.start();
    match driver.advance(MS10, &mut stage) {
        Advance::Finished(Some(next)) => assert_eq!(next.label(), "second"),
        _ => panic!("expected a continuation"),
    }
}

#[test]
fn restart_repeats_run_the_requested_number_of_times() {
    let mut stage = Stage::new(Some(1));
    let (frames, tick) = recorder();
    let mut driver = TimedDriver::new("shake", Duration::from_millis(40))
        .interpolator(Interpolator::Linear)
        .repeat(Repeat::restart(RepeatCount::Finite(2)))
        .on_tick(tick);
    driver.start();

    let mut ticks = 0;
    while driver.is_running() {
        let _ = driver.advance(MS10, &mut stage);
        ticks += 1;
        assert!(ticks <= 12);
    }
    assert_eq!(ticks, 12);
    let frames = frames.borrow();
    let iterations: Vec<u32> = frames.iter().map(|f| f.iteration).collect();
    assert_eq!(iterations, [0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 2]);
    assert_eq!(frames[3].fraction, 0.0);
    assert_eq!(frames[11].fraction, 1.0);
}

#[test]
fn reverse_repeat_plays_odd_iterations_backwards() {
    let mut stage = Stage::new(Some(1));
    let (frames, tick) = recorder();
    let mut driver = TimedDriver::new("pingpong", Duration::from_millis(40))
        .interpolator(Interpolator::Linear)
        .repeat(Repeat::reverse(RepeatCount::Finite(1)))
        .on_tick(tick);
    driver.start();
    while driver.is_running() {
        let _ = driver.advance(MS10, &mut stage);
    }
    let frames = frames.borrow();
    let back: Vec<&Frame> = frames.iter().filter(|f| f.reversed).collect();
    assert!(!back.is_empty());
    assert!(back.windows(2).all(|w| w[0].fraction > w[1].fraction));
    assert_eq!(frames.last().map(|f| f.fraction), Some(0.0));
}

#[test]
fn timed_value_spans_the_configured_range() {
    let mut stage = Stage::new(Some(1));
    let (frames, tick) = recorder();
    let mut driver = TimedDriver::new("angle", Duration::from_millis(20))
        .values(0.0, std::f32::consts::TAU)
        .on_tick(tick);
    driver.start();
    while driver.is_running() {
        let _ = driver.advance(MS10, &mut stage);
    }
    let frames = frames.borrow();
    assert_eq!(frames.last().map(|f| f.value), Some(std::f32::consts::TAU));
}

#[test]
fn continuous_driver_reports_elapsed_and_delta() {
    let mut stage = Stage::new(Some(1));
    let (frames, tick) = recorder();
    let mut driver = ContinuousDriver::new("free").on_tick(tick);
    driver.start();
    for ms in [16, 17, 15] {
        assert!(matches!(
            driver.advance(Duration::from_millis(ms), &mut stage),
            Advance::Ticked
        ));
    }
    let frames = frames.borrow();
    let deltas: Vec<u128> = frames.iter().map(|f| f.delta.as_millis()).collect();
    assert_eq!(deltas, [16, 17, 15]);
    assert_eq!(frames[2].elapsed, Duration::from_millis(48));
    assert!(frames.iter().all(|f| !f.reversed));
}

#[test]
fn continuous_driver_with_bounded_repeats_finishes() {
    let mut stage = Stage::new(Some(1));
    let completed = Rc::new(Cell::new(false));
    let done = completed.clone();
    let mut driver = ContinuousDriver::new("bounded")
        .repeating(
            Some(Duration::from_millis(30)),
            Repeat::reverse(RepeatCount::Finite(1)),
        )
        .on_complete(move |_| {
            done.set(true);
            None
        });
    driver.start();
    let mut ticks = 0;
    while driver.is_running() {
        let _ = driver.advance(MS10, &mut stage);
        ticks += 1;
        assert!(ticks < 100);
    }
    assert!(completed.get());
    assert_eq!(ticks, 6);
}
