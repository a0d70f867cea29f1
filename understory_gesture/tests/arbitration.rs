// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tests for `understory_gesture`.
//!
//! These drive whole pointer sessions through one or more [`Gesture`]s that
//! share a controller, and check which callbacks fire and who ends up holding
//! capture.

use std::cell::RefCell;
use std::rc::Rc;

use understory_gesture::{
    Direction, Gesture, GestureConfig, GestureController, GestureDetail, GestureHandler,
    GesturePhase, Sample, StreamSet,
};

type Log = Rc<RefCell<Vec<(&'static str, &'static str)>>>;

/// Appends `(gesture, callback)` to a shared log.
struct Tagged {
    tag: &'static str,
    log: Log,
}

impl GestureHandler<Sample> for Tagged {
    fn on_start(&mut self, _: &GestureDetail<Sample>) {
        self.log.borrow_mut().push((self.tag, "start"));
    }

    fn on_move(&mut self, _: &GestureDetail<Sample>) {
        self.log.borrow_mut().push((self.tag, "move"));
    }

    fn on_end(&mut self, _: &GestureDetail<Sample>) {
        self.log.borrow_mut().push((self.tag, "end"));
    }

    fn not_captured(&mut self, _: &GestureDetail<Sample>) {
        self.log.borrow_mut().push((self.tag, "not_captured"));
    }
}

fn gesture(
    controller: &GestureController,
    config: GestureConfig,
    tag: &'static str,
    log: &Log,
) -> Gesture<Sample, Tagged, StreamSet> {
    Gesture::new(
        controller,
        &config,
        Tagged {
            tag,
            log: log.clone(),
        },
        StreamSet::empty(),
    )
}

fn calls(log: &Log) -> Vec<(&'static str, &'static str)> {
    log.borrow().clone()
}

#[test]
fn horizontal_pan_captures_after_threshold() {
    let controller = GestureController::new();
    let log = Log::default();
    let mut pan = gesture(&controller, GestureConfig::new(), "pan", &log);

    pan.touch_start(Sample::new(0.0, 0.0, 0.0)).unwrap();
    assert_eq!(pan.phase(), GesturePhase::Tracking);

    pan.touch_move(Sample::new(5.0, 0.0, 16.0)).unwrap();
    assert!(calls(&log).is_empty());
    assert_eq!(pan.phase(), GesturePhase::Tracking);

    pan.touch_move(Sample::new(20.0, 0.0, 32.0)).unwrap();
    assert_eq!(calls(&log), [("pan", "start")]);
    assert!(pan.detail().unwrap().captured);
    assert_eq!(pan.phase(), GesturePhase::Captured);
}

#[test]
fn steep_movement_never_starts_a_horizontal_pan() {
    let controller = GestureController::new();
    let log = Log::default();
    let mut pan = gesture(
        &controller,
        GestureConfig::new().direction(Direction::X).max_angle(40.0),
        "pan",
        &log,
    );

    pan.touch_start(Sample::new(0.0, 0.0, 0.0)).unwrap();
    pan.touch_move(Sample::new(5.0, 50.0, 16.0)).unwrap();
    assert_eq!(pan.recognizer().unwrap().is_gesture(), 0);

    for i in 1..20 {
        let x = 5.0 + f64::from(i) * 20.0;
        pan.touch_move(Sample::new(x, 50.0, 16.0 * f64::from(i + 1)))
            .unwrap();
        assert_eq!(pan.recognizer().unwrap().is_gesture(), 0);
    }
    assert!(calls(&log).is_empty());
    assert!(!controller.is_captured());

    pan.touch_end(Sample::new(400.0, 50.0, 400.0)).unwrap();
    assert_eq!(calls(&log), [("pan", "not_captured")]);
}

#[test]
fn higher_priority_gesture_preempts_a_captured_one() {
    let controller = GestureController::new();
    let log = Log::default();
    let mut a = gesture(
        &controller,
        GestureConfig::new().name("a").priority(10),
        "a",
        &log,
    );
    let mut b = gesture(
        &controller,
        GestureConfig::new().name("b").priority(20),
        "b",
        &log,
    );

    a.touch_start(Sample::new(0.0, 0.0, 0.0)).unwrap();
    b.touch_start(Sample::new(0.0, 0.0, 0.0)).unwrap();

    // `a` recognizes first and captures.
    a.touch_move(Sample::new(20.0, 0.0, 16.0)).unwrap();
    assert_eq!(a.phase(), GesturePhase::Captured);

    // `b` recognizes the same movement and takes over.
    b.touch_move(Sample::new(20.0, 0.0, 16.0)).unwrap();
    assert_eq!(b.phase(), GesturePhase::Captured);
    assert_eq!(controller.captured_name().as_deref(), Some("b"));
    assert!(!a.delegate().unwrap().is_capturing());

    for x in [30.0, 40.0] {
        a.touch_move(Sample::new(x, 0.0, 32.0)).unwrap();
        b.touch_move(Sample::new(x, 0.0, 32.0)).unwrap();
    }
    a.touch_end(Sample::new(40.0, 0.0, 48.0)).unwrap();
    b.touch_end(Sample::new(40.0, 0.0, 48.0)).unwrap();

    assert_eq!(
        calls(&log),
        [
            ("a", "start"),
            ("b", "start"),
            ("a", "not_captured"),
            ("b", "move"),
            ("b", "move"),
            ("b", "end"),
        ]
    );
    assert!(!controller.is_captured());
}

#[test]
fn lower_priority_gesture_loses_to_holder() {
    let controller = GestureController::new();
    let log = Log::default();
    let mut high = gesture(&controller, GestureConfig::new().priority(20), "high", &log);
    let mut low = gesture(&controller, GestureConfig::new().priority(10), "low", &log);

    high.touch_start(Sample::new(0.0, 0.0, 0.0)).unwrap();
    low.touch_start(Sample::new(0.0, 0.0, 0.0)).unwrap();
    high.touch_move(Sample::new(20.0, 0.0, 16.0)).unwrap();
    low.touch_move(Sample::new(20.0, 0.0, 16.0)).unwrap();

    assert_eq!(calls(&log), [("high", "start"), ("low", "not_captured")]);
    assert_eq!(high.phase(), GesturePhase::Captured);
    assert_eq!(low.phase(), GesturePhase::Idle);
}

#[test]
fn equal_priority_favors_the_incumbent() {
    let controller = GestureController::new();
    let log = Log::default();
    let mut first = gesture(&controller, GestureConfig::new(), "first", &log);
    let mut second = gesture(&controller, GestureConfig::new(), "second", &log);

    first.touch_start(Sample::new(0.0, 0.0, 0.0)).unwrap();
    second.touch_start(Sample::new(0.0, 0.0, 0.0)).unwrap();
    first.touch_move(Sample::new(20.0, 0.0, 16.0)).unwrap();
    second.touch_move(Sample::new(20.0, 0.0, 16.0)).unwrap();

    assert_eq!(
        calls(&log),
        [("first", "start"), ("second", "not_captured")]
    );
}

#[test]
fn perpendicular_gestures_split_by_direction() {
    let controller = GestureController::new();
    let log = Log::default();
    let mut swipe = gesture(
        &controller,
        GestureConfig::new().name("swipe"),
        "swipe",
        &log,
    );
    let mut scroll = gesture(
        &controller,
        GestureConfig::new().name("scroll").direction(Direction::Y),
        "scroll",
        &log,
    );

    for g in [&mut swipe, &mut scroll] {
        g.touch_start(Sample::new(100.0, 100.0, 0.0)).unwrap();
        g.touch_move(Sample::new(103.0, 60.0, 16.0)).unwrap();
    }

    assert_eq!(calls(&log), [("scroll", "start")]);
    assert_eq!(swipe.phase(), GesturePhase::Tracking);
    assert_eq!(scroll.phase(), GesturePhase::Captured);
}

#[test]
fn every_captured_move_reports_once() {
    let controller = GestureController::new();
    let log = Log::default();
    let mut pan = gesture(&controller, GestureConfig::new(), "pan", &log);

    pan.mouse_down(Sample::new(0.0, 0.0, 0.0)).unwrap();
    pan.mouse_move(Sample::new(20.0, 0.0, 1.0)).unwrap();
    for i in 0..10 {
        let x = 20.0 + f64::from(i);
        pan.mouse_move(Sample::new(x, 0.0, 2.0 + f64::from(i)))
            .unwrap();
        assert_eq!(pan.detail().unwrap().current.x, x);
    }
    pan.mouse_up(Sample::new(29.0, 0.0, 20.0)).unwrap();

    let log = calls(&log);
    assert_eq!(log.first(), Some(&("pan", "start")));
    assert_eq!(log.iter().filter(|c| c.1 == "move").count(), 10);
    assert_eq!(log.last(), Some(&("pan", "end")));
    assert_eq!(pan.phase(), GesturePhase::Idle);
}

#[test]
fn synthetic_mouse_after_touch_is_ignored() {
    let controller = GestureController::new();
    let log = Log::default();
    let mut pan = gesture(&controller, GestureConfig::new(), "pan", &log);

    pan.touch_start(Sample::new(0.0, 0.0, 100.0)).unwrap();
    pan.touch_move(Sample::new(20.0, 0.0, 116.0)).unwrap();
    pan.touch_end(Sample::new(20.0, 0.0, 132.0)).unwrap();

    // The browser replays the same interaction as mouse events.
    assert_eq!(pan.mouse_down(Sample::new(0.0, 0.0, 150.0)), Ok(false));
    assert_eq!(pan.mouse_move(Sample::new(20.0, 0.0, 160.0)), Ok(false));
    assert_eq!(pan.mouse_up(Sample::new(20.0, 0.0, 170.0)), Ok(false));

    assert_eq!(calls(&log), [("pan", "start"), ("pan", "end")]);
    assert_eq!(pan.phase(), GesturePhase::Idle);
}

#[test]
fn streams_follow_the_active_modality() {
    let controller = GestureController::new();
    let log = Log::default();
    let mut pan = gesture(&controller, GestureConfig::new(), "pan", &log);

    pan.mouse_down(Sample::new(0.0, 0.0, 0.0)).unwrap();
    assert_eq!(*pan.streams(), StreamSet::MOUSE_MOVE | StreamSet::MOUSE_UP);
    pan.mouse_up(Sample::new(0.0, 0.0, 10.0)).unwrap();
    assert!(pan.streams().is_empty());

    pan.touch_start(Sample::new(0.0, 0.0, 20.0)).unwrap();
    assert_eq!(*pan.streams(), StreamSet::TOUCH_MOVE | StreamSet::TOUCH_END);
    pan.touch_end(Sample::new(0.0, 0.0, 30.0)).unwrap();
    assert!(pan.streams().is_empty());
}

#[test]
fn blocked_gesture_lets_others_through() {
    let controller = GestureController::new();
    let log = Log::default();
    let mut back = gesture(
        &controller,
        GestureConfig::new().name("back").priority(50),
        "back",
        &log,
    );
    let mut list = gesture(&controller, GestureConfig::new().name("list"), "list", &log);
    let mut menu = controller.create_blocker(&["back"]);
    menu.block();

    for g in [&mut back, &mut list] {
        g.touch_start(Sample::new(0.0, 0.0, 0.0)).unwrap();
        g.touch_move(Sample::new(20.0, 0.0, 16.0)).unwrap();
    }
    assert_eq!(calls(&log), [("list", "start")]);
    assert_eq!(back.phase(), GesturePhase::Idle);
}

#[test]
fn destroyed_gesture_frees_the_slot() {
    let controller = GestureController::new();
    let log = Log::default();
    let mut a = gesture(&controller, GestureConfig::new().priority(100), "a", &log);
    let mut b = gesture(&controller, GestureConfig::new(), "b", &log);

    a.touch_start(Sample::new(0.0, 0.0, 0.0)).unwrap();
    a.touch_move(Sample::new(20.0, 0.0, 16.0)).unwrap();
    a.destroy();
    assert_eq!(controller.len(), 1);

    b.touch_start(Sample::new(0.0, 0.0, 32.0)).unwrap();
    b.touch_move(Sample::new(20.0, 0.0, 48.0)).unwrap();
    assert_eq!(b.phase(), GesturePhase::Captured);
}

#[test]
fn turning_finger_hands_capture_to_the_vertical_list() {
    let controller = GestureController::new();
    let log = Log::default();
    let mut row = gesture(&controller, GestureConfig::new().priority(10), "row", &log);
    let list_config = GestureConfig::new()
        .priority(20)
        .direction(Direction::Y)
        .threshold(30.0);
    let mut list = gesture(&controller, list_config, "list", &log);

    row.touch_start(Sample::new(0.0, 0.0, 0.0)).unwrap();
    list.touch_start(Sample::new(0.0, 0.0, 0.0)).unwrap();
    // Horizontal first: the row decides, the list has not travelled far enough.
    for (x, y, t) in [(20.0, 0.0, 16.0), (22.0, 40.0, 32.0), (22.0, 60.0, 48.0)] {
        row.touch_move(Sample::new(x, y, t)).unwrap();
        list.touch_move(Sample::new(x, y, t)).unwrap();
    }
    assert_eq!(row.touch_end(Sample::new(22.0, 60.0, 64.0)), Ok(false));
    assert_eq!(list.touch_end(Sample::new(22.0, 60.0, 64.0)), Ok(true));

    assert_eq!(
        calls(&log),
        [
            ("row", "start"),
            ("row", "move"),
            ("list", "start"),
            ("row", "not_captured"),
            ("list", "move"),
            ("list", "end"),
        ]
    );
}
