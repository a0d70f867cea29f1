// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture arbitration: a swipe-to-dismiss row nested inside a scrolling list.
//!
//! Both gestures observe the same touch. The row pans horizontally, the list
//! pans vertically, and the list has the higher priority. The scripted
//! sessions show each gesture winning on its own axis, the list preempting a
//! captured row, and a menu blocker disabling the row.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example gesture_arbitration`

use understory_demos::touch_session;
use understory_gesture::{
    Direction, Gesture, GestureCallbacks, GestureConfig, GestureController, GestureDetail,
    GesturePhase, Sample, StreamSet,
};

fn report(tag: &'static str, what: &'static str) -> impl FnMut(&GestureDetail<Sample>) {
    move |d: &GestureDetail<Sample>| {
        let delta = d.delta();
        println!(
            "  {tag:<5} {what:<13} at ({:>5.1}, {:>5.1}) delta ({:>5.1}, {:>5.1})",
            d.current.x, d.current.y, delta.x, delta.y
        );
    }
}

fn callbacks(tag: &'static str) -> GestureCallbacks<'static, Sample> {
    GestureCallbacks::new()
        .with_on_start(report(tag, "start"))
        .with_on_move(report(tag, "move"))
        .with_on_end(report(tag, "end"))
        .with_not_captured(report(tag, "not captured"))
}

type Demo = Gesture<Sample, GestureCallbacks<'static, Sample>, StreamSet>;

fn main() {
    env_logger::init();

    let controller = GestureController::new();
    let mut row: Demo = Gesture::new(
        &controller,
        &GestureConfig::new().name("row").priority(10),
        callbacks("row"),
        StreamSet::empty(),
    );
    let mut list: Demo = Gesture::new(
        &controller,
        &GestureConfig::new()
            .name("list")
            .priority(20)
            .direction(Direction::Y)
            .threshold(30.0)
            .disable_scroll(true),
        callbacks("list"),
        StreamSet::empty(),
    );

    println!("horizontal drag:");
    touch_session(
        &mut [&mut row, &mut list],
        &[(0.0, 0.0), (6.0, 1.0), (24.0, 2.0), (60.0, 3.0)],
        0.0,
    );

    println!("vertical drag:");
    touch_session(
        &mut [&mut row, &mut list],
        &[(0.0, 0.0), (1.0, 8.0), (2.0, 30.0), (2.0, 90.0)],
        1_000.0,
    );

    println!("row captures, then the finger turns vertical and the list preempts:");
    row.touch_start(Sample::new(0.0, 0.0, 2_000.0)).unwrap();
    list.touch_start(Sample::new(0.0, 0.0, 2_000.0)).unwrap();
    // The list has not travelled its threshold yet, so only the row decides here.
    row.touch_move(Sample::new(20.0, 0.0, 2_016.0)).unwrap();
    list.touch_move(Sample::new(20.0, 0.0, 2_016.0)).unwrap();
    row.touch_move(Sample::new(22.0, 40.0, 2_032.0)).unwrap();
    list.touch_move(Sample::new(22.0, 40.0, 2_032.0)).unwrap();
    println!(
        "  captured by {:?}, scroll disabled: {}",
        controller.captured_name(),
        controller.is_scroll_disabled()
    );
    row.touch_move(Sample::new(22.0, 60.0, 2_048.0)).unwrap();
    list.touch_move(Sample::new(22.0, 60.0, 2_048.0)).unwrap();
    row.touch_end(Sample::new(22.0, 60.0, 2_064.0)).unwrap();
    list.touch_end(Sample::new(22.0, 60.0, 2_064.0)).unwrap();
    assert_eq!(row.phase(), GesturePhase::Idle);

    println!("menu open, row blocked:");
    let mut menu = controller.create_blocker(&["row"]);
    menu.block();
    touch_session(
        &mut [&mut row, &mut list],
        &[(0.0, 0.0), (40.0, 0.0)],
        3_000.0,
    );
    menu.unblock();

    row.destroy();
    list.destroy();
    println!("registered gestures after teardown: {}", controller.len());
}
