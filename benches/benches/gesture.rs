// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_gesture::{
    Direction, Gesture, GestureConfig, GestureController, GestureDetail, GestureHandler,
    PanRecognizer, Sample,
};

/// Sums move positions so the callback is not optimized away.
#[derive(Default)]
struct Sink(f64);

impl GestureHandler<Sample> for Sink {
    fn on_move(&mut self, detail: &GestureDetail<Sample>) {
        self.0 += detail.current.x;
    }
}

fn bench_captured_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture/captured_moves");

    // Once captured, every move is a straight dispatch to `on_move`.
    for moves in [64_u32, 1_024] {
        group.throughput(Throughput::Elements(u64::from(moves)));
        group.bench_with_input(BenchmarkId::from_parameter(moves), &moves, |b, &moves| {
            let controller = GestureController::new();
            let mut pan = Gesture::new(&controller, &GestureConfig::new(), Sink::default(), ());
            let mut t = 0.0;
            b.iter(|| {
                pan.touch_start(Sample::new(0.0, 0.0, t)).unwrap();
                for i in 0..moves {
                    t += 1.0;
                    let x = 20.0 + f64::from(i);
                    pan.touch_move(Sample::new(x, 0.0, t)).unwrap();
                }
                t += 1.0;
                pan.touch_end(Sample::new(0.0, 0.0, t)).unwrap();
                black_box(pan.handler().0);
            });
        });
    }

    group.finish();
}

fn bench_contested_capture(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture/contested_capture");

    // Several gestures on nested surfaces race for the same touch.
    for competitors in [2_i32, 8, 32] {
        group.bench_with_input(
            BenchmarkId::from_parameter(competitors),
            &competitors,
            |b, &competitors| {
                let controller = GestureController::new();
                let mut gestures: Vec<_> = (0..competitors)
                    .map(|p| {
                        Gesture::new(
                            &controller,
                            &GestureConfig::new().priority(p),
                            Sink::default(),
                            (),
                        )
                    })
                    .collect();
                let mut t = 0.0;
                b.iter(|| {
                    t += 1.0;
                    for g in &mut gestures {
                        g.touch_start(Sample::new(0.0, 0.0, t)).unwrap();
                    }
                    for g in &mut gestures {
                        g.touch_move(Sample::new(30.0, 0.0, t)).unwrap();
                    }
                    for g in &mut gestures {
                        g.touch_end(Sample::new(30.0, 0.0, t)).unwrap();
                    }
                    black_box(controller.is_captured());
                });
            },
        );
    }

    group.finish();
}

fn bench_pan_detect(c: &mut Criterion) {
    let mut pan = PanRecognizer::new(Direction::X, 15.0, 40.0);
    let below = kurbo::Point::new(5.0, 3.0);

    c.bench_function("gesture/pan_detect_below_threshold", |b| {
        pan.start(kurbo::Point::ZERO);
        b.iter(|| black_box(pan.detect(black_box(below))));
    });
}

criterion_group!(
    benches,
    bench_captured_moves,
    bench_contested_capture,
    bench_pan_detect
);
criterion_main!(benches);
