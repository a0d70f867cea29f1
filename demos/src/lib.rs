// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the Understory gesture demos.

use understory_gesture::{Gesture, GestureHandler, PointerStreams, Sample};

/// Milliseconds between scripted samples, roughly one frame.
pub const FRAME_MS: f64 = 16.0;

/// Feeds one touch session to every gesture, in order, like nested listeners would.
///
/// `path` is the down position followed by the move positions; the up is
/// delivered at the last position. Returns the time of the up.
pub fn touch_session<H, S>(
    gestures: &mut [&mut Gesture<Sample, H, S>],
    path: &[(f64, f64)],
    t0: f64,
) -> f64
where
    H: GestureHandler<Sample>,
    S: PointerStreams,
{
    let Some((&(x0, y0), rest)) = path.split_first() else {
        return t0;
    };
    let mut t = t0;
    for g in gestures.iter_mut() {
        g.touch_start(Sample::new(x0, y0, t))
            .expect("demo gestures are never destroyed mid-session");
    }
    for &(x, y) in rest {
        t += FRAME_MS;
        for g in gestures.iter_mut() {
            g.touch_move(Sample::new(x, y, t))
                .expect("demo gestures are never destroyed mid-session");
        }
    }
    t += FRAME_MS;
    let (x, y) = path.last().copied().unwrap_or((x0, y0));
    for g in gestures.iter_mut() {
        g.touch_end(Sample::new(x, y, t))
            .expect("demo gestures are never destroyed mid-session");
    }
    t
}
