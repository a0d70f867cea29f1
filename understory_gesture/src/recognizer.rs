// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recognizers: classify a pointer trajectory as a gesture shape.
//!
//! A recognizer is seeded with [`Recognizer::start`] on pointer down, fed every
//! move with [`Recognizer::detect`], and asked for a verdict with
//! [`Recognizer::is_gesture`] once `detect` reports enough evidence.
//!
//! ## Pan
//!
//! [`PanRecognizer`] waits until the pointer has travelled at least
//! `threshold` pixels from the origin (inclusive), then latches a verdict from
//! the angle between the displacement and the configured [`Direction`]:
//!
//! - `1`: within `max_angle` degrees of the positive axis.
//! - `-1`: within `max_angle` degrees of the negative axis.
//! - `0`: too far off axis. The verdict stays `0` until the next `start`.
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::recognizer::{Direction, PanRecognizer};
//!
//! let mut pan = PanRecognizer::new(Direction::X, 15.0, 40.0);
//! pan.start(Point::new(0.0, 0.0));
//!
//! assert!(!pan.detect(Point::new(5.0, 0.0)));
//! assert!(pan.detect(Point::new(-20.0, 0.0)));
//! assert_eq!(pan.is_gesture(), -1);
//! ```

use core::f64::consts::PI;
use core::fmt;
use core::str::FromStr;

use kurbo::{Point, Vec2};

use crate::error::GestureError;

/// Slack on the cosine comparison so an angle exactly at the limit passes
/// despite rounding in `cos` and `hypot`.
const COSINE_EPSILON: f64 = 1e-9;

/// Axis a directional recognizer is constrained to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Horizontal movement.
    #[default]
    X,
    /// Vertical movement.
    Y,
}

impl Direction {
    /// Returns the tag for this direction, `"x"` or `"y"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
        }
    }
}

impl FromStr for Direction {
    type Err = GestureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            _ => Err(GestureError::UnknownDirection),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selects which [`Recognizer`] variant a gesture is built with.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RecognizerKind {
    /// Directional, angle-constrained pan.
    #[default]
    Pan,
}

impl RecognizerKind {
    /// Returns the tag for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pan => "pan",
        }
    }
}

impl FromStr for RecognizerKind {
    type Err = GestureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pan" => Ok(Self::Pan),
            _ => Err(GestureError::UnknownRecognizer),
        }
    }
}

/// Pan recognizer constrained to one axis.
#[derive(Clone, Debug)]
pub struct PanRecognizer {
    direction: Direction,
    threshold_sq: f64,
    max_cosine: f64,
    origin: Point,
    verdict: i32,
    dirty: bool,
}

impl PanRecognizer {
    /// Creates a pan recognizer.
    ///
    /// `threshold` is in pixels; `max_angle` is in degrees from `direction`.
    #[must_use]
    pub fn new(direction: Direction, threshold: f64, max_angle: f64) -> Self {
        let radians = max_angle * (PI / 180.0);
        Self {
            direction,
            threshold_sq: threshold * threshold,
            max_cosine: Vec2::from_angle(radians).x - COSINE_EPSILON,
            origin: Point::ZERO,
            verdict: 0,
            dirty: false,
        }
    }

    /// The configured axis.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Reseeds the recognizer at `pos`, clearing any previous verdict.
    pub fn start(&mut self, pos: Point) {
        self.origin = pos;
        self.verdict = 0;
        self.dirty = true;
    }

    /// Feeds the current position; returns `true` once, the first time the
    /// displacement reaches the threshold since [`start`](Self::start).
    pub fn detect(&mut self, pos: Point) -> bool {
        if !self.dirty {
            return false;
        }
        let delta = pos - self.origin;
        let distance_sq = delta.hypot2();
        // A zero displacement never qualifies, even with a zero threshold.
        if distance_sq <= 0.0 || distance_sq < self.threshold_sq {
            return false;
        }
        let distance = delta.hypot();
        let cosine = match self.direction {
            Direction::X => delta.x / distance,
            Direction::Y => delta.y / distance,
        };
        self.verdict = if cosine >= self.max_cosine {
            1
        } else if cosine <= -self.max_cosine {
            -1
        } else {
            0
        };
        self.dirty = false;
        true
    }

    /// Returns the latched verdict: `1`, `-1`, or `0` for no gesture.
    #[must_use]
    pub fn is_gesture(&self) -> i32 {
        self.verdict
    }
}

/// A recognizer of any supported kind.
#[derive(Clone, Debug)]
pub enum Recognizer {
    /// See [`PanRecognizer`].
    Pan(PanRecognizer),
}

impl Recognizer {
    /// Builds the recognizer selected by `kind`.
    #[must_use]
    pub fn new(kind: RecognizerKind, direction: Direction, threshold: f64, max_angle: f64) -> Self {
        match kind {
            RecognizerKind::Pan => Self::Pan(PanRecognizer::new(direction, threshold, max_angle)),
        }
    }

    /// The kind this recognizer was built from.
    #[must_use]
    pub fn kind(&self) -> RecognizerKind {
        match self {
            Self::Pan(_) => RecognizerKind::Pan,
        }
    }

    /// Reseeds transient state at `pos`.
    pub fn start(&mut self, pos: Point) {
        match self {
            Self::Pan(pan) => pan.start(pos),
        }
    }

    /// Returns `true` when there is enough evidence to ask for a verdict.
    pub fn detect(&mut self, pos: Point) -> bool {
        match self {
            Self::Pan(pan) => pan.detect(pos),
        }
    }

    /// Returns the signed classification code; `0` means not a gesture.
    #[must_use]
    pub fn is_gesture(&self) -> i32 {
        match self {
            Self::Pan(pan) => pan.is_gesture(),
        }
    }
}
