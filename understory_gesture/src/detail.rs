// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The mutable record describing the current (or last) interaction.

use kurbo::{Point, Vec2};

/// State of one interaction, reused across interactions by its [`Gesture`](crate::Gesture).
#[derive(Clone, Debug, PartialEq)]
pub struct GestureDetail<E> {
    /// Position of the pointer down that started the interaction.
    pub start: Point,
    /// Most recent pointer position.
    pub current: Point,
    /// Time of the most recent sample, in milliseconds.
    pub time_stamp: f64,
    /// `true` from a successful start until the interaction ends.
    pub started: bool,
    /// `true` while this gesture holds capture.
    pub captured: bool,
    /// The most recent platform event.
    pub event: Option<E>,
}

impl<E> Default for GestureDetail<E> {
    fn default() -> Self {
        Self {
            start: Point::ZERO,
            current: Point::ZERO,
            time_stamp: 0.0,
            started: false,
            captured: false,
            event: None,
        }
    }
}

impl<E> GestureDetail<E> {
    /// Displacement from the start position.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.current - self.start
    }

    /// The state encoded by `started` and `captured`.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        match (self.started, self.captured) {
            (true, true) => GesturePhase::Captured,
            (true, false) => GesturePhase::Tracking,
            (false, _) => GesturePhase::Idle,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.started = false;
        self.captured = false;
    }
}

/// Pointer tracking state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// No interaction in progress.
    Idle,
    /// Started, waiting for the recognizer and capture.
    Tracking,
    /// Holding capture; moves stream straight to the handler.
    Captured,
}
