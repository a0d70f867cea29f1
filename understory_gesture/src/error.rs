// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for gesture construction and event delivery.
//!
//! Losing arbitration is not an error: a rejected `can_start`, a failed
//! start or a failed capture are reported through the handler's
//! `not_captured` callback and boolean return values.

use core::fmt;

/// Errors reported by gesture construction and event delivery.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GestureError {
    /// An event was delivered to a [`Gesture`](crate::Gesture) after
    /// [`Gesture::destroy`](crate::Gesture::destroy).
    Destroyed,
    /// The recognizer tag did not name a known recognizer kind.
    UnknownRecognizer,
    /// The direction tag was neither `"x"` nor `"y"`.
    UnknownDirection,
}

impl fmt::Display for GestureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Destroyed => f.write_str("gesture used after destroy"),
            Self::UnknownRecognizer => f.write_str("unknown recognizer kind"),
            Self::UnknownDirection => f.write_str("unknown direction, expected \"x\" or \"y\""),
        }
    }
}

impl core::error::Error for GestureError {}
