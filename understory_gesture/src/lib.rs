// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture --heading-base-level=0

//! Understory Gesture: arbitrate gestures that compete for the same pointer.
//!
//! Several gesture-driven interactions (swipe to dismiss, drag to reorder,
//! scroll) often sit on overlapping or nested surfaces and observe the same
//! pointer stream. This crate decides which one of them owns a pointer session
//! and turns raw pointer samples into gesture callbacks for that one owner.
//!
//! ## Pieces
//!
//! - [`GestureController`]: a registry of named, prioritized gestures with a
//!   single capture slot. At most one gesture holds capture at a time; a
//!   strictly higher priority preempts the holder.
//! - [`GestureDelegate`]: one registration, with `start`, `capture`,
//!   `release`, and `destroy`.
//! - [`BlockerDelegate`]: disables gestures by name while blocked.
//! - [`Recognizer`]: classifies a trajectory. [`PanRecognizer`] accepts
//!   movement along one axis within an angle tolerance once it exceeds a
//!   pixel threshold.
//! - [`Gesture`]: the pointer state machine (idle → tracking → captured)
//!   that owns one recognizer and one delegate and reports to a
//!   [`GestureHandler`].
//!
//! ## Flow
//!
//! 1) Pointer down: the handler's `can_start` is consulted, the delegate
//!    starts, and the recognizer is seeded.
//! 2) Pointer move: samples feed the recognizer until it reports a direction,
//!    then capture is requested. Winning fires `on_start`; losing fires
//!    `not_captured`. Once captured, every move fires `on_move`.
//! 3) Pointer up: capture is released and `on_end` (or `not_captured`) fires.
//!
//! ## Example
//!
//! ```rust
//! use understory_gesture::{
//!     Direction, Gesture, GestureCallbacks, GestureConfig, GestureController, Sample,
//! };
//!
//! let controller = GestureController::new();
//!
//! let mut swipe = Gesture::new(
//!     &controller,
//!     &GestureConfig::new().name("swipe").priority(10),
//!     (),
//!     (),
//! );
//! let mut scroll = Gesture::new(
//!     &controller,
//!     &GestureConfig::new()
//!         .name("scroll")
//!         .priority(20)
//!         .direction(Direction::Y),
//!     GestureCallbacks::new(),
//!     (),
//! );
//!
//! // Both surfaces see the same physical touch.
//! swipe.touch_start(Sample::new(0.0, 0.0, 0.0)).unwrap();
//! swipe.touch_move(Sample::new(30.0, 2.0, 16.0)).unwrap();
//! scroll.touch_start(Sample::new(0.0, 0.0, 0.0)).unwrap();
//! scroll.touch_move(Sample::new(30.0, 2.0, 16.0)).unwrap();
//!
//! // The horizontal movement matches `swipe` only.
//! assert_eq!(controller.captured_name().as_deref(), Some("swipe"));
//! ```
//!
//! ## Threading
//!
//! Everything is single-threaded and synchronous: callbacks run inside the
//! event call that triggered them, and controller state is shared through
//! `Rc`. Create one controller per interactive root.
//!
//! ## Features
//!
//! - `std` (default): enables Kurbo's `std` support and a wall-clock fallback
//!   for samples without a timestamp.
//! - `libm`: `no_std` float math through Kurbo.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod controller;
mod detail;
mod error;
pub mod gesture;
mod handler;
pub mod pointer;
pub mod recognizer;

pub use controller::{BlockerDelegate, GestureController, GestureDelegate, GestureId};
pub use detail::{GestureDetail, GesturePhase};
pub use error::GestureError;
pub use gesture::{Gesture, GestureConfig};
pub use handler::{GestureCallbacks, GestureHandler};
pub use pointer::{
    MOUSE_WAIT_MS, ModalityDebounce, PointerSample, PointerSource, PointerStream, PointerStreams,
    Sample, StreamSet,
};
pub use recognizer::{Direction, PanRecognizer, Recognizer, RecognizerKind};
