// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer tracking state machine driving one recognizer and one delegate.
//!
//! ## States
//!
//! - **Idle**: waiting for a pointer down.
//! - **Tracking**: the delegate started; moves are fed to the recognizer until
//!   it reports a direction, at which point capture is attempted.
//! - **Captured**: moves go straight to [`GestureHandler::on_move`].
//!
//! A pointer up ends the session with [`GestureHandler::on_end`] when captured
//! and [`GestureHandler::not_captured`] otherwise. Losing the capture
//! race, or being preempted by a higher-priority gesture, also reports
//! `not_captured` and returns to idle.
//!
//! ## Modalities
//!
//! Move and up streams are only enabled for the modality that started the
//! session. Mouse samples within [`MOUSE_WAIT_MS`](crate::MOUSE_WAIT_MS) of
//! the last touch sample are ignored. A down from the other modality while a
//! session is live moves the session's streams over to that modality; the
//! session itself carries on.
//!
//! ```
//! use understory_gesture::{Gesture, GestureCallbacks, GestureConfig, GestureController, Sample};
//!
//! let controller = GestureController::new();
//! let mut started = 0;
//! {
//!     let callbacks = GestureCallbacks::new().with_on_start(|_| started += 1);
//!     let mut pan = Gesture::new(&controller, &GestureConfig::default(), callbacks, ());
//!
//!     pan.touch_start(Sample::new(0.0, 0.0, 0.0)).unwrap();
//!     pan.touch_move(Sample::new(5.0, 0.0, 16.0)).unwrap();
//!     pan.touch_move(Sample::new(20.0, 0.0, 32.0)).unwrap();
//!     assert!(controller.is_captured());
//!     pan.touch_end(Sample::new(20.0, 0.0, 48.0)).unwrap();
//! }
//! assert_eq!(started, 1);
//! ```

use alloc::string::String;

use crate::controller::{GestureController, GestureDelegate};
use crate::detail::{GestureDetail, GesturePhase};
use crate::error::GestureError;
use crate::handler::GestureHandler;
use crate::pointer::{
    ModalityDebounce, PointerSample, PointerSource, PointerStream, PointerStreams,
};
use crate::recognizer::{Direction, Recognizer, RecognizerKind};

/// Construction-time options for a [`Gesture`].
#[derive(Clone, Debug, PartialEq)]
pub struct GestureConfig {
    /// Recognizer variant.
    pub kind: RecognizerKind,
    /// Name used for arbitration and blocking; empty is anonymous.
    pub name: String,
    /// Arbitration priority; higher preempts lower.
    pub priority: i32,
    /// Axis the recognizer is constrained to.
    pub direction: Direction,
    /// Maximum angle from `direction`, in degrees.
    pub max_angle: f64,
    /// Minimum travel before a verdict, in pixels.
    pub threshold: f64,
    /// Whether capturing should suppress default scrolling.
    pub disable_scroll: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            kind: RecognizerKind::Pan,
            name: String::new(),
            priority: 0,
            direction: Direction::X,
            max_angle: 40.0,
            threshold: 15.0,
            disable_scroll: false,
        }
    }
}

impl GestureConfig {
    /// A pan gesture with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the recognizer kind.
    #[must_use]
    pub fn kind(mut self, kind: RecognizerKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the gesture name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the arbitration priority.
    #[must_use]
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the recognizer axis.
    #[must_use]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the maximum angle from the axis, in degrees.
    #[must_use]
    pub fn max_angle(mut self, degrees: f64) -> Self {
        self.max_angle = degrees;
        self
    }

    /// Sets the travel threshold, in pixels.
    #[must_use]
    pub fn threshold(mut self, pixels: f64) -> Self {
        self.threshold = pixels;
        self
    }

    /// Sets whether capture suppresses default scrolling.
    #[must_use]
    pub fn disable_scroll(mut self, disable: bool) -> Self {
        self.disable_scroll = disable;
        self
    }

    fn recognizer(&self) -> Recognizer {
        Recognizer::new(self.kind, self.direction, self.threshold, self.max_angle)
    }
}

#[derive(Debug)]
struct Live<E> {
    recognizer: Recognizer,
    delegate: GestureDelegate,
    detail: GestureDetail<E>,
}

impl<E> Live<E> {
    /// Ends the session on pointer up.
    fn finish(&mut self, handler: &mut impl GestureHandler<E>) {
        // A preempted gesture still has `captured` set but no longer holds the slot.
        let holding = self.detail.captured && self.delegate.is_capturing();
        self.delegate.release();
        if holding {
            log::trace!("{}: end", self.delegate.id());
            handler.on_end(&self.detail);
        } else {
            handler.not_captured(&self.detail);
        }
        self.detail.reset();
    }

    /// Drops out of the session without capture.
    fn abort(&mut self, handler: &mut impl GestureHandler<E>) {
        self.detail.reset();
        self.delegate.release();
        handler.not_captured(&self.detail);
    }
}

fn toggle(streams: &mut impl PointerStreams, source: PointerSource, enabled: bool) {
    streams.set_stream_enabled(source.move_stream(), enabled);
    streams.set_stream_enabled(source.end_stream(), enabled);
}

/// A single gesture: one recognizer plus one arbitration delegate, driven by pointer samples.
///
/// `E` is the platform event type, `H` receives callbacks, and `S` toggles
/// the host's move/up subscriptions.
#[derive(Debug)]
pub struct Gesture<E, H = (), S = ()> {
    live: Option<Live<E>>,
    handler: H,
    streams: S,
    debounce: ModalityDebounce,
    session: Option<PointerSource>,
}

impl<E, H, S> Gesture<E, H, S>
where
    E: PointerSample,
    H: GestureHandler<E>,
    S: PointerStreams,
{
    /// Registers a gesture with `controller` and builds its recognizer.
    ///
    /// All move/up streams are switched off.
    pub fn new(
        controller: &GestureController,
        config: &GestureConfig,
        handler: H,
        mut streams: S,
    ) -> Self {
        let delegate =
            controller.create_gesture(&config.name, config.priority, config.disable_scroll);
        for stream in PointerStream::ALL {
            streams.set_stream_enabled(stream, false);
        }
        Self {
            live: Some(Live {
                recognizer: config.recognizer(),
                delegate,
                detail: GestureDetail::default(),
            }),
            handler,
            streams,
            debounce: ModalityDebounce::new(),
            session: None,
        }
    }

    /// Touch down. See [`pointer_down`](Self::pointer_down).
    pub fn touch_start(&mut self, event: E) -> Result<bool, GestureError> {
        self.pointer_down(PointerSource::Touch, event)
    }

    /// Touch move. See [`pointer_move`](Self::pointer_move).
    pub fn touch_move(&mut self, event: E) -> Result<bool, GestureError> {
        self.pointer_move(PointerSource::Touch, event)
    }

    /// Touch end. See [`pointer_up`](Self::pointer_up).
    pub fn touch_end(&mut self, event: E) -> Result<bool, GestureError> {
        self.pointer_up(PointerSource::Touch, event)
    }

    /// Mouse down. See [`pointer_down`](Self::pointer_down).
    pub fn mouse_down(&mut self, event: E) -> Result<bool, GestureError> {
        self.pointer_down(PointerSource::Mouse, event)
    }

    /// Mouse move. See [`pointer_move`](Self::pointer_move).
    pub fn mouse_move(&mut self, event: E) -> Result<bool, GestureError> {
        self.pointer_move(PointerSource::Mouse, event)
    }

    /// Mouse up. See [`pointer_up`](Self::pointer_up).
    pub fn mouse_up(&mut self, event: E) -> Result<bool, GestureError> {
        self.pointer_up(PointerSource::Mouse, event)
    }

    /// Handles a pointer down.
    ///
    /// Returns `Ok(true)` if tracking began. Downs are ignored while a session
    /// is live, when `can_start` refuses, or when the delegate cannot start.
    /// A down from the other modality during a live session moves the
    /// session's move/up streams over to that modality without restarting it.
    pub fn pointer_down(&mut self, source: PointerSource, event: E) -> Result<bool, GestureError> {
        let live = self.live.as_mut().ok_or(GestureError::Destroyed)?;
        let Some(time) = admit(&mut self.debounce, source, &event) else {
            return Ok(false);
        };
        live.detail.time_stamp = time;

        if live.detail.started {
            // The live session carries on; only its streams follow the new modality.
            if let Some(current) = self.session.filter(|&current| current != source) {
                log::trace!(
                    "{}: session continues on {source:?} instead of {current:?}",
                    live.delegate.id()
                );
                toggle(&mut self.streams, current, false);
                toggle(&mut self.streams, source, true);
                self.session = Some(source);
            }
            return Ok(false);
        }

        let pos = event.position();
        live.detail.start = pos;
        live.detail.current = pos;
        live.detail.event = Some(event);

        if !self.handler.can_start(&live.detail) {
            return Ok(false);
        }

        // Fallback in case an earlier session never released.
        live.delegate.release();
        if !live.delegate.start() {
            return Ok(false);
        }

        live.detail.started = true;
        live.detail.captured = false;
        live.recognizer.start(pos);
        self.session = Some(source);
        toggle(&mut self.streams, source.other(), false);
        toggle(&mut self.streams, source, true);
        log::trace!("{}: tracking from {pos:?}", live.delegate.id());
        Ok(true)
    }

    /// Handles a pointer move.
    ///
    /// Returns `Ok(true)` if the sample belonged to the live session.
    pub fn pointer_move(&mut self, source: PointerSource, event: E) -> Result<bool, GestureError> {
        let live = self.live.as_mut().ok_or(GestureError::Destroyed)?;
        let Some(time) = admit(&mut self.debounce, source, &event) else {
            return Ok(false);
        };
        live.detail.time_stamp = time;
        if !live.detail.started || self.session != Some(source) {
            return Ok(false);
        }

        live.detail.current = event.position();
        live.detail.event = Some(event);

        if live.detail.captured {
            if live.delegate.is_capturing() {
                self.handler.on_move(&live.detail);
            } else {
                log::debug!(
                    "{}: capture lost to a higher priority gesture",
                    live.delegate.id()
                );
                live.abort(&mut self.handler);
                toggle(&mut self.streams, source, false);
                self.session = None;
            }
        } else if live.recognizer.detect(live.detail.current) && live.recognizer.is_gesture() != 0 {
            if live.delegate.capture() {
                live.detail.captured = true;
                log::trace!("{}: captured", live.delegate.id());
                self.handler.on_start(&live.detail);
            } else {
                live.abort(&mut self.handler);
                for stream in PointerStream::ALL {
                    self.streams.set_stream_enabled(stream, false);
                }
                self.session = None;
            }
        }
        Ok(true)
    }

    /// Handles a pointer up.
    ///
    /// Returns `Ok(true)` if a session ended.
    pub fn pointer_up(&mut self, source: PointerSource, event: E) -> Result<bool, GestureError> {
        let live = self.live.as_mut().ok_or(GestureError::Destroyed)?;
        let Some(time) = admit(&mut self.debounce, source, &event) else {
            return Ok(false);
        };
        live.detail.time_stamp = time;
        toggle(&mut self.streams, source, false);
        if !live.detail.started || self.session != Some(source) {
            return Ok(false);
        }

        live.detail.event = Some(event);
        live.finish(&mut self.handler);
        self.session = None;
        Ok(true)
    }

    /// Releases capture, deregisters the delegate, and drops the recognizer
    /// and detail. Later events fail with [`GestureError::Destroyed`].
    pub fn destroy(&mut self) {
        if let Some(mut live) = self.live.take() {
            live.delegate.destroy();
            for stream in PointerStream::ALL {
                self.streams.set_stream_enabled(stream, false);
            }
            self.session = None;
        }
    }
}

impl<E, H, S> Gesture<E, H, S> {
    /// Returns `true` after [`destroy`](Self::destroy).
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.live.is_none()
    }

    /// The current interaction record, or `None` after destroy.
    #[must_use]
    pub fn detail(&self) -> Option<&GestureDetail<E>> {
        self.live.as_ref().map(|live| &live.detail)
    }

    /// The tracking state; [`GesturePhase::Idle`] after destroy.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.detail().map_or(GesturePhase::Idle, GestureDetail::phase)
    }

    /// The arbitration delegate, or `None` after destroy.
    #[must_use]
    pub fn delegate(&self) -> Option<&GestureDelegate> {
        self.live.as_ref().map(|live| &live.delegate)
    }

    /// The recognizer, or `None` after destroy.
    #[must_use]
    pub fn recognizer(&self) -> Option<&Recognizer> {
        self.live.as_ref().map(|live| &live.recognizer)
    }

    /// The modality of the live session, if any.
    #[must_use]
    pub fn source(&self) -> Option<PointerSource> {
        self.session
    }

    /// The callback handler.
    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Mutable access to the callback handler.
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// The stream toggle hook.
    #[must_use]
    pub fn streams(&self) -> &S {
        &self.streams
    }
}

/// Stamps `event` and applies the mouse debounce; `None` means ignore it.
fn admit(
    debounce: &mut ModalityDebounce,
    source: PointerSource,
    event: &impl PointerSample,
) -> Option<f64> {
    let time = debounce.stamp(event);
    match source {
        PointerSource::Touch => {
            debounce.note_touch(time);
            Some(time)
        }
        PointerSource::Mouse => debounce.allows_mouse(time).then_some(time),
    }
}
