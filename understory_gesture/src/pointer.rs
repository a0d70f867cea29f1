// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer input plumbing: samples, input modalities, and stream toggles.
//!
//! The gesture state machine does not subscribe to platform events itself.
//! The host feeds it [`PointerSample`]s and the machine asks the host, through
//! [`PointerStreams`], to switch the move/up streams of a modality on or off.
//! Down streams are always expected to be on.
//!
//! ## Modality debounce
//!
//! Hybrid devices commonly emit synthetic mouse events after a real touch.
//! [`ModalityDebounce`] remembers the last touch time and rejects mouse
//! samples arriving within [`MOUSE_WAIT_MS`] of it.

use kurbo::Point;

/// Milliseconds after a touch sample during which mouse samples are ignored.
pub const MOUSE_WAIT_MS: f64 = 2500.0;

/// A platform pointer event as seen by the gesture machinery.
pub trait PointerSample {
    /// Pointer position in the surface's coordinate space.
    fn position(&self) -> Point;

    /// Event time in milliseconds, if the platform provides one.
    fn timestamp(&self) -> Option<f64> {
        None
    }
}

impl PointerSample for Point {
    fn position(&self) -> Point {
        *self
    }
}

impl<T: PointerSample + ?Sized> PointerSample for &T {
    fn position(&self) -> Point {
        (**self).position()
    }

    fn timestamp(&self) -> Option<f64> {
        (**self).timestamp()
    }
}

/// A plain pointer sample with an optional timestamp.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Sample {
    /// Pointer position.
    pub position: Point,
    /// Event time in milliseconds.
    pub timestamp: Option<f64>,
}

impl Sample {
    /// Creates a sample at `(x, y)` stamped with `timestamp` milliseconds.
    #[must_use]
    pub const fn new(x: f64, y: f64, timestamp: f64) -> Self {
        Self {
            position: Point::new(x, y),
            timestamp: Some(timestamp),
        }
    }

    /// Creates a sample at `(x, y)` without a timestamp.
    #[must_use]
    pub const fn at(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            timestamp: None,
        }
    }
}

impl PointerSample for Sample {
    fn position(&self) -> Point {
        self.position
    }

    fn timestamp(&self) -> Option<f64> {
        self.timestamp
    }
}

/// Input modality that produced a sample.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerSource {
    /// Touch screen.
    Touch,
    /// Mouse or other hovering pointer.
    Mouse,
}

impl PointerSource {
    /// The other modality.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Touch => Self::Mouse,
            Self::Mouse => Self::Touch,
        }
    }

    /// The move stream of this modality.
    #[must_use]
    pub const fn move_stream(self) -> PointerStream {
        match self {
            Self::Touch => PointerStream::TouchMove,
            Self::Mouse => PointerStream::MouseMove,
        }
    }

    /// The end/up stream of this modality.
    #[must_use]
    pub const fn end_stream(self) -> PointerStream {
        match self {
            Self::Touch => PointerStream::TouchEnd,
            Self::Mouse => PointerStream::MouseUp,
        }
    }

    /// The move and end streams of this modality.
    #[must_use]
    pub const fn streams(self) -> StreamSet {
        self.move_stream().flag().union(self.end_stream().flag())
    }
}

/// A toggleable input stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerStream {
    /// Touch moves.
    TouchMove,
    /// Touch ends.
    TouchEnd,
    /// Mouse moves, usually observed document-wide.
    MouseMove,
    /// Mouse button releases, usually observed document-wide.
    MouseUp,
}

impl PointerStream {
    /// All streams.
    pub const ALL: [Self; 4] = [
        Self::TouchMove,
        Self::TouchEnd,
        Self::MouseMove,
        Self::MouseUp,
    ];

    /// Stable stream name, such as `"touch-move"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TouchMove => "touch-move",
            Self::TouchEnd => "touch-end",
            Self::MouseMove => "mouse-move",
            Self::MouseUp => "mouse-up",
        }
    }

    /// The [`StreamSet`] bit for this stream.
    #[must_use]
    pub const fn flag(self) -> StreamSet {
        match self {
            Self::TouchMove => StreamSet::TOUCH_MOVE,
            Self::TouchEnd => StreamSet::TOUCH_END,
            Self::MouseMove => StreamSet::MOUSE_MOVE,
            Self::MouseUp => StreamSet::MOUSE_UP,
        }
    }
}

bitflags::bitflags! {
    /// A set of enabled [`PointerStream`]s.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct StreamSet: u8 {
        /// [`PointerStream::TouchMove`].
        const TOUCH_MOVE = 1 << 0;
        /// [`PointerStream::TouchEnd`].
        const TOUCH_END = 1 << 1;
        /// [`PointerStream::MouseMove`].
        const MOUSE_MOVE = 1 << 2;
        /// [`PointerStream::MouseUp`].
        const MOUSE_UP = 1 << 3;
    }
}

/// Host hook that subscribes or unsubscribes a named input stream.
///
/// Implementations must tolerate repeated calls with the same value.
pub trait PointerStreams {
    /// Enables or disables `stream`.
    fn set_stream_enabled(&mut self, stream: PointerStream, enabled: bool);
}

impl PointerStreams for () {
    fn set_stream_enabled(&mut self, _stream: PointerStream, _enabled: bool) {}
}

/// Records the enabled set, for hosts that poll it.
impl PointerStreams for StreamSet {
    fn set_stream_enabled(&mut self, stream: PointerStream, enabled: bool) {
        self.set(stream.flag(), enabled);
    }
}

impl<T: PointerStreams + ?Sized> PointerStreams for &mut T {
    fn set_stream_enabled(&mut self, stream: PointerStream, enabled: bool) {
        (**self).set_stream_enabled(stream, enabled);
    }
}

/// Current wall-clock time in milliseconds, when the platform has one.
#[cfg(feature = "std")]
fn wall_clock_ms() -> Option<f64> {
    web_time::SystemTime::now()
        .duration_since(web_time::SystemTime::UNIX_EPOCH)
        .ok()
        .map(|d| d.as_secs_f64() * 1000.0)
}

#[cfg(not(feature = "std"))]
fn wall_clock_ms() -> Option<f64> {
    None
}

/// Tracks sample times and suppresses mouse input shortly after touch input.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ModalityDebounce {
    last_touch: Option<f64>,
    last_seen: f64,
}

impl ModalityDebounce {
    /// Creates a debounce that has seen no touch yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Timestamp of `sample`, falling back to the wall clock and then to the
    /// last observed time.
    pub fn stamp(&mut self, sample: &impl PointerSample) -> f64 {
        let now = sample
            .timestamp()
            .or_else(wall_clock_ms)
            .unwrap_or(self.last_seen);
        self.last_seen = now;
        now
    }

    /// Records a touch sample at `time`.
    pub fn note_touch(&mut self, time: f64) {
        self.last_touch = Some(time);
    }

    /// Returns `true` if a mouse sample at `time` should be handled.
    #[must_use]
    pub fn allows_mouse(&self, time: f64) -> bool {
        self.last_touch
            .is_none_or(|touch| touch + MOUSE_WAIT_MS < time)
    }

    /// Time of the last touch sample, if any.
    #[must_use]
    pub fn last_touch(&self) -> Option<f64> {
        self.last_touch
    }
}
