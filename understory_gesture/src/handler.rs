// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture callbacks.
//!
//! Every hook runs synchronously inside the event call that triggered it and
//! defaults to doing nothing (`can_start` defaults to `true`). Implement
//! [`GestureHandler`] on your own type, or assemble closures with
//! [`GestureCallbacks`].
//!
//! ```
//! use understory_gesture::{GestureCallbacks, GestureHandler, GestureDetail, Sample};
//!
//! let mut moves = 0;
//! {
//!     let mut callbacks = GestureCallbacks::<Sample>::new().with_on_move(|_| moves += 1);
//!     callbacks.on_move(&GestureDetail::default());
//! }
//! assert_eq!(moves, 1);
//! ```

use alloc::boxed::Box;
use core::fmt;

use crate::detail::GestureDetail;

/// Receives gesture lifecycle notifications.
pub trait GestureHandler<E> {
    /// Called on pointer down; returning `false` ignores the interaction.
    fn can_start(&mut self, detail: &GestureDetail<E>) -> bool {
        let _ = detail;
        true
    }

    /// The gesture was recognized and captured.
    fn on_start(&mut self, detail: &GestureDetail<E>) {
        let _ = detail;
    }

    /// A move while captured.
    fn on_move(&mut self, detail: &GestureDetail<E>) {
        let _ = detail;
    }

    /// The pointer was released while captured.
    fn on_end(&mut self, detail: &GestureDetail<E>) {
        let _ = detail;
    }

    /// The interaction ended without (or lost) capture.
    fn not_captured(&mut self, detail: &GestureDetail<E>) {
        let _ = detail;
    }
}

impl<E> GestureHandler<E> for () {}

impl<E, H: GestureHandler<E> + ?Sized> GestureHandler<E> for &mut H {
    fn can_start(&mut self, detail: &GestureDetail<E>) -> bool {
        (**self).can_start(detail)
    }

    fn on_start(&mut self, detail: &GestureDetail<E>) {
        (**self).on_start(detail);
    }

    fn on_move(&mut self, detail: &GestureDetail<E>) {
        (**self).on_move(detail);
    }

    fn on_end(&mut self, detail: &GestureDetail<E>) {
        (**self).on_end(detail);
    }

    fn not_captured(&mut self, detail: &GestureDetail<E>) {
        (**self).not_captured(detail);
    }
}

type Predicate<'a, E> = Box<dyn FnMut(&GestureDetail<E>) -> bool + 'a>;
type Callback<'a, E> = Box<dyn FnMut(&GestureDetail<E>) + 'a>;

/// A [`GestureHandler`] built from optional closures.
pub struct GestureCallbacks<'a, E> {
    can_start: Option<Predicate<'a, E>>,
    on_start: Option<Callback<'a, E>>,
    on_move: Option<Callback<'a, E>>,
    on_end: Option<Callback<'a, E>>,
    not_captured: Option<Callback<'a, E>>,
}

impl<E> Default for GestureCallbacks<'_, E> {
    fn default() -> Self {
        Self {
            can_start: None,
            on_start: None,
            on_move: None,
            on_end: None,
            not_captured: None,
        }
    }
}

impl<'a, E> GestureCallbacks<'a, E> {
    /// Creates a handler where every hook is a no-op.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `can_start` predicate.
    #[must_use]
    pub fn with_can_start(mut self, f: impl FnMut(&GestureDetail<E>) -> bool + 'a) -> Self {
        self.can_start = Some(Box::new(f));
        self
    }

    /// Sets the `on_start` hook.
    #[must_use]
    pub fn with_on_start(mut self, f: impl FnMut(&GestureDetail<E>) + 'a) -> Self {
        self.on_start = Some(Box::new(f));
        self
    }

    /// Sets the `on_move` hook.
    #[must_use]
    pub fn with_on_move(mut self, f: impl FnMut(&GestureDetail<E>) + 'a) -> Self {
        self.on_move = Some(Box::new(f));
        self
    }

    /// Sets the `on_end` hook.
    #[must_use]
    pub fn with_on_end(mut self, f: impl FnMut(&GestureDetail<E>) + 'a) -> Self {
        self.on_end = Some(Box::new(f));
        self
    }

    /// Sets the `not_captured` hook.
    #[must_use]
    pub fn with_not_captured(mut self, f: impl FnMut(&GestureDetail<E>) + 'a) -> Self {
        self.not_captured = Some(Box::new(f));
        self
    }
}

impl<E> GestureHandler<E> for GestureCallbacks<'_, E> {
    fn can_start(&mut self, detail: &GestureDetail<E>) -> bool {
        self.can_start.as_mut().is_none_or(|f| f(detail))
    }

    fn on_start(&mut self, detail: &GestureDetail<E>) {
        if let Some(f) = &mut self.on_start {
            f(detail);
        }
    }

    fn on_move(&mut self, detail: &GestureDetail<E>) {
        if let Some(f) = &mut self.on_move {
            f(detail);
        }
    }

    fn on_end(&mut self, detail: &GestureDetail<E>) {
        if let Some(f) = &mut self.on_end {
            f(detail);
        }
    }

    fn not_captured(&mut self, detail: &GestureDetail<E>) {
        if let Some(f) = &mut self.not_captured {
            f(detail);
        }
    }
}

impl<E> fmt::Debug for GestureCallbacks<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureCallbacks")
            .field("can_start", &self.can_start.is_some())
            .field("on_start", &self.on_start.is_some())
            .field("on_move", &self.on_move.is_some())
            .field("on_end", &self.on_end.is_some())
            .field("not_captured", &self.not_captured.is_some())
            .finish()
    }
}
