// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture arbitration: at most one registered gesture captures the pointer.
//!
//! A [`GestureController`] is a registry of named, prioritized gestures plus a
//! single capture slot. Each registration is represented by a
//! [`GestureDelegate`] handle:
//!
//! - [`GestureDelegate::start`] is non-exclusive: any number of delegates may
//!   track the same pointer session.
//! - [`GestureDelegate::capture`] is exclusive. It succeeds when the slot is
//!   empty, when the delegate already holds it, or when the delegate's
//!   priority is strictly higher than the holder's (preemption). Equal
//!   priorities favor the incumbent. Losing requests fail immediately and are
//!   never queued.
//! - [`GestureDelegate::release`] empties the slot if this delegate holds it.
//! - [`GestureDelegate::destroy`] (or dropping the delegate) releases and
//!   deregisters.
//!
//! [`BlockerDelegate`]s disable gestures by name while blocked, so that for
//! example an open menu can suppress a swipe-to-go-back gesture.
//!
//! Controllers are cheap handles over shared single-threaded state. Create one
//! per interactive root; independent controllers never interact.
//!
//! ```
//! use understory_gesture::GestureController;
//!
//! let controller = GestureController::new();
//! let mut low = controller.create_gesture("swipe", 10, false);
//! let mut high = controller.create_gesture("scroll", 20, true);
//!
//! assert!(low.start() && high.start());
//! assert!(low.capture());
//! assert!(high.capture()); // preempts `low`
//! assert!(!low.is_capturing());
//! assert!(controller.is_scroll_disabled());
//!
//! high.release();
//! assert!(!controller.is_captured());
//! ```

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use core::cell::RefCell;
use core::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;

/// Identifies a gesture registration within one [`GestureController`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GestureId(u64);

impl GestureId {
    /// Returns the raw id.
    #[must_use]
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GestureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
struct Registration {
    id: GestureId,
    name: String,
    priority: i32,
    disable_scroll: bool,
}

#[derive(Debug, Default)]
struct ControllerState {
    next_id: u64,
    gestures: SmallVec<[Registration; 8]>,
    captured: Option<GestureId>,
    // Number of active blockers disabling each gesture name.
    disabled: HashMap<String, u32>,
}

impl ControllerState {
    fn allocate(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    fn get(&self, id: GestureId) -> Option<&Registration> {
        self.gestures.iter().find(|g| g.id == id)
    }

    fn is_disabled(&self, name: &str) -> bool {
        self.disabled.get(name).is_some_and(|&n| n > 0)
    }

    fn can_start(&self, id: GestureId) -> bool {
        self.get(id).is_some_and(|g| !self.is_disabled(&g.name))
    }

    fn capture(&mut self, id: GestureId) -> bool {
        let Some(requester) = self.get(id) else {
            return false;
        };
        if self.is_disabled(&requester.name) {
            log::debug!("capture denied for {id}: {:?} is blocked", requester.name);
            return false;
        }
        let Some(holder) = self.captured else {
            log::debug!("capture granted to {id} ({:?})", requester.name);
            self.captured = Some(id);
            return true;
        };
        if holder == id {
            return true;
        }
        let holder_priority = self.get(holder).map_or(i32::MIN, |g| g.priority);
        if requester.priority > holder_priority {
            log::debug!(
                "capture granted to {id} ({:?}), preempting {holder}",
                requester.name
            );
            self.captured = Some(id);
            true
        } else {
            log::debug!("capture denied for {id}: held by {holder}");
            false
        }
    }

    fn release(&mut self, id: GestureId) {
        if self.captured == Some(id) {
            log::trace!("capture released by {id}");
            self.captured = None;
        }
    }

    fn remove(&mut self, id: GestureId) {
        self.release(id);
        self.gestures.retain(|g| g.id != id);
    }
}

/// Registry of gestures sharing one capture slot.
///
/// Cloning yields another handle to the same registry.
#[derive(Clone, Debug, Default)]
pub struct GestureController {
    state: Rc<RefCell<ControllerState>>,
}

impl GestureController {
    /// Creates an empty controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a gesture and returns its delegate.
    ///
    /// `name` and `priority` are fixed for the life of the delegate. Names
    /// need not be unique; an empty name is anonymous.
    pub fn create_gesture(
        &self,
        name: &str,
        priority: i32,
        disable_scroll: bool,
    ) -> GestureDelegate {
        let mut state = self.state.borrow_mut();
        let id = GestureId(state.allocate());
        state.gestures.push(Registration {
            id,
            name: name.to_string(),
            priority,
            disable_scroll,
        });
        log::trace!("registered gesture {id} ({name:?}, priority {priority})");
        GestureDelegate {
            controller: self.clone(),
            id,
            name: name.to_string(),
            priority,
            disable_scroll,
            destroyed: false,
        }
    }

    /// Creates a blocker that disables the named gestures while blocked.
    ///
    /// The blocker starts unblocked.
    pub fn create_blocker(&self, disable: &[&str]) -> BlockerDelegate {
        let id = self.state.borrow_mut().allocate();
        BlockerDelegate {
            controller: self.clone(),
            id,
            disable: disable.iter().map(|name| name.to_string()).collect(),
            blocked: false,
            destroyed: false,
        }
    }

    /// Returns `true` while some gesture holds capture.
    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.state.borrow().captured.is_some()
    }

    /// Returns the capturing gesture, if any.
    #[must_use]
    pub fn captured_id(&self) -> Option<GestureId> {
        self.state.borrow().captured
    }

    /// Returns the name of the capturing gesture, if any.
    #[must_use]
    pub fn captured_name(&self) -> Option<String> {
        let state = self.state.borrow();
        state
            .captured
            .and_then(|id| state.get(id))
            .map(|g| g.name.clone())
    }

    /// Returns `true` while the capturing gesture asked for scrolling to be suppressed.
    #[must_use]
    pub fn is_scroll_disabled(&self) -> bool {
        let state = self.state.borrow();
        state
            .captured
            .and_then(|id| state.get(id))
            .is_some_and(|g| g.disable_scroll)
    }

    /// Returns `true` if an active blocker disables gestures called `name`.
    #[must_use]
    pub fn is_disabled(&self, name: &str) -> bool {
        self.state.borrow().is_disabled(name)
    }

    /// Number of live gesture registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().gestures.len()
    }

    /// Returns `true` if no gestures are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().gestures.is_empty()
    }

    /// Returns `true` if `other` is a handle to the same registry.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

/// Handle for one gesture registration.
///
/// Dropping the delegate destroys it.
#[derive(Debug)]
pub struct GestureDelegate {
    controller: GestureController,
    id: GestureId,
    name: String,
    priority: i32,
    disable_scroll: bool,
    destroyed: bool,
}

impl GestureDelegate {
    /// The registration id.
    #[must_use]
    pub fn id(&self) -> GestureId {
        self.id
    }

    /// The gesture name used for arbitration and blocking.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The arbitration priority; higher wins.
    #[must_use]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Whether capturing this gesture should suppress default scrolling.
    #[must_use]
    pub fn disable_scroll(&self) -> bool {
        self.disable_scroll
    }

    /// Returns `true` once [`destroy`](Self::destroy) has been called.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// The controller this delegate is registered with.
    #[must_use]
    pub fn controller(&self) -> &GestureController {
        &self.controller
    }

    /// Returns `true` if the gesture may begin tracking.
    ///
    /// This is `false` after destroy or while a blocker disables this name.
    #[must_use]
    pub fn can_start(&self) -> bool {
        !self.destroyed && self.controller.state.borrow().can_start(self.id)
    }

    /// Asks to begin tracking a pointer session. Starting is not exclusive.
    pub fn start(&mut self) -> bool {
        let ok = self.can_start();
        if !ok {
            log::trace!("start refused for {} ({:?})", self.id, self.name);
        }
        ok
    }

    /// Asks for exclusive ownership of the pointer session.
    pub fn capture(&mut self) -> bool {
        !self.destroyed && self.controller.state.borrow_mut().capture(self.id)
    }

    /// Returns `true` while this delegate holds capture.
    #[must_use]
    pub fn is_capturing(&self) -> bool {
        !self.destroyed && self.controller.state.borrow().captured == Some(self.id)
    }

    /// Relinquishes capture if held. Safe to call at any time.
    pub fn release(&mut self) {
        self.controller.state.borrow_mut().release(self.id);
    }

    /// Releases capture and deregisters from the controller.
    ///
    /// Later `start` and `capture` calls return `false`. Idempotent.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.controller.state.borrow_mut().remove(self.id);
        log::trace!("destroyed gesture {} ({:?})", self.id, self.name);
    }
}

impl Drop for GestureDelegate {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Disables a set of gesture names while blocked.
///
/// Dropping the blocker unblocks it.
#[derive(Debug)]
pub struct BlockerDelegate {
    controller: GestureController,
    id: u64,
    disable: SmallVec<[String; 2]>,
    blocked: bool,
    destroyed: bool,
}

impl BlockerDelegate {
    /// The gesture names this blocker disables.
    pub fn disables(&self) -> impl Iterator<Item = &str> {
        self.disable.iter().map(String::as_str)
    }

    /// Returns `true` while blocking.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Disables the listed gestures. Idempotent; no-op after destroy.
    pub fn block(&mut self) {
        if self.blocked || self.destroyed {
            return;
        }
        self.blocked = true;
        let mut state = self.controller.state.borrow_mut();
        for name in &self.disable {
            *state.disabled.entry(name.clone()).or_insert(0) += 1;
        }
        log::debug!("blocker #{} disabled {:?}", self.id, self.disable);
    }

    /// Re-enables the listed gestures. Idempotent.
    pub fn unblock(&mut self) {
        if !self.blocked {
            return;
        }
        self.blocked = false;
        let mut state = self.controller.state.borrow_mut();
        for name in &self.disable {
            let remaining = state.disabled.get_mut(name.as_str()).map(|count| {
                *count -= 1;
                *count
            });
            if remaining == Some(0) {
                state.disabled.remove(name.as_str());
            }
        }
        log::debug!("blocker #{} re-enabled {:?}", self.id, self.disable);
    }

    /// Unblocks and disables the blocker permanently.
    pub fn destroy(&mut self) {
        self.unblock();
        self.destroyed = true;
    }
}

impl Drop for BlockerDelegate {
    fn drop(&mut self) {
        self.destroy();
    }
}
