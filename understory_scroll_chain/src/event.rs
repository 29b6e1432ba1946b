// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch event records consumed by the gesture state machine.
//!
//! Events are platform-neutral: an action, the positions of every pointer
//! currently down, and a timestamp in milliseconds. The first sample is the
//! primary pointer.
//!
//! ```
//! use kurbo::Point;
//! use understory_scroll_chain::{PointerId, TouchAction, TouchEvent};
//!
//! let event = TouchEvent::new(TouchAction::PointerDown(PointerId(1)), 16)
//!     .with_pointer(PointerId(0), Point::new(10.0, 500.0))
//!     .with_pointer(PointerId(1), Point::new(12.0, 300.0));
//!
//! assert_eq!(event.primary().unwrap().id, PointerId(0));
//! assert_eq!(event.pointer(PointerId(1)).unwrap().position.y, 300.0);
//! ```

use kurbo::Point;
use smallvec::SmallVec;

/// Identifier of a touch point, stable for as long as the pointer is down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u32);

/// Position of one pointer within an event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    /// Which pointer.
    pub id: PointerId,
    /// Position in the scroll container's coordinate space.
    pub position: Point,
}

/// Kind of touch event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TouchAction {
    /// First pointer went down; a new gesture begins.
    Down,
    /// One or more pointers moved.
    Move,
    /// Last pointer went up.
    Up,
    /// The gesture was taken away (for example by an ancestor).
    Cancel,
    /// A secondary pointer went down.
    PointerDown(PointerId),
    /// A non-final pointer went up.
    PointerUp(PointerId),
    /// Discrete scroll from a pointing device (mouse wheel), in notches.
    ///
    /// Positive `vscroll` scrolls content backward (toward the top).
    GenericScroll {
        /// Vertical scroll amount.
        vscroll: f64,
    },
}

/// A single touch event.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchEvent {
    /// What happened.
    pub action: TouchAction,
    /// Pointers down during this event; the first one is the primary pointer.
    pub pointers: SmallVec<[PointerSample; 4]>,
    /// Event time in milliseconds.
    pub time_ms: u64,
}

impl TouchEvent {
    /// Creates an event with no pointers.
    #[must_use]
    pub fn new(action: TouchAction, time_ms: u64) -> Self {
        Self {
            action,
            pointers: SmallVec::new(),
            time_ms,
        }
    }

    /// Appends a pointer sample.
    #[must_use]
    pub fn with_pointer(mut self, id: PointerId, position: Point) -> Self {
        self.pointers.push(PointerSample { id, position });
        self
    }

    /// Single-pointer event at `position`.
    #[must_use]
    pub fn single(action: TouchAction, id: PointerId, position: Point, time_ms: u64) -> Self {
        Self::new(action, time_ms).with_pointer(id, position)
    }

    /// The primary (first) pointer.
    #[must_use]
    pub fn primary(&self) -> Option<&PointerSample> {
        self.pointers.first()
    }

    /// The sample for `id`, if that pointer is part of this event.
    #[must_use]
    pub fn pointer(&self, id: PointerId) -> Option<&PointerSample> {
        self.pointers.iter().find(|p| p.id == id)
    }

    /// Position of the tracked pointer, falling back to the primary pointer.
    ///
    /// A tracked id that is missing from the event is recoverable: the primary
    /// pointer's position is used instead. Returns `None` only for events
    /// without pointers.
    #[must_use]
    pub fn position_of(&self, tracked: Option<PointerId>) -> Option<Point> {
        if let Some(id) = tracked {
            if let Some(sample) = self.pointer(id) {
                return Some(sample.position);
            }
            tracing::warn!(?id, action = ?self.action, "tracked pointer missing from event; using primary");
        }
        self.primary().map(|p| p.position)
    }
}
