// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture state: pointer identity, last motion, and drag-vs-tap thresholding.
//!
//! [`GestureTracker`] is the bookkeeping half of the scroll chain's touch
//! state machine. It does not scroll anything itself; the chain asks it for
//! deltas and tells it when a drag starts or ends.
//!
//! ## Usage
//!
//! 1) On `Down`, call [`GestureTracker::begin`] to adopt the primary pointer.
//! 2) On each move, read [`GestureTracker::delta_y`] and compare it against the
//!    touch slop with [`GestureTracker::exceeds_slop`].
//! 3) Call [`GestureTracker::start_drag`] once the slop is exceeded. When the
//!    crossing move is only observed (not scrolled), use
//!    [`GestureTracker::start_drag_owing_slop`] and leave the last position in
//!    place; the next scrolled move settles the slop via
//!    [`GestureTracker::take_owed_slop`].
//! 4) After every event, call [`GestureTracker::update_last_motion`].
//! 5) On `Up`/`Cancel`, call [`GestureTracker::end`].
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_scroll_chain::{GestureTracker, PointerId, TouchAction, TouchEvent};
//!
//! let mut gesture = GestureTracker::default();
//! let down = TouchEvent::single(TouchAction::Down, PointerId(0), Point::new(0.0, 100.0), 0);
//! gesture.begin(&down);
//! gesture.update_last_motion(&down);
//!
//! let moved = TouchEvent::single(TouchAction::Move, PointerId(0), Point::new(0.0, 70.0), 16);
//! let delta = gesture.delta_y(&moved);
//! assert_eq!(delta, -30.0);
//! assert!(gesture.exceeds_slop(delta, 8.0));
//! ```

use crate::event::{PointerId, TouchEvent};

/// Coarse state of the touch state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    /// No drag and no fling.
    Idle,
    /// A fling is still running; a new touch will be intercepted.
    Settling,
    /// A drag owns the gesture.
    Dragging,
}

/// Tracks the authoritative pointer and its last observed position.
///
/// `active_pointer` is `None` exactly when no gesture is in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureTracker {
    dragging: bool,
    active_pointer: Option<PointerId>,
    last_y: f64,
    slop_owed: bool,
}

impl GestureTracker {
    /// Adopts the primary pointer of a `Down` event.
    pub fn begin(&mut self, event: &TouchEvent) {
        self.active_pointer = event.primary().map(|p| p.id);
        self.slop_owed = false;
    }

    /// Marks the gesture as a drag.
    pub fn start_drag(&mut self) {
        self.dragging = true;
    }

    /// Marks the gesture as a drag whose slop has not been subtracted yet.
    ///
    /// The last recorded position must stay where the slop was measured from.
    pub fn start_drag_owing_slop(&mut self) {
        self.dragging = true;
        self.slop_owed = true;
    }

    /// Returns `true` while the slop of the current drag is unsettled.
    #[must_use]
    pub fn owes_slop(&self) -> bool {
        self.slop_owed
    }

    /// Returns `true` once if the slop is still to be subtracted.
    pub fn take_owed_slop(&mut self) -> bool {
        core::mem::take(&mut self.slop_owed)
    }

    /// Ends the gesture and forgets the active pointer.
    ///
    /// Returns `true` if a drag was in progress.
    pub fn end(&mut self) -> bool {
        let was_dragging = self.dragging;
        self.dragging = false;
        self.slop_owed = false;
        self.active_pointer = None;
        was_dragging
    }

    /// Returns `true` while a drag owns the gesture.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// The pointer whose motion drives the gesture.
    #[must_use]
    pub fn active_pointer(&self) -> Option<PointerId> {
        self.active_pointer
    }

    /// Last recorded vertical position of the active pointer.
    #[must_use]
    pub fn last_y(&self) -> f64 {
        self.last_y
    }

    /// Current phase, given whether a fling is still running.
    #[must_use]
    pub fn phase(&self, fling_finished: bool) -> GesturePhase {
        if self.dragging {
            GesturePhase::Dragging
        } else if !fling_finished {
            GesturePhase::Settling
        } else {
            GesturePhase::Idle
        }
    }

    /// Position of the active pointer in `event`, falling back to the primary
    /// pointer (and to the last position for events without pointers).
    #[must_use]
    pub fn y_of(&self, event: &TouchEvent) -> f64 {
        event
            .position_of(self.active_pointer)
            .map_or(self.last_y, |p| p.y)
    }

    /// Horizontal position of the active pointer in `event`.
    #[must_use]
    pub fn x_of(&self, event: &TouchEvent) -> f64 {
        event.position_of(self.active_pointer).map_or(0.0, |p| p.x)
    }

    /// Vertical motion of the active pointer since the last recorded position.
    #[must_use]
    pub fn delta_y(&self, event: &TouchEvent) -> f64 {
        self.y_of(event) - self.last_y
    }

    /// Returns `true` if `delta` is larger than `slop` in magnitude.
    #[must_use]
    pub fn exceeds_slop(&self, delta: f64, slop: f64) -> bool {
        delta.abs() > slop
    }

    /// Records the active pointer's position from `event`.
    pub fn update_last_motion(&mut self, event: &TouchEvent) {
        self.last_y = self.y_of(event);
    }

    /// A secondary pointer went down. It is adopted only when no pointer is
    /// currently active.
    pub fn pointer_down(&mut self, event: &TouchEvent, id: PointerId) {
        if self.active_pointer.is_some() {
            return;
        }
        if let Some(sample) = event.pointer(id) {
            self.active_pointer = Some(id);
            self.last_y = sample.position.y;
        }
    }

    /// A non-final pointer went up. If it was the active one, tracking moves
    /// to the first remaining pointer, whose current position becomes the
    /// last recorded one so the switch does not register as motion.
    pub fn pointer_up(&mut self, event: &TouchEvent, id: PointerId) {
        if self.active_pointer != Some(id) {
            return;
        }
        let next = event.pointers.iter().find(|p| p.id != id);
        self.active_pointer = next.map(|p| p.id);
        if let Some(next) = next {
            self.last_y = next.position.y;
            tracing::debug!(from = ?id, to = ?next.id, "active pointer handed off");
        }
    }
}

/// Removes the touch slop from the delta of the frame a drag starts on.
#[must_use]
pub(crate) fn subtract_slop(delta: f64, slop: f64) -> f64 {
    if delta > 0.0 { delta - slop } else { delta + slop }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::*;
    use crate::event::TouchAction;

    fn at(action: TouchAction, pointers: &[(u32, f64)], time_ms: u64) -> TouchEvent {
        pointers
            .iter()
            .fold(TouchEvent::new(action, time_ms), |e, &(id, y)| {
                e.with_pointer(PointerId(id), Point::new(10.0, y))
            })
    }

    #[test]
    fn new_tracker_is_idle_without_pointer() {
        let gesture = GestureTracker::default();
        assert!(!gesture.is_dragging());
        assert_eq!(gesture.active_pointer(), None);
        assert_eq!(gesture.phase(true), GesturePhase::Idle);
        assert_eq!(gesture.phase(false), GesturePhase::Settling);
    }

    #[test]
    fn begin_adopts_primary_pointer() {
        let mut gesture = GestureTracker::default();
        gesture.begin(&at(TouchAction::Down, &[(4, 100.0)], 0));
        assert_eq!(gesture.active_pointer(), Some(PointerId(4)));
    }

    #[test]
    fn delta_is_relative_to_last_motion() {
        let mut gesture = GestureTracker::default();
        let down = at(TouchAction::Down, &[(0, 100.0)], 0);
        gesture.begin(&down);
        gesture.update_last_motion(&down);

        let mv = at(TouchAction::Move, &[(0, 112.0)], 10);
        assert_eq!(gesture.delta_y(&mv), 12.0);
        gesture.update_last_motion(&mv);
        assert_eq!(gesture.delta_y(&at(TouchAction::Move, &[(0, 110.0)], 20)), -2.0);
    }

    #[test]
    fn slop_is_strictly_exceeded() {
        let gesture = GestureTracker::default();
        assert!(!gesture.exceeds_slop(8.0, 8.0));
        assert!(!gesture.exceeds_slop(-8.0, 8.0));
        assert!(gesture.exceeds_slop(-8.5, 8.0));
    }

    #[test]
    fn slop_is_removed_toward_zero() {
        assert_eq!(subtract_slop(20.0, 8.0), 12.0);
        assert_eq!(subtract_slop(-20.0, 8.0), -12.0);
    }

    #[test]
    fn end_reports_drag_and_clears_pointer() {
        let mut gesture = GestureTracker::default();
        gesture.begin(&at(TouchAction::Down, &[(0, 0.0)], 0));
        assert!(!gesture.end());
        assert_eq!(gesture.active_pointer(), None);

        gesture.begin(&at(TouchAction::Down, &[(0, 0.0)], 0));
        gesture.start_drag();
        assert_eq!(gesture.phase(true), GesturePhase::Dragging);
        assert!(gesture.end());
        assert!(!gesture.is_dragging());
    }

    #[test]
    fn owed_slop_is_taken_once_and_cleared_by_end() {
        let mut gesture = GestureTracker::default();
        gesture.begin(&at(TouchAction::Down, &[(0, 0.0)], 0));
        gesture.start_drag_owing_slop();
        assert!(gesture.is_dragging());
        assert!(gesture.owes_slop());
        assert!(gesture.take_owed_slop());
        assert!(!gesture.owes_slop());
        assert!(!gesture.take_owed_slop());

        gesture.start_drag_owing_slop();
        assert!(gesture.end());
        assert!(!gesture.take_owed_slop());

        gesture.start_drag();
        assert!(!gesture.take_owed_slop());
    }

    #[test]
    fn secondary_pointer_is_adopted_only_without_active_pointer() {
        let mut gesture = GestureTracker::default();
        let two = at(TouchAction::PointerDown(PointerId(1)), &[(0, 500.0), (1, 300.0)], 0);

        gesture.pointer_down(&two, PointerId(1));
        assert_eq!(gesture.active_pointer(), Some(PointerId(1)));
        assert_eq!(gesture.last_y(), 300.0);

        let mut gesture = GestureTracker::default();
        gesture.begin(&at(TouchAction::Down, &[(0, 500.0)], 0));
        gesture.pointer_down(&two, PointerId(1));
        assert_eq!(gesture.active_pointer(), Some(PointerId(0)));
    }

    #[test]
    fn lifting_active_pointer_hands_off_without_a_jump() {
        let mut gesture = GestureTracker::default();
        let down = at(TouchAction::Down, &[(0, 500.0)], 0);
        gesture.begin(&down);
        gesture.update_last_motion(&down);

        let up = at(TouchAction::PointerUp(PointerId(0)), &[(0, 500.0), (1, 300.0)], 10);
        gesture.pointer_up(&up, PointerId(0));
        gesture.update_last_motion(&up);
        assert_eq!(gesture.active_pointer(), Some(PointerId(1)));

        let mv = at(TouchAction::Move, &[(1, 280.0)], 20);
        assert_eq!(gesture.delta_y(&mv), -20.0);
    }

    #[test]
    fn lifting_inactive_pointer_changes_nothing() {
        let mut gesture = GestureTracker::default();
        let down = at(TouchAction::Down, &[(0, 500.0)], 0);
        gesture.begin(&down);
        gesture.update_last_motion(&down);

        let up = at(TouchAction::PointerUp(PointerId(1)), &[(0, 510.0), (1, 300.0)], 10);
        gesture.pointer_up(&up, PointerId(1));
        assert_eq!(gesture.active_pointer(), Some(PointerId(0)));
        assert_eq!(gesture.last_y(), 500.0);
    }

    #[test]
    fn missing_active_pointer_falls_back_to_primary() {
        let mut gesture = GestureTracker::default();
        gesture.begin(&at(TouchAction::Down, &[(2, 50.0)], 0));
        let stray = at(TouchAction::Move, &[(5, 75.0)], 10);
        assert_eq!(gesture.y_of(&stray), 75.0);
    }
}
