// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Velocity tracker: estimate release velocity from recent motion samples.
//!
//! Samples are kept per pointer in a short trailing window. The estimate is a
//! least-squares linear fit of vertical position over time, in pixels per
//! second, clamped to a caller-supplied maximum.
//!
//! ## Usage
//!
//! 1) Call [`VelocityTracker::clear`] when a gesture starts.
//! 2) Feed every event with [`VelocityTracker::add_movement`].
//! 3) At release, read [`VelocityTracker::velocity`] for the active pointer,
//!    then clear again; the samples are not reused.
//!
//! ```
//! use kurbo::Point;
//! use understory_scroll_chain::{PointerId, TouchAction, TouchEvent, VelocityTracker};
//!
//! let mut tracker = VelocityTracker::new(100, 40);
//! for (t, y) in [(0, 300.0), (10, 280.0), (20, 260.0)] {
//!     tracker.add_movement(&TouchEvent::single(TouchAction::Move, PointerId(0), Point::new(0.0, y), t));
//! }
//! assert_eq!(tracker.velocity(PointerId(0), 8000.0), -2000.0);
//! ```

use alloc::collections::VecDeque;

use hashbrown::HashMap;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::config::ScrollConfig;
use crate::event::{PointerId, TouchEvent};

/// Most samples retained per pointer.
const MAX_SAMPLES: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Sample {
    time_ms: u64,
    y: f64,
}

/// Per-pointer trailing sample windows.
#[derive(Clone, Debug)]
pub struct VelocityTracker {
    histories: HashMap<PointerId, VecDeque<Sample>>,
    horizon_ms: u64,
    stop_gap_ms: u64,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::from_config(&ScrollConfig::default())
    }
}

impl VelocityTracker {
    /// Creates a tracker.
    ///
    /// - `horizon_ms`: samples older than this relative to the newest one are
    ///   ignored by the estimate.
    /// - `stop_gap_ms`: a larger gap between consecutive samples of a pointer
    ///   discards that pointer's earlier samples.
    #[must_use]
    pub fn new(horizon_ms: u64, stop_gap_ms: u64) -> Self {
        Self {
            histories: HashMap::new(),
            horizon_ms,
            stop_gap_ms,
        }
    }

    /// Creates a tracker using the window from `config`.
    #[must_use]
    pub fn from_config(config: &ScrollConfig) -> Self {
        Self::new(config.velocity_horizon_ms, config.velocity_stop_gap_ms)
    }

    /// Forgets every sample.
    pub fn clear(&mut self) {
        self.histories.clear();
    }

    /// Returns `true` if no samples are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.histories.values().all(VecDeque::is_empty)
    }

    /// Records the position of every pointer in `event`.
    pub fn add_movement(&mut self, event: &TouchEvent) {
        for sample in &event.pointers {
            self.add_sample(sample.id, event.time_ms, sample.position.y);
        }
    }

    /// Records one sample for `id`.
    ///
    /// Samples older than the newest recorded one are dropped; a sample with
    /// the same timestamp replaces it.
    pub fn add_sample(&mut self, id: PointerId, time_ms: u64, y: f64) {
        let history = self.histories.entry(id).or_default();
        if let Some(last) = history.back().copied() {
            if time_ms < last.time_ms {
                return;
            }
            if time_ms == last.time_ms {
                history.pop_back();
            } else if time_ms - last.time_ms > self.stop_gap_ms {
                history.clear();
            }
        }
        history.push_back(Sample { time_ms, y });
        if history.len() > MAX_SAMPLES {
            history.pop_front();
        }
    }

    /// Estimated vertical velocity of `id` in pixels per second.
    ///
    /// Positive values mean the pointer moves toward larger `y`. The result is
    /// clamped to `±max_velocity`; fewer than two samples in the window yield
    /// `0.0`.
    #[must_use]
    pub fn velocity(&self, id: PointerId, max_velocity: f64) -> f64 {
        let Some(history) = self.histories.get(&id) else {
            return 0.0;
        };
        let Some(newest) = history.back() else {
            return 0.0;
        };
        let oldest_allowed = newest.time_ms.saturating_sub(self.horizon_ms);

        let mut count = 0.0;
        let mut sum_t = 0.0;
        let mut sum_y = 0.0;
        for s in history.iter().filter(|s| s.time_ms >= oldest_allowed) {
            count += 1.0;
            sum_t += relative_ms(newest.time_ms, s.time_ms);
            sum_y += s.y;
        }
        if count < 2.0 {
            return 0.0;
        }
        let mean_t = sum_t / count;
        let mean_y = sum_y / count;

        let mut num = 0.0;
        let mut den = 0.0;
        for s in history.iter().filter(|s| s.time_ms >= oldest_allowed) {
            let dt = relative_ms(newest.time_ms, s.time_ms) - mean_t;
            num += dt * (s.y - mean_y);
            den += dt * dt;
        }
        if den == 0.0 {
            return 0.0;
        }

        let max_velocity = max_velocity.abs();
        (num / den * 1000.0).clamp(-max_velocity, max_velocity)
    }
}

/// Time of `sample` relative to `newest`, in (non-positive) milliseconds.
fn relative_ms(newest: u64, sample: u64) -> f64 {
    -((newest - sample) as f64)
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::*;
    use crate::event::TouchAction;

    const P: PointerId = PointerId(0);

    fn tracker_with(samples: &[(u64, f64)]) -> VelocityTracker {
        let mut tracker = VelocityTracker::new(100, 40);
        for &(t, y) in samples {
            tracker.add_sample(P, t, y);
        }
        tracker
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn constant_motion_yields_exact_velocity() {
        let tracker = tracker_with(&[(0, 100.0), (10, 90.0), (20, 80.0), (30, 70.0)]);
        assert!(approx(tracker.velocity(P, 10_000.0), -1000.0));
    }

    #[test]
    fn fewer_than_two_samples_is_zero() {
        assert_eq!(tracker_with(&[]).velocity(P, 1000.0), 0.0);
        assert_eq!(tracker_with(&[(5, 10.0)]).velocity(P, 1000.0), 0.0);
        assert_eq!(tracker_with(&[(0, 1.0)]).velocity(PointerId(9), 1000.0), 0.0);
    }

    #[test]
    fn velocity_is_clamped_to_maximum() {
        let tracker = tracker_with(&[(0, 0.0), (10, 500.0)]);
        assert_eq!(tracker.velocity(P, 8000.0), 8000.0);
        let tracker = tracker_with(&[(0, 500.0), (10, 0.0)]);
        assert_eq!(tracker.velocity(P, 8000.0), -8000.0);
    }

    #[test]
    fn long_pause_discards_earlier_motion() {
        let tracker = tracker_with(&[(0, 0.0), (10, 200.0), (100, 200.0), (110, 210.0)]);
        assert!(approx(tracker.velocity(P, 10_000.0), 1000.0));
    }

    #[test]
    fn samples_outside_horizon_are_ignored() {
        // Steady 1 px/ms for 150 ms, then 2 px/ms. Only the last 100 ms count.
        let mut samples = alloc::vec::Vec::new();
        let mut y = 0.0;
        for t in (0..=150).step_by(10) {
            samples.push((t, y));
            y += 10.0;
        }
        let mut tracker = tracker_with(&samples);
        for t in (160..=300).step_by(10) {
            y += 20.0;
            tracker.add_sample(P, t, y);
        }
        assert!(approx(tracker.velocity(P, 10_000.0), 2000.0));
    }

    #[test]
    fn out_of_order_samples_are_dropped_and_duplicates_replaced() {
        let mut tracker = tracker_with(&[(0, 0.0), (10, 10.0)]);
        tracker.add_sample(P, 5, 1000.0);
        tracker.add_sample(P, 10, 20.0);
        assert!(approx(tracker.velocity(P, 10_000.0), 2000.0));
    }

    #[test]
    fn pointers_are_tracked_independently() {
        let mut tracker = VelocityTracker::new(100, 40);
        for (t, a, b) in [(0, 0.0, 0.0), (10, 10.0, -5.0), (20, 20.0, -10.0)] {
            let event = TouchEvent::new(TouchAction::Move, t)
                .with_pointer(PointerId(1), Point::new(0.0, a))
                .with_pointer(PointerId(2), Point::new(0.0, b));
            tracker.add_movement(&event);
        }
        assert!(approx(tracker.velocity(PointerId(1), 10_000.0), 1000.0));
        assert!(approx(tracker.velocity(PointerId(2), 10_000.0), -500.0));

        tracker.clear();
        assert!(tracker.is_empty());
        assert_eq!(tracker.velocity(PointerId(1), 10_000.0), 0.0);
    }
}
