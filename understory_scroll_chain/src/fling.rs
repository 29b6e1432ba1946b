// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fling scroller: a friction-based decaying position curve.
//!
//! A fling is parameterized by a release velocity. Its total distance and
//! duration follow a spline deceleration model: with
//! `l = ln(0.35 · |v| / (friction · c))`, where `c` is a physical coefficient
//! derived from gravity and display density, the fling lasts
//! `1000 · e^(l / (r - 1))` milliseconds and travels
//! `friction · c · e^(r / (r - 1) · l)` pixels, `r` being the deceleration rate
//! `ln(0.78) / ln(0.9)`. Progress along the distance follows a precomputed
//! spline; the current velocity is the spline's slope.
//!
//! The scroller only produces positions. It does not know about the regions it
//! scrolls: the curve's bounds default to the whole `i32` range, and the scroll
//! chain stops a fling early when its regions run out of room.
//!
//! ```
//! use understory_scroll_chain::{FlingScroller, ScrollConfig};
//!
//! let mut scroller = FlingScroller::new(&ScrollConfig::default());
//! scroller.fling(0, 2000.0, 0);
//!
//! let mut last = 0;
//! let mut now = 0;
//! while scroller.compute_offset(now) {
//!     assert!(scroller.current() >= last);
//!     last = scroller.current();
//!     now += 16;
//! }
//! assert!(scroller.is_finished());
//! assert_eq!(scroller.current(), scroller.final_position());
//! ```

use core::f64::consts::E;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::config::ScrollConfig;

/// Resolution of the position spline.
const SPLINE_SAMPLES: usize = 100;
const INFLEXION: f64 = 0.35;
const START_TENSION: f64 = 0.5;
const END_TENSION: f64 = 1.0;
const P1: f64 = START_TENSION * INFLEXION;
const P2: f64 = 1.0 - END_TENSION * (1.0 - INFLEXION);
/// Standard gravity, m/s².
const GRAVITY_EARTH: f64 = 9.80665;
const INCHES_PER_METER: f64 = 39.37;
/// Empirical tuning of the physical coefficient.
const FRICTION_TUNING: f64 = 0.84;

/// Decaying fling curve over an integer position axis.
#[derive(Clone, Debug)]
pub struct FlingScroller {
    spline: [f64; SPLINE_SAMPLES + 1],
    deceleration_rate: f64,
    physical_coeff: f64,
    friction: f64,

    start: i32,
    final_position: i32,
    current: i32,
    min: i32,
    max: i32,
    distance: f64,
    start_time_ms: u64,
    duration_ms: u64,
    current_velocity: f64,
    finished: bool,
}

impl Default for FlingScroller {
    fn default() -> Self {
        Self::new(&ScrollConfig::default())
    }
}

impl FlingScroller {
    /// Creates a finished scroller using the friction and density of `config`.
    #[must_use]
    pub fn new(config: &ScrollConfig) -> Self {
        Self {
            spline: position_spline(),
            deceleration_rate: 0.78_f64.ln() / 0.9_f64.ln(),
            physical_coeff: GRAVITY_EARTH * INCHES_PER_METER * config.pixels_per_inch * FRICTION_TUNING,
            friction: config.scroll_friction,
            start: 0,
            final_position: 0,
            current: 0,
            min: -i32::MAX,
            max: i32::MAX,
            distance: 0.0,
            start_time_ms: 0,
            duration_ms: 0,
            current_velocity: 0.0,
            finished: true,
        }
    }

    /// Starts a fling from `start` with `velocity` (px/s) at time `now_ms`,
    /// over the effectively unbounded range `-i32::MAX..=i32::MAX`.
    pub fn fling(&mut self, start: i32, velocity: f64, now_ms: u64) {
        self.fling_within(start, velocity, -i32::MAX, i32::MAX, now_ms);
    }

    /// Starts a fling whose positions are clamped to `min..=max`.
    pub fn fling_within(&mut self, start: i32, velocity: f64, min: i32, max: i32, now_ms: u64) {
        let speed = velocity.abs();
        let (duration_ms, total) = if speed > 0.0 && speed.is_finite() {
            (self.spline_duration_ms(speed), self.spline_distance(speed))
        } else {
            (0, 0.0)
        };
        let signed = if velocity < 0.0 { -total } else { total };

        self.finished = false;
        self.start = start;
        self.current = start;
        self.min = min.min(max);
        self.max = max.max(min);
        self.start_time_ms = now_ms;
        self.duration_ms = duration_ms;
        self.distance = signed;
        self.current_velocity = velocity;
        self.final_position = offset_by(start, signed).clamp(self.min, self.max);

        tracing::debug!(
            start,
            velocity,
            final_position = self.final_position,
            duration_ms,
            "fling started"
        );
    }

    /// Advances the curve to `now_ms`.
    ///
    /// Returns `false` if the scroller was already finished; otherwise updates
    /// [`current`](Self::current) and returns `true`. The call that reaches the
    /// end of the curve still returns `true` and marks the scroller finished.
    pub fn compute_offset(&mut self, now_ms: u64) -> bool {
        if self.finished {
            return false;
        }

        let elapsed = now_ms.saturating_sub(self.start_time_ms);
        if elapsed < self.duration_ms {
            let duration = self.duration_ms as f64;
            let t = elapsed as f64 / duration;
            let index = spline_index(t);
            let (distance_coef, velocity_coef) = if index < SPLINE_SAMPLES {
                let t_inf = index as f64 / SPLINE_SAMPLES as f64;
                let t_sup = (index + 1) as f64 / SPLINE_SAMPLES as f64;
                let d_inf = self.spline[index];
                let d_sup = self.spline[index + 1];
                let velocity_coef = (d_sup - d_inf) / (t_sup - t_inf);
                (d_inf + (t - t_inf) * velocity_coef, velocity_coef)
            } else {
                (1.0, 0.0)
            };

            self.current_velocity = velocity_coef * self.distance / duration * 1000.0;
            let span = f64::from(self.final_position) - f64::from(self.start);
            self.current = offset_by(self.start, distance_coef * span).clamp(self.min, self.max);
            if self.current == self.final_position {
                self.finish();
            }
        } else {
            self.current = self.final_position;
            self.finish();
        }
        true
    }

    /// Stops the fling where it is. Safe to call when already finished.
    pub fn abort(&mut self) {
        if !self.finished {
            tracing::debug!(current = self.current, "fling aborted");
        }
        self.finished = true;
        self.current_velocity = 0.0;
    }

    /// Returns `true` when no fling is running.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Position computed by the latest [`compute_offset`](Self::compute_offset).
    #[must_use]
    pub fn current(&self) -> i32 {
        self.current
    }

    /// Signed velocity (px/s) at the latest computed position.
    #[must_use]
    pub fn current_velocity(&self) -> f64 {
        self.current_velocity
    }

    /// Where the fling started.
    #[must_use]
    pub fn start_position(&self) -> i32 {
        self.start
    }

    /// Where the fling will come to rest.
    #[must_use]
    pub fn final_position(&self) -> i32 {
        self.final_position
    }

    /// Total duration of the current (or last) fling.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    fn finish(&mut self) {
        self.finished = true;
        self.current_velocity = 0.0;
        tracing::debug!(position = self.current, "fling finished");
    }

    fn spline_deceleration(&self, speed: f64) -> f64 {
        (INFLEXION * speed / (self.friction * self.physical_coeff)).ln()
    }

    fn spline_duration_ms(&self, speed: f64) -> u64 {
        let l = self.spline_deceleration(speed);
        millis(1000.0 * E.powf(l / (self.deceleration_rate - 1.0)))
    }

    fn spline_distance(&self, speed: f64) -> f64 {
        let l = self.spline_deceleration(speed);
        let rate = self.deceleration_rate;
        self.friction * self.physical_coeff * E.powf(rate / (rate - 1.0) * l)
    }
}

/// Samples the normalized position-over-time spline at `SPLINE_SAMPLES + 1`
/// evenly spaced times.
fn position_spline() -> [f64; SPLINE_SAMPLES + 1] {
    let mut spline = [0.0; SPLINE_SAMPLES + 1];
    let mut x_min = 0.0_f64;
    for (i, slot) in spline.iter_mut().enumerate().take(SPLINE_SAMPLES) {
        let alpha = i as f64 / SPLINE_SAMPLES as f64;
        let mut x_max = 1.0_f64;
        let mut x = 0.0;
        let mut coef = 0.0;
        // Bisect for the curve parameter whose time coordinate is `alpha`.
        for _ in 0..64 {
            x = x_min + (x_max - x_min) / 2.0;
            coef = 3.0 * x * (1.0 - x);
            let tx = coef * ((1.0 - x) * P1 + x * P2) + x * x * x;
            if (tx - alpha).abs() < 1e-5 {
                break;
            }
            if tx > alpha {
                x_max = x;
            } else {
                x_min = x;
            }
        }
        *slot = coef * ((1.0 - x) * START_TENSION + x) + x * x * x;
    }
    spline[SPLINE_SAMPLES] = 1.0;
    spline
}

fn spline_index(t: f64) -> usize {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "t is in [0, 1); the index is bounds-checked by the caller"
    )]
    {
        (SPLINE_SAMPLES as f64 * t) as usize
    }
}

fn millis(value: f64) -> u64 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Fling durations are a few seconds at most; `as` saturates"
    )]
    {
        value as u64
    }
}

/// `base + round(delta)`, saturating at the `i32` range.
fn offset_by(base: i32, delta: f64) -> i32 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "`as` saturates out-of-range positions to the i32 bounds"
    )]
    {
        (f64::from(base) + delta.round()) as i32
    }
}
