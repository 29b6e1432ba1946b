// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables for touch slop, fling thresholds, friction, and velocity tracking.

/// Configuration shared by the gesture state machine, velocity tracker, and
/// fling scroller.
///
/// All lengths are in device pixels and all velocities in pixels per second.
/// [`ScrollConfig::default`] uses the platform defaults at a display density of
/// `1.0`; use [`ScrollConfig::for_density`] to scale them for denser displays.
///
/// ```rust
/// use understory_scroll_chain::ScrollConfig;
///
/// let config = ScrollConfig::for_density(2.0).with_touch_slop(12.0);
/// assert_eq!(config.touch_slop, 12.0);
/// assert_eq!(config.min_fling_velocity, 100.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScrollConfig {
    /// Distance a pointer must travel from its last recorded position before a
    /// touch is treated as a drag.
    pub touch_slop: f64,
    /// Release velocities at or below this magnitude do not fling.
    pub min_fling_velocity: f64,
    /// Upper bound applied to tracked release velocities.
    pub max_fling_velocity: f64,
    /// Friction coefficient of the fling decay curve.
    pub scroll_friction: f64,
    /// Display pixels per inch, used to derive the fling's physical coefficient.
    pub pixels_per_inch: f64,
    /// Samples older than this (relative to the newest one) are ignored by the
    /// velocity estimate.
    pub velocity_horizon_ms: u64,
    /// A gap between consecutive samples larger than this means the pointer
    /// stopped; earlier samples are discarded.
    pub velocity_stop_gap_ms: u64,
    /// Pixels scrolled per unit of generic (wheel) scroll.
    pub generic_scroll_factor: f64,
}

/// Touch slop at density 1.0.
const TOUCH_SLOP_DIP: f64 = 8.0;
/// Minimum fling velocity at density 1.0.
const MIN_FLING_VELOCITY_DIP: f64 = 50.0;
/// Maximum fling velocity at density 1.0.
const MAX_FLING_VELOCITY_DIP: f64 = 8000.0;
/// Baseline pixels per inch at density 1.0.
const PIXELS_PER_INCH_DIP: f64 = 160.0;
/// Preferred list item height at density 1.0.
const GENERIC_SCROLL_FACTOR_DIP: f64 = 64.0;

impl Default for ScrollConfig {
    fn default() -> Self {
        Self::for_density(1.0)
    }
}

impl ScrollConfig {
    /// Returns the default configuration scaled for a display `density`
    /// (device pixels per density-independent pixel).
    ///
    /// Non-finite or non-positive densities fall back to `1.0`.
    #[must_use]
    pub fn for_density(density: f64) -> Self {
        let density = if density.is_finite() && density > 0.0 {
            density
        } else {
            1.0
        };
        Self {
            touch_slop: TOUCH_SLOP_DIP * density,
            min_fling_velocity: MIN_FLING_VELOCITY_DIP * density,
            max_fling_velocity: MAX_FLING_VELOCITY_DIP * density,
            scroll_friction: 0.015,
            pixels_per_inch: PIXELS_PER_INCH_DIP * density,
            velocity_horizon_ms: 100,
            velocity_stop_gap_ms: 40,
            generic_scroll_factor: GENERIC_SCROLL_FACTOR_DIP * density,
        }
    }

    /// Sets the touch slop.
    #[must_use]
    pub fn with_touch_slop(mut self, touch_slop: f64) -> Self {
        self.touch_slop = touch_slop;
        self
    }

    /// Sets the minimum and maximum fling velocities.
    ///
    /// The pair is normalized so that `min <= max`.
    #[must_use]
    pub fn with_fling_velocity_limits(mut self, min: f64, max: f64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.min_fling_velocity = min;
        self.max_fling_velocity = max;
        self
    }

    /// Sets the fling friction coefficient.
    #[must_use]
    pub fn with_scroll_friction(mut self, friction: f64) -> Self {
        self.scroll_friction = friction;
        self
    }

    /// Sets the generic scroll factor.
    #[must_use]
    pub fn with_generic_scroll_factor(mut self, factor: f64) -> Self {
        self.generic_scroll_factor = factor;
        self
    }

    /// Sets the velocity tracker's horizon and stop gap, in milliseconds.
    #[must_use]
    pub fn with_velocity_window(mut self, horizon_ms: u64, stop_gap_ms: u64) -> Self {
        self.velocity_horizon_ms = horizon_ms;
        self.velocity_stop_gap_ms = stop_gap_ms;
        self
    }
}
