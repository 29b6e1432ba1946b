// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scroll chain component: one scroll surface over many regions.
//!
//! [`ScrollChain`] owns every piece of per-widget scroll state: the registry of
//! regions, the single [`ScrollDistributor`], the gesture tracker, the velocity
//! tracker, the fling scroller and the edge effect. Hosts drive it from two
//! kinds of entry points, both on the event-loop thread:
//!
//! - Touch callbacks: [`ScrollChain::should_intercept`] then
//!   [`ScrollChain::handle`], following the usual two-phase dispatch.
//! - The animation callback: [`ScrollChain::compute_scroll`] once per frame.
//!
//! Side effects the host must perform (redraws, telling ancestors to stop
//! intercepting) are accumulated as [`HostRequests`] and drained with
//! [`ScrollChain::take_requests`].
//!
//! Drags and fling ticks share the same distributor, so `scroll` has a single
//! source of truth no matter which path moved it.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Size};
//! use understory_scroll_chain::{
//!     BoundedRegion, HostRequests, PointerId, ScrollChain, ScrollConfig, ScrollRegistry,
//!     TouchAction, TouchEvent,
//! };
//!
//! let registry = ScrollRegistry::from_regions([BoundedRegion::new(100), BoundedRegion::new(400)]);
//! let mut chain = ScrollChain::new(registry, ScrollConfig::default());
//! chain.set_view_size(Size::new(320.0, 480.0));
//!
//! let touch = |action, y, t| TouchEvent::single(action, PointerId(0), Point::new(100.0, y), t);
//! chain.handle(&touch(TouchAction::Down, 400.0, 0));
//! chain.handle(&touch(TouchAction::Move, 380.0, 16));
//! chain.handle(&touch(TouchAction::Move, 250.0, 32));
//!
//! // 20 px crossed the 8 px slop (12 px scrolled), then 130 px more.
//! assert_eq!(chain.scroll(), 142);
//! assert!(chain.take_requests().contains(HostRequests::DISALLOW_PARENT_INTERCEPT));
//! ```

use kurbo::Size;

use crate::config::ScrollConfig;
use crate::distributor::ScrollDistributor;
use crate::edge::{EdgeEffect, NoEdgeEffect};
use crate::event::{PointerId, TouchAction, TouchEvent};
use crate::fling::FlingScroller;
use crate::gesture::{GesturePhase, GestureTracker, subtract_slop};
use crate::region::ScrollRegion;
use crate::registry::ScrollRegistry;
use crate::velocity::VelocityTracker;

bitflags::bitflags! {
    /// Work the host should perform on behalf of the chain.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct HostRequests: u8 {
        /// Schedule another frame (redraw and call `compute_scroll`).
        const REDRAW = 0b0000_0001;
        /// Ancestors must stop intercepting the current gesture.
        const DISALLOW_PARENT_INTERCEPT = 0b0000_0010;
    }
}

/// A chain of scroll regions driven as one scroll surface.
///
/// `R` is the region type stored in the registry; `E` receives overscroll
/// feedback.
#[derive(Debug)]
pub struct ScrollChain<R, E = NoEdgeEffect> {
    registry: ScrollRegistry<R>,
    distributor: ScrollDistributor,
    gesture: GestureTracker,
    velocity: VelocityTracker,
    scroller: FlingScroller,
    edge: E,
    config: ScrollConfig,
    view_size: Size,
    requests: HostRequests,
}

impl<R: ScrollRegion> ScrollChain<R> {
    /// Creates a chain without overscroll feedback.
    #[must_use]
    pub fn new(registry: ScrollRegistry<R>, config: ScrollConfig) -> Self {
        Self::with_edge_effect(registry, config, NoEdgeEffect)
    }
}

impl<R: ScrollRegion, E: EdgeEffect> ScrollChain<R, E> {
    /// Creates a chain that reports overscroll to `edge`.
    #[must_use]
    pub fn with_edge_effect(registry: ScrollRegistry<R>, config: ScrollConfig, edge: E) -> Self {
        Self {
            registry,
            distributor: ScrollDistributor::new(),
            gesture: GestureTracker::default(),
            velocity: VelocityTracker::from_config(&config),
            scroller: FlingScroller::new(&config),
            edge,
            config,
            view_size: Size::ZERO,
            requests: HostRequests::empty(),
        }
    }

    /// Aggregate scroll position.
    #[must_use]
    pub fn scroll(&self) -> i32 {
        self.distributor.scroll()
    }

    /// The registered regions, in document order.
    #[must_use]
    pub fn registry(&self) -> &ScrollRegistry<R> {
        &self.registry
    }

    /// Scroll position and spillover cursor.
    #[must_use]
    pub fn distributor(&self) -> &ScrollDistributor {
        &self.distributor
    }

    /// The tunables this chain was built with.
    #[must_use]
    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// The overscroll edge effect.
    #[must_use]
    pub fn edge_effect(&self) -> &E {
        &self.edge
    }

    /// Mutable access to the overscroll edge effect.
    pub fn edge_effect_mut(&mut self) -> &mut E {
        &mut self.edge
    }

    /// Current gesture phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.gesture.phase(self.scroller.is_finished())
    }

    /// Returns `true` when no fling is running.
    #[must_use]
    pub fn is_fling_finished(&self) -> bool {
        self.scroller.is_finished()
    }

    /// Size of the view, used to normalize edge pulls.
    #[must_use]
    pub fn view_size(&self) -> Size {
        self.view_size
    }

    /// Updates the size of the view.
    pub fn set_view_size(&mut self, size: Size) {
        self.view_size = size;
    }

    /// Returns and clears the accumulated host requests.
    pub fn take_requests(&mut self) -> HostRequests {
        core::mem::replace(&mut self.requests, HostRequests::empty())
    }

    /// Scrolls the chain by `delta` and returns the absorbed amount.
    pub fn scroll_by(&mut self, delta: i32) -> i32 {
        self.distributor.scroll_by(&mut self.registry, delta)
    }

    /// Scrolls the chain toward `target` and returns the absorbed amount.
    pub fn scroll_to(&mut self, target: i32) -> i32 {
        self.distributor.distribute_to(&mut self.registry, target)
    }

    /// Intercept phase of touch dispatch.
    ///
    /// Returns `true` when the chain claims the gesture from its descendants:
    /// on `Down` while a fling is still running, while already dragging, or
    /// once a move crosses the touch slop. Motion samples are recorded even
    /// when the event passes through.
    pub fn should_intercept(&mut self, event: &TouchEvent) -> bool {
        match event.action {
            TouchAction::Move if self.gesture.is_dragging() => return true,
            TouchAction::Down => {
                self.gesture.begin(event);
                self.gesture.update_last_motion(event);
                self.velocity.clear();
                self.velocity.add_movement(event);
                return !self.scroller.is_finished();
            }
            TouchAction::Move => {
                if self.gesture.active_pointer().is_none() {
                    return false;
                }
                self.velocity.add_movement(event);
                let delta = self.gesture.delta_y(event);
                // The crossing move is scrolled by the next `handle`, so the
                // last position stays where the slop was measured from.
                if self.gesture.exceeds_slop(delta, self.config.touch_slop) {
                    self.start_drag();
                    self.gesture.start_drag_owing_slop();
                }
            }
            TouchAction::Up | TouchAction::Cancel => {
                self.gesture.end();
                self.velocity.clear();
            }
            TouchAction::PointerDown(id) => self.gesture.pointer_down(event, id),
            TouchAction::PointerUp(id) => self.pointer_up(event, id),
            TouchAction::GenericScroll { .. } => return false,
        }
        self.gesture.is_dragging()
    }

    /// Handle phase of touch dispatch. Returns whether the event was consumed.
    pub fn handle(&mut self, event: &TouchEvent) -> bool {
        match event.action {
            TouchAction::Down => {
                if self.registry.is_empty() {
                    return false;
                }
                if !self.scroller.is_finished() {
                    self.start_drag();
                }
                self.gesture.begin(event);
                self.gesture.update_last_motion(event);
                self.velocity.clear();
                self.velocity.add_movement(event);
            }
            TouchAction::Move => {
                self.velocity.add_movement(event);
                self.drag_move(event);
            }
            TouchAction::Up => {
                self.velocity.add_movement(event);
                if self.gesture.is_dragging() {
                    let id = self
                        .gesture
                        .active_pointer()
                        .or_else(|| event.primary().map(|p| p.id));
                    let velocity = id.map_or(0.0, |id| {
                        self.velocity.velocity(id, self.config.max_fling_velocity)
                    });
                    if velocity.abs() > self.config.min_fling_velocity {
                        self.scroller
                            .fling(self.distributor.scroll(), -velocity, event.time_ms);
                        self.requests |= HostRequests::REDRAW;
                    }
                }
                self.end_drag();
            }
            TouchAction::Cancel => self.end_drag(),
            TouchAction::PointerDown(id) => {
                self.velocity.add_movement(event);
                self.gesture.pointer_down(event, id);
            }
            TouchAction::PointerUp(id) => {
                self.velocity.add_movement(event);
                self.pointer_up(event, id);
            }
            TouchAction::GenericScroll { vscroll } => return self.generic_scroll(vscroll),
        }
        true
    }

    /// Advances a running fling to `now_ms`.
    ///
    /// Returns `false` when no fling was running. Otherwise the chain is
    /// scrolled to the curve's position and exactly one redraw is requested.
    /// A forward fling that the regions stop short of the curve is handed to
    /// the edge effect via [`EdgeEffect::absorb`] and ends early.
    pub fn compute_scroll(&mut self, now_ms: u64) -> bool {
        if !self.scroller.compute_offset(now_ms) {
            return false;
        }
        let target = self.scroller.current();
        self.distributor.distribute_to(&mut self.registry, target);
        tracing::trace!(target, scroll = self.distributor.scroll(), "fling tick");

        let velocity = self.scroller.current_velocity();
        if velocity > 0.0 && target > self.distributor.scroll() {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "Velocities are clamped to the configured maximum"
            )]
            let velocity = velocity as i32;
            tracing::debug!(velocity, scroll = self.distributor.scroll(), "fling absorbed at edge");
            self.edge.absorb(velocity);
            self.scroller.abort();
        }
        self.requests |= HostRequests::REDRAW;
        true
    }

    /// Lets the host paint the edge effect.
    ///
    /// Skipped while the effect is finished. Otherwise the effect is sized to
    /// the view and `paint` is called; returning `true` means the effect is
    /// still animating and another frame is requested.
    pub fn draw_edge_effect(&mut self, paint: impl FnOnce(&mut E, Size) -> bool) {
        if self.edge.is_finished() {
            return;
        }
        self.edge.set_size(self.view_size);
        if paint(&mut self.edge, self.view_size) {
            self.requests |= HostRequests::REDRAW;
        }
    }

    fn start_drag(&mut self) {
        self.scroller.abort();
        self.gesture.start_drag();
        self.requests |= HostRequests::DISALLOW_PARENT_INTERCEPT;
        tracing::debug!(scroll = self.distributor.scroll(), "drag started");
    }

    fn end_drag(&mut self) {
        if self.gesture.end() {
            self.edge.release();
            if !self.edge.is_finished() {
                self.requests |= HostRequests::REDRAW;
            }
            tracing::debug!(scroll = self.distributor.scroll(), "drag ended");
        }
        self.velocity.clear();
    }

    fn pointer_up(&mut self, event: &TouchEvent, id: PointerId) {
        let before = self.gesture.active_pointer();
        self.gesture.pointer_up(event, id);
        if self.gesture.active_pointer() != before {
            self.velocity.clear();
        }
    }

    fn drag_move(&mut self, event: &TouchEvent) {
        let mut delta = self.gesture.delta_y(event);
        if !self.gesture.is_dragging() || self.gesture.owes_slop() {
            if !self.gesture.exceeds_slop(delta, self.config.touch_slop) {
                return;
            }
            if !self.gesture.take_owed_slop() {
                self.start_drag();
            }
            delta = subtract_slop(delta, self.config.touch_slop);
        }
        self.gesture.update_last_motion(event);

        // Content moves opposite to the finger.
        #[expect(
            clippy::cast_possible_truncation,
            reason = "Per-event touch deltas are far inside the i32 range"
        )]
        let requested = (-delta) as i32;
        let absorbed = self.distributor.scroll_by(&mut self.registry, requested);
        let unabsorbed = -delta - f64::from(absorbed);
        if unabsorbed > 0.0 {
            let height = self.view_size.height.max(1.0);
            let width = self.view_size.width.max(1.0);
            let x = self.gesture.x_of(event);
            self.edge.pull(
                unabsorbed / height,
                (1.0 - x / width).clamp(0.0, 1.0),
            );
        }
        if !self.edge.is_finished() {
            self.requests |= HostRequests::REDRAW;
        }
    }

    fn generic_scroll(&mut self, vscroll: f64) -> bool {
        if self.gesture.is_dragging() || vscroll == 0.0 {
            return false;
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "Wheel deltas are a few notches; `as` saturates"
        )]
        let delta = (vscroll * self.config.generic_scroll_factor) as i32;
        let absorbed = self.distributor.scroll_by(&mut self.registry, -delta);
        absorbed != 0
    }
}
