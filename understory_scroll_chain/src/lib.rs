// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_scroll_chain --heading-base-level=0

//! Understory Scroll Chain: nested scroll handoff for UI.
//!
//! A container often holds several independently scrollable children, such as a
//! collapsible header above a list. This crate makes them behave as one scroll
//! surface with a single scroll position, a single drag gesture, and a single
//! fling. Scroll delta is handed to the children in document order; when one
//! runs out of room, the remainder spills into the next.
//!
//! The pieces, leaves first:
//!
//! - [`region`]: the [`ScrollRegion`] capability and the stock [`Region`] kinds.
//! - [`registry`]: flatten a view hierarchy into the ordered [`ScrollRegistry`].
//! - [`distributor`]: the [`ScrollDistributor`] owning `scroll` and the spillover cursor.
//! - [`event`]: platform-neutral [`TouchEvent`] records.
//! - [`gesture`]: pointer identity and drag thresholding ([`GestureTracker`]).
//! - [`velocity`]: release velocity estimation ([`VelocityTracker`]).
//! - [`fling`]: the decaying fling curve ([`FlingScroller`]).
//! - [`edge`]: the overscroll [`EdgeEffect`] collaborator.
//! - [`chain`]: the [`ScrollChain`] component wiring all of the above.
//!
//! Everything is single-threaded and event driven. The host forwards touch
//! events through [`ScrollChain::should_intercept`] and [`ScrollChain::handle`],
//! calls [`ScrollChain::compute_scroll`] once per animation frame, and performs
//! whatever [`ScrollChain::take_requests`] asks for.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_scroll_chain::{
//!     BoundedRegion, FlexibleSpace, HostRequests, PointerId, Region, ScrollChain, ScrollConfig,
//!     ScrollRegion, ScrollRegistry, TouchAction, TouchEvent,
//! };
//!
//! // A 200 px header that collapses to 56 px, followed by a list.
//! let regions = [
//!     Region::from(FlexibleSpace::new(56, 200)),
//!     Region::from(BoundedRegion::new(2_000)),
//! ];
//! let mut chain = ScrollChain::new(ScrollRegistry::from_regions(regions), ScrollConfig::default());
//! chain.set_view_size(Size::new(360.0, 640.0));
//!
//! // Swipe up quickly.
//! let touch = |action, y, t| TouchEvent::single(action, PointerId(0), Point::new(180.0, y), t);
//! chain.handle(&touch(TouchAction::Down, 600.0, 0));
//! for (i, y) in [560.0, 500.0, 420.0, 320.0].into_iter().enumerate() {
//!     chain.handle(&touch(TouchAction::Move, y, 16 * (i as u64 + 1)));
//! }
//! chain.handle(&touch(TouchAction::Up, 320.0, 80));
//!
//! // The header collapsed first; the rest went to the list.
//! let region = |i: usize| chain.registry().get(i).map(|child| *child.region());
//! let header = region(0).and_then(|r| r.as_flexible_space().copied());
//! assert!(header.is_some_and(|h| h.is_collapsed()));
//! let list_offset = region(1).map_or(0, |r| r.current_offset());
//! assert_eq!(chain.scroll(), 144 + list_offset);
//!
//! // The release started a fling; run it to completion.
//! let mut now = 80;
//! while chain.take_requests().contains(HostRequests::REDRAW) {
//!     now += 16;
//!     chain.compute_scroll(now);
//! }
//! assert!(chain.is_fling_finished());
//! ```
//!
//! ## Features
//!
//! - `std` (default): use the standard library.
//! - `libm`: float math for `no_std` targets, forwarded to Kurbo.
//! - `serde`: `Serialize`/`Deserialize` for [`ScrollConfig`].
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod chain;
pub mod config;
pub mod distributor;
pub mod edge;
pub mod error;
pub mod event;
pub mod fling;
pub mod gesture;
pub mod region;
pub mod registry;
pub mod velocity;

pub use chain::{HostRequests, ScrollChain};
pub use config::ScrollConfig;
pub use distributor::ScrollDistributor;
pub use edge::{EdgeEffect, NoEdgeEffect};
pub use error::RegistryError;
pub use event::{PointerId, PointerSample, TouchAction, TouchEvent};
pub use fling::FlingScroller;
pub use gesture::{GesturePhase, GestureTracker};
pub use region::{BoundedRegion, FlexibleSpace, Region, ScrollRegion};
pub use registry::{ScrollRegistry, ScrollableChild, ViewHierarchy};
pub use velocity::VelocityTracker;
