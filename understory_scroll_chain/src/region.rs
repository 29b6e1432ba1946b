// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll capability of a single region in the chain.
//!
//! A region is anything that owns a bounded scroll offset: a scroll view, a
//! collapsible header, a nested list. The chain never caches a region's offset;
//! it asks the region to [`absorb`](ScrollRegion::absorb) a delta and uses the
//! reported change.
//!
//! Two kinds ship with the crate:
//!
//! - [`BoundedRegion`]: a plain scroll view whose offset is clamped to `[0, max]`.
//! - [`FlexibleSpace`]: a header that shrinks from a maximum to a minimum height
//!   as content scrolls forward.
//!
//! [`Region`] is the closed set of both, for chains that mix them without
//! boxing. Hosts with their own widgets implement [`ScrollRegion`] directly.
//! Shared handles (`Rc<RefCell<R>>`) implement it too, so a host can keep
//! observing a region after handing it to the registry.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

/// Capability every region in a scroll chain must provide.
pub trait ScrollRegion {
    /// Current scroll offset of the region.
    fn current_offset(&self) -> i32;

    /// Scrolls the region by `delta`, clamping to its own extent.
    fn scroll_by(&mut self, delta: i32);

    /// Scrolls by `delta` and returns how much the offset actually changed.
    ///
    /// The result has the same sign as `delta` (or is zero) and its magnitude
    /// never exceeds `|delta|`.
    fn absorb(&mut self, delta: i32) -> i32 {
        let before = self.current_offset();
        self.scroll_by(delta);
        self.current_offset().saturating_sub(before)
    }
}

impl<R: ScrollRegion + ?Sized> ScrollRegion for &mut R {
    fn current_offset(&self) -> i32 {
        (**self).current_offset()
    }

    fn scroll_by(&mut self, delta: i32) {
        (**self).scroll_by(delta);
    }

    fn absorb(&mut self, delta: i32) -> i32 {
        (**self).absorb(delta)
    }
}

impl<R: ScrollRegion + ?Sized> ScrollRegion for Box<R> {
    fn current_offset(&self) -> i32 {
        (**self).current_offset()
    }

    fn scroll_by(&mut self, delta: i32) {
        (**self).scroll_by(delta);
    }

    fn absorb(&mut self, delta: i32) -> i32 {
        (**self).absorb(delta)
    }
}

impl<R: ScrollRegion + ?Sized> ScrollRegion for Rc<RefCell<R>> {
    fn current_offset(&self) -> i32 {
        self.borrow().current_offset()
    }

    fn scroll_by(&mut self, delta: i32) {
        self.borrow_mut().scroll_by(delta);
    }

    fn absorb(&mut self, delta: i32) -> i32 {
        self.borrow_mut().absorb(delta)
    }
}

/// A scroll view whose offset ranges over `[0, max_offset]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoundedRegion {
    offset: i32,
    max_offset: i32,
}

impl BoundedRegion {
    /// Creates a region scrolled to the start of `[0, max_offset]`.
    ///
    /// Negative extents are treated as zero (nothing to scroll).
    #[must_use]
    pub fn new(max_offset: i32) -> Self {
        Self {
            offset: 0,
            max_offset: max_offset.max(0),
        }
    }

    /// Returns this region with its offset set (and clamped).
    #[must_use]
    pub fn with_offset(mut self, offset: i32) -> Self {
        self.offset = offset.clamp(0, self.max_offset);
        self
    }

    /// Largest reachable offset.
    #[must_use]
    pub fn max_offset(&self) -> i32 {
        self.max_offset
    }

    /// Changes the extent, clamping the current offset into it.
    pub fn set_max_offset(&mut self, max_offset: i32) {
        self.max_offset = max_offset.max(0);
        self.offset = self.offset.clamp(0, self.max_offset);
    }
}

impl ScrollRegion for BoundedRegion {
    fn current_offset(&self) -> i32 {
        self.offset
    }

    fn scroll_by(&mut self, delta: i32) {
        self.offset = self.offset.saturating_add(delta).clamp(0, self.max_offset);
    }
}

/// A header that collapses as content scrolls forward.
///
/// The header starts fully expanded at `max_height`. Scrolling forward by `d`
/// shrinks it by `d` down to `min_height`; scrolling backward grows it again.
/// Its scroll offset is `max_height - height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlexibleSpace {
    min_height: i32,
    max_height: i32,
    height: i32,
}

impl FlexibleSpace {
    /// Creates an expanded header. The bounds are swapped if given in reverse.
    #[must_use]
    pub fn new(min_height: i32, max_height: i32) -> Self {
        let (min_height, max_height) = if min_height <= max_height {
            (min_height, max_height)
        } else {
            (max_height, min_height)
        };
        Self {
            min_height,
            max_height,
            height: max_height,
        }
    }

    /// Current height.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Sets the height, clamped to the header's range.
    pub fn set_height(&mut self, height: i32) {
        self.height = height.clamp(self.min_height, self.max_height);
    }

    /// Returns `true` when the header is at its minimum height.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.height == self.min_height
    }

    /// Returns `true` when the header is at its maximum height.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.height == self.max_height
    }
}

impl ScrollRegion for FlexibleSpace {
    fn current_offset(&self) -> i32 {
        self.max_height - self.height
    }

    fn scroll_by(&mut self, delta: i32) {
        self.set_height(self.height.saturating_sub(delta));
    }
}

/// One of the region kinds that ship with the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    /// A clamped scroll view.
    Bounded(BoundedRegion),
    /// A collapsible header.
    FlexibleSpace(FlexibleSpace),
}

impl Region {
    /// The scroll view, if this region is one.
    #[must_use]
    pub fn as_bounded(&self) -> Option<&BoundedRegion> {
        match self {
            Self::Bounded(region) => Some(region),
            Self::FlexibleSpace(_) => None,
        }
    }

    /// The header, if this region is one.
    #[must_use]
    pub fn as_flexible_space(&self) -> Option<&FlexibleSpace> {
        match self {
            Self::FlexibleSpace(header) => Some(header),
            Self::Bounded(_) => None,
        }
    }
}

impl From<BoundedRegion> for Region {
    fn from(region: BoundedRegion) -> Self {
        Self::Bounded(region)
    }
}

impl From<FlexibleSpace> for Region {
    fn from(header: FlexibleSpace) -> Self {
        Self::FlexibleSpace(header)
    }
}

impl ScrollRegion for Region {
    fn current_offset(&self) -> i32 {
        match self {
            Self::Bounded(region) => region.current_offset(),
            Self::FlexibleSpace(header) => header.current_offset(),
        }
    }

    fn scroll_by(&mut self, delta: i32) {
        match self {
            Self::Bounded(region) => region.scroll_by(delta),
            Self::FlexibleSpace(header) => header.scroll_by(delta),
        }
    }
}
