// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overscroll edge effect collaborator.
//!
//! The chain only signals edge events; rendering and the glow's own decay
//! animation belong to the implementation of [`EdgeEffect`].
//!
//! - [`EdgeEffect::pull`] while a drag pushes past the end of the chain.
//! - [`EdgeEffect::release`] when that drag ends.
//! - [`EdgeEffect::absorb`] when a fling is stopped abruptly by the end.

use kurbo::Size;

/// Overscroll indicator driven by the scroll chain.
pub trait EdgeEffect {
    /// The user pulled past the edge.
    ///
    /// - `delta_fraction`: pull distance as a fraction of the view height.
    /// - `displacement`: horizontal touch position as a fraction of the view
    ///   width, in `[0, 1]`, measured from the right edge.
    fn pull(&mut self, delta_fraction: f64, displacement: f64);

    /// The pull ended.
    fn release(&mut self);

    /// A fling hit the edge with `velocity` (px/s).
    fn absorb(&mut self, velocity: i32);

    /// Returns `true` when the effect has nothing left to draw.
    fn is_finished(&self) -> bool;

    /// Sets the size the effect draws into.
    fn set_size(&mut self, size: Size);
}

impl<E: EdgeEffect + ?Sized> EdgeEffect for &mut E {
    fn pull(&mut self, delta_fraction: f64, displacement: f64) {
        (**self).pull(delta_fraction, displacement);
    }

    fn release(&mut self) {
        (**self).release();
    }

    fn absorb(&mut self, velocity: i32) {
        (**self).absorb(velocity);
    }

    fn is_finished(&self) -> bool {
        (**self).is_finished()
    }

    fn set_size(&mut self, size: Size) {
        (**self).set_size(size);
    }
}

/// Edge effect that ignores every signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoEdgeEffect;

impl EdgeEffect for NoEdgeEffect {
    fn pull(&mut self, _delta_fraction: f64, _displacement: f64) {}

    fn release(&mut self) {}

    fn absorb(&mut self, _velocity: i32) {}

    fn is_finished(&self) -> bool {
        true
    }

    fn set_size(&mut self, _size: Size) {}
}
