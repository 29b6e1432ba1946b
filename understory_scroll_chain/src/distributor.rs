// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Distributor: turn one aggregate scroll delta into per-region absorption.
//!
//! The distributor owns the single authoritative scroll position of the chain
//! and a cursor naming the region that currently receives delta. A request is
//! served by asking the cursor region for the *entire* remaining delta; if it
//! cannot take all of it, the cursor moves one step in the direction of travel
//! and the remainder spills into the next region. Distribution stops when the
//! target is reached or when the cursor sits on the terminal region in the
//! direction of travel (index `0` going backward, the last index going
//! forward). It never walks back against the direction of travel within a
//! call.
//!
//! ## Minimal example
//!
//! ```
//! use understory_scroll_chain::{BoundedRegion, ScrollDistributor, ScrollRegistry};
//!
//! let mut registry = ScrollRegistry::from_regions([BoundedRegion::new(100), BoundedRegion::new(200)]);
//! let mut distributor = ScrollDistributor::new();
//!
//! assert_eq!(distributor.distribute_to(&mut registry, 150), 150);
//! assert_eq!(distributor.cursor(), 1);
//! assert_eq!(registry.get(0).unwrap().current_offset(), 100);
//! assert_eq!(registry.get(1).unwrap().current_offset(), 50);
//!
//! // Past the end: only what the last region can take is absorbed.
//! assert_eq!(distributor.scroll_by(&mut registry, 1_000), 150);
//! assert_eq!(distributor.scroll(), 300);
//! ```

use crate::region::ScrollRegion;
use crate::registry::ScrollRegistry;

/// Aggregate scroll position and spillover cursor.
///
/// `scroll` only ever changes by amounts regions report as absorbed. The
/// cursor is never revalidated against `scroll` on its own: it stays on the
/// last region that received delta until a later request moves it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollDistributor {
    scroll: i32,
    cursor: usize,
}

impl ScrollDistributor {
    /// Creates a distributor at scroll `0` with the cursor on the first region.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate scroll position.
    #[must_use]
    pub fn scroll(&self) -> i32 {
        self.scroll
    }

    /// Index of the region currently receiving delta.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Scrolls the chain by `delta`; see [`ScrollDistributor::distribute_to`].
    pub fn scroll_by<R: ScrollRegion>(&mut self, registry: &mut ScrollRegistry<R>, delta: i32) -> i32 {
        let target = self.scroll.saturating_add(delta);
        self.distribute_to(registry, target)
    }

    /// Moves the aggregate scroll toward `target` and returns the absorbed delta.
    ///
    /// The result equals `target - scroll` on full absorption. Anything less
    /// means the chain hit a boundary; the caller decides whether that is
    /// overscroll feedback. Requesting the current position is a no-op that
    /// issues no absorption call.
    pub fn distribute_to<R: ScrollRegion>(
        &mut self,
        registry: &mut ScrollRegistry<R>,
        target: i32,
    ) -> i32 {
        if target == self.scroll {
            return 0;
        }
        let Some(last) = registry.last_index() else {
            return 0;
        };
        self.cursor = self.cursor.min(last);

        let start = self.scroll;
        let forward = target > self.scroll;
        loop {
            let Some(child) = registry.child_mut(self.cursor) else {
                break;
            };
            let requested = target.saturating_sub(self.scroll);
            let absorbed = child.absorb(requested);
            debug_assert!(
                absorbed == 0
                    || (absorbed.signum() == requested.signum()
                        && absorbed.unsigned_abs() <= requested.unsigned_abs()),
                "region {} absorbed {absorbed} of {requested}",
                self.cursor
            );
            self.scroll = self.scroll.saturating_add(absorbed);
            tracing::trace!(
                cursor = self.cursor,
                requested,
                absorbed,
                scroll = self.scroll,
                "distributed"
            );

            if self.scroll == target {
                break;
            }
            let at_edge = if forward {
                self.cursor == last
            } else {
                self.cursor == 0
            };
            if at_edge {
                break;
            }
            if forward {
                self.cursor += 1;
            } else {
                self.cursor -= 1;
            }
        }
        self.scroll.saturating_sub(start)
    }
}
