// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry: flatten a view hierarchy into the ordered scroll chain.
//!
//! The registry walks the descendants of a root node in depth-first pre-order
//! and records every node carrying the scrollable marker. A marked node is
//! recorded before its own descendants, and unmarked nodes are still descended
//! into, so document order is preserved across arbitrary nesting.
//!
//! Capability resolution happens exactly once, here. A marked node that cannot
//! produce a [`ScrollRegion`] is a configuration error
//! ([`RegistryError::MissingCapability`]).
//!
//! ## Minimal example
//!
//! ```
//! use understory_scroll_chain::{BoundedRegion, ScrollRegistry, ViewHierarchy};
//!
//! // root(0) ─┬─ header(1, marked)
//! //          └─ body(2) ── list(3, marked)
//! struct Views {
//!     children: Vec<Vec<usize>>,
//!     marked: Vec<bool>,
//! }
//!
//! impl ViewHierarchy for Views {
//!     type Node = usize;
//!     type Region = BoundedRegion;
//!
//!     fn children(&self, node: usize) -> &[usize] {
//!         &self.children[node]
//!     }
//!     fn is_scrollable(&self, node: usize) -> bool {
//!         self.marked[node]
//!     }
//!     fn resolve_region(&mut self, node: usize) -> Option<BoundedRegion> {
//!         Some(BoundedRegion::new(if node == 1 { 100 } else { 500 }))
//!     }
//! }
//!
//! let mut views = Views {
//!     children: vec![vec![1, 2], vec![], vec![3], vec![]],
//!     marked: vec![false, true, false, true],
//! };
//! let registry = ScrollRegistry::register(&mut views, 0).unwrap();
//! assert_eq!(registry.len(), 2);
//! assert_eq!(registry.last_index(), Some(1));
//! ```

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::error::RegistryError;
use crate::region::ScrollRegion;

/// Read access to a host view hierarchy, plus scroll capability resolution.
pub trait ViewHierarchy {
    /// Node identifier.
    type Node: Copy + Debug;
    /// Scroll region produced for marked nodes.
    type Region: ScrollRegion;

    /// Children of `node`, in document order.
    fn children(&self, node: Self::Node) -> &[Self::Node];

    /// Returns `true` if `node` carries the scrollable marker.
    fn is_scrollable(&self, node: Self::Node) -> bool;

    /// Resolves the scroll capability of a marked node.
    ///
    /// Returning `None` for a marked node fails registration.
    fn resolve_region(&mut self, node: Self::Node) -> Option<Self::Region>;
}

/// One region in the scroll chain.
#[derive(Clone, Debug)]
pub struct ScrollableChild<R> {
    index: usize,
    region: R,
}

impl<R: ScrollRegion> ScrollableChild<R> {
    /// Position of this child in document order.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The underlying region.
    #[must_use]
    pub fn region(&self) -> &R {
        &self.region
    }

    /// The region's current offset, read on demand.
    #[must_use]
    pub fn current_offset(&self) -> i32 {
        self.region.current_offset()
    }

    pub(crate) fn absorb(&mut self, delta: i32) -> i32 {
        self.region.absorb(delta)
    }
}

/// Ordered, fixed set of scrollable regions.
#[derive(Clone, Debug)]
pub struct ScrollRegistry<R> {
    children: Vec<ScrollableChild<R>>,
}

impl<R: ScrollRegion> Default for ScrollRegistry<R> {
    fn default() -> Self {
        Self {
            children: Vec::new(),
        }
    }
}

impl<R: ScrollRegion> ScrollRegistry<R> {
    /// Flattens the descendants of `root` into a registry.
    ///
    /// `root` itself is never registered, matching a container that scans its
    /// own subtree.
    pub fn register<H>(hierarchy: &mut H, root: H::Node) -> Result<Self, RegistryError<H::Node>>
    where
        H: ViewHierarchy<Region = R>,
    {
        let mut marked: Vec<H::Node> = Vec::new();
        let mut stack: Vec<H::Node> = hierarchy.children(root).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            if hierarchy.is_scrollable(node) {
                marked.push(node);
            }
            // Reverse so that popping yields the children left to right.
            stack.extend(hierarchy.children(node).iter().rev().copied());
        }

        let mut children = Vec::with_capacity(marked.len());
        for (position, node) in marked.into_iter().enumerate() {
            let Some(region) = hierarchy.resolve_region(node) else {
                return Err(RegistryError::MissingCapability { node, position });
            };
            children.push(ScrollableChild {
                index: position,
                region,
            });
        }

        tracing::debug!(count = children.len(), "registered scroll chain");
        Ok(Self { children })
    }

    /// Builds a registry from regions already in document order.
    pub fn from_regions(regions: impl IntoIterator<Item = R>) -> Self {
        let children = regions
            .into_iter()
            .enumerate()
            .map(|(index, region)| ScrollableChild { index, region })
            .collect();
        Self { children }
    }

    /// Number of registered regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if no region was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Index of the last region, or `None` when empty.
    #[must_use]
    pub fn last_index(&self) -> Option<usize> {
        self.children.len().checked_sub(1)
    }

    /// The child at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ScrollableChild<R>> {
        self.children.get(index)
    }

    /// Iterates the children in document order.
    pub fn iter(&self) -> impl Iterator<Item = &ScrollableChild<R>> {
        self.children.iter()
    }

    /// Sum of all current region offsets.
    #[must_use]
    pub fn total_offset(&self) -> i64 {
        self.children
            .iter()
            .map(|child| i64::from(child.current_offset()))
            .sum()
    }

    pub(crate) fn child_mut(&mut self, index: usize) -> Option<&mut ScrollableChild<R>> {
        self.children.get_mut(index)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::region::BoundedRegion;

    /// Arena hierarchy: `children[n]` are the children of node `n`.
    struct Arena {
        children: Vec<Vec<u32>>,
        marked: Vec<bool>,
        capable: Vec<bool>,
        resolved: Vec<u32>,
    }

    impl Arena {
        fn new(children: Vec<Vec<u32>>, marked: &[u32]) -> Self {
            let len = children.len();
            let mut flags = vec![false; len];
            for &m in marked {
                flags[m as usize] = true;
            }
            Self {
                children,
                marked: flags,
                capable: vec![true; len],
                resolved: Vec::new(),
            }
        }
    }

    impl ViewHierarchy for Arena {
        type Node = u32;
        type Region = BoundedRegion;

        fn children(&self, node: u32) -> &[u32] {
            &self.children[node as usize]
        }

        fn is_scrollable(&self, node: u32) -> bool {
            self.marked[node as usize]
        }

        fn resolve_region(&mut self, node: u32) -> Option<BoundedRegion> {
            self.resolved.push(node);
            self.capable[node as usize].then(|| BoundedRegion::new(10 * node as i32))
        }
    }

    #[test]
    fn registers_in_depth_first_document_order() {
        // 0 ─┬─ 1 ─┬─ 2*
        //    │     └─ 3*
        //    ├─ 4*── 5*
        //    └─ 6*
        let mut arena = Arena::new(
            vec![vec![1, 4, 6], vec![2, 3], vec![], vec![], vec![5], vec![], vec![]],
            &[2, 3, 4, 5, 6],
        );
        let registry = ScrollRegistry::register(&mut arena, 0).unwrap();
        assert_eq!(arena.resolved, vec![2, 3, 4, 5, 6]);
        let indices: Vec<usize> = registry.iter().map(ScrollableChild::index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        assert_eq!(registry.get(2).unwrap().region().max_offset(), 40);
    }

    #[test]
    fn root_is_not_registered_even_if_marked() {
        let mut arena = Arena::new(vec![vec![1], vec![]], &[0, 1]);
        let registry = ScrollRegistry::register(&mut arena, 0).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(arena.resolved, vec![1]);
    }

    #[test]
    fn marked_node_without_capability_is_an_error() {
        let mut arena = Arena::new(vec![vec![1, 2], vec![], vec![]], &[1, 2]);
        arena.capable[2] = false;
        let err = ScrollRegistry::register(&mut arena, 0).unwrap_err();
        assert_eq!(
            err,
            RegistryError::MissingCapability {
                node: 2,
                position: 1
            }
        );
    }

    #[test]
    fn empty_hierarchy_yields_empty_registry() {
        let mut arena = Arena::new(vec![vec![1], vec![]], &[]);
        let registry = ScrollRegistry::register(&mut arena, 0).unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.last_index(), None);
        assert_eq!(registry.total_offset(), 0);
    }

    #[test]
    fn from_regions_assigns_sequential_indices() {
        let registry =
            ScrollRegistry::from_regions([BoundedRegion::new(1), BoundedRegion::new(2)]);
        assert_eq!(registry.last_index(), Some(1));
        assert_eq!(registry.get(1).unwrap().index(), 1);
    }
}
