// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Setup errors.

use core::fmt::Debug;

/// Error returned when a view hierarchy cannot be flattened into a scroll chain.
///
/// Registration errors are configuration mistakes in the host's hierarchy and
/// are not expected to be recovered from at runtime.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError<N: Debug> {
    /// A node carries the scrollable marker but does not resolve to a
    /// [`ScrollRegion`](crate::ScrollRegion).
    #[error("node {node:?} is marked scrollable but has no scroll capability (chain position {position})")]
    MissingCapability {
        /// The offending node.
        node: N,
        /// Position the node would have taken in the chain.
        position: usize,
    },
}
