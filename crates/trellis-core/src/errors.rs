//! Error types for the Trellis layout engine.

use thiserror::Error;

use crate::geometry::Size;
use crate::types::NodeId;

/// Errors raised while building or configuring a layout tree.
///
/// These are programmer errors in tree construction; arithmetic
/// degeneracies during layout never produce an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("Unknown layout node {0}")]
    UnknownNode(NodeId),

    #[error("Layout node {0} is not a container")]
    NotAContainer(NodeId),

    #[error("Layout node {0} is not a layout root")]
    NotARoot(NodeId),

    #[error("Minimum size {minimum:?} of node {node} exceeds its maximum size {maximum:?}")]
    MinimumExceedsMaximum {
        node: NodeId,
        minimum: Size,
        maximum: Size,
    },

    #[error("Node {child} is already a child of {parent}")]
    AlreadyAttached { child: NodeId, parent: NodeId },

    #[error("Adding {child} to {parent} would create a cycle")]
    WouldCreateCycle { parent: NodeId, child: NodeId },

    #[error("Overlap anchor {anchor} is not part of the tree under root {root}")]
    AnchorNotInTree { root: NodeId, anchor: NodeId },

    #[error("Overlapping node {overlap} is already a child of {parent}")]
    OverlapAttached { overlap: NodeId, parent: NodeId },

    #[error("Node {node} is already projected as an overlap onto {anchor}")]
    RegisteredOverlap { node: NodeId, anchor: NodeId },
}
