//! Overlapping subtrees.
//!
//! An overlap is a detached subtree that a root projects onto one of its
//! descendants (the anchor). It is not arranged as anyone's child. Instead it
//! takes the anchor's final bounds after the root's pass, and its minimum
//! size counts toward the anchor's minimum.

use std::collections::HashSet;

use indexmap::IndexMap;
use smallvec::{smallvec, SmallVec};
use trellis_core::{LayoutError, NodeId};

use crate::element::LayoutElement;
use crate::tree::{Children, LayoutTree, NodeKind};

/// Source of overlap registrations for minimum-size calculation.
pub trait OverlapLookup {
    /// Nodes registered over `anchor`, in registration order.
    fn overlapping_items_for(&self, anchor: NodeId) -> &[NodeId];
}

/// Overlaps registered on one root, keyed by anchor.
///
/// Anchors iterate in the order of their first registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlapRegistry {
    entries: IndexMap<NodeId, SmallVec<[NodeId; 2]>>,
}

impl OverlapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `overlap` to the list of `anchor`.
    pub fn register(&mut self, anchor: NodeId, overlap: NodeId) {
        self.entries.entry(anchor).or_default().push(overlap);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of (anchor, overlap) pairs.
    pub fn len(&self) -> usize {
        self.entries.values().map(|list| list.len()).sum()
    }

    /// All (anchor, overlap) pairs in registration order.
    pub fn pairs(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.entries
            .iter()
            .flat_map(|(&anchor, list)| list.iter().map(move |&overlap| (anchor, overlap)))
    }

    /// Anchor `overlap` is registered on, if any.
    pub fn anchor_of(&self, overlap: NodeId) -> Option<NodeId> {
        self.entries
            .iter()
            .find(|(_, list)| list.contains(&overlap))
            .map(|(&anchor, _)| anchor)
    }
}

impl OverlapLookup for OverlapRegistry {
    fn overlapping_items_for(&self, anchor: NodeId) -> &[NodeId] {
        match self.entries.get(&anchor) {
            Some(list) => list.as_slice(),
            None => &[],
        }
    }
}

impl<E: LayoutElement> LayoutTree<E> {
    /// Overlaps registered on `root`.
    pub fn overlaps(&self, root: NodeId) -> Result<&OverlapRegistry, LayoutError> {
        match &self.node(root)?.kind {
            NodeKind::Root { overlaps, .. } => Ok(overlaps),
            _ => Err(LayoutError::NotARoot(root)),
        }
    }

    /// Register `overlap` to be projected onto `anchor` by `root`.
    ///
    /// The anchor must be `root` or one of its descendants. The overlap must
    /// be detached and must not contain the anchor.
    pub fn add_overlap(
        &mut self,
        root: NodeId,
        anchor: NodeId,
        overlap: NodeId,
    ) -> Result<(), LayoutError> {
        self.overlaps(root)?;
        self.node(anchor)?;
        if anchor != root && !self.is_ancestor(root, anchor) {
            return Err(LayoutError::AnchorNotInTree { root, anchor });
        }
        if let Some(parent) = self.node(overlap)?.parent {
            return Err(LayoutError::OverlapAttached { overlap, parent });
        }
        if let Some(existing) = self.overlap_anchor(overlap) {
            return Err(LayoutError::RegisteredOverlap {
                node: overlap,
                anchor: existing,
            });
        }
        if self.reaches(overlap, anchor) {
            return Err(LayoutError::WouldCreateCycle {
                parent: anchor,
                child: overlap,
            });
        }

        if let NodeKind::Root { overlaps, .. } = &mut self.node_mut(root)?.kind {
            overlaps.register(anchor, overlap);
        }
        tracing::debug!(%root, %anchor, %overlap, "registered overlap");
        Ok(())
    }

    fn registries(&self) -> impl Iterator<Item = &OverlapRegistry> + '_ {
        self.nodes.values().filter_map(|node| match &node.kind {
            NodeKind::Root { overlaps, .. } => Some(overlaps),
            _ => None,
        })
    }

    /// Anchor that some root projects `node` onto, if `node` is an overlap.
    pub fn overlap_anchor(&self, node: NodeId) -> Option<NodeId> {
        self.registries().find_map(|registry| registry.anchor_of(node))
    }

    /// True if `target` is `from` or lies below it, following child lists
    /// and overlap registrations of every root.
    pub(crate) fn reaches(&self, from: NodeId, target: NodeId) -> bool {
        let mut seen = HashSet::new();
        let mut pending: Children = smallvec![from];
        while let Some(id) = pending.pop() {
            if id == target {
                return true;
            }
            if !seen.insert(id) {
                continue;
            }
            if let Some(node) = self.nodes.get(&id) {
                pending.extend_from_slice(node.child_ids());
            }
            for registry in self.registries() {
                pending.extend_from_slice(registry.overlapping_items_for(id));
            }
        }
        false
    }

    /// Nodes `root` projects onto `anchor`. Empty when nothing is registered.
    pub fn overlapping_items_for(
        &self,
        root: NodeId,
        anchor: NodeId,
    ) -> Result<&[NodeId], LayoutError> {
        Ok(self.overlaps(root)?.overlapping_items_for(anchor))
    }

    /// Move every overlap of `root` onto its anchor and arrange it there.
    pub(crate) fn position_overlaps(&mut self, root: NodeId) -> Result<(), LayoutError> {
        let pairs: SmallVec<[(NodeId, NodeId); 4]> = self.overlaps(root)?.pairs().collect();
        for (anchor, overlap) in pairs {
            let bounds = self.bounds(anchor)?;
            self.set_bounds(overlap, bounds)?;
            tracing::trace!(%anchor, %overlap, ?bounds, "positioned overlap");
            if let Some(engine) = self.node(overlap)?.kind.engine() {
                self.arrange_with(overlap, engine, bounds)?;
            }
        }
        Ok(())
    }
}
