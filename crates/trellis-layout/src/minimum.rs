//! Bottom-up minimum-size calculation.
//!
//! A node's minimum depends on the stack it sits in: along the parent's main
//! axis an item needs its fixed or current extent, across it only when it is
//! not stretched. Containers with an engine sum their children along their
//! own main axis and take the largest child across it. Overlaps raise the
//! minimum of their anchor.

use std::collections::HashMap;

use trellis_core::{AttachedSize, CrossAlignment, LayoutError, NodeId, Size};

use crate::element::LayoutElement;
use crate::overlap::OverlapLookup;
use crate::stack::StackLayout;
use crate::tree::{Children, LayoutNode, LayoutTree, NodeKind};

/// One walk over the tree. With a cache, every visited node's result is
/// recorded in it.
struct MinimumWalker<'a, E> {
    tree: &'a LayoutTree<E>,
    cache: Option<&'a mut HashMap<NodeId, Size>>,
}

impl<'a, E: LayoutElement> MinimumWalker<'a, E> {
    fn new(tree: &'a LayoutTree<E>, cache: Option<&'a mut HashMap<NodeId, Size>>) -> Self {
        Self { tree, cache }
    }

    fn record(&mut self, id: NodeId, size: Size) {
        if let Some(cache) = self.cache.as_deref_mut() {
            cache.insert(id, size);
        }
    }

    /// Minimum of a node queried directly, outside any parent stack.
    fn top_level(
        &mut self,
        id: NodeId,
        lookup: Option<&dyn OverlapLookup>,
    ) -> Result<Size, LayoutError> {
        let tree = self.tree;
        let node = tree.node(id)?;
        let size = match node.kind.engine() {
            Some(engine) => self.container(node, engine, lookup)?,
            None => node.element.minimum_size() + node.element.padding().size(),
        }
        .at_most(node.element.maximum_size());
        self.record(id, size);
        Ok(size)
    }

    /// Minimum of a container laid out by `engine`, including padding.
    fn container(
        &mut self,
        node: &'a LayoutNode<E>,
        engine: StackLayout,
        lookup: Option<&dyn OverlapLookup>,
    ) -> Result<Size, LayoutError> {
        let children = self.tree.visible_children(node.id)?;
        let mut size = self.aggregate(&children, engine, lookup)?;
        if let Some(lookup) = lookup {
            let overlaps = self.visible(lookup.overlapping_items_for(node.id));
            size = size.max(self.aggregate(&overlaps, engine, Some(lookup))?);
        }
        size += node.element.padding().size();
        Ok(size.max(node.element.minimum_size()))
    }

    /// Stack `ids` along the main axis of `engine`, margins included.
    fn aggregate(
        &mut self,
        ids: &[NodeId],
        engine: StackLayout,
        lookup: Option<&dyn OverlapLookup>,
    ) -> Result<Size, LayoutError> {
        let d = engine.direction();
        let tree = self.tree;
        let (mut main, mut cross) = (0, 0);
        for &id in ids {
            let node = tree.node(id)?;
            let size = self.child(node, engine, lookup)? + node.element.margin().size();
            main += d.main(size);
            cross = cross.max(d.cross(size));
        }
        Ok(d.size(main, cross))
    }

    /// Minimum of `node` as a child of a stack run by `parent`.
    fn child(
        &mut self,
        node: &'a LayoutNode<E>,
        parent: StackLayout,
        lookup: Option<&dyn OverlapLookup>,
    ) -> Result<Size, LayoutError> {
        let mut size = match &node.kind {
            NodeKind::Root {
                container,
                overlaps,
            } => match container.engine() {
                Some(own) => self.container(node, own, Some(overlaps))?,
                None => node.element.minimum_size() + node.element.padding().size(),
            },
            kind => match kind.engine() {
                Some(own) => self.container(node, own, lookup)?,
                None => raw_minimum(node, parent) + node.element.padding().size(),
            },
        };

        if let Some(lookup) = lookup {
            let overlaps = self.visible(lookup.overlapping_items_for(node.id));
            size = size.max(self.aggregate(&overlaps, parent, Some(lookup))?);
        }
        let size = size.at_most(node.element.maximum_size());

        tracing::trace!(node = %node.id, ?size, "minimum size");
        self.record(node.id, size);
        Ok(size)
    }

    fn visible(&self, ids: &[NodeId]) -> Children {
        ids.iter()
            .copied()
            .filter(|&id| !self.tree.is_collapsed(id))
            .collect()
    }
}

/// Space a leaf needs inside a stack run by `parent`, before padding.
fn raw_minimum<E: LayoutElement>(node: &LayoutNode<E>, parent: StackLayout) -> Size {
    let d = parent.direction();
    let current = node.element.bounds().size();
    let main = match d.main_sizing(&node.attached) {
        AttachedSize::Unchanged => d.main(current),
        AttachedSize::Fixed(n) => n,
        AttachedSize::Factor(_) => 0,
    };
    let cross = match parent.resolve_alignment(&node.attached) {
        CrossAlignment::Fill => 0,
        _ => d.cross(current),
    };
    d.size(main, cross).max(node.element.minimum_size())
}

impl<E: LayoutElement> LayoutTree<E> {
    /// Minimum size of `id` including its padding.
    ///
    /// Nothing is cached. `lookup` supplies overlaps for every node visited,
    /// except below nested roots, which use their own registry.
    pub fn determine_minimum_size(
        &self,
        id: NodeId,
        lookup: Option<&dyn OverlapLookup>,
    ) -> Result<Size, LayoutError> {
        MinimumWalker::new(self, None).top_level(id, lookup)
    }

    /// Like [`determine_minimum_size`], but caches the result of every visited
    /// node so later layouts respect it.
    ///
    /// [`determine_minimum_size`]: LayoutTree::determine_minimum_size
    pub fn apply_minimum_size(
        &mut self,
        id: NodeId,
        lookup: Option<&dyn OverlapLookup>,
    ) -> Result<Size, LayoutError> {
        let mut cache = std::mem::take(&mut self.calculated_minimum);
        let result = MinimumWalker::new(self, Some(&mut cache)).top_level(id, lookup);
        self.calculated_minimum = cache;
        if let Ok(size) = result {
            tracing::debug!(node = %id, ?size, "applied minimum size");
        }
        result
    }

    /// Minimum size of a root's content, using its own overlaps.
    pub fn minimum_client_size(&self, root: NodeId) -> Result<Size, LayoutError> {
        let overlaps = self.overlaps(root)?;
        self.determine_minimum_size(root, Some(overlaps))
    }

    /// Calculate and cache the minimum size of a root and everything in it,
    /// using its own overlaps.
    pub fn apply_root_minimum_size(&mut self, root: NodeId) -> Result<Size, LayoutError> {
        let mut cache = std::mem::take(&mut self.calculated_minimum);
        let tree = &*self;
        let result = tree.overlaps(root).and_then(|overlaps| {
            MinimumWalker::new(tree, Some(&mut cache)).top_level(root, Some(overlaps))
        });
        self.calculated_minimum = cache;
        if let Ok(size) = result {
            tracing::debug!(%root, ?size, "applied root minimum size");
        }
        result
    }
}
