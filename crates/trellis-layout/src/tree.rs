//! The layout tree.
//!
//! Nodes live in an arena keyed by [`NodeId`]. Each node owns its element
//! plus the sizing and alignment directives its parent's engine reads, so
//! element types need no layout-specific fields.

use std::collections::HashMap;

use smallvec::SmallVec;
use trellis_core::{
    AttachedSize, HorizontalAlignment, LayoutError, NodeId, Rect, Size, VerticalAlignment,
    Visibility,
};

use crate::element::{LayoutElement, Pane};
use crate::overlap::OverlapRegistry;
use crate::stack::StackLayout;

/// Ordered child list of a container.
pub type Children = SmallVec<[NodeId; 8]>;

/// Tree-wide layout configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutOptions {
    /// Treat a container whose children are all collapsed as collapsed
    /// itself. When false, a container's visibility is exactly what its
    /// element reports.
    pub collapse_empty_containers: bool,
}

/// Directives a parent's engine reads for one child.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttachedProperties {
    pub width: AttachedSize,
    pub height: AttachedSize,
    /// Overrides the default alignment of a vertical stack
    pub horizontal_alignment: Option<HorizontalAlignment>,
    /// Overrides the default alignment of a horizontal stack
    pub vertical_alignment: Option<VerticalAlignment>,
}

/// Children and engine of a container.
#[derive(Debug, Clone, Default)]
pub struct ContainerData {
    pub(crate) children: Children,
    pub(crate) engine: Option<StackLayout>,
}

impl ContainerData {
    fn new(engine: Option<StackLayout>) -> Self {
        Self {
            children: Children::new(),
            engine,
        }
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn engine(&self) -> Option<StackLayout> {
        self.engine
    }
}

/// What kind of box a node is.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// A plain box without children
    Item,
    /// A box with children and an optional engine
    Container(ContainerData),
    /// A container that lays itself out within its client rectangle and owns
    /// the overlaps of its subtree
    Root {
        container: ContainerData,
        overlaps: OverlapRegistry,
    },
}

impl NodeKind {
    pub fn container(&self) -> Option<&ContainerData> {
        match self {
            NodeKind::Item => None,
            NodeKind::Container(data) => Some(data),
            NodeKind::Root { container, .. } => Some(container),
        }
    }

    fn container_mut(&mut self) -> Option<&mut ContainerData> {
        match self {
            NodeKind::Item => None,
            NodeKind::Container(data) => Some(data),
            NodeKind::Root { container, .. } => Some(container),
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, NodeKind::Root { .. })
    }

    /// Engine of a container, `None` for items and engine-less containers.
    pub fn engine(&self) -> Option<StackLayout> {
        self.container().and_then(|c| c.engine)
    }
}

/// A node in the layout tree.
#[derive(Debug, Clone)]
pub struct LayoutNode<E> {
    pub(crate) id: NodeId,
    pub(crate) element: E,
    pub(crate) kind: NodeKind,
    pub(crate) attached: AttachedProperties,
    pub(crate) parent: Option<NodeId>,
}

impl<E> LayoutNode<E> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn attached(&self) -> &AttachedProperties {
        &self.attached
    }

    /// Parent container (None for detached nodes and top-level roots)
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child list, empty for items.
    pub(crate) fn child_ids(&self) -> &[NodeId] {
        match self.kind.container() {
            Some(container) => container.children(),
            None => &[],
        }
    }
}

/// Arena of layout nodes.
#[derive(Debug, Clone)]
pub struct LayoutTree<E = Pane> {
    pub(crate) nodes: HashMap<NodeId, LayoutNode<E>>,
    /// Results of the last minimum-size apply, per node
    pub(crate) calculated_minimum: HashMap<NodeId, Size>,
    options: LayoutOptions,
    next_id: u64,
}

impl<E: LayoutElement> Default for LayoutTree<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: LayoutElement> LayoutTree<E> {
    /// Create an empty layout tree.
    pub fn new() -> Self {
        Self::with_options(LayoutOptions::default())
    }

    pub fn with_options(options: LayoutOptions) -> Self {
        Self {
            nodes: HashMap::new(),
            calculated_minimum: HashMap::new(),
            options,
            next_id: 0,
        }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: LayoutOptions) {
        self.options = options;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    fn insert(&mut self, element: E, kind: NodeKind) -> Result<NodeId, LayoutError> {
        let id = NodeId(self.next_id);
        check_limits(id, &element)?;
        self.next_id += 1;
        self.nodes.insert(
            id,
            LayoutNode {
                id,
                element,
                kind,
                attached: AttachedProperties::default(),
                parent: None,
            },
        );
        Ok(id)
    }

    /// Insert a plain box.
    pub fn insert_item(&mut self, element: E) -> Result<NodeId, LayoutError> {
        self.insert(element, NodeKind::Item)
    }

    /// Insert a container. Without an engine its children stay where they are.
    pub fn insert_container(
        &mut self,
        element: E,
        engine: Option<StackLayout>,
    ) -> Result<NodeId, LayoutError> {
        self.insert(element, NodeKind::Container(ContainerData::new(engine)))
    }

    /// Insert a layout root with an empty overlap registry.
    pub fn insert_root(
        &mut self,
        element: E,
        engine: Option<StackLayout>,
    ) -> Result<NodeId, LayoutError> {
        self.insert(
            element,
            NodeKind::Root {
                container: ContainerData::new(engine),
                overlaps: OverlapRegistry::new(),
            },
        )
    }

    pub fn node(&self, id: NodeId) -> Result<&LayoutNode<E>, LayoutError> {
        self.nodes.get(&id).ok_or(LayoutError::UnknownNode(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut LayoutNode<E>, LayoutError> {
        self.nodes.get_mut(&id).ok_or(LayoutError::UnknownNode(id))
    }

    /// Iterate over all nodes in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &LayoutNode<E>> {
        self.nodes.values()
    }

    pub fn element(&self, id: NodeId) -> Result<&E, LayoutError> {
        Ok(&self.node(id)?.element)
    }

    /// Mutable access to an element.
    ///
    /// Limits changed through this are checked again by [`validate`] and on
    /// the next [`add`].
    ///
    /// [`validate`]: LayoutTree::validate
    /// [`add`]: LayoutTree::add
    pub fn element_mut(&mut self, id: NodeId) -> Result<&mut E, LayoutError> {
        Ok(&mut self.node_mut(id)?.element)
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, LayoutError> {
        Ok(self.node(id)?.parent)
    }

    pub fn is_container(&self, id: NodeId) -> Result<bool, LayoutError> {
        Ok(self.node(id)?.kind.container().is_some())
    }

    pub fn is_root(&self, id: NodeId) -> Result<bool, LayoutError> {
        Ok(self.node(id)?.kind.is_root())
    }

    fn container(&self, id: NodeId) -> Result<&ContainerData, LayoutError> {
        self.node(id)?
            .kind
            .container()
            .ok_or(LayoutError::NotAContainer(id))
    }

    fn container_mut(&mut self, id: NodeId) -> Result<&mut ContainerData, LayoutError> {
        self.node_mut(id)?
            .kind
            .container_mut()
            .ok_or(LayoutError::NotAContainer(id))
    }

    /// Children of a container, in layout order.
    pub fn children(&self, id: NodeId) -> Result<&[NodeId], LayoutError> {
        Ok(self.container(id)?.children())
    }

    /// True if `ancestor` is a strict ancestor of `node`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.nodes.get(&node).and_then(|n| n.parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    fn check_attachable(&self, parent: NodeId, child: NodeId) -> Result<(), LayoutError> {
        self.container(parent)?;
        let node = self.node(child)?;
        if let Some(current) = node.parent {
            if current != parent {
                return Err(LayoutError::AlreadyAttached {
                    child,
                    parent: current,
                });
            }
        }
        if let Some(anchor) = self.overlap_anchor(child) {
            return Err(LayoutError::RegisteredOverlap {
                node: child,
                anchor,
            });
        }
        if self.reaches(child, parent) {
            return Err(LayoutError::WouldCreateCycle { parent, child });
        }
        check_limits(child, &node.element)
    }

    /// Append `child` to the children of `parent`.
    pub fn add(&mut self, parent: NodeId, child: NodeId) -> Result<(), LayoutError> {
        self.check_attachable(parent, child)?;
        if self.node(child)?.parent == Some(parent) {
            return Err(LayoutError::AlreadyAttached { child, parent });
        }
        self.container_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Replace the children of `parent`.
    ///
    /// Former children that are not in `children` are detached. Nothing is
    /// changed if any of the new children cannot be attached.
    pub fn set_children(
        &mut self,
        parent: NodeId,
        children: impl IntoIterator<Item = NodeId>,
    ) -> Result<(), LayoutError> {
        let children: Children = children.into_iter().collect();
        for (i, &child) in children.iter().enumerate() {
            self.check_attachable(parent, child)?;
            if children[..i].contains(&child) {
                return Err(LayoutError::AlreadyAttached { child, parent });
            }
        }

        let previous = std::mem::take(&mut self.container_mut(parent)?.children);
        for id in previous {
            if let Some(node) = self.nodes.get_mut(&id) {
                node.parent = None;
            }
        }
        for &id in &children {
            if let Some(node) = self.nodes.get_mut(&id) {
                node.parent = Some(parent);
            }
        }
        self.container_mut(parent)?.children = children;
        Ok(())
    }

    /// Remove `child` from its parent. Returns the former parent.
    pub fn detach(&mut self, child: NodeId) -> Result<Option<NodeId>, LayoutError> {
        let Some(parent) = self.node_mut(child)?.parent.take() else {
            return Ok(None);
        };
        self.container_mut(parent)?.children.retain(|id| *id != child);
        Ok(Some(parent))
    }

    pub fn engine(&self, id: NodeId) -> Result<Option<StackLayout>, LayoutError> {
        Ok(self.container(id)?.engine)
    }

    pub fn set_engine(
        &mut self,
        id: NodeId,
        engine: Option<StackLayout>,
    ) -> Result<(), LayoutError> {
        self.container_mut(id)?.engine = engine;
        Ok(())
    }

    pub fn bounds(&self, id: NodeId) -> Result<Rect, LayoutError> {
        Ok(self.node(id)?.element.bounds())
    }

    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) -> Result<(), LayoutError> {
        self.node_mut(id)?.element.set_bounds(bounds);
        Ok(())
    }

    pub fn attached(&self, id: NodeId) -> Result<&AttachedProperties, LayoutError> {
        Ok(&self.node(id)?.attached)
    }

    pub fn width(&self, id: NodeId) -> Result<AttachedSize, LayoutError> {
        Ok(self.node(id)?.attached.width)
    }

    pub fn set_width(&mut self, id: NodeId, width: AttachedSize) -> Result<(), LayoutError> {
        self.node_mut(id)?.attached.width = width;
        Ok(())
    }

    pub fn height(&self, id: NodeId) -> Result<AttachedSize, LayoutError> {
        Ok(self.node(id)?.attached.height)
    }

    pub fn set_height(&mut self, id: NodeId, height: AttachedSize) -> Result<(), LayoutError> {
        self.node_mut(id)?.attached.height = height;
        Ok(())
    }

    pub fn horizontal_alignment(
        &self,
        id: NodeId,
    ) -> Result<Option<HorizontalAlignment>, LayoutError> {
        Ok(self.node(id)?.attached.horizontal_alignment)
    }

    pub fn set_horizontal_alignment(
        &mut self,
        id: NodeId,
        alignment: Option<HorizontalAlignment>,
    ) -> Result<(), LayoutError> {
        self.node_mut(id)?.attached.horizontal_alignment = alignment;
        Ok(())
    }

    pub fn vertical_alignment(&self, id: NodeId) -> Result<Option<VerticalAlignment>, LayoutError> {
        Ok(self.node(id)?.attached.vertical_alignment)
    }

    pub fn set_vertical_alignment(
        &mut self,
        id: NodeId,
        alignment: Option<VerticalAlignment>,
    ) -> Result<(), LayoutError> {
        self.node_mut(id)?.attached.vertical_alignment = alignment;
        Ok(())
    }

    /// Check the size limits of `id` and everything below it.
    pub fn validate(&self, id: NodeId) -> Result<(), LayoutError> {
        let node = self.node(id)?;
        check_limits(id, &node.element)?;
        for &child in node.child_ids() {
            self.validate(child)?;
        }
        Ok(())
    }

    /// Visibility used by layout and minimum-size aggregation.
    pub fn effective_visibility(&self, id: NodeId) -> Result<Visibility, LayoutError> {
        Ok(self.visibility_of(self.node(id)?))
    }

    pub(crate) fn visibility_of(&self, node: &LayoutNode<E>) -> Visibility {
        let own = node.element.visibility();
        if own.is_collapsed() || !self.options.collapse_empty_containers {
            return own;
        }
        let children = node.child_ids();
        if children.is_empty() {
            return own;
        }
        let group = children
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .map(|child| self.visibility_of(child))
            .max()
            .unwrap_or(Visibility::Collapsed);
        own.min(group)
    }

    pub(crate) fn is_collapsed(&self, id: NodeId) -> bool {
        self.nodes
            .get(&id)
            .map_or(true, |node| self.visibility_of(node).is_collapsed())
    }

    /// Children of `id` that take part in layout.
    pub(crate) fn visible_children(&self, id: NodeId) -> Result<Children, LayoutError> {
        Ok(self
            .children(id)?
            .iter()
            .copied()
            .filter(|&child| !self.is_collapsed(child))
            .collect())
    }

    /// Minimum size cached by the last minimum-size apply.
    pub fn calculated_minimum_size(&self, id: NodeId) -> Option<Size> {
        self.calculated_minimum.get(&id).copied()
    }

    /// Declared minimum raised to the cached calculated minimum.
    pub fn effective_minimum_size(&self, id: NodeId) -> Result<Size, LayoutError> {
        let declared = self.node(id)?.element.minimum_size();
        Ok(match self.calculated_minimum_size(id) {
            Some(calculated) => declared.max(calculated),
            None => declared,
        })
    }

    /// Forget every cached minimum size.
    pub fn clear_calculated_minimum_sizes(&mut self) {
        self.calculated_minimum.clear();
    }
}

fn check_limits<E: LayoutElement>(id: NodeId, element: &E) -> Result<(), LayoutError> {
    let minimum = element.minimum_size();
    let maximum = element.maximum_size();
    let too_wide = maximum.width != 0 && minimum.width > maximum.width;
    let too_tall = maximum.height != 0 && minimum.height > maximum.height;
    if too_wide || too_tall {
        return Err(LayoutError::MinimumExceedsMaximum {
            node: id,
            minimum,
            maximum,
        });
    }
    Ok(())
}
