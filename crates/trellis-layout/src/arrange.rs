//! Running stack engines over the tree.

use smallvec::SmallVec;
use trellis_core::{LayoutError, NodeId, Rect};

use crate::calculator::{distribute, SizeRequest};
use crate::element::LayoutElement;
use crate::stack::StackLayout;
use crate::tree::{LayoutTree, NodeKind};

/// What remains to be done after a child got its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arranged {
    /// Nothing
    Leaf,
    /// Run the child's engine inside its padding-shrunk bounds
    Container(StackLayout, Rect),
    /// Run the child's own root layout
    Root,
}

impl<E: LayoutElement> LayoutTree<E> {
    /// Lay out `root` inside its padding-shrunk client rectangle, then
    /// project its overlaps onto their anchors.
    ///
    /// A root without an engine is left untouched.
    pub fn layout(&mut self, root: NodeId) -> Result<(), LayoutError> {
        let node = self.node(root)?;
        if !node.kind.is_root() {
            return Err(LayoutError::NotARoot(root));
        }
        let Some(engine) = node.kind.engine() else {
            return Ok(());
        };
        let bounds = node.element.client_rect().shrink(node.element.padding());
        tracing::debug!(
            %root,
            name = node.element.name().unwrap_or_default(),
            ?bounds,
            "layout root"
        );

        self.arrange_with(root, engine, bounds)?;
        self.position_overlaps(root)
    }

    /// Run the engine of `container` inside `bounds`.
    ///
    /// Does nothing when the container has no engine.
    pub fn arrange(&mut self, container: NodeId, bounds: Rect) -> Result<(), LayoutError> {
        match self.engine(container)? {
            Some(engine) => self.arrange_with(container, engine, bounds),
            None => Ok(()),
        }
    }

    pub(crate) fn arrange_with(
        &mut self,
        container: NodeId,
        engine: StackLayout,
        bounds: Rect,
    ) -> Result<(), LayoutError> {
        let d = engine.direction();
        let children = self.visible_children(container)?;

        let mut requests: SmallVec<[SizeRequest; 8]> = SmallVec::with_capacity(children.len());
        for &child in &children {
            let minimum = self.effective_minimum_size(child)?;
            let node = self.node(child)?;
            requests.push(SizeRequest {
                current: d.main(node.element.bounds().size()),
                sizing: d.main_sizing(&node.attached),
                minimum: d.main(minimum),
                maximum: d.main(node.element.maximum_size()),
                margin: d.main_margin(node.element.margin()),
            });
        }
        let sizes = distribute(d.main(bounds.size()), &requests);

        let mut cursor = d.main_pos(bounds);
        let cross_pos = d.cross_pos(bounds);
        let cross_len = d.cross(bounds.size());
        for ((&child, &size), request) in children.iter().zip(&sizes).zip(&requests) {
            let slot = d.rect(cursor, cross_pos, size + request.margin, cross_len);
            let (advance, arranged) = self.place_child(child, engine, slot)?;
            match arranged {
                Arranged::Leaf => {}
                Arranged::Container(child_engine, inner) => {
                    self.arrange_with(child, child_engine, inner)?
                }
                Arranged::Root => self.layout(child)?,
            }
            cursor += advance;
        }
        Ok(())
    }

    /// Align, clamp and move one child into `slot`.
    ///
    /// Returns how far the cursor moves along the main axis.
    fn place_child(
        &mut self,
        child: NodeId,
        engine: StackLayout,
        slot: Rect,
    ) -> Result<(i32, Arranged), LayoutError> {
        let d = engine.direction();
        let minimum = self.effective_minimum_size(child)?;
        let node = self.node_mut(child)?;

        let margin = node.element.margin();
        let alignment = engine.resolve_alignment(&node.attached);
        let aligned = engine.align(slot.shrink(margin), node.element.bounds().size(), alignment);
        let size = aligned.size().clamp_to(minimum, node.element.maximum_size());
        let bounds = aligned.with_size(size);
        node.element.set_bounds(bounds);
        tracing::trace!(%child, ?bounds, ?alignment, "arranged child");

        let arranged = match &node.kind {
            NodeKind::Root { .. } => Arranged::Root,
            kind => match kind.engine() {
                Some(child_engine) => {
                    Arranged::Container(child_engine, bounds.shrink(node.element.padding()))
                }
                None => Arranged::Leaf,
            },
        };
        Ok((d.main(size) + d.main_margin(margin), arranged))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Pane;
    use trellis_core::{AttachedSize, Margin, Size, VerticalAlignment, Visibility};

    #[test]
    fn test_layout_requires_root() {
        let mut tree: LayoutTree = LayoutTree::new();
        let pane = tree
            .insert_container(Pane::new(), Some(StackLayout::default()))
            .unwrap();
        assert_eq!(tree.layout(pane), Err(LayoutError::NotARoot(pane)));
    }

    #[test]
    fn test_root_without_engine_is_untouched() {
        let mut tree = LayoutTree::new();
        let root = tree.insert_root(Pane::new().with_size(100, 100), None).unwrap();
        let item = tree
            .insert_item(Pane::new().with_bounds(Rect::new(7, 8, 9, 10)))
            .unwrap();
        tree.add(root, item).unwrap();
        tree.layout(root).unwrap();
        assert_eq!(tree.bounds(item).unwrap(), Rect::new(7, 8, 9, 10));
    }

    #[test]
    fn test_padding_and_margin_shrink_the_slot() {
        let mut tree = LayoutTree::new();
        let root = tree
            .insert_root(
                Pane::new().with_size(100, 50).with_padding(Margin::uniform(5)),
                Some(StackLayout::horizontal(VerticalAlignment::Fill)),
            )
            .unwrap();
        let item = tree
            .insert_item(Pane::new().with_margin(Margin::new(1, 2, 3, 4)))
            .unwrap();
        tree.add(root, item).unwrap();
        tree.set_width(item, AttachedSize::Factor(1.0)).unwrap();

        tree.layout(root).unwrap();
        assert_eq!(tree.bounds(item).unwrap(), Rect::new(6, 7, 86, 34));
    }

    #[test]
    fn test_maximum_size_clamps_the_slot() {
        let mut tree = LayoutTree::new();
        let root = tree
            .insert_root(
                Pane::new().with_size(100, 100),
                Some(StackLayout::horizontal(VerticalAlignment::Fill)),
            )
            .unwrap();
        let capped = tree
            .insert_item(Pane::new().with_maximum_size(Size::new(0, 30)))
            .unwrap();
        let rest = tree.insert_item(Pane::new()).unwrap();
        tree.set_children(root, [capped, rest]).unwrap();
        tree.set_width(capped, AttachedSize::Fixed(40)).unwrap();
        tree.set_width(rest, AttachedSize::Factor(1.0)).unwrap();

        tree.layout(root).unwrap();
        assert_eq!(tree.bounds(capped).unwrap(), Rect::new(0, 0, 40, 30));
        assert_eq!(tree.bounds(rest).unwrap(), Rect::new(40, 0, 60, 100));
    }

    #[test]
    fn test_collapsed_children_keep_their_bounds() {
        let mut tree = LayoutTree::new();
        let root = tree
            .insert_root(
                Pane::new().with_size(100, 100),
                Some(StackLayout::horizontal(VerticalAlignment::Fill)),
            )
            .unwrap();
        let gone = tree
            .insert_item(
                Pane::new()
                    .with_bounds(Rect::new(1, 2, 3, 4))
                    .with_visibility(Visibility::Collapsed),
            )
            .unwrap();
        let hidden = tree
            .insert_item(Pane::new().with_visibility(Visibility::Hidden))
            .unwrap();
        tree.set_children(root, [gone, hidden]).unwrap();
        tree.set_width(gone, AttachedSize::Factor(1.0)).unwrap();
        tree.set_width(hidden, AttachedSize::Factor(1.0)).unwrap();

        tree.layout(root).unwrap();
        assert_eq!(tree.bounds(gone).unwrap(), Rect::new(1, 2, 3, 4));
        assert_eq!(tree.bounds(hidden).unwrap(), Rect::new(0, 0, 100, 100));
    }

    #[test]
    fn test_nested_container_uses_padding_shrunk_bounds() {
        let mut tree = LayoutTree::new();
        let root = tree
            .insert_root(
                Pane::new().with_size(100, 100),
                Some(StackLayout::horizontal(VerticalAlignment::Fill)),
            )
            .unwrap();
        let column = tree
            .insert_container(
                Pane::new().with_padding(Margin::uniform(10)),
                Some(StackLayout::vertical(Default::default())),
            )
            .unwrap();
        let item = tree.insert_item(Pane::new()).unwrap();
        tree.add(root, column).unwrap();
        tree.add(column, item).unwrap();
        tree.set_width(column, AttachedSize::Factor(1.0)).unwrap();
        tree.set_height(item, AttachedSize::Factor(1.0)).unwrap();

        tree.layout(root).unwrap();
        assert_eq!(tree.bounds(column).unwrap(), Rect::new(0, 0, 100, 100));
        assert_eq!(tree.bounds(item).unwrap(), Rect::new(10, 10, 80, 80));
    }
}
