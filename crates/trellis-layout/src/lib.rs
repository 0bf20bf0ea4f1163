//! Stack layout for trees of rectangular boxes.
//!
//! This crate positions and sizes boxes from directional stacking rules,
//! per-child sizing directives, alignment, margins, padding and
//! minimum/maximum constraints.
//!
//! # Architecture
//!
//! 1. **Tree**: an arena of items, containers and roots over any
//!    [`LayoutElement`]
//! 2. **Calculator**: distributes main-axis space between fixed, unchanged
//!    and proportional children
//! 3. **Stack engines**: horizontal and vertical stacks that place children
//!    and recurse into nested containers
//! 4. **Minimum sizes**: bottom-up propagation, optionally cached so later
//!    layouts respect it
//! 5. **Overlaps**: detached subtrees projected onto an anchor
//!
//! # Example
//!
//! ```
//! use trellis_core::{AttachedSize, Rect, VerticalAlignment};
//! use trellis_layout::{LayoutTree, Pane, StackLayout};
//!
//! let mut tree = LayoutTree::new();
//! let root = tree.insert_root(
//!     Pane::new().with_size(100, 40),
//!     Some(StackLayout::horizontal(VerticalAlignment::Fill)),
//! )?;
//! let sidebar = tree.insert_item(Pane::new().with_name("sidebar"))?;
//! let content = tree.insert_item(Pane::new().with_name("content"))?;
//! tree.set_children(root, [sidebar, content])?;
//! tree.set_width(sidebar, AttachedSize::Fixed(30))?;
//! tree.set_width(content, AttachedSize::Factor(1.0))?;
//!
//! tree.layout(root)?;
//! assert_eq!(tree.bounds(content)?, Rect::new(30, 0, 70, 40));
//! # Ok::<(), trellis_core::LayoutError>(())
//! ```

mod arrange;
mod calculator;
mod element;
mod minimum;
mod overlap;
mod stack;
mod tree;

pub use calculator::{distribute, SizeRequest};
pub use element::{LayoutElement, Pane};
pub use overlap::{OverlapLookup, OverlapRegistry};
pub use stack::{Direction, StackLayout};
pub use tree::{
    AttachedProperties, Children, ContainerData, LayoutNode, LayoutOptions, LayoutTree, NodeKind,
};
