//! Shared helpers for integration tests.

#![allow(dead_code)]

use trellis_core::{HorizontalAlignment, NodeId, Rect, VerticalAlignment};
use trellis_layout::{LayoutTree, Pane, StackLayout};

/// Route engine events to the test output. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

pub fn horizontal() -> Option<StackLayout> {
    Some(StackLayout::horizontal(VerticalAlignment::Fill))
}

pub fn vertical() -> Option<StackLayout> {
    Some(StackLayout::vertical(HorizontalAlignment::Fill))
}

/// A named pane with the given bounds.
pub fn sized(name: &str, bounds: Rect) -> Pane {
    Pane::new().with_name(name).with_bounds(bounds)
}

/// Resize `root` and lay it out again.
pub fn relayout(tree: &mut LayoutTree, root: NodeId, width: i32, height: i32) {
    tree.set_bounds(root, Rect::new(0, 0, width, height)).unwrap();
    tree.layout(root).unwrap();
}
