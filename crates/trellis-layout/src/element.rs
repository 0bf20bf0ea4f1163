//! The contract between the layout engine and the boxes it arranges.

use std::fmt;

use trellis_core::{Margin, Rect, Size, Visibility};

/// A box the engine can measure and move.
///
/// Toolkit adapters implement this over their native widgets. Sizing and
/// alignment directives are not part of the contract; the tree stores them
/// next to the element so adapters need no extra fields.
pub trait LayoutElement: fmt::Debug {
    /// Optional label, used in log output.
    fn name(&self) -> Option<&str> {
        None
    }

    /// Current position and size.
    fn bounds(&self) -> Rect;

    /// Unconditionally replace position and size.
    fn set_bounds(&mut self, bounds: Rect);

    /// Area available to children when this element is a layout root.
    ///
    /// Window adapters return their display rectangle here (which may exclude
    /// scrollbars or decorations).
    fn client_rect(&self) -> Rect {
        self.bounds()
    }

    fn minimum_size(&self) -> Size {
        Size::ZERO
    }

    /// Zero on an axis means unbounded.
    fn maximum_size(&self) -> Size {
        Size::ZERO
    }

    fn margin(&self) -> Margin {
        Margin::ZERO
    }

    fn padding(&self) -> Margin {
        Margin::ZERO
    }

    fn visibility(&self) -> Visibility {
        Visibility::Visible
    }
}

/// Plain in-memory box.
///
/// Used for layout panes that exist only to group children, and as the
/// default element type of [`LayoutTree`](crate::LayoutTree).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pane {
    pub name: Option<String>,
    pub bounds: Rect,
    pub minimum_size: Size,
    pub maximum_size: Size,
    pub margin: Margin,
    pub padding: Margin,
    pub visibility: Visibility,
}

impl Pane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the bounds.
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the size, keeping the location.
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.bounds = self.bounds.with_size(Size::new(width, height));
        self
    }

    pub fn with_minimum_size(mut self, size: Size) -> Self {
        self.minimum_size = size;
        self
    }

    pub fn with_maximum_size(mut self, size: Size) -> Self {
        self.maximum_size = size;
        self
    }

    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_padding(mut self, padding: Margin) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

impl LayoutElement for Pane {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn minimum_size(&self) -> Size {
        self.minimum_size
    }

    fn maximum_size(&self) -> Size {
        self.maximum_size
    }

    fn margin(&self) -> Margin {
        self.margin
    }

    fn padding(&self) -> Margin {
        self.padding
    }

    fn visibility(&self) -> Visibility {
        self.visibility
    }
}

impl<T: LayoutElement + ?Sized> LayoutElement for Box<T> {
    fn name(&self) -> Option<&str> {
        (**self).name()
    }

    fn bounds(&self) -> Rect {
        (**self).bounds()
    }

    fn set_bounds(&mut self, bounds: Rect) {
        (**self).set_bounds(bounds)
    }

    fn client_rect(&self) -> Rect {
        (**self).client_rect()
    }

    fn minimum_size(&self) -> Size {
        (**self).minimum_size()
    }

    fn maximum_size(&self) -> Size {
        (**self).maximum_size()
    }

    fn margin(&self) -> Margin {
        (**self).margin()
    }

    fn padding(&self) -> Margin {
        (**self).padding()
    }

    fn visibility(&self) -> Visibility {
        (**self).visibility()
    }
}
