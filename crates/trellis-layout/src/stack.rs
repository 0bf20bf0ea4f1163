//! Horizontal and vertical stack engines.
//!
//! A stack places visible children one after another along its main axis and
//! aligns each child on the cross axis. Everything here is axis-neutral; the
//! [`Direction`] maps main/cross values to x/y.

use trellis_core::{
    AttachedSize, CrossAlignment, HorizontalAlignment, Margin, Rect, Size, VerticalAlignment,
};

use crate::tree::AttachedProperties;

/// Main axis of a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Left to right
    #[default]
    Horizontal,
    /// Top to bottom
    Vertical,
}

impl Direction {
    pub fn is_horizontal(self) -> bool {
        self == Direction::Horizontal
    }

    /// Extent along the main axis.
    pub fn main(self, size: Size) -> i32 {
        match self {
            Direction::Horizontal => size.width,
            Direction::Vertical => size.height,
        }
    }

    /// Extent along the cross axis.
    pub fn cross(self, size: Size) -> i32 {
        match self {
            Direction::Horizontal => size.height,
            Direction::Vertical => size.width,
        }
    }

    /// Build a size from main and cross extents.
    pub fn size(self, main: i32, cross: i32) -> Size {
        match self {
            Direction::Horizontal => Size::new(main, cross),
            Direction::Vertical => Size::new(cross, main),
        }
    }

    /// Build a rectangle from main and cross coordinates.
    pub fn rect(self, main_pos: i32, cross_pos: i32, main_len: i32, cross_len: i32) -> Rect {
        match self {
            Direction::Horizontal => Rect::new(main_pos, cross_pos, main_len, cross_len),
            Direction::Vertical => Rect::new(cross_pos, main_pos, cross_len, main_len),
        }
    }

    pub fn main_pos(self, rect: Rect) -> i32 {
        match self {
            Direction::Horizontal => rect.x,
            Direction::Vertical => rect.y,
        }
    }

    pub fn cross_pos(self, rect: Rect) -> i32 {
        match self {
            Direction::Horizontal => rect.y,
            Direction::Vertical => rect.x,
        }
    }

    /// Total margin along the main axis.
    pub fn main_margin(self, margin: Margin) -> i32 {
        self.main(margin.size())
    }

    /// Sizing directive that applies along this axis.
    pub fn main_sizing(self, attached: &AttachedProperties) -> AttachedSize {
        match self {
            Direction::Horizontal => attached.width,
            Direction::Vertical => attached.height,
        }
    }
}

/// A stack layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StackLayout {
    direction: Direction,
    default_alignment: CrossAlignment,
}

impl StackLayout {
    pub fn new(direction: Direction, default_alignment: CrossAlignment) -> Self {
        Self {
            direction,
            default_alignment,
        }
    }

    /// Stack children left to right, aligning them vertically.
    pub fn horizontal(alignment: VerticalAlignment) -> Self {
        Self::new(Direction::Horizontal, alignment.into())
    }

    /// Stack children top to bottom, aligning them horizontally.
    pub fn vertical(alignment: HorizontalAlignment) -> Self {
        Self::new(Direction::Vertical, alignment.into())
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Cross-axis alignment used for children without an override.
    pub fn default_alignment(&self) -> CrossAlignment {
        self.default_alignment
    }

    /// Set the default cross-axis alignment.
    pub fn with_default_alignment(mut self, alignment: CrossAlignment) -> Self {
        self.default_alignment = alignment;
        self
    }

    /// Cross-axis alignment of a child: its attached override for the cross
    /// axis, else the engine default.
    pub fn resolve_alignment(&self, attached: &AttachedProperties) -> CrossAlignment {
        let overridden = match self.direction {
            Direction::Horizontal => attached.vertical_alignment.map(CrossAlignment::from),
            Direction::Vertical => attached.horizontal_alignment.map(CrossAlignment::from),
        };
        overridden.unwrap_or(self.default_alignment)
    }

    /// Place a child of size `extent` on the cross axis of `slot`.
    ///
    /// The main-axis part of `slot` is kept. `Center` and `End` fall back to
    /// `Start` when the child does not fit.
    pub fn align(&self, slot: Rect, extent: Size, alignment: CrossAlignment) -> Rect {
        let d = self.direction;
        let main_pos = d.main_pos(slot);
        let main_len = d.main(slot.size());
        let available = d.cross(slot.size());
        let wanted = d.cross(extent);
        let start = d.cross_pos(slot);

        let cross_pos = match alignment {
            CrossAlignment::Fill => return slot,
            CrossAlignment::Start => start,
            _ if wanted > available => start,
            CrossAlignment::Center => start + (available - wanted) / 2,
            CrossAlignment::End => start + available - wanted,
        };
        d.rect(main_pos, cross_pos, main_len, wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_axes() {
        let size = Size::new(30, 40);
        assert_eq!(Direction::Horizontal.main(size), 30);
        assert_eq!(Direction::Horizontal.cross(size), 40);
        assert_eq!(Direction::Vertical.main(size), 40);
        assert_eq!(Direction::Vertical.size(1, 2), Size::new(2, 1));
        assert_eq!(Direction::Vertical.rect(5, 6, 7, 8), Rect::new(6, 5, 8, 7));
    }

    #[test]
    fn test_resolve_alignment_uses_cross_axis_override() {
        let stack = StackLayout::horizontal(VerticalAlignment::Fill);
        let mut attached = AttachedProperties::default();
        attached.horizontal_alignment = Some(HorizontalAlignment::Right);
        assert_eq!(stack.resolve_alignment(&attached), CrossAlignment::Fill);

        attached.vertical_alignment = Some(VerticalAlignment::Bottom);
        assert_eq!(stack.resolve_alignment(&attached), CrossAlignment::End);
    }

    #[test]
    fn test_align_in_horizontal_stack() {
        let stack = StackLayout::horizontal(VerticalAlignment::Fill);
        let slot = Rect::new(10, 0, 40, 100);
        let extent = Size::new(25, 30);

        assert_eq!(stack.align(slot, extent, CrossAlignment::Fill), slot);
        assert_eq!(stack.align(slot, extent, CrossAlignment::Start), Rect::new(10, 0, 40, 30));
        assert_eq!(stack.align(slot, extent, CrossAlignment::Center), Rect::new(10, 35, 40, 30));
        assert_eq!(stack.align(slot, extent, CrossAlignment::End), Rect::new(10, 70, 40, 30));
    }

    #[test]
    fn test_align_center_rounds_down() {
        let stack = StackLayout::vertical(HorizontalAlignment::Center);
        let slot = Rect::new(0, 0, 11, 20);
        let aligned = stack.align(slot, Size::new(4, 5), stack.default_alignment());
        assert_eq!(aligned, Rect::new(3, 0, 4, 20));
    }

    #[test]
    fn test_oversized_child_falls_back_to_start() {
        let stack = StackLayout::vertical(HorizontalAlignment::Right);
        let slot = Rect::new(5, 5, 50, 20);
        let aligned = stack.align(slot, Size::new(80, 10), CrossAlignment::End);
        assert_eq!(aligned, Rect::new(5, 5, 80, 20));
    }
}
