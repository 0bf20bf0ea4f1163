//! Value types attached to layout nodes.

use std::fmt;

/// Handle of a node inside a layout tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether a box takes part in layout.
///
/// Ordered from least to most visible, so the visibility of a group is the
/// maximum of its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Visibility {
    /// Excluded from arrangement and minimum-size aggregation
    Collapsed,
    /// Occupies space but need not be drawn
    Hidden,
    #[default]
    Visible,
}

impl Visibility {
    pub fn is_collapsed(self) -> bool {
        self == Visibility::Collapsed
    }
}

/// Sizing directive for one axis of one node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttachedSize {
    /// Keep the node's current extent
    #[default]
    Unchanged,
    /// Use exactly this extent
    Fixed(i32),
    /// Claim a weighted share of the space left by non-factor siblings
    Factor(f64),
}

impl AttachedSize {
    pub fn is_factor(&self) -> bool {
        matches!(self, AttachedSize::Factor(_))
    }

    /// Weight this directive contributes to a factor sum.
    ///
    /// Non-positive and non-finite weights contribute nothing.
    pub fn effective_weight(&self) -> f64 {
        match *self {
            AttachedSize::Factor(w) if w.is_finite() && w > 0.0 => w,
            _ => 0.0,
        }
    }
}

/// Horizontal placement of a child inside a vertical stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HorizontalAlignment {
    Left,
    Center,
    Right,
    #[default]
    Fill,
}

/// Vertical placement of a child inside a horizontal stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
    #[default]
    Fill,
}

/// Axis-neutral alignment on the cross axis of a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrossAlignment {
    /// Left or top
    Start,
    Center,
    /// Right or bottom
    End,
    /// Stretch over the whole cross extent
    #[default]
    Fill,
}

impl From<HorizontalAlignment> for CrossAlignment {
    fn from(a: HorizontalAlignment) -> Self {
        match a {
            HorizontalAlignment::Left => CrossAlignment::Start,
            HorizontalAlignment::Center => CrossAlignment::Center,
            HorizontalAlignment::Right => CrossAlignment::End,
            HorizontalAlignment::Fill => CrossAlignment::Fill,
        }
    }
}

impl From<VerticalAlignment> for CrossAlignment {
    fn from(a: VerticalAlignment) -> Self {
        match a {
            VerticalAlignment::Top => CrossAlignment::Start,
            VerticalAlignment::Center => CrossAlignment::Center,
            VerticalAlignment::Bottom => CrossAlignment::End,
            VerticalAlignment::Fill => CrossAlignment::Fill,
        }
    }
}

impl From<CrossAlignment> for HorizontalAlignment {
    fn from(a: CrossAlignment) -> Self {
        match a {
            CrossAlignment::Start => HorizontalAlignment::Left,
            CrossAlignment::Center => HorizontalAlignment::Center,
            CrossAlignment::End => HorizontalAlignment::Right,
            CrossAlignment::Fill => HorizontalAlignment::Fill,
        }
    }
}

impl From<CrossAlignment> for VerticalAlignment {
    fn from(a: CrossAlignment) -> Self {
        match a {
            CrossAlignment::Start => VerticalAlignment::Top,
            CrossAlignment::Center => VerticalAlignment::Center,
            CrossAlignment::End => VerticalAlignment::Bottom,
            CrossAlignment::Fill => VerticalAlignment::Fill,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_ordering() {
        assert!(Visibility::Collapsed < Visibility::Hidden);
        assert!(Visibility::Hidden < Visibility::Visible);
        let group = [Visibility::Collapsed, Visibility::Hidden];
        assert_eq!(group.iter().copied().max(), Some(Visibility::Hidden));
    }

    #[test]
    fn test_degenerate_factor_weights() {
        assert_eq!(AttachedSize::Factor(2.5).effective_weight(), 2.5);
        assert_eq!(AttachedSize::Factor(0.0).effective_weight(), 0.0);
        assert_eq!(AttachedSize::Factor(-1.0).effective_weight(), 0.0);
        assert_eq!(AttachedSize::Factor(f64::NAN).effective_weight(), 0.0);
        assert_eq!(AttachedSize::Fixed(10).effective_weight(), 0.0);
    }

    #[test]
    fn test_alignment_conversion() {
        assert_eq!(CrossAlignment::from(VerticalAlignment::Bottom), CrossAlignment::End);
        assert_eq!(CrossAlignment::from(HorizontalAlignment::Left), CrossAlignment::Start);
        assert_eq!(HorizontalAlignment::from(CrossAlignment::Center), HorizontalAlignment::Center);
    }

    #[test]
    fn test_alignments_default_to_fill() {
        assert_eq!(HorizontalAlignment::default(), HorizontalAlignment::Fill);
        assert_eq!(VerticalAlignment::default(), VerticalAlignment::Fill);
        assert_eq!(CrossAlignment::default(), CrossAlignment::Fill);
    }
}
