mod common;

use common::{horizontal, sized};
use proptest::prelude::*;
use trellis_core::{AttachedSize, Rect, Visibility};
use trellis_layout::{distribute, LayoutTree, Pane, SizeRequest};

fn sizing_strategy() -> impl Strategy<Value = AttachedSize> {
    prop_oneof![
        Just(AttachedSize::Unchanged),
        (0i32..40).prop_map(AttachedSize::Fixed),
        (1u8..5).prop_map(|w| AttachedSize::Factor(f64::from(w))),
    ]
}

/// Minimum and maximum with `minimum <= maximum` whenever a maximum is set.
fn limits_strategy() -> impl Strategy<Value = (i32, i32)> {
    (0i32..50, prop::option::of(0i32..50))
        .prop_map(|(minimum, extra)| (minimum, extra.map_or(0, |e| minimum + e.max(1))))
}

proptest! {
    #[test]
    fn factor_space_is_shared_without_loss(
        available in 0i32..1000,
        weights in prop::collection::vec(1u8..6, 1..8),
    ) {
        let requests: Vec<_> = weights
            .iter()
            .map(|&w| SizeRequest::new(0, AttachedSize::Factor(f64::from(w))))
            .collect();
        let sizes = distribute(available, &requests);
        let total: i32 = sizes.iter().sum();

        // Each share is truncated, so at most one unit per child goes missing.
        prop_assert!(total <= available);
        prop_assert!(available - total < requests.len() as i32);
    }

    #[test]
    fn factor_sizes_stay_within_limits(
        available in 0i32..500,
        limits in prop::collection::vec(limits_strategy(), 1..6),
    ) {
        let requests: Vec<_> = limits
            .iter()
            .map(|&(minimum, maximum)| {
                SizeRequest::new(0, AttachedSize::Factor(1.0))
                    .with_minimum(minimum)
                    .with_maximum(maximum)
            })
            .collect();
        let sizes = distribute(available, &requests);

        for (size, &(minimum, maximum)) in sizes.iter().zip(&limits) {
            prop_assert!(*size >= minimum);
            prop_assert!(maximum == 0 || *size <= maximum);
        }
    }

    #[test]
    fn layout_is_idempotent(
        width in 0i32..300,
        height in 0i32..300,
        sizings in prop::collection::vec(sizing_strategy(), 1..6),
    ) {
        let mut tree = LayoutTree::new();
        let root = tree
            .insert_root(sized("root", Rect::new(0, 0, width, height)), horizontal())
            .unwrap();
        let mut children = Vec::new();
        for (i, sizing) in sizings.iter().enumerate() {
            let child = tree.insert_item(Pane::new().with_size(10 + i as i32, 5)).unwrap();
            tree.add(root, child).unwrap();
            tree.set_width(child, *sizing).unwrap();
            children.push(child);
        }

        tree.layout(root).unwrap();
        let first: Vec<_> = children.iter().map(|&c| tree.bounds(c).unwrap()).collect();
        tree.layout(root).unwrap();
        let second: Vec<_> = children.iter().map(|&c| tree.bounds(c).unwrap()).collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn collapsed_children_are_left_alone(
        width in 0i32..300,
        collapsed in prop::collection::vec(any::<bool>(), 1..6),
    ) {
        let mut tree = LayoutTree::new();
        let root = tree
            .insert_root(sized("root", Rect::new(0, 0, width, 20)), horizontal())
            .unwrap();
        let parked = Rect::new(-7, -7, 3, 3);
        let mut children = Vec::new();
        for &is_collapsed in &collapsed {
            let visibility = if is_collapsed {
                Visibility::Collapsed
            } else {
                Visibility::Visible
            };
            let child = tree
                .insert_item(Pane::new().with_bounds(parked).with_visibility(visibility))
                .unwrap();
            tree.add(root, child).unwrap();
            tree.set_width(child, AttachedSize::Factor(1.0)).unwrap();
            children.push((child, is_collapsed));
        }

        tree.layout(root).unwrap();
        let mut cursor = 0;
        for (child, is_collapsed) in children {
            let bounds = tree.bounds(child).unwrap();
            if is_collapsed {
                prop_assert_eq!(bounds, parked);
            } else {
                // Visible children tile the row without gaps.
                prop_assert_eq!(bounds.x, cursor);
                cursor += bounds.width;
            }
        }
        prop_assert!(cursor <= width);
    }

    #[test]
    fn overlaps_never_become_children(depth in 1usize..5) {
        let mut tree = LayoutTree::new();
        let root = tree
            .insert_root(sized("root", Rect::new(0, 0, 100, 100)), horizontal())
            .unwrap();
        let mut anchor = root;
        for _ in 0..depth {
            let next = tree.insert_container(Pane::new(), horizontal()).unwrap();
            tree.add(anchor, next).unwrap();
            tree.set_width(next, AttachedSize::Factor(1.0)).unwrap();
            anchor = next;
        }
        let overlap = tree.insert_item(Pane::new()).unwrap();
        tree.add_overlap(root, anchor, overlap).unwrap();
        tree.layout(root).unwrap();

        prop_assert_eq!(tree.parent(overlap).unwrap(), None);
        prop_assert!(!tree.children(anchor).unwrap().contains(&overlap));
        prop_assert_eq!(tree.bounds(overlap).unwrap(), tree.bounds(anchor).unwrap());
    }
}
