//! Property-based tests for the lens laws.
//!
//! Using proptest, random trees are generated and a present path is
//! derived from each one, so every law is exercised against a focus that
//! exists:
//!
//! - **Roundtrip**: `lens.get(&lens.set_copy(&source, value)) == value`
//! - **Equivalence**: in-place `set` on a clone observes the same focused
//!   value as `set_copy`
//! - **Associativity**: any split of a path into composed lenses behaves
//!   like the flat lens over the whole path
//! - **Sharing**: root-level subtrees off the path survive `set_copy`
//!   with their allocation intact

use proptest::prelude::*;
use treelens::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Scalar values only, floats excluded so equality stays reflexive.
fn scalar_strategy() -> impl Strategy<Value = Structure> {
    prop_oneof![
        Just(Structure::Null),
        any::<bool>().prop_map(Structure::from),
        any::<i64>().prop_map(Structure::from),
        "[a-z]{0,8}".prop_map(Structure::from),
    ]
}

fn structure_strategy() -> impl Strategy<Value = Structure> {
    scalar_strategy().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Structure::sequence),
            prop::collection::hash_map("[a-z]{1,3}", inner, 0..4).prop_map(Structure::mapping),
        ]
    })
}

/// Derives a path that provably exists in `tree`: first index of every
/// sequence, smallest key of every mapping. Empty for a scalar root.
fn present_path(tree: &Structure) -> Vec<PathKey> {
    let mut steps = Vec::new();
    let mut current = tree.clone();
    loop {
        if let Some(entries) = current.as_mapping() {
            let Some(name) = entries.keys().min().cloned() else {
                break;
            };
            let child = entries[&name].clone();
            steps.push(PathKey::from(name));
            current = child;
        } else if let Some(items) = current.as_sequence() {
            let Some(child) = items.first().cloned() else {
                break;
            };
            steps.push(PathKey::from(0usize));
            current = child;
        } else {
            break;
        }
    }
    steps
}

// =============================================================================
// Laws
// =============================================================================

proptest! {
    /// Roundtrip: setting then getting yields the set value.
    #[test]
    fn prop_get_after_set_copy_yields_value(
        tree in structure_strategy(),
        value in scalar_strategy(),
    ) {
        let focus = lens(present_path(&tree));
        prop_assert!(focus.is_present(&tree));

        let updated = focus.set_copy(&tree, value.clone()).unwrap();
        prop_assert_eq!(focus.get(&updated).unwrap(), Some(value));
    }

    /// The source of a set_copy is never observably modified.
    #[test]
    fn prop_set_copy_preserves_source(
        tree in structure_strategy(),
        value in scalar_strategy(),
    ) {
        let focus = lens(present_path(&tree));
        let snapshot = tree.clone();
        let _ = focus.set_copy(&tree, value).unwrap();
        prop_assert_eq!(tree, snapshot);
    }

    /// In-place set on a clone and set_copy agree on the focused value.
    #[test]
    fn prop_in_place_and_copy_updates_are_equivalent(
        tree in structure_strategy(),
        value in scalar_strategy(),
    ) {
        let focus = lens(present_path(&tree));

        let copied = focus.set_copy(&tree, value.clone()).unwrap();
        let mut mutated = tree.clone();
        focus.set(&mut mutated, value).unwrap();

        prop_assert_eq!(mutated, copied);
    }

    /// Any composed split of a path behaves like the flat lens.
    #[test]
    fn prop_composition_matches_flat_path(
        tree in structure_strategy(),
        value in scalar_strategy(),
        raw_first in any::<usize>(),
        raw_second in any::<usize>(),
    ) {
        let steps = present_path(&tree);
        let first = raw_first % (steps.len() + 1);
        let second = raw_second % (steps.len() + 1);
        let (low, high) = if first <= second { (first, second) } else { (second, first) };

        let front = lens(steps[..low].iter().cloned());
        let middle = lens(steps[low..high].iter().cloned());
        let back = lens(steps[high..].iter().cloned());
        let flat = lens(steps);

        let left_grouped = (front.clone() >> middle.clone()) >> back.clone();
        let right_grouped = front >> (middle >> back);

        prop_assert_eq!(left_grouped.get(&tree).unwrap(), flat.get(&tree).unwrap());
        prop_assert_eq!(right_grouped.get(&tree).unwrap(), flat.get(&tree).unwrap());

        let from_left = left_grouped.set_copy(&tree, value.clone()).unwrap();
        let from_right = right_grouped.set_copy(&tree, value.clone()).unwrap();
        let from_flat = flat.set_copy(&tree, value).unwrap();
        prop_assert_eq!(&from_left, &from_right);
        prop_assert_eq!(&from_left, &from_flat);
    }

    /// Root-level subtrees off the path are untouched and, when they are
    /// containers, still the same allocation.
    #[test]
    fn prop_set_copy_shares_off_path_siblings(
        tree in structure_strategy(),
        value in scalar_strategy(),
    ) {
        let steps = present_path(&tree);
        prop_assume!(!steps.is_empty());
        let focus = lens(steps.clone());
        let updated = focus.set_copy(&tree, value).unwrap();

        if let (Some(original), Some(new)) = (tree.as_mapping(), updated.as_mapping()) {
            let on_path = original.keys().min().cloned().unwrap_or_default();
            for (name, subtree) in original {
                if *name == on_path {
                    continue;
                }
                let counterpart = &new[name];
                prop_assert_eq!(subtree, counterpart);
                if subtree.is_container() {
                    prop_assert!(subtree.shares_container(counterpart));
                }
            }
        }
    }
}
