//! Container primitives used by the traversal engine.
//!
//! These are the shallow-copy and child-access operations a lens needs:
//! type tests, keyed reads, copy-on-write keyed writes, and pointer-level
//! sharing observation. None of them traverse more than one level.

use super::value::{Key, Structure};
use super::ReferenceCounter;

impl Structure {
    /// Returns `true` if this value can hold children (mapping or sequence).
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Mapping(_) | Self::Sequence(_))
    }

    /// Returns the child at `key`, if the key addresses this container.
    ///
    /// A [`Key::Name`] only resolves inside a mapping and a [`Key::Index`]
    /// only inside a sequence; any other combination, an out-of-bounds
    /// index, and any scalar receiver all yield `None`.
    #[must_use]
    pub fn child(&self, key: &Key) -> Option<&Self> {
        match (self, key) {
            (Self::Mapping(entries), Key::Name(name)) => entries.get(name),
            (Self::Sequence(items), Key::Index(index)) => items.get(*index),
            _ => None,
        }
    }

    /// Returns a mutable reference to the child at `key`.
    ///
    /// Detaches the container payload first if it is shared
    /// (copy-on-write), so the mutation never leaks into other clones.
    pub fn child_mut(&mut self, key: &Key) -> Option<&mut Self> {
        match (self, key) {
            (Self::Mapping(entries), Key::Name(name)) => {
                ReferenceCounter::make_mut(entries).get_mut(name)
            }
            (Self::Sequence(items), Key::Index(index)) => {
                ReferenceCounter::make_mut(items).get_mut(*index)
            }
            _ => None,
        }
    }

    /// Writes `value` at `key`, reporting whether the write landed.
    ///
    /// Mapping writes insert missing keys. Sequence writes replace at
    /// `index < len` and append at `index == len`; indices past the end do
    /// not land. Scalar receivers and mismatched key kinds never land.
    /// Shared payloads are detached first (copy-on-write).
    pub fn set_child(&mut self, key: &Key, value: Self) -> bool {
        match (self, key) {
            (Self::Mapping(entries), Key::Name(name)) => {
                ReferenceCounter::make_mut(entries).insert(name.clone(), value);
                true
            }
            (Self::Sequence(items), Key::Index(index)) => {
                let items = ReferenceCounter::make_mut(items);
                if *index < items.len() {
                    items[*index] = value;
                    true
                } else if *index == items.len() {
                    items.push(value);
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// Mutable access to sequence items, detaching a shared payload first.
    pub(crate) fn sequence_items_mut(&mut self) -> Option<&mut super::value::Sequence> {
        match self {
            Self::Sequence(items) => Some(ReferenceCounter::make_mut(items)),
            _ => None,
        }
    }

    /// Returns a fresh container holding the same children.
    ///
    /// The returned value owns a newly allocated payload whose entries are
    /// shallow clones of the originals, so every child is still shared
    /// with `self`. Scalars are cloned as-is.
    #[must_use]
    pub fn shallow_copy(&self) -> Self {
        match self {
            Self::Mapping(entries) => {
                Self::Mapping(ReferenceCounter::new(entries.as_ref().clone()))
            }
            Self::Sequence(items) => {
                Self::Sequence(ReferenceCounter::new(items.as_ref().clone()))
            }
            other => other.clone(),
        }
    }

    /// Returns `true` if `self` and `other` are the same container variant
    /// backed by the same payload allocation.
    ///
    /// This is the observable form of the copy-update sharing contract:
    /// after `set_copy`, subtrees off the traversed path report `true`
    /// against the original, subtrees on it report `false`.
    #[must_use]
    pub fn shares_container(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Mapping(left), Self::Mapping(right)) => {
                ReferenceCounter::ptr_eq(left, right)
            }
            (Self::Sequence(left), Self::Sequence(right)) => {
                ReferenceCounter::ptr_eq(left, right)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Structure {
        Structure::mapping([
            ("a", Structure::from(1)),
            (
                "items",
                Structure::sequence([Structure::from(10), Structure::from(20)]),
            ),
        ])
    }

    #[test]
    fn test_child_by_name_and_index() {
        let tree = sample();
        assert_eq!(tree.child(&Key::from("a")), Some(&Structure::from(1)));
        let items = tree.child(&Key::from("items")).unwrap();
        assert_eq!(items.child(&Key::from(1)), Some(&Structure::from(20)));
        assert_eq!(items.child(&Key::from(2)), None);
        assert_eq!(tree.child(&Key::from(0)), None);
        assert_eq!(Structure::from(5).child(&Key::from("a")), None);
    }

    #[test]
    fn test_child_mut_detaches_shared_payload() {
        let tree = sample();
        let mut copy = tree.clone();
        *copy.child_mut(&Key::from("a")).unwrap() = Structure::from(99);

        assert_eq!(tree.child(&Key::from("a")), Some(&Structure::from(1)));
        assert_eq!(copy.child(&Key::from("a")), Some(&Structure::from(99)));
        assert!(!tree.shares_container(&copy));
    }

    #[test]
    fn test_set_child_sequence_bounds() {
        let mut items = Structure::sequence([Structure::from(1)]);
        assert!(items.set_child(&Key::from(0), Structure::from(2)));
        assert!(items.set_child(&Key::from(1), Structure::from(3)));
        assert!(!items.set_child(&Key::from(5), Structure::from(4)));
        assert_eq!(
            items,
            Structure::sequence([Structure::from(2), Structure::from(3)])
        );
    }

    #[test]
    fn test_set_child_kind_mismatch() {
        let mut tree = sample();
        assert!(!tree.set_child(&Key::from(0), Structure::Null));
        let mut scalar = Structure::from(1);
        assert!(!scalar.set_child(&Key::from("a"), Structure::Null));
    }

    #[test]
    fn test_shallow_copy_shares_children() {
        let tree = sample();
        let copy = tree.shallow_copy();

        assert!(!tree.shares_container(&copy));
        let original_items = tree.child(&Key::from("items")).unwrap();
        let copied_items = copy.child(&Key::from("items")).unwrap();
        assert!(original_items.shares_container(copied_items));
    }

    #[test]
    fn test_shares_container_variants() {
        let mapping = sample();
        let sequence = Structure::sequence([]);
        assert!(!mapping.shares_container(&sequence));
        assert!(!Structure::from(1).shares_container(&Structure::from(1)));
    }
}
