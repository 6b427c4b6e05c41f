//! The traversal engine shared by every lens variant.
//!
//! All three operations walk a `&[PathKey]` slice left to right against a
//! [`Structure`], under one [`Policy`]:
//!
//! - [`get`] reads the focused value without mutating the input,
//! - [`set_in_place`] writes destructively, touching only the traversed
//!   path (shared payloads are detached copy-on-write first),
//! - [`set_copy`] rebuilds bottom-up: every container on the path is a
//!   fresh allocation, every subtree off it stays shared with the source.
//!
//! A wildcard step fans the remaining subpath out over every index of the
//! current sequence; branches are evaluated in index order and enforce the
//! policy independently. Under a strict policy the first failing branch
//! aborts the call, so an in-place write may already have landed in
//! earlier branches.

use crate::optics::error::LensError;
use crate::optics::path::PathKey;
use crate::optics::policy::Policy;
use crate::structure::{Key, Mapping, Sequence, Structure};

/// Non-strict policies degrade failures into a fallback result.
fn fail_or<T>(policy: Policy, error: LensError, fallback: T) -> Result<T, LensError> {
    if policy.strict() {
        Err(error)
    } else {
        Ok(fallback)
    }
}

/// The empty container materialized for a missing intermediate step.
///
/// The kind follows the step that will index into it: names and dynamic
/// keys address mappings, indices and wildcards address sequences. A
/// dynamic key cannot run before its container exists, so it gets a
/// mapping; if it then resolves to an index, the normal missing-key
/// policy applies one level down.
fn empty_container_for(next: &PathKey) -> Structure {
    match next {
        PathKey::Literal(Key::Index(_)) | PathKey::Wildcard => Structure::from(Sequence::new()),
        PathKey::Literal(Key::Name(_)) | PathKey::Dynamic(_) => Structure::from(Mapping::new()),
    }
}

// =============================================================================
// get
// =============================================================================

/// Reads the value focused by `path`, never mutating `source`.
pub(crate) fn get(
    source: &Structure,
    path: &[PathKey],
    policy: Policy,
) -> Result<Option<Structure>, LensError> {
    get_at(source, path, policy, 0)
}

fn get_at(
    current: &Structure,
    path: &[PathKey],
    policy: Policy,
    depth: usize,
) -> Result<Option<Structure>, LensError> {
    let Some((step, rest)) = path.split_first() else {
        return Ok(Some(current.clone()));
    };
    match step {
        PathKey::Wildcard => match current.as_sequence() {
            Some(items) => {
                let mut collected = Sequence::with_capacity(items.len());
                for item in items {
                    // A failed branch contributes Null so the collected
                    // sequence stays aligned by index.
                    collected.push(get_at(item, rest, policy, depth + 1)?.unwrap_or_default());
                }
                Ok(Some(Structure::from(collected)))
            }
            None => fail_or(policy, LensError::InvalidWildcardTarget { depth }, None),
        },
        PathKey::Literal(literal) => {
            if !current.is_container() {
                return fail_or(policy, LensError::NotTraversable { depth }, None);
            }
            get_keyed(current, literal.clone(), rest, policy, depth)
        }
        PathKey::Dynamic(function) => {
            if !current.is_container() {
                return fail_or(policy, LensError::NotTraversable { depth }, None);
            }
            get_keyed(current, function(current), rest, policy, depth)
        }
    }
}

fn get_keyed(
    current: &Structure,
    key: Key,
    rest: &[PathKey],
    policy: Policy,
    depth: usize,
) -> Result<Option<Structure>, LensError> {
    match current.child(&key) {
        Some(child) => get_at(child, rest, policy, depth + 1),
        None => fail_or(policy, LensError::KeyMissing { key, depth }, None),
    }
}

// =============================================================================
// set_in_place
// =============================================================================

/// Writes `value` at the focused location, mutating `target` destructively.
///
/// Only the traversed path is touched; payloads shared with other clones
/// are detached (copy-on-write) before writing.
pub(crate) fn set_in_place(
    target: &mut Structure,
    path: &[PathKey],
    policy: Policy,
    value: &Structure,
) -> Result<(), LensError> {
    set_in_place_at(target, path, policy, value, 0)
}

fn set_in_place_at(
    current: &mut Structure,
    path: &[PathKey],
    policy: Policy,
    value: &Structure,
    depth: usize,
) -> Result<(), LensError> {
    let Some((step, rest)) = path.split_first() else {
        // Identity focus replaces the whole value.
        *current = value.clone();
        return Ok(());
    };
    match step {
        PathKey::Wildcard => match current.sequence_items_mut() {
            Some(items) => {
                for item in items.iter_mut() {
                    set_in_place_at(item, rest, policy, value, depth + 1)?;
                }
                Ok(())
            }
            None => fail_or(policy, LensError::InvalidWildcardTarget { depth }, ()),
        },
        PathKey::Literal(literal) => {
            if !current.is_container() {
                return fail_or(policy, LensError::NotTraversable { depth }, ());
            }
            set_in_place_keyed(current, literal.clone(), rest, policy, value, depth)
        }
        PathKey::Dynamic(function) => {
            if !current.is_container() {
                return fail_or(policy, LensError::NotTraversable { depth }, ());
            }
            let key = function(current);
            set_in_place_keyed(current, key, rest, policy, value, depth)
        }
    }
}

fn set_in_place_keyed(
    current: &mut Structure,
    key: Key,
    rest: &[PathKey],
    policy: Policy,
    value: &Structure,
    depth: usize,
) -> Result<(), LensError> {
    if let Some(next) = rest.first() {
        let (present, traversable) = match current.child(&key) {
            Some(child) => (true, child.is_container()),
            None => (false, false),
        };
        if !traversable {
            if !policy.create_missing() {
                let error = if present {
                    LensError::NotTraversable { depth: depth + 1 }
                } else {
                    LensError::KeyMissing { key, depth }
                };
                return fail_or(policy, error, ());
            }
            if !current.set_child(&key, empty_container_for(next)) {
                return fail_or(policy, LensError::KeyMissing { key, depth }, ());
            }
        }
        match current.child_mut(&key) {
            Some(child) => set_in_place_at(child, rest, policy, value, depth + 1),
            None => fail_or(policy, LensError::KeyMissing { key, depth }, ()),
        }
    } else if current.set_child(&key, value.clone()) {
        Ok(())
    } else {
        // A sequence index past the end (or a key of the wrong kind for
        // this container) cannot receive the final assignment.
        fail_or(policy, LensError::KeyMissing { key, depth }, ())
    }
}

// =============================================================================
// set_copy
// =============================================================================

/// Builds a new structure with the focused value replaced.
///
/// Every container on the traversed path in the result is freshly
/// allocated; every subtree off the path is shared with `source` by
/// reference count.
pub(crate) fn set_copy(
    source: &Structure,
    path: &[PathKey],
    policy: Policy,
    value: &Structure,
) -> Result<Structure, LensError> {
    set_copy_at(source, path, policy, value, 0)
}

fn set_copy_at(
    current: &Structure,
    path: &[PathKey],
    policy: Policy,
    value: &Structure,
    depth: usize,
) -> Result<Structure, LensError> {
    let Some((step, rest)) = path.split_first() else {
        return Ok(value.clone());
    };
    match step {
        PathKey::Wildcard => match current.as_sequence() {
            Some(items) => {
                let mut fresh = Sequence::with_capacity(items.len());
                for item in items {
                    fresh.push(set_copy_at(item, rest, policy, value, depth + 1)?);
                }
                Ok(Structure::from(fresh))
            }
            None => fail_or(
                policy,
                LensError::InvalidWildcardTarget { depth },
                current.clone(),
            ),
        },
        PathKey::Literal(literal) => {
            if !current.is_container() {
                return fail_or(policy, LensError::NotTraversable { depth }, current.clone());
            }
            set_copy_keyed(current, literal.clone(), rest, policy, value, depth)
        }
        PathKey::Dynamic(function) => {
            if !current.is_container() {
                return fail_or(policy, LensError::NotTraversable { depth }, current.clone());
            }
            let key = function(current);
            set_copy_keyed(current, key, rest, policy, value, depth)
        }
    }
}

fn set_copy_keyed(
    current: &Structure,
    key: Key,
    rest: &[PathKey],
    policy: Policy,
    value: &Structure,
    depth: usize,
) -> Result<Structure, LensError> {
    let mut fresh = current.shallow_copy();
    match current.child(&key) {
        Some(child) => {
            let updated = set_copy_at(child, rest, policy, value, depth + 1)?;
            fresh.set_child(&key, updated);
            Ok(fresh)
        }
        None if rest.is_empty() => {
            // A missing key at the final step is always written; the
            // create_missing flag governs intermediate containers only.
            if fresh.set_child(&key, value.clone()) {
                Ok(fresh)
            } else {
                fail_or(policy, LensError::KeyMissing { key, depth }, current.clone())
            }
        }
        None if policy.create_missing() => {
            let next = &rest[0];
            let subtree = set_copy_at(&empty_container_for(next), rest, policy, value, depth + 1)?;
            if fresh.set_child(&key, subtree) {
                Ok(fresh)
            } else {
                fail_or(policy, LensError::KeyMissing { key, depth }, current.clone())
            }
        }
        None => fail_or(policy, LensError::KeyMissing { key, depth }, fresh),
    }
}
