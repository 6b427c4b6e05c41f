//! The public lens value and its variants.
//!
//! A [`Lens`] wraps one of three variants, selected at construction time
//! and never changed afterward:
//!
//! - `KeyedLens`: an ordered sequence of path steps (empty = identity),
//! - `WildcardLens`: a single wildcard step over sequence indices,
//! - `ComposedLens`: two lenses chained with [`Lens::and_then`].
//!
//! All three implement one shared capability interface (get, in-place
//! set, copy set) backed by the traversal engine. A composed lens
//! evaluates over the concatenation of its children's steps under the
//! union of every participating policy, which makes composition
//! associative and observably identical to a single lens built from the
//! concatenated key list.
//!
//! # Laws
//!
//! Whenever `lens.get(&source)` yields a present value:
//!
//! 1. **Roundtrip**: `lens.get(&lens.set_copy(&source, value)?)? == Some(value)`
//! 2. **Sharing**: every subtree of `lens.set_copy(&source, value)?` off
//!    the lens's path is pointer-shared with `source`
//! 3. **Equivalence**: `lens.set` on a deep clone of `source` leaves the
//!    focused value equal to the one in `lens.set_copy(&source, value)?`
//!
//! # Example
//!
//! ```
//! use treelens::optics::{key, path};
//! use treelens::structure;
//! use treelens::structure::Structure;
//!
//! let tree = structure!({ "server": { "port": 8080 } });
//!
//! let server = key("server");
//! let port = key("port");
//! let composed = server.and_then(port);
//!
//! assert_eq!(composed.get(&tree).unwrap(), Some(Structure::from(8080)));
//! assert_eq!(
//!     composed.get(&tree).unwrap(),
//!     path("server.port").unwrap().get(&tree).unwrap(),
//! );
//! ```

use crate::optics::error::LensError;
use crate::optics::path::{Path, PathKey};
use crate::optics::policy::Policy;
use crate::optics::traverse;
use crate::structure::Structure;

/// The capability interface shared by every lens variant.
///
/// `policy` is the effective policy for the whole operation, already
/// unioned across composition seams by the wrapping [`Lens`].
trait Focus {
    fn get(&self, source: &Structure, policy: Policy) -> Result<Option<Structure>, LensError>;

    fn set_in_place(
        &self,
        target: &mut Structure,
        value: &Structure,
        policy: Policy,
    ) -> Result<(), LensError>;

    fn set_copy(
        &self,
        source: &Structure,
        value: &Structure,
        policy: Policy,
    ) -> Result<Structure, LensError>;

    /// Appends this variant's path steps, in traversal order.
    fn append_segments(&self, out: &mut Path);
}

/// A lens over an ordered sequence of path steps.
#[derive(Clone, Debug)]
struct KeyedLens {
    segments: Path,
}

impl Focus for KeyedLens {
    fn get(&self, source: &Structure, policy: Policy) -> Result<Option<Structure>, LensError> {
        traverse::get(source, &self.segments, policy)
    }

    fn set_in_place(
        &self,
        target: &mut Structure,
        value: &Structure,
        policy: Policy,
    ) -> Result<(), LensError> {
        traverse::set_in_place(target, &self.segments, policy, value)
    }

    fn set_copy(
        &self,
        source: &Structure,
        value: &Structure,
        policy: Policy,
    ) -> Result<Structure, LensError> {
        traverse::set_copy(source, &self.segments, policy, value)
    }

    fn append_segments(&self, out: &mut Path) {
        out.extend(self.segments.iter().cloned());
    }
}

/// A lens consisting of a single wildcard step.
#[derive(Clone, Copy, Debug)]
struct WildcardLens;

impl WildcardLens {
    const SEGMENTS: [PathKey; 1] = [PathKey::Wildcard];
}

impl Focus for WildcardLens {
    fn get(&self, source: &Structure, policy: Policy) -> Result<Option<Structure>, LensError> {
        traverse::get(source, &Self::SEGMENTS, policy)
    }

    fn set_in_place(
        &self,
        target: &mut Structure,
        value: &Structure,
        policy: Policy,
    ) -> Result<(), LensError> {
        traverse::set_in_place(target, &Self::SEGMENTS, policy, value)
    }

    fn set_copy(
        &self,
        source: &Structure,
        value: &Structure,
        policy: Policy,
    ) -> Result<Structure, LensError> {
        traverse::set_copy(source, &Self::SEGMENTS, policy, value)
    }

    fn append_segments(&self, out: &mut Path) {
        out.push(PathKey::Wildcard);
    }
}

/// Two lenses chained into one.
///
/// Evaluates over the concatenation of both sides' steps, so its behavior
/// is exactly that of one longer lens - wildcard fan-out included.
#[derive(Clone, Debug)]
struct ComposedLens {
    first: Box<Lens>,
    second: Box<Lens>,
}

impl ComposedLens {
    fn concatenated(&self) -> Path {
        let mut segments = Path::new();
        self.first.append_segments(&mut segments);
        self.second.append_segments(&mut segments);
        segments
    }
}

impl Focus for ComposedLens {
    fn get(&self, source: &Structure, policy: Policy) -> Result<Option<Structure>, LensError> {
        traverse::get(source, &self.concatenated(), policy)
    }

    fn set_in_place(
        &self,
        target: &mut Structure,
        value: &Structure,
        policy: Policy,
    ) -> Result<(), LensError> {
        traverse::set_in_place(target, &self.concatenated(), policy, value)
    }

    fn set_copy(
        &self,
        source: &Structure,
        value: &Structure,
        policy: Policy,
    ) -> Result<Structure, LensError> {
        traverse::set_copy(source, &self.concatenated(), policy, value)
    }

    fn append_segments(&self, out: &mut Path) {
        self.first.append_segments(out);
        self.second.append_segments(out);
    }
}

#[derive(Clone, Debug)]
enum LensKind {
    Keyed(KeyedLens),
    Wildcard(WildcardLens),
    Composed(ComposedLens),
}

/// A composable, reusable focus on one location inside a [`Structure`].
///
/// Lenses are immutable value objects: stateless, cheaply cloneable, and
/// applicable to arbitrarily many different structures. They carry no
/// reference to any structure; the structures they operate on are owned
/// by the caller and are not internally synchronized - concurrent
/// in-place `set` calls on one structure are the caller's responsibility,
/// and racing a `set_copy` against an in-place `set` on its source is
/// likewise undefined. With the `arc` feature a lens itself is
/// `Send + Sync` and safe to share across threads as read-only
/// configuration.
///
/// Built by the factory functions ([`lens`](fn@crate::optics::lens),
/// [`path`](fn@crate::optics::path), [`key`](crate::optics::key),
/// [`with_policy`](crate::optics::with_policy),
/// [`array_wildcard`](crate::optics::array_wildcard)) and composed with
/// [`and_then`](Self::and_then) or the `>>` operator.
#[derive(Clone, Debug)]
pub struct Lens {
    kind: LensKind,
    policy: Policy,
}

impl Lens {
    pub(crate) fn from_segments(segments: Path, policy: Policy) -> Self {
        Self {
            kind: LensKind::Keyed(KeyedLens { segments }),
            policy,
        }
    }

    pub(crate) const fn from_wildcard(policy: Policy) -> Self {
        Self {
            kind: LensKind::Wildcard(WildcardLens),
            policy,
        }
    }

    /// The identity lens: focuses the whole structure.
    ///
    /// # Example
    ///
    /// ```
    /// use treelens::optics::Lens;
    /// use treelens::structure::Structure;
    ///
    /// let identity = Lens::identity();
    /// let tree = Structure::from(5);
    /// assert_eq!(identity.get(&tree).unwrap(), Some(tree));
    /// ```
    #[must_use]
    pub fn identity() -> Self {
        Self::from_segments(Path::new(), Policy::new())
    }

    /// Returns this lens with its own policy replaced.
    ///
    /// Composition seams still union in the policies of every composed
    /// part.
    #[must_use]
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// This lens's own policy (not including composed parts).
    #[must_use]
    pub const fn policy(&self) -> Policy {
        self.policy
    }

    /// Reads the focused value.
    ///
    /// Returns `Ok(None)` when the focus is absent under a non-strict
    /// policy; under a strict policy absence is an error instead. The
    /// input is never mutated. Containers in the returned value are
    /// shared with `source` by reference count, except the sequence a
    /// wildcard collects, which is freshly built and aligned by index
    /// (failed branches contribute `Null`).
    ///
    /// # Errors
    ///
    /// Under a strict policy: [`LensError::NotTraversable`],
    /// [`LensError::KeyMissing`], or [`LensError::InvalidWildcardTarget`].
    pub fn get(&self, source: &Structure) -> Result<Option<Structure>, LensError> {
        let policy = self.effective_policy();
        match &self.kind {
            LensKind::Keyed(inner) => inner.get(source, policy),
            LensKind::Wildcard(inner) => inner.get(source, policy),
            LensKind::Composed(inner) => inner.get(source, policy),
        }
    }

    /// Returns `true` if the focused value is present.
    #[must_use]
    pub fn is_present(&self, source: &Structure) -> bool {
        matches!(self.get(source), Ok(Some(_)))
    }

    /// Writes `value` at the focused location, mutating `target`.
    ///
    /// Only the traversed path is touched; payloads shared with other
    /// clones of `target` are detached first, so the write never leaks
    /// into those clones. With `create_missing`, missing intermediate
    /// containers are materialized on the way down. Without it, a missing
    /// intermediate makes the operation a no-op (non-strict) or an error
    /// (strict). Wildcard branches apply the policy independently in
    /// index order, so a strict failure may leave earlier branches
    /// already written.
    ///
    /// # Errors
    ///
    /// Under a strict policy: [`LensError::NotTraversable`],
    /// [`LensError::KeyMissing`], or [`LensError::InvalidWildcardTarget`].
    pub fn set(&self, target: &mut Structure, value: Structure) -> Result<(), LensError> {
        let policy = self.effective_policy();
        match &self.kind {
            LensKind::Keyed(inner) => inner.set_in_place(target, &value, policy),
            LensKind::Wildcard(inner) => inner.set_in_place(target, &value, policy),
            LensKind::Composed(inner) => inner.set_in_place(target, &value, policy),
        }
    }

    /// Builds a new structure with the focused value replaced.
    ///
    /// `source` is untouched. Every container on the traversed path in
    /// the result is freshly allocated; every subtree off the path is
    /// shared with `source` by reference count - the copy-update
    /// contract, which holds through composition and wildcards.
    ///
    /// # Errors
    ///
    /// Under a strict policy: [`LensError::NotTraversable`],
    /// [`LensError::KeyMissing`], or [`LensError::InvalidWildcardTarget`].
    pub fn set_copy(&self, source: &Structure, value: Structure) -> Result<Structure, LensError> {
        let policy = self.effective_policy();
        match &self.kind {
            LensKind::Keyed(inner) => inner.set_copy(source, &value, policy),
            LensKind::Wildcard(inner) => inner.set_copy(source, &value, policy),
            LensKind::Composed(inner) => inner.set_copy(source, &value, policy),
        }
    }

    /// Copy-updates the focused value by applying a function to it.
    ///
    /// Returns `source` unchanged when the focus is absent under a
    /// non-strict policy. Through a wildcard the read value is the
    /// collected sequence and the function's result is written to every
    /// branch.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get) and [`set_copy`](Self::set_copy).
    pub fn modify<F>(&self, source: &Structure, function: F) -> Result<Structure, LensError>
    where
        F: FnOnce(Structure) -> Structure,
    {
        match self.get(source)? {
            Some(current) => self.set_copy(source, function(current)),
            None => Ok(source.clone()),
        }
    }

    /// In-place counterpart of [`modify`](Self::modify).
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get) and [`set`](Self::set).
    pub fn modify_in_place<F>(&self, target: &mut Structure, function: F) -> Result<(), LensError>
    where
        F: FnOnce(Structure) -> Structure,
    {
        match self.get(target)? {
            Some(current) => self.set(target, function(current)),
            None => Ok(()),
        }
    }

    /// Composes this lens with another, focusing through both in order.
    ///
    /// The composed lens behaves exactly like a single lens over the
    /// concatenated path, under the union of both sides' policy flags:
    /// either side setting `strict` or `create_missing` activates it for
    /// the whole composed operation. Composition is associative.
    ///
    /// The `>>` operator is sugar for this method.
    ///
    /// # Example
    ///
    /// ```
    /// use treelens::optics::key;
    /// use treelens::structure;
    /// use treelens::structure::Structure;
    ///
    /// let tree = structure!({ "a": { "b": 1 } });
    /// let composed = key("a") >> key("b");
    /// assert_eq!(composed.get(&tree).unwrap(), Some(Structure::from(1)));
    /// ```
    #[must_use]
    pub fn and_then(self, other: Self) -> Self {
        Self {
            kind: LensKind::Composed(ComposedLens {
                first: Box::new(self),
                second: Box::new(other),
            }),
            policy: Policy::new(),
        }
    }

    /// The policy in force for this lens's operations: its own, unioned
    /// with every composed part's.
    pub(crate) fn effective_policy(&self) -> Policy {
        match &self.kind {
            LensKind::Composed(composed) => self
                .policy
                .union(composed.first.effective_policy())
                .union(composed.second.effective_policy()),
            LensKind::Keyed(_) | LensKind::Wildcard(_) => self.policy,
        }
    }

    pub(crate) fn append_segments(&self, out: &mut Path) {
        match &self.kind {
            LensKind::Keyed(inner) => inner.append_segments(out),
            LensKind::Wildcard(inner) => inner.append_segments(out),
            LensKind::Composed(inner) => inner.append_segments(out),
        }
    }
}

impl std::ops::Shr for Lens {
    type Output = Self;

    fn shr(self, other: Self) -> Self {
        self.and_then(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optics::factory::{key, lens};
    use crate::structure;

    #[test]
    fn test_identity_lens_focuses_whole_structure() {
        let identity = Lens::identity();
        let tree = structure!({ "a": 1 });
        assert_eq!(identity.get(&tree).unwrap(), Some(tree.clone()));

        let replaced = identity.set_copy(&tree, Structure::from(2)).unwrap();
        assert_eq!(replaced, Structure::from(2));
    }

    #[test]
    fn test_and_then_matches_concatenated_key_list() {
        let tree = structure!({ "a": { "b": { "c": 3 } } });
        let composed = key("a").and_then(key("b")).and_then(key("c"));
        let flat = lens(["a", "b", "c"]);
        assert_eq!(composed.get(&tree).unwrap(), flat.get(&tree).unwrap());
        assert_eq!(
            composed.set_copy(&tree, Structure::from(9)).unwrap(),
            flat.set_copy(&tree, Structure::from(9)).unwrap()
        );
    }

    #[test]
    fn test_shr_operator_is_and_then() {
        let tree = structure!({ "a": { "b": 1 } });
        let composed = key("a") >> key("b");
        assert_eq!(composed.get(&tree).unwrap(), Some(Structure::from(1)));
    }

    #[test]
    fn test_effective_policy_unions_across_seams() {
        let strict = key("a").with_policy(Policy::new().with_strict(true));
        let creating = key("b").with_policy(Policy::new().with_create_missing(true));
        let seam = strict.and_then(creating).effective_policy();
        assert!(seam.strict());
        assert!(seam.create_missing());
    }

    #[test]
    fn test_is_present() {
        let tree = structure!({ "a": 1 });
        assert!(key("a").is_present(&tree));
        assert!(!key("b").is_present(&tree));
    }

    #[test]
    fn test_modify_applies_function_to_focus() {
        let tree = structure!({ "count": 2 });
        let count = key("count");
        let bumped = count
            .modify(&tree, |current| {
                Structure::from(current.as_integer().unwrap_or(0) + 1)
            })
            .unwrap();
        assert_eq!(bumped, structure!({ "count": 3 }));
        assert_eq!(tree, structure!({ "count": 2 }));
    }

    #[test]
    fn test_modify_absent_focus_returns_source() {
        let tree = structure!({ "a": 1 });
        let missing = key("zzz");
        let unchanged = missing.modify(&tree, |_| Structure::from(0)).unwrap();
        assert_eq!(unchanged, tree);
    }

    #[test]
    fn test_modify_in_place() {
        let mut tree = structure!({ "count": 2 });
        key("count")
            .modify_in_place(&mut tree, |current| {
                Structure::from(current.as_integer().unwrap_or(0) * 10)
            })
            .unwrap();
        assert_eq!(tree, structure!({ "count": 20 }));
    }

    #[cfg(feature = "arc")]
    mod thread_safety {
        use super::*;
        use static_assertions::assert_impl_all;

        assert_impl_all!(Lens: Send, Sync);
    }
}
