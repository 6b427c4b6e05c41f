//! Pure constructors for lenses.
//!
//! All constructors here build a [`Lens`] value and nothing else: no
//! validation against any structure, no side effects. `path` is the only
//! fallible one, rejecting empty segments in its input string.

use crate::optics::error::InvalidPathError;
use crate::optics::lens::Lens;
use crate::optics::path::{parse_dotted, Path, PathKey};
use crate::optics::policy::Policy;
use crate::structure::Key;

/// Builds a lens from an ordered list of path steps.
///
/// Anything convertible into a [`PathKey`] works as an item: `&str` and
/// `String` become literal name keys, `usize` a literal index, and
/// [`PathKey`] values pass through (so dynamic and wildcard steps can be
/// mixed in). An empty list yields the identity lens.
///
/// # Example
///
/// ```
/// use treelens::optics::{lens, PathKey};
/// use treelens::structure;
/// use treelens::structure::Structure;
///
/// let tree = structure!({ "servers": [{ "port": 1 }, { "port": 2 }] });
/// let ports = lens([
///     PathKey::from("servers"),
///     PathKey::Wildcard,
///     PathKey::from("port"),
/// ]);
/// assert_eq!(ports.get(&tree).unwrap(), Some(structure!([1, 2])));
/// ```
#[must_use]
pub fn lens<I>(keys: I) -> Lens
where
    I: IntoIterator,
    I::Item: Into<PathKey>,
{
    with_policy(keys, Policy::new())
}

/// Builds a lens from a dot-delimited string of literal name keys.
///
/// # Errors
///
/// [`InvalidPathError`] when a segment between dots is empty, including
/// the empty input string.
///
/// # Example
///
/// ```
/// use treelens::optics::path;
/// use treelens::structure;
/// use treelens::structure::Structure;
///
/// let tree = structure!({ "a": { "b": 1 } });
/// assert_eq!(
///     path("a.b").unwrap().get(&tree).unwrap(),
///     Some(Structure::from(1)),
/// );
/// assert!(path("a..b").is_err());
/// ```
pub fn path(dotted: &str) -> Result<Lens, InvalidPathError> {
    Ok(Lens::from_segments(parse_dotted(dotted)?, Policy::new()))
}

/// Builds a single-key lens.
///
/// # Example
///
/// ```
/// use treelens::optics::key;
/// use treelens::structure;
/// use treelens::structure::Structure;
///
/// let tree = structure!({ "name": "ada" });
/// assert_eq!(key("name").get(&tree).unwrap(), Some(Structure::from("ada")));
/// ```
#[must_use]
pub fn key<K>(single: K) -> Lens
where
    K: Into<Key>,
{
    let mut segments = Path::new();
    segments.push(PathKey::Literal(single.into()));
    Lens::from_segments(segments, Policy::new())
}

/// Builds a lens from path steps with an explicit policy.
///
/// # Example
///
/// ```
/// use treelens::optics::{with_policy, Policy};
/// use treelens::structure;
/// use treelens::structure::Structure;
///
/// let creating = with_policy(["a", "b"], Policy::new().with_create_missing(true));
/// let grown = creating.set_copy(&structure!({}), Structure::from(1)).unwrap();
/// assert_eq!(grown, structure!({ "a": { "b": 1 } }));
/// ```
#[must_use]
pub fn with_policy<I>(keys: I, policy: Policy) -> Lens
where
    I: IntoIterator,
    I::Item: Into<PathKey>,
{
    let segments: Path = keys.into_iter().map(Into::into).collect();
    Lens::from_segments(segments, policy)
}

/// Builds a lens whose path is a single wildcard step.
///
/// Focuses every index of a sequence at once. Use
/// [`Lens::with_policy`] to attach a non-default policy.
///
/// # Example
///
/// ```
/// use treelens::optics::array_wildcard;
/// use treelens::structure;
/// use treelens::structure::Structure;
///
/// let items = structure!([1, 2, 3]);
/// let every = array_wildcard();
/// assert_eq!(every.get(&items).unwrap(), Some(structure!([1, 2, 3])));
/// assert_eq!(
///     every.set_copy(&items, Structure::from(0)).unwrap(),
///     structure!([0, 0, 0]),
/// );
/// ```
#[must_use]
pub fn array_wildcard() -> Lens {
    Lens::from_wildcard(Policy::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure;
    use crate::structure::Structure;

    #[test]
    fn test_lens_accepts_mixed_key_kinds() {
        let tree = structure!({ "items": [{ "v": 1 }, { "v": 2 }] });
        let second = lens([
            PathKey::from("items"),
            PathKey::from(1usize),
            PathKey::from("v"),
        ]);
        assert_eq!(second.get(&tree).unwrap(), Some(Structure::from(2)));
    }

    #[test]
    fn test_lens_of_no_keys_is_identity() {
        let tree = structure!({ "a": 1 });
        let identity = lens(Vec::<PathKey>::new());
        assert_eq!(identity.get(&tree).unwrap(), Some(tree));
    }

    #[test]
    fn test_path_rejects_empty_segments() {
        assert!(path("").is_err());
        assert!(path("a..b").is_err());
        assert!(path(".").is_err());
    }

    #[test]
    fn test_key_builds_single_step_lens() {
        let tree = structure!([10, 20]);
        assert_eq!(key(1usize).get(&tree).unwrap(), Some(Structure::from(20)));
    }

    #[test]
    fn test_with_policy_strict_surfaces_errors() {
        let strict = with_policy(["missing"], Policy::new().with_strict(true));
        assert!(strict.get(&structure!({})).is_err());
    }

    #[test]
    fn test_array_wildcard_with_policy() {
        let strict = array_wildcard().with_policy(Policy::new().with_strict(true));
        assert!(strict.get(&structure!({ "not": "a sequence" })).is_err());
    }
}
