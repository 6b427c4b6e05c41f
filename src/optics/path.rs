//! Path steps: the single units a lens traverses by.

use std::fmt;

use smallvec::SmallVec;

use crate::optics::error::InvalidPathError;
use crate::structure::{Key, Structure};

/// A shared dynamic key function.
///
/// Called with the substructure reached at its step (never the root), it
/// returns the key to descend by. With the `arc` feature enabled the
/// function must be `Send + Sync` so lenses stay shareable across threads.
#[cfg(feature = "arc")]
pub type KeyFunction = std::sync::Arc<dyn Fn(&Structure) -> Key + Send + Sync>;

/// A shared dynamic key function.
///
/// Called with the substructure reached at its step (never the root), it
/// returns the key to descend by.
#[cfg(not(feature = "arc"))]
pub type KeyFunction = std::rc::Rc<dyn Fn(&Structure) -> Key>;

/// An ordered sequence of path steps. Short paths stay inline.
pub type Path = SmallVec<[PathKey; 4]>;

/// A single step in a lens's path.
///
/// # Example
///
/// ```
/// use treelens::optics::PathKey;
/// use treelens::structure::{Key, Structure};
///
/// let literal = PathKey::from("name");
/// let by_index = PathKey::from(2);
/// let computed = PathKey::dynamic(|current: &Structure| {
///     Key::from(if current.as_mapping().is_some() { "mapping" } else { "other" })
/// });
/// let every = PathKey::Wildcard;
/// ```
#[derive(Clone)]
pub enum PathKey {
    /// A fixed key, resolved unconditionally.
    Literal(Key),
    /// A key computed from the substructure at this step. Re-invoked on
    /// every operation; never memoized.
    Dynamic(KeyFunction),
    /// Fans the remaining path out over every index of a sequence.
    Wildcard,
}

impl PathKey {
    /// Creates a literal step.
    pub fn literal<K>(key: K) -> Self
    where
        K: Into<Key>,
    {
        Self::Literal(key.into())
    }

    /// Creates a dynamic step from a key function.
    ///
    /// The function receives the substructure reached at this step and is
    /// invoked exactly once per step per operation.
    #[cfg(not(feature = "arc"))]
    pub fn dynamic<F>(function: F) -> Self
    where
        F: Fn(&Structure) -> Key + 'static,
    {
        Self::Dynamic(std::rc::Rc::new(function))
    }

    /// Creates a dynamic step from a key function.
    ///
    /// The function receives the substructure reached at this step and is
    /// invoked exactly once per step per operation.
    #[cfg(feature = "arc")]
    pub fn dynamic<F>(function: F) -> Self
    where
        F: Fn(&Structure) -> Key + Send + Sync + 'static,
    {
        Self::Dynamic(std::sync::Arc::new(function))
    }

}

impl fmt::Debug for PathKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(key) => formatter.debug_tuple("Literal").field(key).finish(),
            Self::Dynamic(_) => formatter.debug_struct("Dynamic").finish_non_exhaustive(),
            Self::Wildcard => formatter.write_str("Wildcard"),
        }
    }
}

impl From<Key> for PathKey {
    fn from(key: Key) -> Self {
        Self::Literal(key)
    }
}

impl From<&str> for PathKey {
    fn from(name: &str) -> Self {
        Self::Literal(Key::from(name))
    }
}

impl From<String> for PathKey {
    fn from(name: String) -> Self {
        Self::Literal(Key::from(name))
    }
}

impl From<usize> for PathKey {
    fn from(index: usize) -> Self {
        Self::Literal(Key::from(index))
    }
}

/// Parses a dot-delimited path into literal name steps.
///
/// Every segment, including the whole string, must be non-empty.
pub(crate) fn parse_dotted(dotted: &str) -> Result<Path, InvalidPathError> {
    let mut segments = Path::new();
    let mut position = 0;
    for segment in dotted.split('.') {
        if segment.is_empty() {
            return Err(InvalidPathError::new(dotted, position));
        }
        segments.push(PathKey::Literal(Key::Name(segment.to_string())));
        position += segment.len() + 1;
    }
    Ok(segments)
}
