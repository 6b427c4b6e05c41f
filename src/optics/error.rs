//! Error types for lens construction and strict traversal.
//!
//! Under the default policy no traversal ever errors: reads degrade to
//! absence and writes to no-ops. These types only surface when `strict`
//! is set (traversal errors) or when a lens is built from malformed input
//! (construction errors). All failures are deterministic functions of the
//! structure, the lens, and the policy; there is no retry logic.

use crate::structure::Key;

/// A traversal failure under a strict policy.
///
/// Each variant carries `depth`, the 0-based index of the path step at
/// which traversal stopped.
///
/// # Examples
///
/// ```rust
/// use treelens::optics::{with_policy, LensError, Policy};
/// use treelens::structure;
/// use treelens::structure::Key;
///
/// let strict = with_policy(["a", "b"], Policy::new().with_strict(true));
/// let error = strict.get(&structure!({ "a": {} })).unwrap_err();
/// assert_eq!(error, LensError::KeyMissing { key: Key::from("b"), depth: 1 });
/// assert_eq!(error.to_string(), "key `b` missing at path step 1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LensError {
    /// Traversal reached a non-container where a container was required.
    NotTraversable {
        /// The 0-based path step at which the scalar was encountered.
        depth: usize,
    },
    /// A required key or index is absent from the container at this step.
    KeyMissing {
        /// The key that failed to resolve.
        key: Key,
        /// The 0-based path step at which resolution failed.
        depth: usize,
    },
    /// A wildcard step was applied to a value that is not a sequence.
    InvalidWildcardTarget {
        /// The 0-based path step holding the wildcard.
        depth: usize,
    },
}

impl std::fmt::Display for LensError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotTraversable { depth } => {
                write!(formatter, "value at path step {depth} is not a container")
            }
            Self::KeyMissing { key, depth } => {
                write!(formatter, "key `{key}` missing at path step {depth}")
            }
            Self::InvalidWildcardTarget { depth } => {
                write!(
                    formatter,
                    "wildcard at path step {depth} applied to a non-sequence"
                )
            }
        }
    }
}

impl std::error::Error for LensError {}

/// A malformed dot-delimited path string.
///
/// Produced by [`path`](fn@crate::optics::path) when a segment between dots
/// is empty (including the empty input string).
///
/// # Examples
///
/// ```rust
/// use treelens::optics::path;
///
/// let error = path("a..b").unwrap_err();
/// assert_eq!(error.position(), 2);
/// assert_eq!(error.to_string(), "empty segment at byte 2 in path `a..b`");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPathError {
    path: String,
    position: usize,
}

impl InvalidPathError {
    pub(crate) fn new(path: &str, position: usize) -> Self {
        Self {
            path: path.to_string(),
            position,
        }
    }

    /// The offending path string.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Byte offset of the empty segment inside the path string.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }
}

impl std::fmt::Display for InvalidPathError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "empty segment at byte {} in path `{}`",
            self.position, self.path
        )
    }
}

impl std::error::Error for InvalidPathError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lens_error_display() {
        assert_eq!(
            LensError::NotTraversable { depth: 2 }.to_string(),
            "value at path step 2 is not a container"
        );
        assert_eq!(
            LensError::KeyMissing {
                key: Key::from("port"),
                depth: 0
            }
            .to_string(),
            "key `port` missing at path step 0"
        );
        assert_eq!(
            LensError::KeyMissing {
                key: Key::from(3),
                depth: 1
            }
            .to_string(),
            "key `[3]` missing at path step 1"
        );
        assert_eq!(
            LensError::InvalidWildcardTarget { depth: 1 }.to_string(),
            "wildcard at path step 1 applied to a non-sequence"
        );
    }

    #[test]
    fn test_invalid_path_error_accessors() {
        let error = InvalidPathError::new("a..b", 2);
        assert_eq!(error.path(), "a..b");
        assert_eq!(error.position(), 2);
        assert_eq!(
            error.to_string(),
            "empty segment at byte 2 in path `a..b`"
        );
    }
}
