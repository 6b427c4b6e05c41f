//! Dynamically shaped tree values.
//!
//! This module provides [`Structure`], the host data type that lenses
//! operate on: a recursively nested value that is either a scalar, a
//! mapping from string keys to structures, or an ordered sequence of
//! structures. Shape is discovered during traversal; there is no schema.
//!
//! Container payloads live behind a reference-counted pointer, so cloning
//! a `Structure` is cheap and copy-updates can share every untouched
//! subtree with the original. Sharing is observable through
//! [`Structure::shares_container`], which is how the copy-update contract
//! is tested.
//!
//! # Example
//!
//! ```
//! use treelens::structure::{Key, Structure};
//!
//! let tree = Structure::mapping([
//!     ("name", Structure::from("ada")),
//!     ("scores", Structure::sequence([Structure::from(1), Structure::from(2)])),
//! ]);
//!
//! assert!(tree.is_container());
//! assert_eq!(tree.child(&Key::from("name")), Some(&Structure::from("ada")));
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod container;
#[cfg(feature = "serde")]
mod serde;
mod value;

pub use value::Key;
pub use value::Mapping;
pub use value::Sequence;
pub use value::Structure;
