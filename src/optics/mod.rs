//! Lenses over dynamically shaped tree structures.
//!
//! A [`Lens`] focuses a location inside a [`Structure`](crate::structure::Structure)
//! described by a path of [`PathKey`] steps: literal keys, dynamic keys
//! computed from the substructure reached so far, and wildcards fanning out
//! over every index of a sequence. Every lens exposes three operations:
//!
//! - [`Lens::get`]: read the focused value,
//! - [`Lens::set`]: mutate it in place,
//! - [`Lens::set_copy`]: build a new structure with the focused value
//!   replaced, sharing every untouched subtree with the original.
//!
//! Behavior at missing or mistyped steps is governed by a [`Policy`]:
//! `strict` turns failures into [`LensError`]s instead of silent absence,
//! and `create_missing` lets the write operations materialize empty
//! containers for missing intermediate steps.
//!
//! # Laws
//!
//! Whenever `lens.get(&source)` is present:
//!
//! 1. **Roundtrip**: `lens.get(&lens.set_copy(&source, value)) == value`
//! 2. **Sharing**: subtrees off the lens's path in
//!    `lens.set_copy(&source, value)` are pointer-identical to `source`
//! 3. **Equivalence**: in-place `set` on a deep clone observes the same
//!    focused value as `set_copy`
//!
//! Composition ([`Lens::and_then`], or the `>>` operator) is associative
//! and indistinguishable from a single lens over the concatenated path,
//! with the union of both sides' policy flags in force.
//!
//! # Example
//!
//! ```
//! use treelens::optics::{path, with_policy, Policy};
//! use treelens::structure;
//! use treelens::structure::Structure;
//!
//! let tree = structure!({ "a": { "b": 1 } });
//!
//! let b = path("a.b").unwrap();
//! assert_eq!(b.get(&tree).unwrap(), Some(Structure::from(1)));
//!
//! // Missing intermediates are created on demand when asked for.
//! let creating = with_policy(["x", "y"], Policy::new().with_create_missing(true));
//! let grown = creating.set_copy(&tree, Structure::from(2)).unwrap();
//! assert_eq!(creating.get(&grown).unwrap(), Some(Structure::from(2)));
//! ```

mod error;
mod factory;
mod lens;
mod path;
mod policy;
mod traverse;

pub use error::InvalidPathError;
pub use error::LensError;

pub use factory::array_wildcard;
pub use factory::key;
pub use factory::lens;
pub use factory::path;
pub use factory::with_policy;

pub use lens::Lens;

pub use path::KeyFunction;
pub use path::Path;
pub use path::PathKey;

pub use policy::Policy;
