//! # treelens
//!
//! Composable lenses for dynamically shaped tree structures.
//!
//! ## Overview
//!
//! A [`Lens`](optics::Lens) is a reusable accessor/mutator for a location
//! inside a nested, dynamically shaped [`Structure`](structure::Structure) -
//! a tree of mappings and ordered sequences discovered at traversal time
//! rather than described by a schema. Every lens exposes three operations:
//!
//! - **get**: read the focused value without touching the input,
//! - **set**: mutate the focused value in place,
//! - **`set_copy`**: produce a new structure with the focused value replaced,
//!   sharing every untouched subtree with the original.
//!
//! Lenses compose with [`and_then`](optics::Lens::and_then) (or the `>>`
//! operator), and a composed lens behaves exactly like a single lens over
//! the concatenated path.
//!
//! ## Feature Flags
//!
//! - `arc`: use `Arc` instead of `Rc` for shared container payloads and
//!   dynamic key functions, making `Structure` and `Lens` thread-safe
//! - `serde`: `Serialize`/`Deserialize` implementations for `Structure`
//!
//! ## Example
//!
//! ```rust
//! use treelens::prelude::*;
//! use treelens::structure;
//!
//! let config = structure!({
//!     "server": { "host": "localhost", "port": 8080 },
//!     "retries": [1, 2, 4],
//! });
//!
//! let port = path("server.port").unwrap();
//! assert_eq!(port.get(&config).unwrap(), Some(Structure::from(8080)));
//!
//! // Copy-update: `config` is untouched, unrelated subtrees are shared.
//! let updated = port.set_copy(&config, Structure::from(9090)).unwrap();
//! assert_eq!(port.get(&updated).unwrap(), Some(Structure::from(9090)));
//! assert_eq!(port.get(&config).unwrap(), Some(Structure::from(8080)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and constructors.
///
/// # Usage
///
/// ```rust
/// use treelens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::optics::*;
    pub use crate::structure::*;
}

pub mod optics;
pub mod structure;

pub use optics::{array_wildcard, key, lens, path, with_policy};
pub use optics::{InvalidPathError, Lens, LensError, PathKey, Policy};
pub use structure::{Key, Structure};
