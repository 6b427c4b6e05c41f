//! The tagged tree value type and its keys.
//!
//! [`Structure`] replaces the "everything is a table" model of dynamic
//! languages with an explicit tagged value: scalars, a string-keyed
//! mapping, and an ordered sequence. Mappings are addressed by
//! [`Key::Name`], sequences by [`Key::Index`] (0-based, contiguous).
//!
//! Container payloads are reference counted, so `Structure::clone` is a
//! shallow, O(1)-per-container operation and copy-updates can share
//! untouched subtrees with their source.

use std::collections::HashMap;
use std::fmt;

use super::ReferenceCounter;

/// The payload of a [`Structure::Mapping`] node.
pub type Mapping = HashMap<String, Structure>;

/// The payload of a [`Structure::Sequence`] node.
pub type Sequence = Vec<Structure>;

/// A single step's address inside a container.
///
/// Mappings are addressed by name, sequences by 0-based index. Indices are
/// contiguous: the first gap in a sequence is its end.
///
/// # Example
///
/// ```
/// use treelens::structure::Key;
///
/// assert_eq!(Key::from("port"), Key::Name("port".to_string()));
/// assert_eq!(Key::from(3), Key::Index(3));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A mapping key.
    Name(String),
    /// A sequence index (0-based).
    Index(usize),
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(formatter, "{name}"),
            Self::Index(index) => write!(formatter, "[{index}]"),
        }
    }
}

/// A recursively nested, dynamically shaped tree value.
///
/// A `Structure` is either a scalar (`Null`, `Bool`, `Integer`, `Float`,
/// `Text`), a [`Mapping`] from string keys to structures, or an ordered
/// [`Sequence`] of structures. There is no fixed schema; lenses discover
/// the shape while traversing.
///
/// Cloning is shallow: container variants bump a reference count instead
/// of copying their payload. Two clones of a container therefore share
/// storage until one of them is mutated in place, at which point the
/// mutated side is detached first (copy-on-write).
///
/// # Example
///
/// ```
/// use treelens::structure::Structure;
///
/// let tree = Structure::mapping([
///     ("enabled", Structure::from(true)),
///     ("limits", Structure::sequence([Structure::from(10), Structure::from(20)])),
/// ]);
///
/// let shallow = tree.clone();
/// assert!(tree.shares_container(&shallow));
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Structure {
    /// The absent/empty scalar. Also used as the placeholder for a failed
    /// wildcard branch in non-strict reads.
    #[default]
    Null,
    /// A boolean scalar.
    Bool(bool),
    /// A signed integer scalar.
    Integer(i64),
    /// A floating point scalar.
    Float(f64),
    /// A text scalar.
    Text(String),
    /// A mapping from string keys to child structures.
    Mapping(ReferenceCounter<Mapping>),
    /// An ordered sequence of child structures.
    Sequence(ReferenceCounter<Sequence>),
}

impl Structure {
    /// Builds a mapping from an iterator of `(key, value)` pairs.
    ///
    /// # Example
    ///
    /// ```
    /// use treelens::structure::Structure;
    ///
    /// let tree = Structure::mapping([("a", Structure::from(1))]);
    /// assert!(tree.as_mapping().is_some());
    /// ```
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Self)>,
    {
        Self::Mapping(ReferenceCounter::new(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        ))
    }

    /// Builds a sequence from an iterator of values.
    pub fn sequence<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::Sequence(ReferenceCounter::new(items.into_iter().collect()))
    }

    /// Returns `true` for the `Null` scalar.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean payload, if this is a `Bool`.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is an `Integer`.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the float payload, if this is a `Float`.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the text payload, if this is a `Text`.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Returns a reference to the mapping payload, if this is a `Mapping`.
    #[must_use]
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns a reference to the sequence payload, if this is a `Sequence`.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }
}

impl From<bool> for Structure {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Structure {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Structure {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for Structure {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Structure {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for Structure {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<&str> for Structure {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Structure {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<Structure>> for Structure {
    fn from(items: Vec<Structure>) -> Self {
        Self::Sequence(ReferenceCounter::new(items))
    }
}

impl From<Mapping> for Structure {
    fn from(entries: Mapping) -> Self {
        Self::Mapping(ReferenceCounter::new(entries))
    }
}

/// Builds a [`Structure`] from a JSON-like literal.
///
/// Mappings use `{ "key": value }` syntax, sequences use `[value, ...]`,
/// `null` becomes [`Structure::Null`], and any other expression goes
/// through [`Structure::from`].
///
/// # Example
///
/// ```
/// use treelens::structure;
/// use treelens::structure::Structure;
///
/// let tree = structure!({
///     "name": "ada",
///     "tags": ["math", "engines"],
///     "rank": 1,
///     "retired": null,
/// });
///
/// assert!(tree.as_mapping().is_some());
/// assert_eq!(tree, structure!({
///     "name": "ada",
///     "tags": ["math", "engines"],
///     "rank": 1,
///     "retired": null,
/// }));
/// ```
#[macro_export]
macro_rules! structure {
    ($($tree:tt)+) => {
        $crate::structure_internal!($($tree)+)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! structure_internal {
    //////////////////////////////////////////////////////////////////////////
    // TT muncher for arrays: @array [built elements] remaining tts
    //////////////////////////////////////////////////////////////////////////

    // Done with trailing comma.
    (@array [$($elems:expr,)*]) => {
        ::std::vec![$($elems,)*]
    };

    // Done without trailing comma.
    (@array [$($elems:expr),*]) => {
        ::std::vec![$($elems),*]
    };

    // Next element is `null`.
    (@array [$($elems:expr,)*] null $($rest:tt)*) => {
        $crate::structure_internal!(@array [$($elems,)* $crate::structure_internal!(null)] $($rest)*)
    };

    // Next element is an array.
    (@array [$($elems:expr,)*] [$($array:tt)*] $($rest:tt)*) => {
        $crate::structure_internal!(@array [$($elems,)* $crate::structure_internal!([$($array)*])] $($rest)*)
    };

    // Next element is a mapping.
    (@array [$($elems:expr,)*] {$($mapping:tt)*} $($rest:tt)*) => {
        $crate::structure_internal!(@array [$($elems,)* $crate::structure_internal!({$($mapping)*})] $($rest)*)
    };

    // Next element is an expression followed by a comma.
    (@array [$($elems:expr,)*] $next:expr, $($rest:tt)*) => {
        $crate::structure_internal!(@array [$($elems,)* $crate::structure_internal!($next),] $($rest)*)
    };

    // Last element is an expression with no trailing comma.
    (@array [$($elems:expr,)*] $last:expr) => {
        $crate::structure_internal!(@array [$($elems,)* $crate::structure_internal!($last)])
    };

    // Comma after the most recent element.
    (@array [$($elems:expr),*] , $($rest:tt)*) => {
        $crate::structure_internal!(@array [$($elems,)*] $($rest)*)
    };

    //////////////////////////////////////////////////////////////////////////
    // TT muncher for mappings: @mapping binding [current key] (value) rest
    //////////////////////////////////////////////////////////////////////////

    // Done.
    (@mapping $mapping:ident () () ()) => {};

    // Insert the current entry followed by a comma.
    (@mapping $mapping:ident [$($key:tt)+] ($value:expr) , $($rest:tt)*) => {
        let _ = $mapping.insert(::std::string::String::from($($key)+), $value);
        $crate::structure_internal!(@mapping $mapping () ($($rest)*) ($($rest)*));
    };

    // Insert the last entry without a trailing comma.
    (@mapping $mapping:ident [$($key:tt)+] ($value:expr)) => {
        let _ = $mapping.insert(::std::string::String::from($($key)+), $value);
    };

    // Current value is `null`.
    (@mapping $mapping:ident ($($key:tt)+) (: null $($rest:tt)*) $copy:tt) => {
        $crate::structure_internal!(@mapping $mapping [$($key)+] ($crate::structure_internal!(null)) $($rest)*);
    };

    // Current value is an array.
    (@mapping $mapping:ident ($($key:tt)+) (: [$($array:tt)*] $($rest:tt)*) $copy:tt) => {
        $crate::structure_internal!(@mapping $mapping [$($key)+] ($crate::structure_internal!([$($array)*])) $($rest)*);
    };

    // Current value is a mapping.
    (@mapping $mapping:ident ($($key:tt)+) (: {$($inner:tt)*} $($rest:tt)*) $copy:tt) => {
        $crate::structure_internal!(@mapping $mapping [$($key)+] ($crate::structure_internal!({$($inner)*})) $($rest)*);
    };

    // Current value is an expression followed by a comma.
    (@mapping $mapping:ident ($($key:tt)+) (: $value:expr , $($rest:tt)*) $copy:tt) => {
        $crate::structure_internal!(@mapping $mapping [$($key)+] ($crate::structure_internal!($value)) , $($rest)*);
    };

    // Current value is the last expression, no trailing comma.
    (@mapping $mapping:ident ($($key:tt)+) (: $value:expr) $copy:tt) => {
        $crate::structure_internal!(@mapping $mapping [$($key)+] ($crate::structure_internal!($value)));
    };

    // Munch a token into the current key.
    (@mapping $mapping:ident ($($key:tt)*) ($tt:tt $($rest:tt)*) $copy:tt) => {
        $crate::structure_internal!(@mapping $mapping ($($key)* $tt) ($($rest)*) ($($rest)*));
    };

    //////////////////////////////////////////////////////////////////////////
    // Primary entry points
    //////////////////////////////////////////////////////////////////////////

    (null) => {
        $crate::structure::Structure::Null
    };

    ([]) => {
        $crate::structure::Structure::sequence(::std::vec::Vec::new())
    };

    ([ $($tree:tt)+ ]) => {
        $crate::structure::Structure::sequence($crate::structure_internal!(@array [] $($tree)+))
    };

    ({}) => {
        $crate::structure::Structure::mapping(::std::collections::HashMap::<::std::string::String, $crate::structure::Structure>::new())
    };

    ({ $($tree:tt)+ }) => {
        $crate::structure::Structure::from({
            let mut mapping = ::std::collections::HashMap::new();
            $crate::structure_internal!(@mapping mapping () ($($tree)+) ($($tree)+));
            mapping
        })
    };

    ($other:expr) => {
        $crate::structure::Structure::from($other)
    };
}
