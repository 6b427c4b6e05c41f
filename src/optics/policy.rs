//! Traversal policy flags.

/// Controls how a lens reacts to missing or mistyped steps.
///
/// The default policy is forgiving: reads degrade to absence and writes
/// become no-ops. `strict` upgrades every such failure into a
/// [`LensError`](crate::optics::LensError); `create_missing` lets the
/// write operations materialize empty containers for missing intermediate
/// steps instead of aborting.
///
/// When two lenses are composed, the composed lens runs under the union
/// of both policies: either side setting a flag activates it for the
/// whole composed operation.
///
/// # Example
///
/// ```
/// use treelens::optics::Policy;
///
/// let policy = Policy::new().with_strict(true);
/// assert!(policy.strict());
/// assert!(!policy.create_missing());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Policy {
    strict: bool,
    create_missing: bool,
}

impl Policy {
    /// Creates the default policy: non-strict, no container creation.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            strict: false,
            create_missing: false,
        }
    }

    /// Returns a copy of this policy with `strict` replaced.
    #[must_use]
    pub const fn with_strict(self, strict: bool) -> Self {
        Self { strict, ..self }
    }

    /// Returns a copy of this policy with `create_missing` replaced.
    #[must_use]
    pub const fn with_create_missing(self, create_missing: bool) -> Self {
        Self {
            create_missing,
            ..self
        }
    }

    /// Whether traversal failures are reported as errors.
    #[must_use]
    pub const fn strict(self) -> bool {
        self.strict
    }

    /// Whether writes materialize missing intermediate containers.
    #[must_use]
    pub const fn create_missing(self) -> bool {
        self.create_missing
    }

    /// Field-wise OR of two policies, used at composition seams.
    #[must_use]
    pub(crate) const fn union(self, other: Self) -> Self {
        Self {
            strict: self.strict || other.strict,
            create_missing: self.create_missing || other.create_missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_forgiving() {
        let policy = Policy::default();
        assert!(!policy.strict());
        assert!(!policy.create_missing());
        assert_eq!(policy, Policy::new());
    }

    #[test]
    fn test_builders_replace_single_flags() {
        let policy = Policy::new().with_strict(true).with_create_missing(true);
        assert!(policy.strict());
        assert!(policy.create_missing());
        assert!(!policy.with_strict(false).strict());
    }

    #[test]
    fn test_union_is_field_wise_or() {
        let strict = Policy::new().with_strict(true);
        let creating = Policy::new().with_create_missing(true);
        let seam = strict.union(creating);
        assert!(seam.strict());
        assert!(seam.create_missing());
        assert_eq!(strict.union(Policy::new()), strict);
    }
}
