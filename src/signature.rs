//! Fixed-width component signatures.
//!
//! A [`Signature`] records which component types are present on an entity, or
//! which component types a system requires. Matching is a superset test, never
//! equality: a system requiring `{Position}` matches an entity carrying
//! `{Position, Velocity}`.

use crate::component::ComponentId;

/// Maximum number of distinct component types supported process-wide.
///
/// Defines the bit width of [`Signature`]. Registering more component types
/// than this is a fatal configuration error.
pub const MAX_COMPONENT_TYPES: usize = 64;

/// Fixed-capacity bit-set, one bit per [`ComponentId`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Signature {
    bits: u64,
}

impl Signature {
    /// Create an empty signature.
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Set the bit for `id`.
    pub fn set(&mut self, id: ComponentId) {
        debug_assert!(id.index() < MAX_COMPONENT_TYPES);
        self.bits |= 1 << id.index();
    }

    /// Clear the bit for `id`.
    pub fn clear(&mut self, id: ComponentId) {
        debug_assert!(id.index() < MAX_COMPONENT_TYPES);
        self.bits &= !(1 << id.index());
    }

    /// Check whether the bit for `id` is set.
    pub fn test(&self, id: ComponentId) -> bool {
        debug_assert!(id.index() < MAX_COMPONENT_TYPES);
        (self.bits & (1 << id.index())) != 0
    }

    /// Superset test: true if every bit set in `required` is also set in `self`.
    ///
    /// An empty `required` signature matches everything.
    pub fn contains_all(&self, required: &Signature) -> bool {
        (self.bits & required.bits) == required.bits
    }

    /// True if no bits are set.
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Clear all bits.
    pub fn reset(&mut self) {
        self.bits = 0;
    }

    /// Iterator over the indices of set bits, ascending.
    pub fn ones(&self) -> Ones {
        Ones { bits: self.bits }
    }
}

/// Iterator over set bit indices of a [`Signature`].
pub struct Ones {
    bits: u64,
}

impl Iterator for Ones {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let trailing = self.bits.trailing_zeros();
        self.bits &= !(1 << trailing); // Clear the bit we just found
        Some(trailing as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(index: usize) -> ComponentId {
        ComponentId::new(index)
    }

    #[test]
    fn test_set_test_clear() {
        let mut sig = Signature::new();
        assert!(sig.is_empty());

        sig.set(id(0));
        sig.set(id(5));
        assert!(sig.test(id(0)));
        assert!(sig.test(id(5)));
        assert!(!sig.test(id(1)));

        sig.clear(id(0));
        assert!(!sig.test(id(0)));
        assert!(sig.test(id(5)));
    }

    #[test]
    fn test_superset_matching_not_equality() {
        let mut required = Signature::new();
        required.set(id(0));

        let mut entity_sig = Signature::new();
        entity_sig.set(id(0));
        entity_sig.set(id(1));

        // {0, 1} is a superset of {0}
        assert!(entity_sig.contains_all(&required));
        // {0} is not a superset of {0, 1}
        assert!(!required.contains_all(&entity_sig));

        let mut other = Signature::new();
        other.set(id(1));
        assert!(!other.contains_all(&required));
    }

    #[test]
    fn test_empty_requirement_matches_everything() {
        let required = Signature::new();
        let mut entity_sig = Signature::new();
        assert!(entity_sig.contains_all(&required));
        entity_sig.set(id(3));
        assert!(entity_sig.contains_all(&required));
    }

    #[test]
    fn test_ones_iterator() {
        let mut sig = Signature::new();
        sig.set(id(1));
        sig.set(id(7));
        sig.set(id(63));
        let indices: Vec<usize> = sig.ones().collect();
        assert_eq!(indices, vec![1, 7, 63]);

        assert_eq!(Signature::new().ones().count(), 0);
    }

    #[test]
    fn test_reset() {
        let mut sig = Signature::new();
        sig.set(id(2));
        sig.set(id(40));
        sig.reset();
        assert!(sig.is_empty());
        assert_eq!(sig.ones().count(), 0);
    }
}
