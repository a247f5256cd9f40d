//! Aspects describe the component signature a system is interested in.

use super::bitset::BitSet;
use super::component::ComponentType;
use super::entity::Entity;

/// An immutable set of component types a system requires present on an
/// entity. This is a required-AND filter only: no exclusion or any-of
/// semantics. The set is fixed for the lifetime of the owning system.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Aspect {
    required: BitSet,
}

impl Aspect {
    /// Constructs an empty `Aspect`, which matches every entity.
    pub fn new() -> Self {
        Aspect {
            required: BitSet::new(),
        }
    }

    /// Constructs an `Aspect` requiring all of the given component types.
    pub fn all(types: &[ComponentType]) -> Self {
        let mut aspect = Self::new();
        for &ty in types {
            aspect.required.insert(ty.index());
        }
        aspect
    }

    /// Adds a required component type. Builder-style, consumed at system
    /// construction.
    pub fn require(mut self, ty: ComponentType) -> Self {
        self.required.insert(ty.index());
        self
    }

    /// Returns true iff every required component type is present in the
    /// entity's live signature.
    #[inline]
    pub fn check(&self, e: &Entity) -> bool {
        self.check_mask(e.mask())
    }

    /// Subset test against a raw signature.
    #[inline]
    pub fn check_mask(&self, mask: &BitSet) -> bool {
        self.required.intersect_with(mask) == self.required
    }

    /// Returns whether this aspect has no requirements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
    }
}
