//! Entity records and the pool that recycles them.
//!
//! An entity is a lightweight identity plus a signature of attached
//! components; it has no behavior of its own. Records are recycled through
//! `EntityPool`, but identities are not: a recycled record is resurrected
//! with a fresh id from a monotonically increasing counter.

use std::fmt;

use crate::utils::ObjectPool;

use super::bitset::BitSet;
use super::component::{ComponentObject, ComponentType};

/// Identity of an entity. Small positive integer, unique among currently
/// live entities, assigned in strictly increasing order and never reused.
pub type EntityId = u32;

/// An entity record: identity, component signature, and the slot array
/// holding the attached component instances, indexed by `ComponentType`.
pub struct Entity {
    id: EntityId,
    mask: BitSet,
    slots: Vec<Option<Box<dyn ComponentObject>>>,
}

impl Entity {
    pub(crate) fn new() -> Self {
        Entity {
            id: 0,
            mask: BitSet::new(),
            slots: Vec::new(),
        }
    }

    /// Returns the identity of this entity.
    #[inline]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Returns the live component signature.
    #[inline]
    pub fn mask(&self) -> &BitSet {
        &self.mask
    }

    /// Returns true if a component of the given type is attached.
    #[inline]
    pub fn has(&self, ty: ComponentType) -> bool {
        self.mask.contains(ty.index())
    }

    /// Moves a component instance into the slot for `ty`, returning the
    /// displaced instance if the slot was occupied.
    pub fn attach_raw(
        &mut self,
        ty: ComponentType,
        v: Box<dyn ComponentObject>,
    ) -> Option<Box<dyn ComponentObject>> {
        if self.slots.len() <= ty.index() {
            self.slots.resize_with(ty.index() + 1, || None);
        }

        let old = self.slots[ty.index()].replace(v);
        self.mask.insert(ty.index());
        old
    }

    /// Moves the component instance for `ty` out of this entity, clearing
    /// the signature bit.
    pub fn detach_raw(&mut self, ty: ComponentType) -> Option<Box<dyn ComponentObject>> {
        self.mask.remove(ty.index());
        self.slots.get_mut(ty.index()).and_then(Option::take)
    }

    /// Returns a reference to the attached component of type `ty`.
    #[inline]
    pub fn get_raw(&self, ty: ComponentType) -> Option<&dyn ComponentObject> {
        self.slots.get(ty.index()).and_then(|s| s.as_deref())
    }

    /// Returns a mutable reference to the attached component of type `ty`.
    #[inline]
    pub fn get_raw_mut(&mut self, ty: ComponentType) -> Option<&mut dyn ComponentObject> {
        self.slots.get_mut(ty.index()).and_then(|s| s.as_deref_mut())
    }

    // Reset hook for the pool. Components still attached at this point are
    // dropped, not returned to their pools; releasing them first is the
    // caller's responsibility.
    fn reset(&mut self) {
        self.mask.clear();
        for slot in &mut self.slots {
            *slot = None;
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Entity({})", self.id)
    }
}

/// Specialization of `ObjectPool` for entity records. Records are reused,
/// ids are not: every `obtain` assigns the next value of a counter seeded
/// at 1, even when the underlying record is recycled.
pub(crate) struct EntityPool {
    pool: ObjectPool<Entity>,
    next: EntityId,
}

impl EntityPool {
    pub fn new(capacity: usize, warm_up: bool) -> Self {
        let pool = if warm_up {
            ObjectPool::with_capacity(Entity::new, Entity::reset, capacity)
        } else {
            ObjectPool::with_reset(Entity::new, Entity::reset)
        };

        EntityPool { pool, next: 1 }
    }

    pub fn obtain(&mut self) -> Entity {
        let mut e = self.pool.obtain();
        e.id = self.next;
        self.next += 1;
        e
    }

    pub fn free(&mut self, e: Entity) {
        self.pool.free(e);
    }

    pub fn available(&self) -> usize {
        self.pool.available()
    }
}
