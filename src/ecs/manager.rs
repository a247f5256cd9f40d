//! The manager capability contract.
//!
//! A manager is an auxiliary lookup service registered once per concrete
//! type and notified on entity lifecycle events so it can keep whatever
//! index it maintains consistent. Managers never own entities; they only
//! observe them.

use std::any::Any;

use super::entity::Entity;

/// An entity-lifecycle listener providing a pluggable lookup capability.
/// Every registered manager is notified for every deleted entity, in
/// registration order, before the entity record returns to its pool.
pub trait Manager: Any {
    /// Notified after an entity was made visible to systems. Opt-in; the
    /// default does nothing.
    fn entity_added(&mut self, _: &Entity) {}

    /// Notified for every deleted entity. Implementations must purge any
    /// index entry they hold for it.
    fn entity_deleted(&mut self, e: &Entity);

    /// Called once during world teardown.
    fn dispose(&mut self) {}
}

/// Object-safe adapter over `Manager` implementations for type-keyed
/// lookup.
pub(crate) trait ManagerObject: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn entity_added(&mut self, e: &Entity);
    fn entity_deleted(&mut self, e: &Entity);
    fn dispose(&mut self);
}

impl<T: Manager> ManagerObject for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn entity_added(&mut self, e: &Entity) {
        Manager::entity_added(self, e);
    }

    fn entity_deleted(&mut self, e: &Entity) {
        Manager::entity_deleted(self, e);
    }

    fn dispose(&mut self) {
        Manager::dispose(self);
    }
}
