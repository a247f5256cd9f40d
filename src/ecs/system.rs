//! The system base contract: aspect filtering, lifecycle hooks, and ordered
//! per-tick execution.
//!
//! A system declares the component signature it is interested in through an
//! `Aspect` fixed at construction. The `World` keeps a working set per
//! system, maintained incrementally by add/delete notifications, and drives
//! the `begin`/`process`/`end` hooks once per tick in stable priority order.

use std::any::Any;

use super::aspect::Aspect;
use super::entity::EntityId;
use super::world::Entities;

/// A priority-ordered processing unit iterating the entities that satisfy
/// its aspect. Only `aspect` and `process` are required; the remaining
/// hooks default to no-ops.
pub trait System: Any {
    /// The fixed component signature this system is interested in. Queried
    /// once, at registration.
    fn aspect(&self) -> Aspect;

    /// Execution priority. Lower runs first; systems with equal priority
    /// run in the order they were added.
    fn priority(&self) -> i32 {
        0
    }

    /// Override point for conditional systems, evaluated once per tick.
    fn check_processing(&self) -> bool {
        true
    }

    /// Called at the start of every processed tick.
    fn begin(&mut self, _: &mut Entities) {}

    /// Called once per entity in the working set, in insertion order.
    fn process(&mut self, entities: &mut Entities, e: EntityId);

    /// Called at the end of every processed tick.
    fn end(&mut self, _: &mut Entities) {}

    /// Called once during world teardown.
    fn dispose(&mut self, _: &mut Entities) {}
}

/// Object-safe adapter over `System` implementations, so the world can box
/// heterogeneous systems and still look them up by concrete type.
pub(crate) trait SystemObject: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn check_processing(&self) -> bool;
    fn begin(&mut self, entities: &mut Entities);
    fn process(&mut self, entities: &mut Entities, e: EntityId);
    fn end(&mut self, entities: &mut Entities);
    fn dispose(&mut self, entities: &mut Entities);
}

impl<T: System> SystemObject for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn check_processing(&self) -> bool {
        System::check_processing(self)
    }

    fn begin(&mut self, entities: &mut Entities) {
        System::begin(self, entities);
    }

    fn process(&mut self, entities: &mut Entities, e: EntityId) {
        System::process(self, entities, e);
    }

    fn end(&mut self, entities: &mut Entities) {
        System::end(self, entities);
    }

    fn dispose(&mut self, entities: &mut Entities) {
        System::dispose(self, entities);
    }
}
