//! The world registry: entity lifecycle, component pools, manager and
//! system registration, and the per-tick update loop.
//!
//! The `World` is the sole owner of the entity pool, the component-pool
//! registry, the ordered system list with its per-system working sets, and
//! the manager list. Everything else reaches those only through the world.
//!
//! Execution is single-threaded and cooperative: one tick is one
//! synchronous call to `update`, and no entity or component mutation can
//! race another within a tick. Systems receive the `Entities` store in
//! their hooks; structural membership changes (`add_entity`,
//! `delete_entity`) require the whole `World` and therefore can not happen
//! while a system is iterating.

use std::collections::HashMap;

use crate::errors::Result;

use super::aspect::Aspect;
use super::component::{Component, ComponentObject, ComponentPool, ComponentRegistry, ComponentType};
use super::entity::{Entity, EntityId, EntityPool};
use super::manager::{Manager, ManagerObject};
use super::managers::{GroupManager, TagManager};
use super::system::{System, SystemObject};

/// Construction parameters for a `World`.
///
/// `max_entities` bounds the valid id range of `get`-style lookups, so it
/// should be sized to the lifetime entity budget rather than the peak
/// concurrent count: ids keep increasing across recycling and are never
/// handed out twice.
#[derive(Debug, Clone, Copy)]
pub struct WorldSetup {
    pub max_entities: usize,
    /// Pre-populates the entity pool with `max_entities` records up front,
    /// trading startup cost for allocation-free steady state.
    pub warm_up: bool,
}

impl Default for WorldSetup {
    fn default() -> Self {
        WorldSetup {
            max_entities: 4096,
            warm_up: false,
        }
    }
}

/// The entity and component store systems operate on during their hooks.
pub struct Entities {
    map: HashMap<EntityId, Entity>,
    pool: EntityPool,
    components: ComponentRegistry,
    max_entities: usize,
}

impl Entities {
    fn new(setup: WorldSetup) -> Self {
        Entities {
            map: HashMap::with_capacity(setup.max_entities),
            pool: EntityPool::new(setup.max_entities, setup.warm_up),
            components: ComponentRegistry::new(),
            max_entities: setup.max_entities,
        }
    }

    /// Returns the entity with the given id. Ids outside
    /// `[0, max_entities)` are logged as errors and yield `None`; ids in
    /// range but not live yield `None` silently.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        if id as usize >= self.max_entities {
            error!("[World] trying to retrieve entity with invalid id {}.", id);
            return None;
        }

        self.map.get(&id)
    }

    /// Mutable variant of `get`, with the same bounds check.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        if id as usize >= self.max_entities {
            error!("[World] trying to retrieve entity with invalid id {}.", id);
            return None;
        }

        self.map.get_mut(&id)
    }

    /// Returns true if the id refers to a live entity.
    #[inline]
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.map.contains_key(&id)
    }

    /// The number of currently live entities.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The configured id bound.
    #[inline]
    pub fn max_entities(&self) -> usize {
        self.max_entities
    }

    /// Registers the pool for component type `T`, set once before use.
    pub fn set_component_pool<T: Component>(&mut self, pool: ComponentPool<T>) -> Result<ComponentType> {
        self.components.register(pool)
    }

    /// Returns the id assigned to component type `T`, if registered.
    #[inline]
    pub fn component_type<T: Component>(&self) -> Option<ComponentType> {
        self.components.type_of::<T>()
    }

    /// Obtains a component instance from the pool of `T`. Missing pools are
    /// logged and yield `None`; this is non-fatal.
    pub fn create_component<T: Component>(&mut self) -> Option<Box<T>> {
        self.components.create::<T>()
    }

    /// Returns a component instance to the pool matching its runtime type.
    /// A no-op when no pool is registered for that type.
    pub fn free_component(&mut self, v: Box<dyn ComponentObject>) {
        self.components.free(v);
    }

    /// Attaches a component to an entity's signature, returning the
    /// displaced instance if the slot was occupied — or the rejected input
    /// when the type has no registered pool or the entity is not live.
    pub fn attach<T: Component>(&mut self, id: EntityId, v: Box<T>) -> Option<Box<T>> {
        let ty = match self.components.type_of::<T>() {
            Some(ty) => ty,
            None => {
                error!(
                    "[World] there is no pool for component type {}.",
                    ::std::any::type_name::<T>()
                );
                return Some(v);
            }
        };

        match self.get_mut(id) {
            Some(e) => e
                .attach_raw(ty, v)
                .and_then(|old| old.into_any().downcast::<T>().ok()),
            None => {
                error!("[World] trying to attach component to dead entity {}.", id);
                Some(v)
            }
        }
    }

    /// Detaches the component of type `T` from an entity, handing ownership
    /// back to the caller.
    pub fn detach<T: Component>(&mut self, id: EntityId) -> Option<Box<T>> {
        let ty = self.components.type_of::<T>()?;
        self.get_mut(id)?
            .detach_raw(ty)
            .and_then(|v| v.into_any().downcast::<T>().ok())
    }

    /// Returns a reference to the component of type `T` attached to `id`.
    pub fn component<T: Component>(&self, id: EntityId) -> Option<&T> {
        let ty = self.components.type_of::<T>()?;
        self.map.get(&id)?.get_raw(ty)?.as_any().downcast_ref()
    }

    /// Returns a mutable reference to the component of type `T` attached
    /// to `id`.
    pub fn component_mut<T: Component>(&mut self, id: EntityId) -> Option<&mut T> {
        let ty = self.components.type_of::<T>()?;
        self.map.get_mut(&id)?.get_raw_mut(ty)?.as_any_mut().downcast_mut()
    }
}

struct SystemSlot {
    system: Box<dyn SystemObject>,
    aspect: Aspect,
    priority: i32,
    members: Vec<EntityId>,
}

/// The top-level registry and scheduler.
pub struct World {
    entities: Entities,
    systems: Vec<SystemSlot>,
    managers: Vec<Box<dyn ManagerObject>>,
}

impl World {
    /// Constructs a new `World` and registers the default `TagManager` and
    /// `GroupManager` capabilities.
    pub fn new(setup: WorldSetup) -> Self {
        info!("[World] initializing with {:?}.", setup);

        let mut world = World {
            entities: Entities::new(setup),
            systems: Vec::new(),
            managers: Vec::new(),
        };

        // Default lookup capabilities; registration can not fail on an
        // empty manager list.
        let _ = world.add_manager(TagManager::new());
        let _ = world.add_manager(GroupManager::new());

        world
    }

    /// Returns the entity/component store.
    #[inline]
    pub fn entities(&self) -> &Entities {
        &self.entities
    }

    /// Mutable variant of `entities`.
    #[inline]
    pub fn entities_mut(&mut self) -> &mut Entities {
        &mut self.entities
    }

    // ENTITY METHODS

    /// Obtains a pooled entity record with a fresh id and makes it
    /// addressable by id. The entity carries no components yet and stays
    /// invisible to systems until `add_entity`.
    pub fn create_entity(&mut self) -> EntityId {
        let e = self.entities.pool.obtain();
        let id = e.id();

        info!("[World] creates {}.", e);
        self.entities.map.insert(id, e);
        id
    }

    /// Broadcasts an entity to systems and managers. Every system whose
    /// aspect is satisfied by the entity's current signature inserts it
    /// into its working set; systems that already hold it keep a single
    /// entry, so calling this again after attaching further components is
    /// safe.
    pub fn add_entity(&mut self, id: EntityId) {
        let mask = match self.entities.map.get(&id) {
            Some(e) => *e.mask(),
            None => {
                error!("[World] trying to add dead entity {}.", id);
                return;
            }
        };

        info!("[World] adds Entity({}).", id);

        for slot in &mut self.systems {
            if slot.aspect.check_mask(&mask) && !slot.members.contains(&id) {
                slot.members.push(id);
            }
        }

        if let Some(e) = self.entities.map.get(&id) {
            for m in &mut self.managers {
                m.entity_added(e);
            }
        }
    }

    /// Removes an entity from every system working set and manager index,
    /// then returns its record to the entity pool.
    ///
    /// Components still attached are dropped with the record's reset, not
    /// returned to their pools; detach and `free_component` them first if
    /// they should be recycled.
    pub fn delete_entity(&mut self, id: EntityId) {
        if !self.entities.map.contains_key(&id) {
            error!("[World] trying to delete dead entity {}.", id);
            return;
        }

        info!("[World] deletes Entity({}).", id);

        for slot in &mut self.systems {
            if let Some(pos) = slot.members.iter().position(|&m| m == id) {
                slot.members.remove(pos);
            }
        }

        if let Some(e) = self.entities.map.get(&id) {
            for m in &mut self.managers {
                m.entity_deleted(e);
            }
        }

        if let Some(e) = self.entities.map.remove(&id) {
            self.entities.pool.free(e);
        }
    }

    /// Returns the entity with the given id; see `Entities::get` for the
    /// bounds behavior.
    #[inline]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Looks an entity up through the default `TagManager`.
    pub fn entity_by_tag(&self, tag: &str) -> Option<EntityId> {
        self.manager::<TagManager>().and_then(|m| m.entity(tag))
    }

    // COMPONENT METHODS

    /// Registers the pool for component type `T`; one pool per type, set
    /// once before use.
    pub fn set_component_pool<T: Component>(&mut self, pool: ComponentPool<T>) -> Result<ComponentType> {
        self.entities.set_component_pool(pool)
    }

    /// See `Entities::create_component`.
    pub fn create_component<T: Component>(&mut self) -> Option<Box<T>> {
        self.entities.create_component::<T>()
    }

    /// See `Entities::free_component`.
    pub fn free_component(&mut self, v: Box<dyn ComponentObject>) {
        self.entities.free_component(v);
    }

    /// See `Entities::attach`.
    pub fn attach<T: Component>(&mut self, id: EntityId, v: Box<T>) -> Option<Box<T>> {
        self.entities.attach(id, v)
    }

    /// See `Entities::detach`.
    pub fn detach<T: Component>(&mut self, id: EntityId) -> Option<Box<T>> {
        self.entities.detach(id)
    }

    /// See `Entities::component`.
    #[inline]
    pub fn component<T: Component>(&self, id: EntityId) -> Option<&T> {
        self.entities.component(id)
    }

    /// See `Entities::component_mut`.
    #[inline]
    pub fn component_mut<T: Component>(&mut self, id: EntityId) -> Option<&mut T> {
        self.entities.component_mut(id)
    }

    // SYSTEM METHODS

    /// Registers a system, one instance per concrete type. Systems are
    /// appended in insertion order; call `prepare` once after the last
    /// registration to establish priority order.
    pub fn add_system<S: System>(&mut self, system: S) -> Result<()> {
        if self.systems.iter().any(|s| s.system.as_any().is::<S>()) {
            return Err(format_err!(
                "System {} is already registered.",
                ::std::any::type_name::<S>()
            ));
        }

        let aspect = System::aspect(&system);
        let priority = System::priority(&system);

        info!(
            "[World] adds system {} with priority {}.",
            ::std::any::type_name::<S>(),
            priority
        );

        self.systems.push(SystemSlot {
            system: Box::new(system),
            aspect,
            priority,
            members: Vec::new(),
        });

        Ok(())
    }

    /// Returns the registered system of concrete type `S`.
    pub fn system<S: System>(&self) -> Option<&S> {
        self.systems
            .iter()
            .find_map(|s| s.system.as_any().downcast_ref::<S>())
    }

    /// Mutable variant of `system`.
    pub fn system_mut<S: System>(&mut self) -> Option<&mut S> {
        self.systems
            .iter_mut()
            .find_map(|s| s.system.as_any_mut().downcast_mut::<S>())
    }

    /// Returns the working set of the system of type `S`, in insertion
    /// order. Read-only view for hosts and tests.
    pub fn working_set<S: System>(&self) -> Option<&[EntityId]> {
        self.systems
            .iter()
            .find(|s| s.system.as_any().is::<S>())
            .map(|s| s.members.as_slice())
    }

    // MANAGER METHODS

    /// Registers a manager capability, one instance per concrete type.
    /// Managers are notified in registration order.
    pub fn add_manager<M: Manager>(&mut self, manager: M) -> Result<()> {
        if self.managers.iter().any(|m| m.as_any().is::<M>()) {
            return Err(format_err!(
                "Manager {} is already registered.",
                ::std::any::type_name::<M>()
            ));
        }

        info!("[World] adds manager {}.", ::std::any::type_name::<M>());
        self.managers.push(Box::new(manager));
        Ok(())
    }

    /// Returns the registered manager of concrete type `M`.
    pub fn manager<M: Manager>(&self) -> Option<&M> {
        self.managers
            .iter()
            .find_map(|m| m.as_any().downcast_ref::<M>())
    }

    /// Mutable variant of `manager`.
    pub fn manager_mut<M: Manager>(&mut self) -> Option<&mut M> {
        self.managers
            .iter_mut()
            .find_map(|m| m.as_any_mut().downcast_mut::<M>())
    }

    // TICK LOOP

    /// Establishes the execution order: a stable sort by ascending
    /// priority, so systems with equal priority keep their insertion
    /// order. Call once after all systems are added and before the first
    /// `update`.
    pub fn prepare(&mut self) {
        info!("[World] preparing {} systems.", self.systems.len());
        self.systems.sort_by_key(|s| s.priority);
    }

    /// Runs one simulation tick: every system in prepared order, gated by
    /// `check_processing`, runs `begin`, then `process` for each entity in
    /// its working set in insertion order, then `end`.
    pub fn update(&mut self) {
        for slot in &mut self.systems {
            if !slot.system.check_processing() {
                continue;
            }

            let SystemSlot {
                ref mut system,
                ref members,
                ..
            } = *slot;

            system.begin(&mut self.entities);
            for &id in members {
                system.process(&mut self.entities, id);
            }
            system.end(&mut self.entities);
        }
    }

    /// Tears the world down: system `dispose` hooks in execution order,
    /// then manager `dispose` hooks in registration order, then all owned
    /// state is dropped. The world must not be used afterwards.
    pub fn dispose(&mut self) {
        info!("[World] disposing.");

        for slot in &mut self.systems {
            slot.system.dispose(&mut self.entities);
        }

        for m in &mut self.managers {
            m.dispose();
        }

        self.systems.clear();
        self.managers.clear();
        self.entities.map.clear();
    }
}
