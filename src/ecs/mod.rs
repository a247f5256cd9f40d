//! Entity-Component-System runtime.
//!
//! The triad at the core of this module is:
//!
//! 1. the `World` registry, owning entity lifecycle, component pools and
//!    the manager/system registries;
//! 2. the `System` base contract, combining an `Aspect` filter with a
//!    working set and ordered begin/process/end execution;
//! 3. the pooling discipline backing both entities and components, so a
//!    steady-state simulation tick allocates nothing.
//!
//! Entities are integer identities with a bitset signature of attached
//! components. Systems never scan the world: their working sets are kept
//! consistent incrementally as entities are added and deleted.

pub mod aspect;
pub mod bitset;
pub mod component;
pub mod entity;
pub mod manager;
pub mod managers;
pub mod system;
pub mod world;

pub use self::aspect::Aspect;
pub use self::bitset::{BitSet, MAX_COMPONENT_TYPES};
pub use self::component::{Component, ComponentObject, ComponentPool, ComponentType};
pub use self::entity::{Entity, EntityId};
pub use self::manager::Manager;
pub use self::managers::{GroupManager, TagManager};
pub use self::system::System;
pub use self::world::{Entities, World, WorldSetup};
