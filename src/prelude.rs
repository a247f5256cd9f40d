pub use crate::ecs;
pub use crate::ecs::{
    Aspect, Component, ComponentPool, ComponentType, Entities, Entity, EntityId, GroupManager,
    Manager, System, TagManager, World, WorldSetup,
};

pub use crate::errors::Result;

pub use crate::utils;
pub use crate::utils::ObjectPool;
