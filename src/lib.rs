//! # weft
//!
//! A small, deterministic entity-component-system runtime for real-time
//! simulations: pooled entities and components, aspect-filtered systems,
//! and a stable priority-ordered tick loop.
//!
//! ```rust
//! use weft::prelude::*;
//!
//! #[derive(Default)]
//! struct Position {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl Component for Position {
//!     fn reset(&mut self) {
//!         *self = Default::default();
//!     }
//! }
//!
//! struct Mover {
//!     aspect: Aspect,
//! }
//!
//! impl System for Mover {
//!     fn aspect(&self) -> Aspect {
//!         self.aspect
//!     }
//!
//!     fn process(&mut self, entities: &mut Entities, e: EntityId) {
//!         if let Some(v) = entities.component_mut::<Position>(e) {
//!             v.x += 1;
//!         }
//!     }
//! }
//!
//! let mut world = World::new(WorldSetup::default());
//! let ty = world.set_component_pool(ComponentPool::<Position>::default()).unwrap();
//! world.add_system(Mover { aspect: Aspect::new().require(ty) }).unwrap();
//! world.prepare();
//!
//! let e = world.create_entity();
//! let position = world.create_component::<Position>().unwrap();
//! assert!(world.attach(e, position).is_none());
//! world.add_entity(e);
//!
//! world.update();
//! assert_eq!(world.component::<Position>(e).unwrap().x, 1);
//!
//! world.delete_entity(e);
//! world.dispose();
//! ```

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;

pub mod errors;

pub mod ecs;
pub mod utils;

pub mod prelude;

pub use self::ecs::world::{World, WorldSetup};
