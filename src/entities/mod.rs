//! [Entities](Entity) represent the individual "things" in your game or application.
//!
//! An [Entity] doesn't store any component data and has no associated behaviour;
//! it carries an identity and the set of [systems](crate::systems::EntitySystem) it currently belongs to.
//! [Entity observers](EntityObserver) are told about every lifecycle change of an entity.

mod entity;
mod entity_observer;
mod entity_registry;

pub use entity::*;
pub use entity_observer::*;
pub use entity_registry::*;
