extern crate self as aspect_ecs;

pub mod data_structures;
pub mod components;
pub mod entities;
pub mod systems;
pub mod context;
pub mod error;
pub mod world;

pub use world::World;

pub mod prelude {
	pub use crate::systems::*;
	pub use crate::components::*;
	pub use crate::world::World;
	pub use crate::error::EcsError;
	pub use crate::context::{Context, ContextBuilder};
	pub use crate::entities::{Entity, EntityEvent, EntityId, EntityObserver, EntityRegistry, SystemIndexes};
}

#[cfg(test)]
mod tests;
