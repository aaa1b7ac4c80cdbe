//! [Systems](EntitySystem) provide the logic for modifying the state of [Entities](crate::entities::Entity)
//! and their associated [Components](crate::components::Component).
//!
//! Each system declares an [Aspect], keeps the set of entities matching it up to date
//! as [lifecycle notifications](crate::entities::EntityObserver) arrive,
//! and runs its [logic](SystemLogic) over that set once per tick.
//! A [SystemStore] can drive a whole population of systems.

mod aspect;
mod system_id;
mod system_store;
mod entity_system;

pub use aspect::*;
pub use system_id::*;
pub use system_store::*;
pub use entity_system::*;
