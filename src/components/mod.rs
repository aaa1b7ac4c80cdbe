//! [Components](Component) are the pieces of data an [entity](crate::entities::Entity) may carry.
//!
//! The processing core never looks at component values; it only asks a [ComponentManager]
//! whether an entity currently carries a given [ComponentKind].

mod component_kind;
mod component_set;
mod component_store;
mod component_manager;

pub use component_kind::*;
pub use component_set::*;
pub use component_store::*;
pub use component_manager::*;
pub use aspect_ecs_derive::Component;
