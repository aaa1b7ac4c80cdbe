use crate::systems::{EntitySystem, SystemId, SystemIdAllocator, SystemLogic, SystemStore};
use crate::entities::{Entity, EntityEvent, EntityRegistry};
use crate::components::{Component, ComponentManager};
use crate::error::{EcsError, Result};
use crate::context::Context;
use std::ops::Deref;
use std::sync::Arc;

/// A container for [entities](Entity), their [components](Component) and the systems observing them.
///
/// Every mutation made through a [World] is published to its systems right after
/// component storage has been updated, so their active sets are always current
/// by the time the call returns.
pub struct World {
	entity_registry: EntityRegistry,
	system_store: SystemStore,
	context: Arc<Context>,
}

impl World {
	pub fn new(context: Context) -> Self {
		Self {
			entity_registry: EntityRegistry::new(),
			system_store: SystemStore::new(),
			context: Arc::new(context),
		}
	}

	pub fn context(&self) -> &Arc<Context> {
		&self.context
	}

	/// The allocator systems added to this [World] should draw their ids from.
	pub fn ids(&self) -> &SystemIdAllocator {
		self.system_store.ids()
	}

	pub fn systems(&self) -> &SystemStore {
		&self.system_store
	}

	pub fn systems_mut(&mut self) -> &mut SystemStore {
		&mut self.system_store
	}

	/// Add a new [system](EntitySystem) to the [World].
	pub fn register_system<L: SystemLogic>(&mut self, system: EntitySystem<L>) -> Result<SystemId> {
		self.system_store.add_system(system)
	}

	/// Initialize all systems against the [World's](World) context.
	/// Must be called before any system can be run.
	///
	/// Entities created before setup are evaluated once the systems are bound;
	/// disabled ones are left out until they are enabled.
	pub fn setup_systems(&mut self) -> Result<()> {
		self.system_store.setup_systems(self.context.clone())?;
		for entity in self.entity_registry.iter() {
			if self.entity_registry.is_enabled(entity)? {
				self.system_store.notify(EntityEvent::Added, entity);
			}
		}
		Ok(())
	}

	/// Execute all non-passive systems.
	pub fn run_systems(&mut self) -> Result<()> {
		self.system_store.run_systems()
	}

	/// Dispose all systems.
	pub fn dispose(&mut self) {
		self.system_store.dispose_systems()
	}

	/// Creates a single [entity](Entity) with no [components](Component) attached.
	pub fn create_entity(&mut self) -> Entity {
		let entity = self.entity_registry.create_entity();
		self.system_store.notify(EntityEvent::Added, &entity);
		entity
	}

	/// Destroys the [entity](Entity) and every component attached to it.
	pub fn delete_entity(&mut self, entity: &Entity) -> Result<()> {
		self.entity_registry.delete_entity(entity)?;
		for manager in self.context.component_managers() {
			manager.remove(entity);
		}
		self.system_store.notify(EntityEvent::Deleted, entity);
		Ok(())
	}

	/// Add a new [component](Component) to the specified [entity](Entity), returning the value it replaced.
	/// Systems are only told about it if the entity didn't carry one already.
	pub fn add_component<T: Component>(&mut self, entity: &Entity, value: T) -> Result<Option<T>> {
		let store = self.context.component_store::<T>().ok_or_else(|| EcsError::UnregisteredComponent(T::kind()))?;
		let enabled = self.entity_registry.is_enabled(entity)?;

		let replaced = store.insert(entity, value);
		if replaced.is_none() && enabled {
			self.system_store.notify(EntityEvent::Changed, entity);
		}
		Ok(replaced)
	}

	/// Remove a [component](Component) from the specified [entity](Entity), returning it if it was present.
	pub fn remove_component<T: Component>(&mut self, entity: &Entity) -> Result<Option<T>> {
		let store = self.context.component_store::<T>().ok_or_else(|| EcsError::UnregisteredComponent(T::kind()))?;
		let enabled = self.entity_registry.is_enabled(entity)?;

		let removed = store.take(entity);
		if removed.is_some() && enabled {
			self.system_store.notify(EntityEvent::Changed, entity);
		}
		Ok(removed)
	}

	/// Returns `true` if the [entity](Entity) carries a component of type `T`.
	pub fn has_component<T: Component>(&self, entity: &Entity) -> bool {
		match self.context.component_store::<T>() {
			Some(store) => store.has(entity),
			None => false,
		}
	}

	/// Re-enables the [entity](Entity), letting systems pick it up again.
	pub fn enable(&mut self, entity: &Entity) -> Result<()> {
		if self.entity_registry.set_enabled(entity, true)? {
			self.system_store.notify(EntityEvent::Enabled, entity);
		}
		Ok(())
	}

	/// Disables the [entity](Entity), removing it from every system until it is re-enabled.
	/// Component changes made while disabled are picked up on re-enabling.
	pub fn disable(&mut self, entity: &Entity) -> Result<()> {
		if self.entity_registry.set_enabled(entity, false)? {
			self.system_store.notify(EntityEvent::Disabled, entity);
		}
		Ok(())
	}
}

impl Deref for World {
	type Target = EntityRegistry;

	#[inline(always)]
	fn deref(&self) -> &Self::Target {
		&self.entity_registry
	}
}
