use crate::components::{Component, ComponentKind, ComponentManager};
use crate::entities::{Entity, EntityId};
use parking_lot::{RwLock, RwLockReadGuard};
use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;
use std::any::Any;
use std::sync::Arc;

type Hasher = BuildHasherDefault<NoHashHasher<u64>>;

/// A thread-safe [ComponentManager] storing one value of type `T` per [entity](Entity).
///
/// Mutating a store does not notify anyone. Callers are expected to publish a
/// [changed](crate::entities::EntityEvent::Changed) event once the store reflects the new state;
/// [World](crate::world::World) does this for you.
pub struct ComponentStore<T: Component> {
	values: RwLock<HashMap<EntityId, T, Hasher>>,
}

impl<T: Component> ComponentStore<T> {
	pub fn new() -> Self {
		Self {
			values: RwLock::new(HashMap::default()),
		}
	}

	/// Attach a component to the [entity](Entity), returning the value it replaced.
	pub fn insert(&self, entity: &Entity, value: T) -> Option<T> {
		self.values.write().insert(entity.id(), value)
	}

	/// Detach the [entity's](Entity) component, returning it if it was present.
	pub fn take(&self, entity: &Entity) -> Option<T> {
		self.values.write().remove(&entity.id())
	}

	/// Get a copy of the [entity's](Entity) component.
	pub fn get(&self, entity: &Entity) -> Option<T>
	where
		T: Clone,
	{
		self.values.read().get(&entity.id()).cloned()
	}

	/// Run `func` against the [entity's](Entity) component, if present.
	pub fn with<R>(&self, entity: &Entity, func: impl FnOnce(&T) -> R) -> Option<R> {
		self.values.read().get(&entity.id()).map(func)
	}

	/// Run `func` against a mutable reference to the [entity's](Entity) component, if present.
	pub fn with_mut<R>(&self, entity: &Entity, func: impl FnOnce(&mut T) -> R) -> Option<R> {
		self.values.write().get_mut(&entity.id()).map(func)
	}

	/// Lock the store for reading and iterate over every `(id, component)` pair.
	pub fn read(&self) -> RwLockReadGuard<'_, HashMap<EntityId, T, Hasher>> {
		self.values.read()
	}
}

impl<T: Component> Default for ComponentStore<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Component> ComponentManager for ComponentStore<T> {
	fn kind(&self) -> ComponentKind {
		T::kind()
	}

	#[inline(always)]
	fn has(&self, entity: &Entity) -> bool {
		self.values.read().contains_key(&entity.id())
	}

	fn remove(&self, entity: &Entity) -> bool {
		self.take(entity).is_some()
	}

	fn len(&self) -> usize {
		self.values.read().len()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
		self
	}
}
