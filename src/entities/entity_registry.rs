use crate::entities::{Entity, EntityId};
use crate::error::{EcsError, Result};
use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;

type Hasher = BuildHasherDefault<NoHashHasher<u64>>;

/// Allocates [entity](Entity) identities and tracks whether they are alive and enabled.
///
/// The registry only records state; publishing the matching [events](crate::entities::EntityEvent)
/// to interested systems is up to the caller, once component storage is up to date.
pub struct EntityRegistry {
	next_id: u64,
	entities: HashMap<EntityId, EntityRecord, Hasher>,
}

struct EntityRecord {
	entity: Entity,
	enabled: bool,
}

impl EntityRegistry {
	pub fn new() -> Self {
		Self {
			next_id: 0,
			entities: HashMap::default(),
		}
	}

	/// Creates a single enabled [entity](Entity).
	pub fn create_entity(&mut self) -> Entity {
		let id = EntityId(self.next_id);
		self.next_id += 1;

		let entity = Entity::new(id);
		self.entities.insert(id, EntityRecord {
			entity: entity.clone(),
			enabled: true,
		});
		entity
	}

	/// Forgets the [entity](Entity).
	/// Ids are never reused, so stale handles can't alias a newer entity.
	pub fn delete_entity(&mut self, entity: &Entity) -> Result<()> {
		match self.entities.remove(&entity.id()) {
			None => Err(EcsError::UnknownEntity(entity.id())),
			Some(_) => Ok(()),
		}
	}

	/// Enables or disables the [entity](Entity).
	/// Returns *false* if the entity was already in the requested state.
	pub fn set_enabled(&mut self, entity: &Entity, enabled: bool) -> Result<bool> {
		let record = self.record_mut(entity)?;
		let transitioned = record.enabled != enabled;
		record.enabled = enabled;
		Ok(transitioned)
	}

	pub fn is_enabled(&self, entity: &Entity) -> Result<bool> {
		self.entities
			.get(&entity.id())
			.map(|record| record.enabled)
			.ok_or(EcsError::UnknownEntity(entity.id()))
	}

	pub fn get(&self, id: EntityId) -> Option<&Entity> {
		self.entities.get(&id).map(|record| &record.entity)
	}

	pub fn contains(&self, entity: &Entity) -> bool {
		self.entities.contains_key(&entity.id())
	}

	pub fn len(&self) -> usize {
		self.entities.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entities.is_empty()
	}

	/// Iterate over every live [entity](Entity), in no particular order.
	pub fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
		self.entities.values().map(|record| &record.entity)
	}

	fn record_mut(&mut self, entity: &Entity) -> Result<&mut EntityRecord> {
		self.entities.get_mut(&entity.id()).ok_or(EcsError::UnknownEntity(entity.id()))
	}
}

impl Default for EntityRegistry {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use crate::entities::EntityRegistry;
	use crate::error::EcsError;

	#[test]
	fn ids_are_unique_and_never_reused() {
		let mut registry = EntityRegistry::new();
		let a = registry.create_entity();
		let b = registry.create_entity();
		assert_ne!(a.id(), b.id());

		registry.delete_entity(&a).unwrap();
		let c = registry.create_entity();
		assert_ne!(a.id(), c.id(), "Deleted ids must not be handed out again");
		assert_eq!(registry.len(), 2);
		assert!(!registry.contains(&a));
		assert!(registry.get(c.id()).is_some());
	}

	#[test]
	fn enabled_transitions_are_reported() {
		let mut registry = EntityRegistry::new();
		let entity = registry.create_entity();

		assert!(registry.is_enabled(&entity).unwrap());
		assert!(!registry.set_enabled(&entity, true).unwrap());
		assert!(registry.set_enabled(&entity, false).unwrap());
		assert!(!registry.is_enabled(&entity).unwrap());

		registry.delete_entity(&entity).unwrap();
		assert!(matches!(
			registry.set_enabled(&entity, true),
			Err(EcsError::UnknownEntity(id)) if id == entity.id()
		));
		assert!(registry.delete_entity(&entity).is_err());
	}
}
