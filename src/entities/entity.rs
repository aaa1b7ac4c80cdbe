use crate::data_structures::{BitField, BitFieldIterator};
use parking_lot::{Mutex, MutexGuard};
use crate::systems::SystemId;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::fmt;

/// The identity of an [Entity], unique within the [registry](crate::entities::EntityRegistry) that allocated it.
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// A shared handle to an entity.
///
/// Cloning an [Entity] is cheap and yields a handle to the same entity.
/// Handles are compared and hashed by [id](EntityId).
#[derive(Clone)]
pub struct Entity {
	instance: Arc<EntityInstance>,
}

struct EntityInstance {
	id: EntityId,
	system_indexes: Mutex<SystemIndexes>,
}

impl Entity {
	pub(crate) fn new(id: EntityId) -> Self {
		Self {
			instance: Arc::new(EntityInstance {
				id,
				system_indexes: Mutex::new(SystemIndexes::default()),
			}),
		}
	}

	#[inline(always)]
	pub fn id(&self) -> EntityId {
		self.instance.id
	}

	/// Returns `true` if the entity is currently registered with the specified system.
	pub fn is_member_of(&self, system: SystemId) -> bool {
		self.instance.system_indexes.lock().has(system)
	}

	/// A snapshot of the systems the entity is currently registered with.
	pub fn system_indexes(&self) -> SystemIndexes {
		self.instance.system_indexes.lock().clone()
	}

	/// Locks the entity's membership.
	/// Every membership change for this entity, across all systems, happens under this lock.
	pub(crate) fn membership(&self) -> MutexGuard<'_, SystemIndexes> {
		self.instance.system_indexes.lock()
	}
}

impl Eq for Entity {}

impl PartialEq<Self> for Entity {
	fn eq(&self, other: &Self) -> bool {
		self.id() == other.id()
	}
}

impl Hash for Entity {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id().hash(state)
	}
}

impl fmt::Debug for Entity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Entity")
			.field("id", &self.id())
			.field("system_indexes", &self.system_indexes())
			.finish()
	}
}

/// The set of [system ids](SystemId) an [Entity] is registered with.
///
/// It is the inverse index of every system's [active set](crate::systems::ActiveSet):
/// an entity has a system's id exactly when it is among that system's active entities.
#[derive(Default, Clone, Eq, PartialEq)]
pub struct SystemIndexes {
	bits: BitField,
}

impl SystemIndexes {
	#[inline(always)]
	pub fn has(&self, system: SystemId) -> bool {
		self.bits.get(system.index())
	}

	pub fn len(&self) -> usize {
		self.bits.count_ones()
	}

	pub fn is_empty(&self) -> bool {
		self.bits.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = SystemId> + '_ {
		SystemIndexesIter { bits: self.bits.iter() }
	}

	/// Returns *false* if the id was already present.
	pub(crate) fn insert(&mut self, system: SystemId) -> bool {
		!self.bits.set(system.index(), true)
	}

	/// Returns *false* if the id was not present.
	pub(crate) fn remove(&mut self, system: SystemId) -> bool {
		self.bits.set(system.index(), false)
	}
}

impl fmt::Debug for SystemIndexes {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.iter()).finish()
	}
}

struct SystemIndexesIter<'l> {
	bits: BitFieldIterator<'l>,
}

impl Iterator for SystemIndexesIter<'_> {
	type Item = SystemId;

	fn next(&mut self) -> Option<Self::Item> {
		self.bits.next().map(|i| SystemId(i as u32))
	}
}
