use crate::entities::Entity;
use std::fmt;

/// Receives the lifecycle notifications of [entities](Entity).
///
/// Notifications are delivered synchronously, after component storage already reflects
/// the change being announced. Observers only ever ask "what is true now".
pub trait EntityObserver {
	/// The [entity](Entity) has been created.
	fn added(&mut self, entity: &Entity);

	/// One of the [entity's](Entity) components has been added or removed.
	fn changed(&mut self, entity: &Entity);

	/// The [entity](Entity) has been destroyed.
	fn deleted(&mut self, entity: &Entity);

	/// The [entity](Entity) has been re-enabled.
	fn enabled(&mut self, entity: &Entity);

	/// The [entity](Entity) has been disabled and must be ignored until re-enabled.
	fn disabled(&mut self, entity: &Entity);
}

/// A lifecycle notification, as published by an [entity registry](crate::entities::EntityRegistry).
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum EntityEvent {
	Added,
	Changed,
	Deleted,
	Enabled,
	Disabled,
}

impl EntityEvent {
	/// Deliver the event to an [observer](EntityObserver).
	#[inline]
	pub fn dispatch<O: EntityObserver + ?Sized>(self, observer: &mut O, entity: &Entity) {
		match self {
			EntityEvent::Added => observer.added(entity),
			EntityEvent::Changed => observer.changed(entity),
			EntityEvent::Deleted => observer.deleted(entity),
			EntityEvent::Enabled => observer.enabled(entity),
			EntityEvent::Disabled => observer.disabled(entity),
		}
	}
}

impl fmt::Display for EntityEvent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			EntityEvent::Added => "added",
			EntityEvent::Changed => "changed",
			EntityEvent::Deleted => "deleted",
			EntityEvent::Enabled => "enabled",
			EntityEvent::Disabled => "disabled",
		};
		f.write_str(name)
	}
}
