use crate::components::ComponentKind;
use crate::entities::Entity;
use std::any::Any;
use std::sync::Arc;

/// Storage and existence-query service for one [ComponentKind].
///
/// [Entity systems](crate::systems::EntitySystem) treat a manager as an oracle for
/// "does this entity currently carry this kind". Queries must not have side effects;
/// a manager that fails a query should panic, and the panic is propagated unchanged
/// through whichever notification triggered the query.
pub trait ComponentManager: Send + Sync {
	/// The [ComponentKind] stored by this manager.
	fn kind(&self) -> ComponentKind;

	/// Returns `true` if the [entity](Entity) currently carries this manager's component.
	fn has(&self, entity: &Entity) -> bool;

	/// Removes the [entity's](Entity) component, returning *false* if it was not present.
	fn remove(&self, entity: &Entity) -> bool;

	/// The number of [entities](Entity) carrying this manager's component.
	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn as_any(&self) -> &dyn Any;

	fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}
