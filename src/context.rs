use crate::components::{Component, ComponentKind, ComponentManager, ComponentStore};
use crate::systems::SystemId;
use std::collections::HashMap;
use std::any::Any;
use std::sync::Arc;

/// The resolved bundle of collaborators available to a [system](crate::systems::EntitySystem).
///
/// A [Context] maps [component kinds](ComponentKind) to their [managers](ComponentManager),
/// and names to other managers and sibling [systems](SystemId).
/// It is immutable once built and is shared between systems through an [Arc].
#[derive(Default)]
pub struct Context {
	components: HashMap<ComponentKind, Arc<dyn ComponentManager>>,
	managers: HashMap<String, Arc<dyn Any + Send + Sync>>,
	systems: HashMap<String, SystemId>,
}

impl Context {
	pub fn builder() -> ContextBuilder {
		ContextBuilder::default()
	}

	/// Look up the [manager](ComponentManager) registered for the specified kind.
	pub fn component_manager(&self, kind: &ComponentKind) -> Option<&Arc<dyn ComponentManager>> {
		self.components.get(kind)
	}

	/// Look up a [manager](ComponentManager) by the name of its kind.
	pub fn component_manager_by_name(&self, name: &str) -> Option<&Arc<dyn ComponentManager>> {
		self.components.get(name)
	}

	/// Look up the [ComponentStore] holding components of type `T`.
	/// Returns `None` if no manager is registered for `T`, or if it isn't a [ComponentStore].
	pub fn component_store<T: Component>(&self) -> Option<Arc<ComponentStore<T>>> {
		let manager = self.components.get(&T::kind())?.clone();
		manager.into_any().downcast::<ComponentStore<T>>().ok()
	}

	pub fn has_component(&self, kind: &ComponentKind) -> bool {
		self.components.contains_key(kind)
	}

	/// Iterate over every registered [manager](ComponentManager).
	pub fn component_managers(&self) -> impl Iterator<Item = &Arc<dyn ComponentManager>> + '_ {
		self.components.values()
	}

	/// Look up a named manager of type `M`.
	pub fn manager<M: Any + Send + Sync>(&self, name: &str) -> Option<Arc<M>> {
		self.managers.get(name)?.clone().downcast::<M>().ok()
	}

	/// Look up a sibling system by name.
	pub fn system(&self, name: &str) -> Option<SystemId> {
		self.systems.get(name).copied()
	}

	pub fn systems(&self) -> impl Iterator<Item = (&str, SystemId)> + '_ {
		self.systems.iter().map(|(name, id)| (name.as_str(), *id))
	}
}

/// A utility structure to build a [Context].
#[derive(Default)]
pub struct ContextBuilder {
	context: Context,
}

impl ContextBuilder {
	/// Register a [ComponentStore] under the kind of `T`.
	pub fn component<T: Component>(self, store: Arc<ComponentStore<T>>) -> Self {
		self.component_manager(store)
	}

	/// Register a [manager](ComponentManager) under its own [kind](ComponentManager::kind).
	/// A manager registered earlier for the same kind is replaced.
	pub fn component_manager(mut self, manager: Arc<dyn ComponentManager>) -> Self {
		let kind = manager.kind();
		if self.context.components.insert(kind.clone(), manager).is_some() {
			log::debug!("Replacing the component manager registered for '{}'", kind);
		}
		self
	}

	/// Register a named manager.
	pub fn manager<M: Any + Send + Sync>(mut self, name: impl Into<String>, manager: Arc<M>) -> Self {
		self.context.managers.insert(name.into(), manager);
		self
	}

	/// Register a sibling system under a name.
	pub fn system(mut self, name: impl Into<String>, id: SystemId) -> Self {
		self.context.systems.insert(name.into(), id);
		self
	}

	pub fn build(self) -> Context {
		self.context
	}
}
