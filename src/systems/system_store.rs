use crate::systems::{ActiveSet, EntitySystem, SystemId, SystemIdAllocator, SystemLogic};
use crate::entities::{Entity, EntityEvent, EntityObserver};
use crate::error::{EcsError, Result};
use crate::context::Context;
use std::collections::HashSet;
use std::any::{Any, TypeId};
use std::sync::Arc;

/// An object-safe view of an [EntitySystem], whatever its [logic](SystemLogic).
pub trait AnySystem: EntityObserver + Send {
	fn id(&self) -> SystemId;
	fn name(&self) -> &str;
	fn priority(&self) -> i64;
	fn is_passive(&self) -> bool;
	fn is_initialized(&self) -> bool;
	fn actives(&self) -> &ActiveSet;
	fn initialize(&mut self, context: Arc<Context>) -> Result<()>;
	fn process(&mut self) -> Result<()>;
	fn dispose(&mut self);
	fn as_any(&self) -> &dyn Any;
	fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<L: SystemLogic> AnySystem for EntitySystem<L> {
	fn id(&self) -> SystemId {
		EntitySystem::id(self)
	}

	fn name(&self) -> &str {
		EntitySystem::name(self)
	}

	fn priority(&self) -> i64 {
		EntitySystem::priority(self)
	}

	fn is_passive(&self) -> bool {
		EntitySystem::is_passive(self)
	}

	fn is_initialized(&self) -> bool {
		EntitySystem::is_initialized(self)
	}

	fn actives(&self) -> &ActiveSet {
		EntitySystem::actives(self)
	}

	fn initialize(&mut self, context: Arc<Context>) -> Result<()> {
		EntitySystem::initialize(self, context)
	}

	fn process(&mut self) -> Result<()> {
		EntitySystem::process(self)
	}

	fn dispose(&mut self) {
		EntitySystem::dispose(self)
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}

/// Owns a population of systems and drives them: initialization, notification fan-out,
/// per-tick processing in priority order, and teardown.
pub struct SystemStore {
	state: State,
	ids: SystemIdAllocator,
	set: HashSet<TypeId>,
	systems: Vec<Box<dyn AnySystem>>,
	order: Vec<usize>,
}

#[derive(Default, Copy, Clone, Debug, Eq, PartialEq)]
enum State {
	#[default]
	Uninitialized,
	Initializing,
	Initialized,
	Disposed,
}

impl SystemStore {
	pub fn new() -> Self {
		Self {
			state: State::default(),
			ids: SystemIdAllocator::new(),
			set: HashSet::default(),
			systems: Vec::default(),
			order: Vec::default(),
		}
	}

	/// The allocator systems added to this store should draw their ids from.
	pub fn ids(&self) -> &SystemIdAllocator {
		&self.ids
	}

	/// Add a new system. Systems can only be added before [setup](SystemStore::setup_systems),
	/// and only one system per [logic](SystemLogic) type.
	pub fn add_system<L: SystemLogic>(&mut self, system: EntitySystem<L>) -> Result<SystemId> {
		match self.state {
			State::Uninitialized => {},
			State::Initializing => {
				return Err(EcsError::InvalidState("Cannot add new systems during initialization".into()));
			},
			State::Initialized | State::Disposed => {
				return Err(EcsError::InvalidState("Cannot add new systems after initialization".into()));
			},
		}

		let id = system.id();
		if self.set.contains(&TypeId::of::<L>()) || self.systems.iter().any(|s| s.id() == id) {
			return Err(EcsError::DuplicateSystem(system.name().to_owned()));
		}

		self.set.insert(TypeId::of::<L>());
		self.systems.push(Box::new(system));

		let systems = &self.systems;
		self.order.push(systems.len() - 1);
		self.order.sort_by_key(|i| (systems[*i].priority(), systems[*i].id()));
		Ok(id)
	}

	/// Initialize all systems with the shared [Context].
	/// Must be called before any system can be run.
	///
	/// Stops at the first system that fails to bind. Systems bound so far stay bound,
	/// so setup can be retried once the context is fixed.
	/// Entities notified before setup were ignored, and need to be [added](EntityEvent::Added) again.
	pub fn setup_systems(&mut self, context: Arc<Context>) -> Result<()> {
		match self.state {
			State::Uninitialized => {
				self.state = State::Initializing;
				for system in self.systems.iter_mut().filter(|s| !s.is_initialized()) {
					if let Err(err) = system.initialize(context.clone()) {
						self.state = State::Uninitialized;
						return Err(err);
					}
				}
				self.state = State::Initialized;
				log::debug!("Initialized {} systems", self.systems.len());
				Ok(())
			},
			State::Initializing => Err(EcsError::InvalidState("Recursive call to setup_systems".into())),
			State::Initialized => Err(EcsError::InvalidState("Systems have already been initialized".into())),
			State::Disposed => Err(EcsError::InvalidState("Systems have already been disposed".into())),
		}
	}

	/// Deliver a lifecycle notification to every system, in registration order.
	pub fn notify(&mut self, event: EntityEvent, entity: &Entity) {
		for system in self.systems.iter_mut() {
			event.dispatch(system.as_mut(), entity);
		}
	}

	/// Execute all non-passive systems, lowest priority first.
	pub fn run_systems(&mut self) -> Result<()> {
		self.ensure_initialized()?;
		for i in &self.order {
			let system = &mut self.systems[*i];
			if !system.is_passive() {
				system.process()?;
			}
		}
		Ok(())
	}

	/// Execute a single system, even if it is passive.
	pub fn run_system(&mut self, id: SystemId) -> Result<()> {
		self.ensure_initialized()?;
		match self.systems.iter_mut().find(|s| s.id() == id) {
			Some(system) => system.process(),
			None => Err(EcsError::InvalidState(format!("No system with id {}", id))),
		}
	}

	/// Dispose every system. The store can't be used afterwards.
	pub fn dispose_systems(&mut self) {
		if self.state == State::Disposed {
			return;
		}

		self.systems.iter_mut().for_each(|s| s.dispose());
		self.state = State::Disposed;
	}

	pub fn get<L: SystemLogic>(&self) -> Option<&EntitySystem<L>> {
		self.systems.iter().find_map(|s| s.as_any().downcast_ref::<EntitySystem<L>>())
	}

	pub fn get_mut<L: SystemLogic>(&mut self) -> Option<&mut EntitySystem<L>> {
		self.systems.iter_mut().find_map(|s| s.as_any_mut().downcast_mut::<EntitySystem<L>>())
	}

	pub fn system(&self, id: SystemId) -> Option<&dyn AnySystem> {
		self.systems.iter().find(|s| s.id() == id).map(|s| s.as_ref())
	}

	/// Iterate over the systems in the order they run.
	pub fn iter(&self) -> impl Iterator<Item = &dyn AnySystem> + '_ {
		self.order.iter().map(|i| self.systems[*i].as_ref())
	}

	pub fn len(&self) -> usize {
		self.systems.len()
	}

	pub fn is_empty(&self) -> bool {
		self.systems.is_empty()
	}

	fn ensure_initialized(&self) -> Result<()> {
		match self.state {
			State::Initialized => Ok(()),
			State::Uninitialized | State::Initializing => {
				Err(EcsError::InvalidState("Systems must be initialized before they can run".into()))
			},
			State::Disposed => Err(EcsError::InvalidState("Systems have already been disposed".into())),
		}
	}
}

impl Default for SystemStore {
	fn default() -> Self {
		Self::new()
	}
}
