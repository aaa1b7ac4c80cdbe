use crate::systems::{Aspect, AspectBuilder, SystemId, SystemIdAllocator};
use crate::components::{ComponentKind, ComponentManager, ComponentSet};
use crate::entities::{Entity, EntityEvent, EntityObserver, SystemIndexes};
use crate::error::{AspectRole, EcsError, Result};
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use std::hash::BuildHasherDefault;
use parking_lot::MutexGuard;
use nohash_hasher::NoHashHasher;
use std::collections::HashSet;
use crate::context::Context;
use std::sync::Arc;

type Hasher = BuildHasherDefault<NoHashHasher<u64>>;

/// The per-tick logic of a system.
///
/// Only [process_entities](SystemLogic::process_entities) is required;
/// every other hook defaults to doing nothing (or, for [check_processing](SystemLogic::check_processing), to always running).
/// Hooks are only ever invoked on an initialized [EntitySystem], so they always receive its [Context].
pub trait SystemLogic: 'static + Send {
	/// A human readable name, used in logs and errors.
	fn name(&self) -> &str {
		std::any::type_name::<Self>()
	}

	/// Runs the system against its current active set.
	/// The set is live: it must not be resized while iterating, which the borrow rules already guarantee.
	fn process_entities(&mut self, entities: &ActiveSet, context: &Context);

	/// Called after an [entity](Entity) joined the active set.
	fn inserted(&mut self, _entity: &Entity, _context: &Context) {}

	/// Called after an [entity](Entity) left the active set.
	fn removed(&mut self, _entity: &Entity, _context: &Context) {}

	/// Decides whether the system runs at all this tick.
	fn check_processing(&mut self, _context: &Context) -> bool {
		true
	}

	fn begin(&mut self, _context: &Context) {}

	fn end(&mut self, _context: &Context) {}

	/// Releases whatever the system acquired. Called once, at teardown.
	fn dispose(&mut self) {}
}

/// The [entities](Entity) currently satisfying a system's [aspect](Aspect).
#[derive(Default)]
pub struct ActiveSet {
	entities: HashSet<Entity, Hasher>,
}

impl ActiveSet {
	pub fn len(&self) -> usize {
		self.entities.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entities.is_empty()
	}

	pub fn contains(&self, entity: &Entity) -> bool {
		self.entities.contains(entity)
	}

	/// Iterate over the active [entities](Entity), in no particular order.
	pub fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
		self.entities.iter()
	}

	/// Visit every active [entity](Entity) in parallel.
	pub fn par_for_each(&self, func: impl Fn(&Entity) + Send + Sync) {
		self.entities.par_iter().for_each(func)
	}

	fn insert(&mut self, entity: &Entity) -> bool {
		self.entities.insert(entity.clone())
	}

	fn remove(&mut self, entity: &Entity) -> bool {
		self.entities.remove(entity)
	}
}

impl<'l> IntoIterator for &'l ActiveSet {
	type Item = &'l Entity;
	type IntoIter = std::collections::hash_set::Iter<'l, Entity>;

	fn into_iter(self) -> Self::IntoIter {
		self.entities.iter()
	}
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum State {
	Uninitialized,
	Ready,
	Processing,
	Disposed,
}

/// The context a system was initialized with, and the managers its aspect resolved to.
struct Binding {
	context: Arc<Context>,
	expected: Vec<Arc<dyn ComponentManager>>,
	excluded: Vec<Arc<dyn ComponentManager>>,
	optional: Vec<Arc<dyn ComponentManager>>,
}

impl Binding {
	fn resolve(system: &str, id: SystemId, aspect: &Aspect, context: Arc<Context>) -> Result<Self> {
		let mut binding = Binding {
			context: context.clone(),
			expected: Vec::with_capacity(aspect.expected().len()),
			excluded: Vec::with_capacity(aspect.excluded().len()),
			optional: Vec::with_capacity(aspect.optional().len()),
		};

		for (role, kind) in aspect.kinds() {
			let manager = match context.component_manager(kind) {
				Some(manager) => manager.clone(),
				None => {
					return Err(EcsError::MissingComponentManager {
						system: system.to_owned(),
						id,
						kind: kind.clone(),
					})
				},
			};

			match role {
				AspectRole::Expected => binding.expected.push(manager),
				AspectRole::Excluded => binding.excluded.push(manager),
				AspectRole::Optional => binding.optional.push(manager),
			}
		}

		Ok(binding)
	}

	#[inline]
	fn matches(&self, entity: &Entity) -> bool {
		self.expected.iter().all(|m| m.has(entity)) && !self.excluded.iter().any(|m| m.has(entity))
	}
}

/// A system that keeps track of the [entities](Entity) matching its [aspect](Aspect)
/// and runs its [logic](SystemLogic) over them once per tick.
///
/// Membership is maintained incrementally: each [notification](EntityObserver)
/// re-evaluates a single entity, and at rest an entity is in the [active set](ActiveSet)
/// exactly when it matches the aspect. An entity's [system indexes](SystemIndexes)
/// always agree with the active sets of the systems it belongs to.
pub struct EntitySystem<L: SystemLogic> {
	id: SystemId,
	priority: i64,
	passive: bool,
	aspect: Aspect,
	actives: ActiveSet,
	binding: Option<Binding>,
	state: State,
	logic: L,
}

impl<L: SystemLogic> EntitySystem<L> {
	/// Start building a system around the specified [logic](SystemLogic).
	pub fn builder(logic: L) -> EntitySystemBuilder<L> {
		EntitySystemBuilder {
			logic,
			aspect: AspectBuilder::default(),
			priority: None,
			passive: false,
		}
	}

	/// Create a system from an already validated [Aspect].
	/// Its priority defaults to its id.
	pub fn new(ids: &SystemIdAllocator, aspect: Aspect, logic: L) -> Self {
		let id = ids.next_id();
		Self {
			id,
			priority: id.value() as i64,
			passive: false,
			aspect,
			actives: ActiveSet::default(),
			binding: None,
			state: State::Uninitialized,
			logic,
		}
	}

	#[inline(always)]
	pub fn id(&self) -> SystemId {
		self.id
	}

	pub fn name(&self) -> &str {
		self.logic.name()
	}

	/// An ordering hint for whoever drives the system. Lower runs first.
	pub fn priority(&self) -> i64 {
		self.priority
	}

	/// Passive systems are skipped by drivers that run systems automatically.
	pub fn is_passive(&self) -> bool {
		self.passive
	}

	pub fn set_passive(&mut self, passive: bool) {
		self.passive = passive;
	}

	pub fn aspect(&self) -> &Aspect {
		&self.aspect
	}

	pub fn actives(&self) -> &ActiveSet {
		&self.actives
	}

	pub fn logic(&self) -> &L {
		&self.logic
	}

	pub fn logic_mut(&mut self) -> &mut L {
		&mut self.logic
	}

	/// The [Context] the system was initialized with.
	pub fn context(&self) -> Option<&Arc<Context>> {
		self.binding.as_ref().map(|b| &b.context)
	}

	pub fn is_initialized(&self) -> bool {
		matches!(self.state, State::Ready | State::Processing)
	}

	pub fn is_disposed(&self) -> bool {
		self.state == State::Disposed
	}

	/// Look up one of the managers resolved for the system's [aspect](Aspect).
	pub fn component_manager(&self, kind: &ComponentKind) -> Option<&Arc<dyn ComponentManager>> {
		let binding = self.binding.as_ref()?;
		binding
			.expected
			.iter()
			.chain(binding.excluded.iter())
			.chain(binding.optional.iter())
			.find(|m| m.kind() == *kind)
	}

	/// Binds the system to a [Context].
	///
	/// Every kind declared by the aspect, optional ones included, must resolve to a manager.
	/// The first kind that doesn't fails the whole binding with
	/// [MissingComponentManager](EcsError::MissingComponentManager), and the system stays uninitialized.
	pub fn initialize(&mut self, context: Arc<Context>) -> Result<()> {
		match self.state {
			State::Uninitialized => {},
			State::Disposed => return Err(EcsError::Disposed(self.name().to_owned())),
			State::Ready | State::Processing => {
				return Err(EcsError::InvalidState(format!("System '{}' has already been initialized", self.name())));
			},
		}

		let binding = Binding::resolve(self.logic.name(), self.id, &self.aspect, context)?;
		self.binding = Some(binding);
		self.state = State::Ready;

		log::debug!("Initialized {} '{}'", self.id, self.name());
		Ok(())
	}

	/// Returns `true` if the [entity](Entity) carries every expected component and none of the excluded ones.
	/// An uninitialized system isn't interested in anything.
	pub fn validate_entity(&self, entity: &Entity) -> bool {
		match &self.binding {
			None => false,
			Some(binding) => binding.matches(entity),
		}
	}

	/// Runs one tick of the system.
	///
	/// Nothing happens if [check_processing](SystemLogic::check_processing) declines.
	/// Otherwise `begin`, `process_entities` and `end` run back to back.
	pub fn process(&mut self) -> Result<()> {
		match self.state {
			State::Ready => {},
			State::Uninitialized => return Err(EcsError::NotInitialized(self.name().to_owned())),
			State::Processing => return Err(EcsError::ReentrantProcess(self.name().to_owned())),
			State::Disposed => return Err(EcsError::Disposed(self.name().to_owned())),
		}

		let context = match &self.binding {
			Some(binding) => &binding.context,
			None => return Err(EcsError::NotInitialized(self.logic.name().to_owned())),
		};

		if !self.logic.check_processing(context) {
			log::trace!("Skipping {} this tick", self.id);
			return Ok(());
		}

		// Left set if the pass unwinds, so a later call is refused.
		self.state = State::Processing;

		self.logic.begin(context);
		self.logic.process_entities(&self.actives, context);
		self.logic.end(context);

		self.state = State::Ready;
		log::trace!("Processed {} over {} entities", self.id, self.actives.len());
		Ok(())
	}

	/// Tears the system down.
	///
	/// The logic's [dispose](SystemLogic::dispose) hook runs once; the active set is released
	/// and the system's id is cleared from its former members.
	pub fn dispose(&mut self) {
		if self.state == State::Disposed {
			return;
		}

		self.logic.dispose();
		for entity in self.actives.entities.drain() {
			entity.membership().remove(self.id);
		}

		self.binding = None;
		self.state = State::Disposed;
		log::debug!("Disposed {} '{}'", self.id, self.logic.name());
	}

	fn accepts(&self, event: EntityEvent, entity: &Entity) -> bool {
		match self.state {
			State::Ready | State::Processing => true,
			State::Uninitialized | State::Disposed => {
				log::warn!(
					"Ignoring '{}' notification for entity {} on {} ({:?})",
					event,
					entity.id(),
					self.id,
					self.state
				);
				false
			},
		}
	}

	fn check(&mut self, event: EntityEvent, entity: &Entity) {
		if !self.accepts(event, entity) {
			return;
		}

		let interested = self.validate_entity(entity);
		let membership = entity.membership();
		let contains = membership.has(self.id);

		if interested && !contains {
			self.insert(entity, membership);
		} else if !interested && contains {
			self.remove(entity, membership);
		}
	}

	fn check_removal(&mut self, event: EntityEvent, entity: &Entity) {
		if !self.accepts(event, entity) {
			return;
		}

		let membership = entity.membership();
		if membership.has(self.id) {
			self.remove(entity, membership);
		}
	}

	fn insert(&mut self, entity: &Entity, mut membership: MutexGuard<'_, SystemIndexes>) {
		let added = self.actives.insert(entity);
		let indexed = membership.insert(self.id);
		assert_membership(self.id, added, indexed);
		drop(membership);

		log::debug!("Entity {} joined {}", entity.id(), self.id);
		if let Some(binding) = &self.binding {
			self.logic.inserted(entity, &binding.context);
		}
	}

	fn remove(&mut self, entity: &Entity, mut membership: MutexGuard<'_, SystemIndexes>) {
		let removed = self.actives.remove(entity);
		let unindexed = membership.remove(self.id);
		assert_membership(self.id, removed, unindexed);
		drop(membership);

		log::debug!("Entity {} left {}", entity.id(), self.id);
		if let Some(binding) = &self.binding {
			self.logic.removed(entity, &binding.context);
		}
	}
}

impl<L: SystemLogic> EntityObserver for EntitySystem<L> {
	fn added(&mut self, entity: &Entity) {
		self.check(EntityEvent::Added, entity);
	}

	fn changed(&mut self, entity: &Entity) {
		self.check(EntityEvent::Changed, entity);
	}

	fn deleted(&mut self, entity: &Entity) {
		self.check_removal(EntityEvent::Deleted, entity);
	}

	fn enabled(&mut self, entity: &Entity) {
		self.check(EntityEvent::Enabled, entity);
	}

	fn disabled(&mut self, entity: &Entity) {
		self.check_removal(EntityEvent::Disabled, entity);
	}
}

/// A utility structure to build [EntitySystems](EntitySystem).
pub struct EntitySystemBuilder<L: SystemLogic> {
	logic: L,
	aspect: AspectBuilder,
	priority: Option<i64>,
	passive: bool,
}

impl<L: SystemLogic> EntitySystemBuilder<L> {
	/// Specify which components an entity must include.
	pub fn expect<S: ComponentSet>(mut self) -> Self {
		self.aspect = self.aspect.expect::<S>();
		self
	}

	/// Specify which components an entity must not include.
	pub fn exclude<S: ComponentSet>(mut self) -> Self {
		self.aspect = self.aspect.exclude::<S>();
		self
	}

	/// Specify which components the system may look up without them gating membership.
	pub fn optional<S: ComponentSet>(mut self) -> Self {
		self.aspect = self.aspect.optional::<S>();
		self
	}

	pub fn expect_kind(mut self, kind: impl Into<ComponentKind>) -> Self {
		self.aspect = self.aspect.expect_kind(kind);
		self
	}

	pub fn exclude_kind(mut self, kind: impl Into<ComponentKind>) -> Self {
		self.aspect = self.aspect.exclude_kind(kind);
		self
	}

	pub fn optional_kind(mut self, kind: impl Into<ComponentKind>) -> Self {
		self.aspect = self.aspect.optional_kind(kind);
		self
	}

	pub fn priority(mut self, priority: i64) -> Self {
		self.priority = Some(priority);
		self
	}

	pub fn passive(mut self, passive: bool) -> Self {
		self.passive = passive;
		self
	}

	/// Validates the aspect, then creates the system.
	/// No id is drawn from `ids` if the aspect is invalid.
	pub fn build(self, ids: &SystemIdAllocator) -> Result<EntitySystem<L>> {
		let aspect = self.aspect.create()?;
		let mut system = EntitySystem::new(ids, aspect, self.logic);
		if let Some(priority) = self.priority {
			system.priority = priority;
		}
		system.passive = self.passive;
		Ok(system)
	}
}

#[inline(always)]
fn assert_membership(system: SystemId, actives: bool, indexes: bool) {
	#[cfg(not(feature = "debug_only_assertions"))]
	assert!(actives & indexes, "Active set and system indexes of {} are out of sync", system);

	#[cfg(feature = "debug_only_assertions")]
	debug_assert!(actives & indexes, "Active set and system indexes of {} are out of sync", system);
}
