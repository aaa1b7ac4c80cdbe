use crate::components::{Component, ComponentStore};
use crate::systems::{ActiveSet, SystemLogic};
use crate::entities::{Entity, EntityId};
use crate::context::Context;
use std::sync::Arc;

#[derive(Component, Clone, Debug, Default, PartialEq)]
pub struct Position(pub f32, pub f32);

#[derive(Component, Clone, Debug, Default, PartialEq)]
pub struct Velocity(pub f32, pub f32);

#[derive(Component, Clone, Debug, Default)]
pub struct Dead;

#[derive(Component, Clone, Debug, Default)]
pub struct Sprite;

pub struct Stores {
	pub positions: Arc<ComponentStore<Position>>,
	pub velocities: Arc<ComponentStore<Velocity>>,
	pub dead: Arc<ComponentStore<Dead>>,
	pub sprites: Arc<ComponentStore<Sprite>>,
}

impl Stores {
	pub fn new() -> Self {
		Self {
			positions: Arc::new(ComponentStore::new()),
			velocities: Arc::new(ComponentStore::new()),
			dead: Arc::new(ComponentStore::new()),
			sprites: Arc::new(ComponentStore::new()),
		}
	}

	pub fn build_context(&self) -> Context {
		Context::builder()
			.component(self.positions.clone())
			.component(self.velocities.clone())
			.component(self.dead.clone())
			.component(self.sprites.clone())
			.build()
	}

	pub fn context(&self) -> Arc<Context> {
		Arc::new(self.build_context())
	}
}

pub fn entity(id: u64) -> Entity {
	Entity::new(EntityId(id))
}

/// Counts every hook invocation.
#[derive(Default)]
pub struct Recorder {
	pub inserted: Vec<EntityId>,
	pub removed: Vec<EntityId>,
	pub begins: usize,
	pub ends: usize,
	pub processed: Vec<usize>,
	pub disposals: usize,
	pub skip: bool,
}

impl SystemLogic for Recorder {
	fn name(&self) -> &str {
		"recorder"
	}

	fn process_entities(&mut self, entities: &ActiveSet, _: &Context) {
		assert_eq!(self.begins, self.ends + 1, "process_entities must run between begin and end");
		self.processed.push(entities.len());
	}

	fn inserted(&mut self, entity: &Entity, _: &Context) {
		self.inserted.push(entity.id());
	}

	fn removed(&mut self, entity: &Entity, _: &Context) {
		self.removed.push(entity.id());
	}

	fn check_processing(&mut self, _: &Context) -> bool {
		!self.skip
	}

	fn begin(&mut self, _: &Context) {
		self.begins += 1;
	}

	fn end(&mut self, _: &Context) {
		self.ends += 1;
	}

	fn dispose(&mut self) {
		self.disposals += 1;
	}
}

/// A second logic type, so two systems can live in the same store.
#[derive(Default)]
pub struct Counter {
	pub ticks: usize,
}

impl SystemLogic for Counter {
	fn process_entities(&mut self, _: &ActiveSet, _: &Context) {
		self.ticks += 1;
	}
}
