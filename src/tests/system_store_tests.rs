use crate::tests::common::{Counter, Dead, Position, Recorder, Stores, Velocity};
use crate::systems::{ActiveSet, EntitySystem, SystemLogic, SystemStore};
use crate::entities::{EntityEvent, EntityId};
use crate::error::EcsError;
use crate::context::Context;
use crate::world::World;
use parking_lot::Mutex;
use std::sync::Arc;

struct Tagged<const N: usize> {
	log: Arc<Mutex<Vec<usize>>>,
}

impl<const N: usize> SystemLogic for Tagged<N> {
	fn process_entities(&mut self, _: &ActiveSet, _: &Context) {
		self.log.lock().push(N);
	}
}

fn world(stores: &Stores) -> World {
	World::new(stores.build_context())
}

#[test]
pub fn two_systems_share_an_entity() {
	let stores = Stores::new();
	let mut world = world(&stores);

	let s1 = EntitySystem::builder(Recorder::default()).expect::<(Position,)>().build(world.ids()).unwrap();
	let s2 = EntitySystem::builder(Counter::default()).expect::<(Velocity,)>().build(world.ids()).unwrap();
	let s1 = world.register_system(s1).unwrap();
	let s2 = world.register_system(s2).unwrap();
	world.setup_systems().unwrap();

	let e = world.create_entity();
	world.add_component(&e, Position::default()).unwrap();
	world.add_component(&e, Velocity::default()).unwrap();

	let systems = world.systems();
	assert!(systems.system(s1).unwrap().actives().contains(&e));
	assert!(systems.system(s2).unwrap().actives().contains(&e));

	world.delete_entity(&e).unwrap();
	assert!(world.systems().iter().all(|s| s.actives().is_empty()));
	assert!(e.system_indexes().is_empty(), "Deleted entity must belong to no system");
	assert!(!world.has_component::<Position>(&e), "Deleting an entity drops its components");
	assert!(matches!(world.delete_entity(&e), Err(EcsError::UnknownEntity(_))));
}

#[test]
pub fn systems_run_by_priority_and_skip_passive_ones() {
	let stores = Stores::new();
	let log = Arc::new(Mutex::new(Vec::new()));
	let mut store = SystemStore::new();

	let late = EntitySystem::builder(Tagged::<0> { log: log.clone() }).priority(10).build(store.ids()).unwrap();
	let early = EntitySystem::builder(Tagged::<1> { log: log.clone() }).priority(-1).build(store.ids()).unwrap();
	let default = EntitySystem::builder(Tagged::<2> { log: log.clone() }).build(store.ids()).unwrap();
	let passive = EntitySystem::builder(Tagged::<3> { log: log.clone() }).passive(true).build(store.ids()).unwrap();

	store.add_system(late).unwrap();
	store.add_system(early).unwrap();
	store.add_system(default).unwrap();
	let passive = store.add_system(passive).unwrap();
	store.setup_systems(stores.context()).unwrap();

	store.run_systems().unwrap();
	assert_eq!(*log.lock(), vec![1, 2, 0]);

	store.run_system(passive).unwrap();
	assert_eq!(log.lock().last(), Some(&3), "Passive systems can still be run explicitly");
}

#[test]
pub fn store_lifecycle_is_enforced() {
	let stores = Stores::new();
	let mut store = SystemStore::new();
	assert!(matches!(store.run_systems(), Err(EcsError::InvalidState(_))));

	let first = EntitySystem::builder(Counter::default()).build(store.ids()).unwrap();
	let duplicate = EntitySystem::builder(Counter::default()).build(store.ids()).unwrap();
	store.add_system(first).unwrap();
	assert!(matches!(store.add_system(duplicate), Err(EcsError::DuplicateSystem(_))));

	store.setup_systems(stores.context()).unwrap();
	assert!(matches!(store.setup_systems(stores.context()), Err(EcsError::InvalidState(_))));

	let late = EntitySystem::builder(Recorder::default()).build(store.ids()).unwrap();
	assert!(matches!(store.add_system(late), Err(EcsError::InvalidState(_))));

	store.run_systems().unwrap();
	store.run_systems().unwrap();
	assert_eq!(store.get::<Counter>().unwrap().logic().ticks, 2);

	store.dispose_systems();
	assert!(store.get::<Counter>().unwrap().is_disposed());
	assert!(matches!(store.run_systems(), Err(EcsError::InvalidState(_))));
}

#[test]
pub fn failed_setup_can_be_retried() {
	let mut store = SystemStore::new();
	let system = EntitySystem::builder(Recorder::default()).expect::<(Velocity,)>().build(store.ids()).unwrap();
	store.add_system(system).unwrap();

	let empty = Arc::new(Context::builder().build());
	assert!(matches!(store.setup_systems(empty), Err(EcsError::MissingComponentManager { .. })));
	assert!(matches!(store.run_systems(), Err(EcsError::InvalidState(_))));

	let stores = Stores::new();
	store.setup_systems(stores.context()).unwrap();
	store.run_systems().unwrap();
	assert_eq!(store.get::<Recorder>().unwrap().logic().processed, vec![0]);
}

#[test]
pub fn notify_fans_out_to_every_system() {
	let stores = Stores::new();
	let mut store = SystemStore::new();
	store.add_system(EntitySystem::builder(Recorder::default()).expect::<(Position,)>().build(store.ids()).unwrap()).unwrap();
	store.add_system(EntitySystem::builder(Counter::default()).exclude::<(Dead,)>().build(store.ids()).unwrap()).unwrap();
	store.setup_systems(stores.context()).unwrap();

	let mut registry = crate::entities::EntityRegistry::new();
	let e = registry.create_entity();
	stores.positions.insert(&e, Position::default());
	store.notify(EntityEvent::Added, &e);
	assert_eq!(e.system_indexes().len(), 2);

	stores.dead.insert(&e, Dead);
	store.notify(EntityEvent::Changed, &e);
	assert_eq!(e.system_indexes().len(), 1);

	store.get_mut::<Recorder>().unwrap().set_passive(true);
	assert!(store.get::<Recorder>().unwrap().is_passive());
}

#[test]
pub fn world_publishes_component_changes() {
	let stores = Stores::new();
	let mut world = world(&stores);
	let system = EntitySystem::builder(Recorder::default())
		.expect::<(Position,)>()
		.exclude::<(Dead,)>()
		.build(world.ids())
		.unwrap();
	world.register_system(system).unwrap();
	world.setup_systems().unwrap();

	let e = world.create_entity();
	assert_eq!(world.add_component(&e, Position(1.0, 1.0)).unwrap(), None);
	assert_eq!(world.add_component(&e, Position(2.0, 2.0)).unwrap(), Some(Position(1.0, 1.0)));
	assert_eq!(world.systems().get::<Recorder>().unwrap().logic().inserted, vec![e.id()]);

	world.add_component(&e, Dead).unwrap();
	assert!(!world.systems().get::<Recorder>().unwrap().actives().contains(&e));

	assert!(world.remove_component::<Dead>(&e).unwrap().is_some());
	assert!(world.remove_component::<Dead>(&e).unwrap().is_none());
	assert!(world.systems().get::<Recorder>().unwrap().actives().contains(&e));

	world.run_systems().unwrap();
	assert_eq!(world.systems().get::<Recorder>().unwrap().logic().processed, vec![1]);

	world.dispose();
	assert_eq!(world.systems().get::<Recorder>().unwrap().logic().disposals, 1);
}

#[test]
pub fn disabled_entities_are_reevaluated_on_enable() {
	let stores = Stores::new();
	let mut world = world(&stores);
	let system = EntitySystem::builder(Recorder::default()).expect::<(Position,)>().build(world.ids()).unwrap();
	world.register_system(system).unwrap();
	world.setup_systems().unwrap();

	let e = world.create_entity();
	world.add_component(&e, Position::default()).unwrap();
	world.disable(&e).unwrap();
	world.disable(&e).unwrap();

	let recorder = world.systems().get::<Recorder>().unwrap();
	assert!(recorder.actives().is_empty());
	assert_eq!(recorder.logic().removed.len(), 1);

	world.add_component(&e, Velocity::default()).unwrap();
	assert!(world.systems().get::<Recorder>().unwrap().actives().is_empty(), "Disabled entities stay out");

	world.enable(&e).unwrap();
	assert!(world.systems().get::<Recorder>().unwrap().actives().contains(&e));
	assert!(world.is_enabled(&e).unwrap());
}

#[test]
pub fn world_rejects_unknown_entities_and_components() {
	#[derive(crate::components::Component)]
	struct Unregistered;

	let stores = Stores::new();
	let mut world = world(&stores);
	let e = world.create_entity();

	assert!(matches!(
		world.add_component(&e, Unregistered),
		Err(EcsError::UnregisteredComponent(kind)) if kind.name() == "Unregistered"
	));

	let ghost = crate::tests::common::entity(1000);
	assert!(matches!(world.add_component(&ghost, Dead), Err(EcsError::UnknownEntity(EntityId(1000)))));
	assert!(matches!(world.enable(&ghost), Err(EcsError::UnknownEntity(_))));
	assert_eq!(world.len(), 1);
}

#[test]
pub fn setup_picks_up_existing_entities() {
	let stores = Stores::new();
	let mut world = world(&stores);
	let system = EntitySystem::builder(Recorder::default()).expect::<(Position,)>().build(world.ids()).unwrap();
	world.register_system(system).unwrap();

	let early = world.create_entity();
	world.add_component(&early, Position::default()).unwrap();
	let asleep = world.create_entity();
	world.add_component(&asleep, Position::default()).unwrap();
	world.disable(&asleep).unwrap();
	let bare = world.create_entity();

	world.setup_systems().unwrap();
	let recorder = world.systems().get::<Recorder>().unwrap();
	assert!(recorder.actives().contains(&early), "Entities created before setup must be evaluated");
	assert!(!recorder.actives().contains(&asleep), "Disabled entities wait until they are enabled");
	assert!(!recorder.actives().contains(&bare));
	assert!(early.is_member_of(recorder.id()));

	world.run_systems().unwrap();
	assert_eq!(world.systems().get::<Recorder>().unwrap().logic().processed, vec![1]);

	world.enable(&asleep).unwrap();
	assert_eq!(world.systems().get::<Recorder>().unwrap().actives().len(), 2);
}
