//! A unique identifier for an [entity system](crate::systems::EntitySystem).
//!
//! A [SystemId] doubles as the system's slot in every entity's
//! [system indexes](crate::entities::SystemIndexes), so ids are kept small and dense.
//! They are handed out by an explicit [SystemIdAllocator] instead of a global counter,
//! which keeps construction order-independent and lets tests run in isolation.

use std::sync::atomic::Ordering::Relaxed;
use std::sync::atomic::AtomicU32;
use std::fmt;

#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug)]
pub struct SystemId(pub(crate) u32);

impl SystemId {
	#[inline(always)]
	pub const fn value(&self) -> u32 {
		self.0
	}

	#[inline(always)]
	pub(crate) const fn index(&self) -> usize {
		self.0 as usize
	}
}

impl fmt::Display for SystemId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "system #{}", self.0)
	}
}

/// Issues monotonically increasing [system ids](SystemId).
///
/// Systems sharing entities must draw their ids from the same allocator.
#[derive(Default, Debug)]
pub struct SystemIdAllocator {
	next: AtomicU32,
}

impl SystemIdAllocator {
	pub fn new() -> Self {
		Self::default()
	}

	/// Generates a new [SystemId].
	pub fn next_id(&self) -> SystemId {
		let value = self.next.fetch_add(1, Relaxed);
		debug_assert!(
			value < u32::MAX,
			"This is an insane number of systems. Please seek help."
		);
		SystemId(value)
	}

	/// The number of ids issued so far.
	pub fn issued(&self) -> u32 {
		self.next.load(Relaxed)
	}
}
