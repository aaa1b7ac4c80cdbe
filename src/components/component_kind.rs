//! A name-keyed identifier of a category of [Component] data.
//!
//! [Component kinds](ComponentKind) are what an [aspect](crate::systems::Aspect) is made of,
//! and what a [Context](crate::context::Context) resolves to a [manager](crate::components::ComponentManager).
//! Two kinds are equal when their names are equal.

use std::borrow::{Borrow, Cow};
use std::fmt;

/// The name of a category of data an [entity](crate::entities::Entity) may or may not carry.
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Clone, Debug)]
pub struct ComponentKind {
	name: Cow<'static, str>,
}

impl ComponentKind {
	/// Create a [ComponentKind] from its name.
	#[inline(always)]
	pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
		Self { name: name.into() }
	}

	/// Get the [ComponentKind] of the type `T`.
	#[inline(always)]
	pub fn of<T: Component>() -> Self {
		T::kind()
	}

	pub fn name(&self) -> &str {
		&self.name
	}
}

impl fmt::Display for ComponentKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.name)
	}
}

impl Borrow<str> for ComponentKind {
	fn borrow(&self) -> &str {
		&self.name
	}
}

impl From<&'static str> for ComponentKind {
	fn from(name: &'static str) -> Self {
		Self::new(name)
	}
}

impl From<String> for ComponentKind {
	fn from(name: String) -> Self {
		Self::new(name)
	}
}

/// A piece of data that can be attached to an [entity](crate::entities::Entity).
///
/// Usually implemented through #\[derive([`Component`])], which names the kind after the type.
pub trait Component
where
	Self: 'static + Send + Sync,
{
	fn kind() -> ComponentKind;
}

#[cfg(test)]
mod tests {
	use crate::components::{Component, ComponentKind};

	#[derive(Component)]
	struct Position;

	#[derive(Component)]
	struct Tag<T>(std::marker::PhantomData<T>);

	#[test]
	fn derived_kind_is_named_after_the_type() {
		assert_eq!(ComponentKind::of::<Position>(), ComponentKind::new("Position"));
		assert_eq!(Position::kind().name(), "Position");
		assert_eq!(Position::kind().to_string(), "Position");
	}

	#[test]
	fn kinds_compare_by_name() {
		let dynamic = ComponentKind::from(String::from("Velocity"));
		assert_eq!(dynamic, ComponentKind::from("Velocity"));
		assert_ne!(dynamic, ComponentKind::from("Position"));
	}

	#[test]
	fn generic_instantiations_are_distinct_kinds() {
		assert_ne!(Tag::<u8>::kind(), Tag::<u16>::kind());
		assert_eq!(Tag::<u8>::kind(), ComponentKind::of::<Tag<u8>>());
		assert!(Tag::<u8>::kind().name().contains("u8"));
	}
}
