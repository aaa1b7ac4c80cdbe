use crate::components::{ComponentKind, ComponentSet};
use crate::error::{AspectRole, EcsError, Result};

/// Describes which [entities](crate::entities::Entity) a system cares about.
///
/// An entity matches an [Aspect] when it carries every *expected* kind and none of the *excluded* ones.
/// *Optional* kinds never gate membership; they only declare that the system may look them up while processing.
/// The three sets are pairwise disjoint, and an aspect with no expected and no excluded kinds matches every entity.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Aspect {
	expected: Vec<ComponentKind>,
	excluded: Vec<ComponentKind>,
	optional: Vec<ComponentKind>,
}

impl Aspect {
	/// Start building an [Aspect].
	pub fn build() -> AspectBuilder {
		AspectBuilder::default()
	}

	/// Create an [Aspect] from its three sets.
	/// Duplicates within a set are collapsed; a kind appearing in two sets is an [AspectOverlap](EcsError::AspectOverlap).
	pub fn new(
		expected: impl IntoIterator<Item = ComponentKind>, excluded: impl IntoIterator<Item = ComponentKind>,
		optional: impl IntoIterator<Item = ComponentKind>,
	) -> Result<Self> {
		let aspect = Self {
			expected: dedup(expected),
			excluded: dedup(excluded),
			optional: dedup(optional),
		};
		aspect.check_disjoint()?;
		Ok(aspect)
	}

	/// An [Aspect] matching every entity.
	pub fn all() -> Self {
		Self::default()
	}

	pub fn expected(&self) -> &[ComponentKind] {
		&self.expected
	}

	pub fn excluded(&self) -> &[ComponentKind] {
		&self.excluded
	}

	pub fn optional(&self) -> &[ComponentKind] {
		&self.optional
	}

	/// Returns `true` if the aspect gates nothing, i.e. every entity matches it.
	pub fn matches_all(&self) -> bool {
		self.expected.is_empty() && self.excluded.is_empty()
	}

	/// Iterate over every declared kind with its role: expected first, then excluded, then optional.
	pub fn kinds(&self) -> impl Iterator<Item = (AspectRole, &ComponentKind)> + '_ {
		let expected = self.expected.iter().map(|k| (AspectRole::Expected, k));
		let excluded = self.excluded.iter().map(|k| (AspectRole::Excluded, k));
		let optional = self.optional.iter().map(|k| (AspectRole::Optional, k));
		expected.chain(excluded).chain(optional)
	}

	fn check_disjoint(&self) -> Result<()> {
		let pairs = [
			(AspectRole::Expected, &self.expected, AspectRole::Excluded, &self.excluded),
			(AspectRole::Expected, &self.expected, AspectRole::Optional, &self.optional),
			(AspectRole::Excluded, &self.excluded, AspectRole::Optional, &self.optional),
		];

		for (first, a, second, b) in pairs {
			if let Some(kind) = a.iter().find(|kind| b.contains(kind)) {
				return Err(EcsError::AspectOverlap {
					kind: kind.clone(),
					first,
					second,
				});
			}
		}
		Ok(())
	}
}

/// A utility structure to build [Aspects](Aspect).
#[derive(Default, Clone, Debug)]
pub struct AspectBuilder {
	expected: Vec<ComponentKind>,
	excluded: Vec<ComponentKind>,
	optional: Vec<ComponentKind>,
}

impl AspectBuilder {
	/// Specify which components an entity must include.
	pub fn expect<S: ComponentSet>(mut self) -> Self {
		self.expected.extend(S::kinds());
		self
	}

	/// Specify which components an entity must not include.
	pub fn exclude<S: ComponentSet>(mut self) -> Self {
		self.excluded.extend(S::kinds());
		self
	}

	/// Specify which components a system may look up without them gating membership.
	pub fn optional<S: ComponentSet>(mut self) -> Self {
		self.optional.extend(S::kinds());
		self
	}

	pub fn expect_kind(mut self, kind: impl Into<ComponentKind>) -> Self {
		self.expected.push(kind.into());
		self
	}

	pub fn exclude_kind(mut self, kind: impl Into<ComponentKind>) -> Self {
		self.excluded.push(kind.into());
		self
	}

	pub fn optional_kind(mut self, kind: impl Into<ComponentKind>) -> Self {
		self.optional.push(kind.into());
		self
	}

	/// Construct the [Aspect] from the previously specified kinds.
	pub fn create(self) -> Result<Aspect> {
		Aspect::new(self.expected, self.excluded, self.optional)
	}
}

fn dedup(kinds: impl IntoIterator<Item = ComponentKind>) -> Vec<ComponentKind> {
	let mut unique: Vec<ComponentKind> = Vec::new();
	for kind in kinds {
		if !unique.contains(&kind) {
			unique.push(kind);
		}
	}
	unique
}
