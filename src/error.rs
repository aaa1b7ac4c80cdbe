use crate::components::ComponentKind;
use crate::entities::EntityId;
use crate::systems::SystemId;
use thiserror::Error;

/// Which part of an [aspect](crate::systems::Aspect) a [ComponentKind] was declared in.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AspectRole {
	Expected,
	Excluded,
	Optional,
}

impl std::fmt::Display for AspectRole {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			AspectRole::Expected => "expected",
			AspectRole::Excluded => "excluded",
			AspectRole::Optional => "optional",
		};
		f.write_str(name)
	}
}

#[derive(Error, Debug)]
pub enum EcsError {
	#[error("Component kind '{kind}' is declared both {first} and {second}")]
	AspectOverlap {
		kind: ComponentKind,
		first: AspectRole,
		second: AspectRole,
	},

	#[error("System '{system}' ({id}) depends on component kind '{kind}', which has no manager in its context")]
	MissingComponentManager {
		system: String,
		id: SystemId,
		kind: ComponentKind,
	},

	#[error("System '{0}' was processed again before its previous pass completed")]
	ReentrantProcess(String),

	#[error("System '{0}' must be initialized before it can run")]
	NotInitialized(String),

	#[error("System '{0}' has been disposed")]
	Disposed(String),

	#[error("System '{0}' was already added to the current store")]
	DuplicateSystem(String),

	#[error("Invalid state: {0}")]
	InvalidState(String),

	#[error("No component store is registered for '{0}'")]
	UnregisteredComponent(ComponentKind),

	#[error("Unknown entity {0}")]
	UnknownEntity(EntityId),
}

pub type Result<T> = std::result::Result<T, EcsError>;
