use crate::components::{Component, ComponentKind};

/// A compile-time list of [Component] types.
/// It provides a unified way to declare several [component kinds](ComponentKind) at once,
/// e.g. `.expect::<(Position, Velocity)>()` on an [AspectBuilder](crate::systems::AspectBuilder).
pub trait ComponentSet {
	/// The [kinds](ComponentKind) of every member of the set, in declaration order.
	fn kinds() -> Vec<ComponentKind>;
}

impl ComponentSet for () {
	fn kinds() -> Vec<ComponentKind> {
		Vec::new()
	}
}

macro_rules! impl_component_set {
    ($($t: ident $i: tt),*) => {
        impl <$($t: Component),*> ComponentSet for ($($t),*,) {
            fn kinds() -> Vec<ComponentKind> {
                vec![$(<$t>::kind()),*]
            }
        }
    };
}

impl_component_set!(T0 0);
impl_component_set!(T0 0, T1 1);
impl_component_set!(T0 0, T1 1, T2 2);
impl_component_set!(T0 0, T1 1, T2 2, T3 3);
impl_component_set!(T0 0, T1 1, T2 2, T3 3, T4 4);
impl_component_set!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5);
impl_component_set!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6);
impl_component_set!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7);
impl_component_set!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8);
impl_component_set!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8, T9 9);
impl_component_set!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8, T9 9, T10 10);
impl_component_set!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8, T9 9, T10 10, T11 11);
