//! # Type Registry — Stable Bit Assignment for Component Types
//!
//! Maps each concrete component type to its [`ComponentTypeId`] (and thus its
//! bit in a [`ComponentMask`]). Assignment is first-registration-wins: the
//! first time a type is referenced — by an `add_component`, a mask
//! calculation, or explicitly — it takes the next free bit.
//!
//! ```text
//! register::<Transform>()  → bit 0
//! register::<Velocity>()   → bit 1
//! register::<Transform>()  → bit 0   (already known)
//! register::<Name>()       → bit 2
//! ```
//!
//! The registry lives inside each [`World`](super::world::World), so two
//! worlds may assign the same type different bits. That's fine: masks are
//! never exchanged between worlds, and within one world the assignment is
//! deterministic in call order (systems compute their masks in construction
//! order, which is fixed).
//!
//! Registering more than [`MAX_COMPONENT_TYPES`] distinct types is a
//! configuration error and panics immediately rather than silently dropping
//! a type.

use std::any::TypeId;
use std::collections::HashMap;

use super::component::{Component, ComponentMask, ComponentTypeId, MAX_COMPONENT_TYPES};
use super::world::World;

/// Per-world table of registered component types.
pub(crate) struct TypeRegistry {
    /// Rust type → assigned index/bit.
    ids: HashMap<TypeId, ComponentTypeId>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self { ids: HashMap::new() }
    }

    /// Look up or assign the id for `T`.
    ///
    /// # Panics
    ///
    /// Panics if `T` is unseen and all [`MAX_COMPONENT_TYPES`] bits are taken.
    pub fn register<T: Component>(&mut self) -> ComponentTypeId {
        if let Some(&id) = self.ids.get(&TypeId::of::<T>()) {
            return id;
        }
        let id = self.ids.len();
        assert!(
            id < MAX_COMPONENT_TYPES,
            "Component type capacity ({}) exceeded while registering `{}`",
            MAX_COMPONENT_TYPES,
            std::any::type_name::<T>()
        );
        self.ids.insert(TypeId::of::<T>(), id);
        log::trace!(
            "Registered component type `{}` as bit {}",
            std::any::type_name::<T>(),
            id
        );
        id
    }

    /// Look up the id for `T` without registering it. Returns `None` for
    /// unseen types — the safe path for existence probes.
    pub fn lookup<T: Component>(&self) -> Option<ComponentTypeId> {
        self.ids.get(&TypeId::of::<T>()).copied()
    }

    /// Number of registered types.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

/// A set of component types, used to fold a filter mask in one call:
///
/// ```ignore
/// let mask = world.component_mask::<(Transform, Velocity)>();
/// ```
///
/// Implemented for tuples of [`Component`] types up to 8 elements. Any type
/// in the set that the world hasn't seen yet is registered on the spot.
pub trait ComponentSet {
    fn usage_mask(world: &mut World) -> ComponentMask;
}

macro_rules! impl_component_set {
    ($($T:ident),+) => {
        impl<$($T: Component),+> ComponentSet for ($($T,)+) {
            fn usage_mask(world: &mut World) -> ComponentMask {
                ComponentMask::EMPTY $(| world.register_component_type::<$T>())+
            }
        }
    };
}

impl_component_set!(A);
impl_component_set!(A, B);
impl_component_set!(A, B, C);
impl_component_set!(A, B, C, D);
impl_component_set!(A, B, C, D, E);
impl_component_set!(A, B, C, D, E, F);
impl_component_set!(A, B, C, D, E, F, G);
impl_component_set!(A, B, C, D, E, F, G, H);
