//! # Component — Typed Data Attached to Entities
//!
//! A component is a plain value owned by exactly one entity, tagged by its
//! concrete Rust type. Types opt in by implementing the [`Component`] marker
//! trait; storage inside the [`World`](super::world::World) is type-erased
//! (`Box<dyn Any>`) and keyed by a small integer assigned per type.
//!
//! ## Component Masks
//!
//! Every registered component type owns one bit in a fixed-width
//! [`ComponentMask`]. Each entity caches the OR of the bits of its attached
//! components, and each system precomputes the OR of the bits of the types it
//! requires. Matching an entity against a system is then a single AND:
//!
//! ```text
//! entity mask:  0b0000_0111   (Transform | Velocity | Name)
//! system mask:  0b0000_0011   (Transform | Velocity)
//! entity & system == system  →  process this entity
//! ```
//!
//! The mask width caps the number of distinct component types per world at
//! [`MAX_COMPONENT_TYPES`]. Going past the cap is a configuration error and
//! fails fast — see [`registry`](super::registry).

use std::fmt;

/// Maximum number of distinct component types a [`World`](super::world::World)
/// can register. One bit of [`ComponentMask`] per type.
pub const MAX_COMPONENT_TYPES: usize = 32;

/// Marker trait for types that can be attached to entities (or stored as
/// singletons). Mirrors the "is a component" capability — implement it for
/// every plain-data type you intend to hand to the world:
///
/// ```ignore
/// struct Velocity { x: f32, y: f32 }
/// impl Component for Velocity {}
/// ```
pub trait Component: 'static {}

/// Index of a registered component type. Doubles as the type's bit position
/// in a [`ComponentMask`]. Assigned first-registration-wins by the world's
/// registry.
pub type ComponentTypeId = usize;

/// A fixed-width bit vector encoding a set of component types.
///
/// `Copy` and cheap to compare — systems keep one around for the lifetime of
/// the world and test entities against it every frame.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct ComponentMask(u32);

impl ComponentMask {
    /// The empty mask: no component types set.
    pub const EMPTY: Self = Self(0);

    /// The mask with only the given type's bit set.
    ///
    /// # Panics
    ///
    /// Panics if `type_id` is outside the supported bit range.
    pub fn single(type_id: ComponentTypeId) -> Self {
        assert!(
            type_id < MAX_COMPONENT_TYPES,
            "Component type id {} out of range (max {})",
            type_id,
            MAX_COMPONENT_TYPES
        );
        Self(1 << type_id)
    }

    /// Returns a copy with the given type's bit set.
    pub fn with(self, type_id: ComponentTypeId) -> Self {
        Self(self.0 | Self::single(type_id).0)
    }

    /// Set the given type's bit in place.
    pub fn insert(&mut self, type_id: ComponentTypeId) {
        self.0 |= Self::single(type_id).0;
    }

    /// Clear the given type's bit in place.
    pub fn remove(&mut self, type_id: ComponentTypeId) {
        self.0 ^= Self::single(type_id).0 & self.0;
    }

    /// Returns `true` if the given type's bit is set.
    pub fn has(self, type_id: ComponentTypeId) -> bool {
        self.0 & Self::single(type_id).0 != 0
    }

    /// Returns `true` if every bit of `required` is also set in `self` —
    /// the superset test systems use to filter entities.
    pub fn contains(self, required: Self) -> bool {
        self.0 & required.0 == required.0
    }

    /// Returns `true` if no bits are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Clear all bits.
    pub fn clear(&mut self) {
        self.0 = 0;
    }
}

impl std::ops::BitOr for ComponentMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for ComponentMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAnd for ComponentMask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Debug for ComponentMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentMask({:#034b})", self.0)
    }
}

/// A human-readable name attached to an entity.
///
/// Added by [`World::create_named_entity`](super::world::World::create_named_entity)
/// and matched by [`World::find_entity`](super::world::World::find_entity).
/// Lookup is a linear scan comparing these values — fine for console commands
/// and scripting hooks, not meant for per-frame hot paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(pub String);

impl Component for Name {}

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_bit_masks_are_disjoint() {
        for a in 0..MAX_COMPONENT_TYPES {
            for b in 0..MAX_COMPONENT_TYPES {
                if a != b {
                    assert!((ComponentMask::single(a) & ComponentMask::single(b)).is_empty());
                }
            }
        }
    }

    #[test]
    fn insert_and_remove_roundtrip() {
        let mut mask = ComponentMask::EMPTY;
        mask.insert(3);
        mask.insert(7);
        assert!(mask.has(3));
        assert!(mask.has(7));
        assert!(!mask.has(5));

        mask.remove(3);
        assert!(!mask.has(3));
        assert!(mask.has(7));
    }

    #[test]
    fn remove_absent_bit_is_a_no_op() {
        let mut mask = ComponentMask::single(2);
        mask.remove(9);
        assert_eq!(mask, ComponentMask::single(2));
    }

    #[test]
    fn superset_test() {
        let required = ComponentMask::single(0).with(1);

        let exact = ComponentMask::single(0).with(1);
        let superset = exact.with(4);
        let subset = ComponentMask::single(0);
        let disjoint = ComponentMask::single(2).with(3);

        assert!(exact.contains(required));
        assert!(superset.contains(required));
        assert!(!subset.contains(required));
        assert!(!disjoint.contains(required));
    }

    #[test]
    fn empty_mask_is_contained_in_everything() {
        assert!(ComponentMask::EMPTY.contains(ComponentMask::EMPTY));
        assert!(ComponentMask::single(5).contains(ComponentMask::EMPTY));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn out_of_range_bit_panics() {
        ComponentMask::single(MAX_COMPONENT_TYPES);
    }
}
