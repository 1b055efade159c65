//! # Entity — Lightweight Identifiers for Simulation Objects
//!
//! An [`EntityId`] is just a number — it doesn't "contain" anything. The
//! [`World`](super::world::World) maps entity ids to their components. This
//! separation of identity from data is the core insight of the ECS pattern.
//!
//! ## Design: Monotonic Ids, No Recycling
//!
//! Ids are handed out by a single counter starting at 1 and are never reused
//! for the lifetime of the process. Zero is reserved as the null id
//! ([`EntityId::NULL`]), so safe lookups like
//! [`World::find_entity`](super::world::World::find_entity) have a sentinel
//! to return.
//!
//! ```text
//! counter: 1, 2, 3, 4, ...   ← each create_entity() takes the next value
//! null:    0                  ← never issued, "no such entity"
//! ```
//!
//! Because an id is never issued twice, a stale handle to a destroyed entity
//! can never silently alias a newer entity — the worst it can do is fail the
//! registry lookup. The trade-off is that staleness itself is only detectable
//! by absence: there is no generation counter baked into the handle.
//!
//! ## Comparison
//!
//! - **hecs / bevy_ecs**: pack a slot index plus a generation counter into
//!   the handle so slots can be recycled safely.
//! - **EnTT (C++)**: same packed index + version scheme.
//!
//! We skip the generation machinery entirely: a plain `u64` counter cannot
//! wrap in any realistic session, and "absent from the world" is already an
//! unambiguous answer.

use std::fmt;

/// A lightweight handle to an entity in the [`World`](super::world::World).
///
/// Entity ids are created via
/// [`World::create_entity`](super::world::World::create_entity) and
/// invalidated by
/// [`World::destroy_entity`](super::world::World::destroy_entity) plus the
/// sweep at the start of the next update. An `EntityId` is only meaningful
/// for the `World` that issued it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub(crate) u64);

impl EntityId {
    /// The reserved null id. Never issued to a live entity; returned by safe
    /// lookups to mean "no such entity".
    pub const NULL: Self = Self(0);

    /// Returns `true` if this is the null id.
    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Returns the raw id value. Useful for diagnostics, not for general use.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "EntityId(null)")
        } else {
            write!(f, "EntityId({})", self.0)
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_is_zero() {
        assert!(EntityId::NULL.is_null());
        assert_eq!(EntityId::NULL.raw(), 0);
        assert!(!EntityId(1).is_null());
    }

    #[test]
    fn debug_formatting() {
        assert_eq!(format!("{:?}", EntityId(42)), "EntityId(42)");
        assert_eq!(format!("{:?}", EntityId::NULL), "EntityId(null)");
        assert_eq!(format!("{}", EntityId(7)), "7");
    }
}
