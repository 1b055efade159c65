//! # System — Per-Frame Logic Over Matching Entities
//!
//! A system is an object the [`World`](super::world::World) owns and invokes
//! once per frame, in registration order. Each system declares up front which
//! component types it cares about by precomputing a required
//! [`ComponentMask`] (typically in its constructor, via
//! [`World::component_mask`](super::world::World::component_mask)); every
//! frame it walks the world's active-entity snapshot and processes the
//! entities whose cached mask is a superset of its own.
//!
//! ## Design Philosophy
//!
//! Many ECS frameworks make systems complex — parameter injection, dependency
//! graphs, parallel scheduling. We keep it radically simple:
//!
//! - A system is a boxed trait object with an `update(dt, world)` entry point.
//! - Systems run strictly sequentially; registration order IS priority.
//! - Filtering is one bitwise AND per entity, against a mask computed once.
//!
//! A system that needs another system's output for the same frame must simply
//! be registered after it.
//!
//! ## The update idiom
//!
//! ```ignore
//! impl System for MovementSystem {
//!     fn required_mask(&self) -> ComponentMask {
//!         self.mask
//!     }
//!
//!     fn update(&mut self, dt: f32, world: &mut World) {
//!         for id in world.active_entities().to_vec() {
//!             if !self.should_process_entity(world, id) {
//!                 continue;
//!             }
//!             let velocity = *world.get_component::<Velocity>(id);
//!             world.get_component_mut::<Transform>(id).translation += velocity.0 * dt;
//!         }
//!     }
//! }
//! ```
//!
//! The snapshot is copied out (`to_vec`) so the loop body is free to mutate
//! the world — create entities, add or remove components, destroy entities.
//! Creations land in a buffer the world merges after this system returns;
//! destructions take effect at the next frame's sweep.

use std::any::TypeId;

use super::component::ComponentMask;
use super::entity::EntityId;
use super::world::World;

/// A unit of per-frame logic. Implementors are registered with
/// [`World::add_system`](super::world::World::add_system) and driven by
/// [`World::update`](super::world::World::update).
pub trait System: 'static {
    /// The component types this system requires, folded into a mask once at
    /// construction time. Must be stable across the system's lifetime.
    fn required_mask(&self) -> ComponentMask;

    /// Called once per frame with the inter-frame delta time in seconds.
    fn update(&mut self, dt: f32, world: &mut World);

    /// Returns `true` if the entity carries at least every component this
    /// system declared interest in (extra components are fine).
    ///
    /// # Panics
    ///
    /// Panics if `id` is null or unknown to the world.
    fn should_process_entity(&self, world: &World, id: EntityId) -> bool {
        world
            .component_mask_for_entity(id)
            .contains(self.required_mask())
    }
}

/// A registered system: the boxed instance plus the identity the world needs
/// to remove it by type and label its timings.
pub(crate) struct SystemSlot {
    /// Concrete type of the boxed system, captured at registration.
    pub type_id: TypeId,
    /// Short type name for timing labels and logs.
    pub name: &'static str,
    pub system: Box<dyn System>,
}

impl SystemSlot {
    pub fn new<S: System>(system: S) -> Self {
        Self {
            type_id: TypeId::of::<S>(),
            name: short_type_name(std::any::type_name::<S>()),
            system: Box::new(system),
        }
    }
}

/// Strip the module path from a fully-qualified type name, keeping only the
/// short name (e.g. `demo::systems::MovementSystem` → `MovementSystem`).
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    full.rsplit("::").next().unwrap_or(full)
}
