//! # Mask-Based ECS Kernel
//!
//! A deliberately simple Entity-Component-System built around component
//! bitmasks rather than archetype tables: every entity keeps a type-erased
//! bag of components plus a cached bitmask of which types it carries, and
//! every system filters the per-frame entity snapshot with one bitwise AND
//! against its own precomputed mask.
//!
//! The design trades iteration throughput for simplicity and cheap
//! add/remove — the opposite bet from [hecs](https://github.com/Ralith/hecs)
//! and [bevy_ecs](https://github.com/bevyengine/bevy), which group entities
//! by component signature to make scans cache-friendly. For worlds of
//! hundreds to a few thousand entities the mask walk is plenty fast, and
//! the frame protocol (deferred destruction, buffered mid-frame creation)
//! stays easy to reason about.
//!
//! ## Module Overview
//!
//! - [`entity`] — Monotonic, never-recycled entity ids
//! - [`component`] — The `Component` marker trait and `ComponentMask`
//! - [`registry`] — First-come type→bit assignment, tuple mask folding
//! - [`system`] — The `System` trait and registration slots
//! - [`world`] — Central container and the per-frame update protocol

pub mod component;
pub mod entity;
pub mod registry;
pub mod system;
pub mod world;

pub use component::{Component, ComponentMask, ComponentTypeId, Name, MAX_COMPONENT_TYPES};
pub use entity::EntityId;
pub use registry::ComponentSet;
pub use system::System;
pub use world::World;
