//! # World — The Central Simulation Container
//!
//! The [`World`] owns all entities, their components, the singleton
//! components, and the registered systems. It is an explicit context object:
//! everything that touches simulation state receives a `&mut World`, there is
//! no hidden global instance, and independent worlds can coexist (which is
//! what the tests do).
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ World                                                    │
//! │                                                          │
//! │  registry: TypeRegistry                                  │
//! │    component type → bit in ComponentMask                 │
//! │                                                          │
//! │  entities: HashMap<EntityId, EntityEntry>                │
//! │    entry = { components, cached mask, status }           │
//! │                                                          │
//! │  singletons: HashMap<TypeId, Box<dyn Any>>               │
//! │    exactly-one-instance global state, unmasked           │
//! │                                                          │
//! │  systems: Vec<SystemSlot>                                │
//! │    registration order is invocation order                │
//! │                                                          │
//! │  active_entities: Vec<EntityId>                          │
//! │    per-frame snapshot systems iterate over               │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The frame protocol
//!
//! [`World::update`] runs one fixed sequence per tick:
//!
//! 1. One-time initialization on the very first call (the mid-frame creation
//!    buffer is cleared, since anything created before the first update is
//!    already part of the registry snapshot).
//! 2. Systems previously flagged via [`World::mark_system_for_removal`] are
//!    erased.
//! 3. Dead entities are swept out of the registry.
//! 4. The active-entity snapshot is rebuilt from the registry.
//! 5. Each system runs in registration order. After *each* system returns,
//!    entities it created are appended to the snapshot, so systems later in
//!    the same frame see them. Entities created by the last system surface
//!    at the next frame's snapshot.
//!
//! Destruction is deferred: [`World::destroy_entity`] empties the entity on
//! the spot but leaves its registry entry until the next sweep, so the id
//! stays safely probeable (with an empty mask) for the rest of the frame.
//!
//! ## Mutation while iterating
//!
//! Systems iterate a copy of the snapshot and mutate the world freely. The
//! one mutation that would invalidate iteration — growing the active set —
//! is buffered and committed only between systems. This is deliberate: the
//! synchronization points are fixed and observable, never mid-loop.

use std::any::{Any, TypeId};
use std::collections::HashMap;
#[cfg(feature = "diagnostics")]
use std::time::{Duration, Instant};

use super::component::{Component, ComponentMask, ComponentTypeId, Name};
use super::entity::EntityId;
use super::registry::{ComponentSet, TypeRegistry};
use super::system::{System, SystemSlot};

/// Initial capacity reserved for the entity registry so steady-state play
/// doesn't pay for rehashing.
const ANTICIPATED_ENTITY_COUNT: usize = 1000;

/// Explicit lifecycle state of a registry entry.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum EntityStatus {
    Active,
    /// Destroyed this frame; swept from the registry at the next update.
    PendingDestroy,
}

/// Everything the world keeps per entity.
struct EntityEntry {
    /// Owned components, keyed by registered type id.
    components: HashMap<ComponentTypeId, Box<dyn Any>>,
    /// Cached OR of the masks of all currently-attached component types.
    /// Updated in lockstep with every add/remove.
    mask: ComponentMask,
    status: EntityStatus,
}

impl EntityEntry {
    fn new() -> Self {
        Self {
            components: HashMap::new(),
            mask: ComponentMask::EMPTY,
            status: EntityStatus::Active,
        }
    }

    /// An entry is dead once destroyed, or when it never received any
    /// component at all — both are collected by the sweep.
    fn is_dead(&self) -> bool {
        self.status == EntityStatus::PendingDestroy || self.components.is_empty()
    }
}

/// The central ECS context. See the module docs for the frame protocol.
///
/// Not `Send`/`Sync` by design: all access is single-threaded, synchronous,
/// and lock-free. Hosts that do background work (asset loading and the like)
/// must marshal results back onto the update thread before touching the
/// world.
pub struct World {
    registry: TypeRegistry,
    entities: HashMap<EntityId, EntityEntry>,
    singletons: HashMap<TypeId, Box<dyn Any>>,
    systems: Vec<SystemSlot>,
    /// Concrete types flagged for erasure at the start of the next update.
    systems_marked_for_removal: Vec<TypeId>,
    /// The frame-stable snapshot systems iterate over.
    active_entities: Vec<EntityId>,
    /// Entities created while systems are running; committed into the
    /// snapshot after each system returns.
    added_during_update: Vec<EntityId>,
    /// True only while `update` is dispatching systems.
    running_systems: bool,
    has_run_first_update: bool,
    /// Next id to issue. Starts at 1; 0 is the null id. Never recycled.
    next_entity_id: u64,
    /// Wall-clock duration of each system's most recent update, keyed by the
    /// system's short type name.
    #[cfg(feature = "diagnostics")]
    system_update_times: HashMap<&'static str, Duration>,
}

impl World {
    pub fn new() -> Self {
        Self {
            registry: TypeRegistry::new(),
            entities: HashMap::with_capacity(ANTICIPATED_ENTITY_COUNT),
            singletons: HashMap::new(),
            systems: Vec::new(),
            systems_marked_for_removal: Vec::new(),
            active_entities: Vec::new(),
            added_during_update: Vec::new(),
            running_systems: false,
            has_run_first_update: false,
            next_entity_id: 1,
            #[cfg(feature = "diagnostics")]
            system_update_times: HashMap::new(),
        }
    }

    // ── Component type registration ──────────────────────────────────

    /// Look up or assign the mask bit for component type `T` and return its
    /// single-bit mask.
    ///
    /// Registration is lazy everywhere else (`add_component` and mask
    /// calculations register on first contact), so calling this explicitly
    /// is only needed to pin assignment order.
    ///
    /// # Panics
    ///
    /// Panics if the world already holds [`MAX_COMPONENT_TYPES`] distinct
    /// component types.
    ///
    /// [`MAX_COMPONENT_TYPES`]: super::component::MAX_COMPONENT_TYPES
    pub fn register_component_type<T: Component>(&mut self) -> ComponentMask {
        ComponentMask::single(self.registry.register::<T>())
    }

    /// Fold the masks of a set of component types via bitwise OR,
    /// registering any the world hasn't seen yet. Systems call this once in
    /// their constructor and reuse the result every frame:
    ///
    /// ```ignore
    /// let mask = world.component_mask::<(Transform, Velocity)>();
    /// ```
    pub fn component_mask<S: ComponentSet>(&mut self) -> ComponentMask {
        S::usage_mask(self)
    }

    // ── Entity lifecycle ─────────────────────────────────────────────

    /// Create a fresh entity and return its id.
    ///
    /// When called while systems are running, the id lands in the mid-frame
    /// buffer and joins the active set after the current system returns;
    /// otherwise it joins the active set immediately.
    pub fn create_entity(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        self.entities.insert(id, EntityEntry::new());

        if self.running_systems {
            self.added_during_update.push(id);
        } else {
            self.active_entities.push(id);
        }
        id
    }

    /// Create an entity that also carries a [`Name`] component, so it can be
    /// found later with [`World::find_entity`].
    pub fn create_named_entity(&mut self, name: impl Into<String>) -> EntityId {
        let id = self.create_entity();
        self.add_component(id, Name::new(name));
        id
    }

    /// Find an entity by the value of its [`Name`] component. Returns
    /// [`EntityId::NULL`] when no entity matches.
    ///
    /// Linear scan — intended for console commands and scripting hooks, not
    /// per-frame hot paths.
    pub fn find_entity(&self, name: &str) -> EntityId {
        let Some(name_type) = self.registry.lookup::<Name>() else {
            return EntityId::NULL;
        };
        for (&id, entry) in &self.entities {
            if let Some(component) = entry.components.get(&name_type) {
                if component.downcast_ref::<Name>().unwrap().as_str() == name {
                    return id;
                }
            }
        }
        EntityId::NULL
    }

    /// Destroy an entity: its components are dropped and its mask cleared
    /// immediately, but the id remains known to the world (safe to probe,
    /// reported by [`World::entity_count`]) until the sweep at the start of
    /// the next update removes it for good.
    ///
    /// # Panics
    ///
    /// Panics if `id` is null, unknown, or already destroyed this frame.
    pub fn destroy_entity(&mut self, id: EntityId) {
        let entry = entry_mut(&mut self.entities, id, "Entity destruction");
        assert!(
            entry.status == EntityStatus::Active,
            "Entity {} has already been destroyed this frame",
            id
        );
        entry.components.clear();
        entry.mask.clear();
        entry.status = EntityStatus::PendingDestroy;
    }

    /// Number of entities currently known to the registry, including
    /// destroyed entities that have not been swept yet.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// The current frame's active-entity snapshot, in registry iteration
    /// order (unspecified, but stable within a frame). Systems copy this out
    /// (`.to_vec()`) before iterating so they are free to mutate the world.
    pub fn active_entities(&self) -> &[EntityId] {
        &self.active_entities
    }

    // ── Per-entity component access ──────────────────────────────────

    /// Attach a component, transferring ownership to the entity. Registers
    /// `T`'s mask bit if this is the first time the world sees the type.
    ///
    /// # Panics
    ///
    /// Panics if `id` is null, unknown, or pending destruction, or if the
    /// entity already owns a `T`.
    pub fn add_component<T: Component>(&mut self, id: EntityId, component: T) {
        let type_id = self.registry.register::<T>();
        let entry = entry_mut(&mut self.entities, id, "Component addition");
        assert!(
            entry.status == EntityStatus::Active,
            "Component `{}` added to entity {} which is pending destruction",
            std::any::type_name::<T>(),
            id
        );
        assert!(
            !entry.components.contains_key(&type_id),
            "Component `{}` is already present in entity {}'s component store",
            std::any::type_name::<T>(),
            id
        );
        entry.components.insert(type_id, Box::new(component));
        entry.mask.insert(type_id);
    }

    /// Detach and drop the entity's `T` component.
    ///
    /// # Panics
    ///
    /// Panics if `id` is null or unknown, or the entity owns no `T`.
    pub fn remove_component<T: Component>(&mut self, id: EntityId) {
        let type_id = self.registry.lookup::<T>();
        let entry = entry_mut(&mut self.entities, id, "Component removal");
        let removed = type_id.and_then(|type_id| {
            entry.components.remove(&type_id).map(|_| type_id)
        });
        match removed {
            Some(type_id) => entry.mask.remove(type_id),
            None => panic!(
                "Component `{}` is not present in entity {}'s component store",
                std::any::type_name::<T>(),
                id
            ),
        }
    }

    /// Borrow the entity's `T` component.
    ///
    /// This is the zero-overhead accessor: it never branches on existence for
    /// the caller. When unsure, check [`World::has_component`] first.
    ///
    /// # Panics
    ///
    /// Panics if `id` is null or unknown, or the entity owns no `T`.
    pub fn get_component<T: Component>(&self, id: EntityId) -> &T {
        let entry = entry(&self.entities, id, "Component access");
        self.registry
            .lookup::<T>()
            .and_then(|type_id| entry.components.get(&type_id))
            .unwrap_or_else(|| missing_component::<T>(id))
            .downcast_ref::<T>()
            .unwrap()
    }

    /// Mutably borrow the entity's `T` component. Same contract as
    /// [`World::get_component`].
    pub fn get_component_mut<T: Component>(&mut self, id: EntityId) -> &mut T {
        let type_id = self.registry.lookup::<T>();
        let entry = entry_mut(&mut self.entities, id, "Component access");
        type_id
            .and_then(|type_id| entry.components.get_mut(&type_id))
            .unwrap_or_else(|| missing_component::<T>(id))
            .downcast_mut::<T>()
            .unwrap()
    }

    /// Returns `true` if the entity currently owns a `T`. A bit test against
    /// the cached mask; types the world has never seen simply report `false`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is null or unknown.
    pub fn has_component<T: Component>(&self, id: EntityId) -> bool {
        let entry = entry(&self.entities, id, "Component check");
        match self.registry.lookup::<T>() {
            Some(type_id) => entry.mask.has(type_id),
            None => false,
        }
    }

    /// The entity's cached component mask: the OR of the mask bits of every
    /// component currently attached.
    ///
    /// # Panics
    ///
    /// Panics if `id` is null or unknown.
    pub fn component_mask_for_entity(&self, id: EntityId) -> ComponentMask {
        entry(&self.entities, id, "Mask calculation").mask
    }

    // ── Singleton components ─────────────────────────────────────────

    /// Store the single instance of `T` global state, taking ownership.
    ///
    /// # Panics
    ///
    /// Panics if a `T` singleton already exists — double-initialization of a
    /// module's global state is a defect, not something to paper over.
    pub fn set_singleton<T: Component>(&mut self, component: T) {
        assert!(
            !self.singletons.contains_key(&TypeId::of::<T>()),
            "A singleton component of type `{}` already exists in the world",
            std::any::type_name::<T>()
        );
        self.singletons.insert(TypeId::of::<T>(), Box::new(component));
    }

    /// Borrow the `T` singleton.
    ///
    /// # Panics
    ///
    /// Panics if no `T` singleton has been set.
    pub fn get_singleton<T: Component>(&self) -> &T {
        self.singletons
            .get(&TypeId::of::<T>())
            .unwrap_or_else(|| missing_singleton::<T>())
            .downcast_ref::<T>()
            .unwrap()
    }

    /// Mutably borrow the `T` singleton. Mutations are visible to every
    /// subsequent caller — there is no copy-on-read.
    ///
    /// # Panics
    ///
    /// Panics if no `T` singleton has been set.
    pub fn get_singleton_mut<T: Component>(&mut self) -> &mut T {
        self.singletons
            .get_mut(&TypeId::of::<T>())
            .unwrap_or_else(|| missing_singleton::<T>())
            .downcast_mut::<T>()
            .unwrap()
    }

    /// Returns `true` if a `T` singleton is currently set.
    pub fn has_singleton<T: Component>(&self) -> bool {
        self.singletons.contains_key(&TypeId::of::<T>())
    }

    /// Drop the `T` singleton.
    ///
    /// # Panics
    ///
    /// Panics if no `T` singleton has been set.
    pub fn remove_singleton<T: Component>(&mut self) {
        let removed = self.singletons.remove(&TypeId::of::<T>());
        if removed.is_none() {
            missing_singleton::<T>();
        }
    }

    // ── Systems ──────────────────────────────────────────────────────

    /// Append a system to the end of the system list, taking ownership.
    /// Registration order is invocation order for all future frames.
    pub fn add_system<S: System>(&mut self, system: S) {
        self.systems.push(SystemSlot::new(system));
    }

    /// Flag the system of concrete type `S` for removal. The actual erasure
    /// happens at the start of the next [`World::update`]; flagging a type
    /// that was never registered is a quiet no-op.
    pub fn mark_system_for_removal<S: System>(&mut self) {
        self.systems_marked_for_removal.push(TypeId::of::<S>());
    }

    /// Number of currently registered systems.
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Wall-clock duration of each system's most recent update, keyed by the
    /// system's short type name.
    #[cfg(feature = "diagnostics")]
    pub fn system_update_times(&self) -> &HashMap<&'static str, Duration> {
        &self.system_update_times
    }

    // ── The frame update ─────────────────────────────────────────────

    /// Run one world update: bookkeeping, then every registered system in
    /// order, with `dt` as the inter-frame delta time in seconds.
    ///
    /// See the module docs for the exact per-frame sequence.
    pub fn update(&mut self, dt: f32) {
        if !self.has_run_first_update {
            // Everything created before the first update is already in the
            // active set; the buffer must start the first frame empty.
            self.added_during_update.clear();
            self.has_run_first_update = true;
        }

        self.remove_marked_systems();
        self.sweep_dead_entities();
        self.collect_active_entities();

        #[cfg(feature = "diagnostics")]
        self.system_update_times.clear();

        // The system list is moved out for the duration of the dispatch so
        // each system can receive `&mut World`. Systems registered while the
        // frame runs accumulate in `self.systems` and are spliced back in
        // after the existing ones.
        let mut systems = std::mem::take(&mut self.systems);
        self.running_systems = true;
        for slot in &mut systems {
            #[cfg(feature = "diagnostics")]
            let started = Instant::now();

            slot.system.update(dt, self);

            #[cfg(feature = "diagnostics")]
            self.system_update_times.insert(slot.name, started.elapsed());

            self.commit_added_entities();
        }
        self.running_systems = false;

        systems.append(&mut self.systems);
        self.systems = systems;
    }

    /// Erase every system whose concrete type was flagged since the last
    /// update.
    fn remove_marked_systems(&mut self) {
        if self.systems_marked_for_removal.is_empty() {
            return;
        }
        for type_id in std::mem::take(&mut self.systems_marked_for_removal) {
            self.systems.retain(|slot| {
                if slot.type_id == type_id {
                    log::debug!("Removing system {}", slot.name);
                    false
                } else {
                    true
                }
            });
        }
    }

    /// Drop every registry entry that was destroyed, or that never received
    /// any component. Their ids become permanently invalid.
    fn sweep_dead_entities(&mut self) {
        self.entities.retain(|_, entry| !entry.is_dead());
    }

    /// Rebuild the active-entity snapshot from the registry.
    fn collect_active_entities(&mut self) {
        self.active_entities.clear();
        self.active_entities.reserve(self.entities.len());
        self.active_entities.extend(self.entities.keys());
    }

    /// Append the entities created by the system that just ran, so systems
    /// later in this frame observe them.
    fn commit_added_entities(&mut self) {
        if !self.added_during_update.is_empty() {
            self.active_entities.append(&mut self.added_during_update);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

// ── Shared lookup helpers ────────────────────────────────────────────────

fn entry<'a>(
    entities: &'a HashMap<EntityId, EntityEntry>,
    id: EntityId,
    context: &str,
) -> &'a EntityEntry {
    assert!(!id.is_null(), "{} requested for the null entity id", context);
    entities
        .get(&id)
        .unwrap_or_else(|| panic!("Entity {} does not exist in the world", id))
}

fn entry_mut<'a>(
    entities: &'a mut HashMap<EntityId, EntityEntry>,
    id: EntityId,
    context: &str,
) -> &'a mut EntityEntry {
    assert!(!id.is_null(), "{} requested for the null entity id", context);
    entities
        .get_mut(&id)
        .unwrap_or_else(|| panic!("Entity {} does not exist in the world", id))
}

fn missing_component<T: Component>(id: EntityId) -> ! {
    panic!(
        "Component `{}` is not present in entity {}'s component store",
        std::any::type_name::<T>(),
        id
    )
}

fn missing_singleton<T: Component>() -> ! {
    panic!(
        "No singleton component of type `{}` exists in the world. Did you forget to set it?",
        std::any::type_name::<T>()
    )
}
