//! Particle fountain — a headless tour of the frame protocol.
//!
//! An emitter system spawns a burst of particles every frame (mid-frame, so
//! the systems registered after it already process them the same tick), a
//! movement system integrates gravity, and a lifetime system destroys
//! expired particles so the next frame's sweep reclaims them.
//!
//! Run with: `cargo run --example particles`

use sindri::prelude::*;

struct Velocity(Vec3);
impl Component for Velocity {}

struct Lifetime(Timer);
impl Component for Lifetime {}

/// Spawns a small burst of particles each frame until the budget runs out.
struct EmitterSystem {
    mask: ComponentMask,
    remaining: u32,
    burst: u32,
}

impl EmitterSystem {
    fn new(world: &mut World, budget: u32, burst: u32) -> Self {
        Self {
            mask: world.component_mask::<(Transform,)>(),
            remaining: budget,
            burst,
        }
    }
}

impl System for EmitterSystem {
    fn required_mask(&self) -> ComponentMask {
        self.mask
    }

    fn update(&mut self, _dt: f32, world: &mut World) {
        let nozzle = world.find_entity("nozzle");
        if nozzle.is_null() {
            return;
        }
        let origin = world.get_component::<Transform>(nozzle).translation;

        for _ in 0..self.burst.min(self.remaining) {
            self.remaining -= 1;
            // Fan the spray out deterministically by particle index.
            let angle = (self.remaining % 32) as f32 / 32.0 * std::f32::consts::TAU;

            let particle = world.create_entity();
            world.add_component(particle, Transform::from_xyz(origin.x, origin.y, origin.z));
            world.add_component(
                particle,
                Velocity(Vec3::new(angle.cos() * 2.0, 8.0, angle.sin() * 2.0)),
            );
            world.add_component(particle, Lifetime(Timer::new(2.0)));
        }
    }
}

/// Integrates velocity and gravity into every particle's transform.
struct MovementSystem {
    mask: ComponentMask,
}

impl MovementSystem {
    const GRAVITY: f32 = -9.81;

    fn new(world: &mut World) -> Self {
        Self {
            mask: world.component_mask::<(Transform, Velocity)>(),
        }
    }
}

impl System for MovementSystem {
    fn required_mask(&self) -> ComponentMask {
        self.mask
    }

    fn update(&mut self, dt: f32, world: &mut World) {
        for id in world.active_entities().to_vec() {
            if !self.should_process_entity(world, id) {
                continue;
            }
            let velocity = {
                let velocity = world.get_component_mut::<Velocity>(id);
                velocity.0.y += Self::GRAVITY * dt;
                velocity.0
            };
            world.get_component_mut::<Transform>(id).translation += velocity * dt;
        }
    }
}

/// Counts particles down and destroys them once their time is up.
struct LifetimeSystem {
    mask: ComponentMask,
}

impl LifetimeSystem {
    fn new(world: &mut World) -> Self {
        Self {
            mask: world.component_mask::<(Lifetime,)>(),
        }
    }
}

impl System for LifetimeSystem {
    fn required_mask(&self) -> ComponentMask {
        self.mask
    }

    fn update(&mut self, dt: f32, world: &mut World) {
        for id in world.active_entities().to_vec() {
            if !self.should_process_entity(world, id) {
                continue;
            }
            let lifetime = world.get_component_mut::<Lifetime>(id);
            lifetime.0.update(dt);
            if lifetime.0.has_ticked() {
                world.destroy_entity(id);
            }
        }
    }
}

struct ParticleDemo {
    frames_left: u32,
}

impl Game for ParticleDemo {
    fn on_systems_init(&mut self, world: &mut World) {
        let emitter = EmitterSystem::new(world, 600, 4);
        world.add_system(emitter);
        let movement = MovementSystem::new(world);
        world.add_system(movement);
        let lifetime = LifetimeSystem::new(world);
        world.add_system(lifetime);
    }

    fn on_game_init(&mut self, world: &mut World) {
        let nozzle = world.create_named_entity("nozzle");
        world.add_component(nozzle, Transform::from_xyz(0.0, 1.0, 0.0));
    }

    fn on_update(&mut self, _dt: f32, world: &mut World) {
        self.frames_left -= 1;
        if self.frames_left % 60 == 0 {
            log::info!("{} entities alive", world.entity_count());
        }
        if self.frames_left == 0 {
            world.get_singleton_mut::<EngineControl>().quit_requested = true;
        }
    }
}

fn main() {
    let mut engine = Engine::new();
    let mut demo = ParticleDemo { frames_left: 600 };

    engine.run_frames(&mut demo, 600, 1.0 / 60.0);

    println!(
        "fountain drained: {} entities left in the world",
        engine.world().entity_count()
    );
}
