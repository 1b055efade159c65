//! Game trait and the headless frame driver.
//!
//! [`Engine`] owns the [`World`] and runs the outer loop: measure `dt`, give
//! the game a chance to act, then run one world update. There is no window,
//! GPU, or event pump here — front-ends that need one drive the same
//! per-frame sequence from their own loop and treat the engine as a library.
//!
//! ## Startup order
//!
//! 1. Engine singletons are set: [`EngineControl`], [`ConsoleState`],
//!    [`DebugViewState`].
//! 2. [`Game::on_systems_init`] — register your systems here; registration
//!    order is the per-frame execution order for the rest of the run.
//! 3. The default console commands are registered.
//! 4. [`Game::on_game_init`] — create your initial entities.
//!
//! Then every frame: [`Game::on_update`] followed by
//! [`World::update`](crate::ecs::World::update), until something sets
//! [`EngineControl::quit_requested`].

use crate::console::{self, ConsoleState, DebugViewState};
use crate::ecs::{Component, World};
use crate::time::Clock;

/// The host-application hooks the engine drives.
pub trait Game {
    /// Register systems. Runs once, before any frame.
    fn on_systems_init(&mut self, world: &mut World);

    /// Create the initial simulation state. Runs once, after systems and
    /// console commands are in place.
    fn on_game_init(&mut self, world: &mut World);

    /// Per-frame hook, called before the world update with the same `dt` the
    /// systems are about to receive.
    fn on_update(&mut self, dt: f32, world: &mut World);
}

/// Singleton component through which anything in the simulation asks the
/// engine to stop — console commands, gameplay systems, the game itself.
#[derive(Default)]
pub struct EngineControl {
    pub quit_requested: bool,
}

impl Component for EngineControl {}

/// Owns the world and drives the frame loop.
pub struct Engine {
    world: World,
    started: bool,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            started: false,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Run the game until it requests a quit, with wall-clock delta times.
    pub fn run<G: Game>(&mut self, game: &mut G) {
        self.start(game);
        let mut clock = Clock::new();
        let mut stats = FrameStatistics::new();

        while !self.world.get_singleton::<EngineControl>().quit_requested {
            let dt = clock.tick();
            self.frame(game, dt, &mut stats);
        }
        log::info!("Quit requested, shutting down");
    }

    /// Run exactly `frames` frames with a fixed `dt` — the deterministic
    /// entry point for demos and tests. Stops early on a quit request.
    pub fn run_frames<G: Game>(&mut self, game: &mut G, frames: usize, fixed_dt: f32) {
        self.start(game);
        let mut stats = FrameStatistics::new();

        for _ in 0..frames {
            if self.world.get_singleton::<EngineControl>().quit_requested {
                break;
            }
            self.frame(game, fixed_dt, &mut stats);
        }
    }

    /// One-time startup. Safe to reach from both entry points; only the
    /// first call does anything.
    fn start<G: Game>(&mut self, game: &mut G) {
        if self.started {
            return;
        }
        self.started = true;

        crate::diag::init_logger();
        self.world.set_singleton(EngineControl::default());
        self.world.set_singleton(ConsoleState::new());
        self.world.set_singleton(DebugViewState::default());

        game.on_systems_init(&mut self.world);
        console::register_default_console_commands(&mut self.world);
        game.on_game_init(&mut self.world);
    }

    fn frame<G: Game>(&mut self, game: &mut G, dt: f32, stats: &mut FrameStatistics) {
        let dt = stats.frame(dt, &mut self.world);
        game.on_update(dt, &mut self.world);
        self.world.update(dt);
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Rolling frame statistics: counts frames, publishes fps once per second,
/// and freezes simulation time while the console is open.
struct FrameStatistics {
    dt_accumulator: f32,
    frames_accumulated: u32,
}

impl FrameStatistics {
    fn new() -> Self {
        Self {
            dt_accumulator: 0.0,
            frames_accumulated: 0,
        }
    }

    /// Account for one frame and return the `dt` the simulation should see.
    fn frame(&mut self, dt: f32, world: &mut World) -> f32 {
        self.frames_accumulated += 1;
        self.dt_accumulator += dt;

        if self.dt_accumulator > 1.0 {
            world.get_singleton_mut::<DebugViewState>().current_fps = self.frames_accumulated;
            log::info!(
                "FPS: {} | Entities: {}",
                self.frames_accumulated,
                world.entity_count()
            );
            self.frames_accumulated = 0;
            self.dt_accumulator = 0.0;
        }

        // Freeze the simulation while the console has focus.
        if world.get_singleton::<ConsoleState>().enabled {
            0.0
        } else {
            dt
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct ProbeGame {
        systems_inits: u32,
        game_inits: u32,
        updates: Vec<f32>,
        quit_after: Option<usize>,
    }

    impl Game for ProbeGame {
        fn on_systems_init(&mut self, world: &mut World) {
            // Engine singletons must already be present.
            assert!(world.has_singleton::<EngineControl>());
            assert!(world.has_singleton::<ConsoleState>());
            assert!(world.has_singleton::<DebugViewState>());
            self.systems_inits += 1;
        }

        fn on_game_init(&mut self, _world: &mut World) {
            self.game_inits += 1;
        }

        fn on_update(&mut self, dt: f32, world: &mut World) {
            self.updates.push(dt);
            if let Some(quit_after) = self.quit_after {
                if self.updates.len() >= quit_after {
                    world.get_singleton_mut::<EngineControl>().quit_requested = true;
                }
            }
        }
    }

    #[test]
    fn run_frames_drives_the_fixed_sequence() {
        let mut engine = Engine::new();
        let mut game = ProbeGame::default();

        engine.run_frames(&mut game, 3, 0.25);

        assert_eq!(game.systems_inits, 1);
        assert_eq!(game.game_inits, 1);
        assert_eq!(game.updates, [0.25, 0.25, 0.25]);
    }

    #[test]
    fn continuing_a_run_does_not_restart_the_game() {
        let mut engine = Engine::new();
        let mut game = ProbeGame::default();

        engine.run_frames(&mut game, 2, 0.1);
        engine.run_frames(&mut game, 2, 0.1);

        assert_eq!(game.systems_inits, 1);
        assert_eq!(game.game_inits, 1);
        assert_eq!(game.updates.len(), 4);
    }

    #[test]
    fn run_stops_on_quit_request() {
        let mut engine = Engine::new();
        let mut game = ProbeGame {
            quit_after: Some(2),
            ..Default::default()
        };

        engine.run(&mut game);
        assert_eq!(game.updates.len(), 2);
    }

    #[test]
    fn fps_is_published_once_a_second() {
        let mut engine = Engine::new();
        let mut game = ProbeGame::default();

        // 0.5 + 0.5 + 0.5: the third frame tips the accumulator over 1s.
        engine.run_frames(&mut game, 3, 0.5);
        assert_eq!(
            engine.world().get_singleton::<DebugViewState>().current_fps,
            3
        );
    }

    #[test]
    fn open_console_freezes_dt() {
        struct FrozenGame(ProbeGame);

        impl Game for FrozenGame {
            fn on_systems_init(&mut self, world: &mut World) {
                self.0.on_systems_init(world);
            }

            fn on_game_init(&mut self, world: &mut World) {
                world.get_singleton_mut::<ConsoleState>().enabled = true;
            }

            fn on_update(&mut self, dt: f32, world: &mut World) {
                self.0.on_update(dt, world);
            }
        }

        let mut engine = Engine::new();
        let mut game = FrozenGame(ProbeGame::default());

        engine.run_frames(&mut game, 2, 0.25);
        assert_eq!(game.0.updates, [0.0, 0.0]);
    }
}
