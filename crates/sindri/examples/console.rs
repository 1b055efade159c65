//! Interactive debug console — a stdin REPL against a tiny scene.
//!
//! Demonstrates the console data layer without any overlay rendering: the
//! default commands plus a custom `entities` command, dispatched against a
//! world holding a couple of named, transform-carrying entities.
//!
//! Run with: `cargo run --example console`
//! Try: `commands`, `get_entity_position "player"`,
//! `move_entity "player" 1 0 0`, `entities`, `quit`.

use std::io::{BufRead, Write};

use sindri::prelude::*;

struct ConsoleDemo;

impl Game for ConsoleDemo {
    fn on_systems_init(&mut self, _world: &mut World) {}

    fn on_game_init(&mut self, world: &mut World) {
        let player = world.create_named_entity("player");
        world.add_component(player, Transform::from_xyz(0.0, 0.0, 0.0));

        let lantern = world.create_named_entity("lantern");
        world.add_component(lantern, Transform::from_xyz(3.0, 2.0, 0.0));

        register_console_command(world, "entities", |tokens, world| {
            if tokens.len() != 1 {
                return ConsoleCommandResult::failure("Usage: entities");
            }
            ConsoleCommandResult::ok_with(format!("{} entities alive", world.entity_count()))
        });

        register_console_command(world, "quit", |_, world| {
            world.get_singleton_mut::<EngineControl>().quit_requested = true;
            ConsoleCommandResult::ok_with("Bye")
        });
    }

    fn on_update(&mut self, _dt: f32, _world: &mut World) {}
}

fn main() {
    let mut engine = Engine::new();
    let mut demo = ConsoleDemo;

    // One frame to run startup and settle the initial scene.
    engine.run_frames(&mut demo, 1, 0.0);

    let stdin = std::io::stdin();
    print!("> ");
    std::io::stdout().flush().unwrap();

    for line in stdin.lock().lines() {
        let line = line.unwrap();
        if !line.trim().is_empty() {
            let result = execute_console_command(engine.world_mut(), &line);
            if !result.response.is_empty() {
                println!("{}", result.response.trim_end());
            } else if !result.success {
                println!("failed");
            }
        }

        if engine
            .world()
            .get_singleton::<EngineControl>()
            .quit_requested
        {
            break;
        }

        // Advance the simulation one tick per entered line.
        engine.run_frames(&mut demo, 1, 1.0 / 60.0);
        print!("> ");
        std::io::stdout().flush().unwrap();
    }
}
