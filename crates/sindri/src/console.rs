//! Debug console state and command dispatch.
//!
//! The console itself is just data: a [`ConsoleState`] singleton component
//! holding the registered commands, the command history, and the text buffer
//! a front-end (in-game overlay, REPL on stdin, test harness) feeds. This
//! module owns registration and dispatch; how the text gets in and how the
//! response gets shown is the front-end's business.
//!
//! Commands receive the whitespace-split tokens of the submitted line (the
//! command name is token 0) plus the world, and answer with a
//! [`ConsoleCommandResult`].

use std::collections::HashMap;
use std::rc::Rc;

use crate::ecs::{Component, EntityId, World};
use crate::math::Transform;

/// Outcome of one executed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleCommandResult {
    pub success: bool,
    /// Text for the front-end to display. May be empty on success.
    pub response: String,
}

impl ConsoleCommandResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            response: String::new(),
        }
    }

    pub fn ok_with(response: impl Into<String>) -> Self {
        Self {
            success: true,
            response: response.into(),
        }
    }

    pub fn failure(response: impl Into<String>) -> Self {
        Self {
            success: false,
            response: response.into(),
        }
    }
}

/// A registered console command. `Rc` so dispatch can call it while the
/// [`ConsoleState`] that owns it sits inside the world being mutated.
pub type ConsoleCommand = Rc<dyn Fn(&[String], &mut World) -> ConsoleCommandResult>;

/// Singleton component holding the console's entire data layer.
#[derive(Default)]
pub struct ConsoleState {
    commands: HashMap<String, ConsoleCommand>,
    /// Previously executed lines, oldest first.
    pub history: Vec<String>,
    /// Cursor into `history` while the user arrows through it.
    pub history_index: Option<usize>,
    /// The line currently being typed by the front-end.
    pub current_input: String,
    /// While enabled, the frame driver freezes simulation time.
    pub enabled: bool,
}

impl Component for ConsoleState {}

impl ConsoleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered command names, alphabetically sorted.
    pub fn command_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Singleton component for the debug overlay's view state.
#[derive(Default)]
pub struct DebugViewState {
    pub frame_stats_display_enabled: bool,
    /// Refreshed about once per second by the frame driver.
    pub current_fps: u32,
}

impl Component for DebugViewState {}

/// Register a command under the given name, replacing any previous one.
///
/// # Panics
///
/// Panics if no [`ConsoleState`] singleton exists yet — commands can only be
/// registered once the console has been set up.
pub fn register_console_command(
    world: &mut World,
    name: impl Into<String>,
    command: impl Fn(&[String], &mut World) -> ConsoleCommandResult + 'static,
) {
    let name = name.into();
    assert!(
        world.has_singleton::<ConsoleState>(),
        "Attempted to register console command `{}` but no console state singleton exists",
        name
    );
    world
        .get_singleton_mut::<ConsoleState>()
        .commands
        .insert(name, Rc::new(command));
}

/// Split a submitted line into tokens, record it in the history, and
/// dispatch it to the matching command.
///
/// # Panics
///
/// Panics if no [`ConsoleState`] singleton exists.
pub fn execute_console_command(world: &mut World, line: &str) -> ConsoleCommandResult {
    let tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();
    if tokens.is_empty() {
        return ConsoleCommandResult::failure("");
    }

    let console = world.get_singleton_mut::<ConsoleState>();
    console.history.push(line.trim().to_string());
    console.history_index = None;
    let command = console.commands.get(&tokens[0]).cloned();

    match command {
        Some(run) => run(&tokens, world),
        None => ConsoleCommandResult::failure(format!("Unrecognized command: {}", tokens[0])),
    }
}

/// Register the engine's built-in commands: `commands`, `frame_stats`, and
/// the entity-transform inspection trio.
pub fn register_default_console_commands(world: &mut World) {
    register_console_command(world, "commands", |tokens, world| {
        const USAGE: &str = "Usage: commands";
        if tokens.len() != 1 {
            return ConsoleCommandResult::failure(USAGE);
        }

        let mut output = String::from("Available commands:\n");
        for name in world.get_singleton::<ConsoleState>().command_names() {
            output.push_str(name);
            output.push('\n');
        }
        ConsoleCommandResult::ok_with(output)
    });

    register_console_command(world, "frame_stats", |tokens, world| {
        const USAGE: &str = "Usage: frame_stats on|off";
        let enabled = match tokens.get(1).map(|s| s.to_lowercase()) {
            Some(option) if tokens.len() == 2 && option == "on" => true,
            Some(option) if tokens.len() == 2 && option == "off" => false,
            _ => return ConsoleCommandResult::failure(USAGE),
        };

        world
            .get_singleton_mut::<DebugViewState>()
            .frame_stats_display_enabled = enabled;
        ConsoleCommandResult::ok()
    });

    register_console_command(world, "move_entity", |tokens, world| {
        const USAGE: &str = "Usage: move_entity \"entity_name\" dx dy dz";
        let (id, [dx, dy, dz]) = match parse_transform_target(world, tokens, USAGE) {
            Ok(target) => target,
            Err(result) => return result,
        };

        let transform = world.get_component_mut::<Transform>(id);
        transform.translation.x += dx;
        transform.translation.y += dy;
        transform.translation.z += dz;
        ConsoleCommandResult::ok()
    });

    register_console_command(world, "set_entity_position", |tokens, world| {
        const USAGE: &str = "Usage: set_entity_position \"entity_name\" x y z";
        let (id, [x, y, z]) = match parse_transform_target(world, tokens, USAGE) {
            Ok(target) => target,
            Err(result) => return result,
        };

        let transform = world.get_component_mut::<Transform>(id);
        transform.translation.x = x;
        transform.translation.y = y;
        transform.translation.z = z;
        ConsoleCommandResult::ok()
    });

    register_console_command(world, "get_entity_position", |tokens, world| {
        const USAGE: &str = "Usage: get_entity_position \"entity_name\"";
        if tokens.len() != 2 {
            return ConsoleCommandResult::failure(USAGE);
        }
        let id = match find_quoted_entity(world, &tokens[1], USAGE) {
            Ok(id) => id,
            Err(result) => return result,
        };

        let position = world.get_component::<Transform>(id).translation;
        ConsoleCommandResult::ok_with(format!(
            "Entity position: {}, {}, {}",
            position.x, position.y, position.z
        ))
    });
}

const ENTITY_NOT_FOUND: &str = "Entity with given name not found!";
const ENTITY_NO_TRANSFORM: &str = "Entity does not have a Transform component!";

/// Resolve a `"name"` token to an entity that carries a [`Transform`].
fn find_quoted_entity(
    world: &World,
    token: &str,
    usage: &str,
) -> Result<EntityId, ConsoleCommandResult> {
    if !token.starts_with('"') {
        return Err(ConsoleCommandResult::failure(usage));
    }
    let name = token.trim_matches('"');

    let id = world.find_entity(name);
    if id.is_null() {
        return Err(ConsoleCommandResult::failure(ENTITY_NOT_FOUND));
    }
    if !world.has_component::<Transform>(id) {
        return Err(ConsoleCommandResult::failure(ENTITY_NO_TRANSFORM));
    }
    Ok(id)
}

/// Parse the `"name" x y z` shape shared by the transform commands.
fn parse_transform_target(
    world: &World,
    tokens: &[String],
    usage: &str,
) -> Result<(EntityId, [f32; 3]), ConsoleCommandResult> {
    if tokens.len() != 5 {
        return Err(ConsoleCommandResult::failure(usage));
    }
    let id = find_quoted_entity(world, &tokens[1], usage)?;

    let mut values = [0.0; 3];
    for (slot, token) in values.iter_mut().zip(&tokens[2..5]) {
        match token.parse::<f32>() {
            Ok(value) => *slot = value,
            Err(_) => return Err(ConsoleCommandResult::failure(usage)),
        }
    }
    Ok((id, values))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console_world() -> World {
        let mut world = World::new();
        world.set_singleton(ConsoleState::new());
        world.set_singleton(DebugViewState::default());
        register_default_console_commands(&mut world);
        world
    }

    #[test]
    fn unknown_command_fails() {
        let mut world = console_world();
        let result = execute_console_command(&mut world, "warp 1 2 3");
        assert!(!result.success);
        assert_eq!(result.response, "Unrecognized command: warp");
    }

    #[test]
    fn executed_lines_land_in_history() {
        let mut world = console_world();
        execute_console_command(&mut world, "commands");
        execute_console_command(&mut world, "bogus");
        assert_eq!(
            world.get_singleton::<ConsoleState>().history,
            ["commands", "bogus"]
        );
    }

    #[test]
    fn commands_lists_alphabetically() {
        let mut world = console_world();
        let result = execute_console_command(&mut world, "commands");
        assert!(result.success);

        let lines: Vec<&str> = result.response.lines().collect();
        assert_eq!(lines[0], "Available commands:");
        let mut sorted = lines[1..].to_vec();
        sorted.sort_unstable();
        assert_eq!(lines[1..], sorted[..]);
        assert!(lines.contains(&"frame_stats"));
    }

    #[test]
    fn frame_stats_toggles_debug_view() {
        let mut world = console_world();

        assert!(execute_console_command(&mut world, "frame_stats on").success);
        assert!(
            world
                .get_singleton::<DebugViewState>()
                .frame_stats_display_enabled
        );

        assert!(execute_console_command(&mut world, "frame_stats OFF").success);
        assert!(
            !world
                .get_singleton::<DebugViewState>()
                .frame_stats_display_enabled
        );

        let result = execute_console_command(&mut world, "frame_stats maybe");
        assert!(!result.success);
        assert_eq!(result.response, "Usage: frame_stats on|off");
    }

    #[test]
    fn transform_commands_round_trip() {
        let mut world = console_world();
        let crate_entity = world.create_named_entity("crate");
        world.add_component(crate_entity, Transform::from_xyz(1.0, 2.0, 3.0));

        let result = execute_console_command(&mut world, "move_entity \"crate\" 1 0 -1");
        assert!(result.success, "{}", result.response);

        let result = execute_console_command(&mut world, "get_entity_position \"crate\"");
        assert_eq!(result.response, "Entity position: 2, 2, 2");

        let result = execute_console_command(&mut world, "set_entity_position \"crate\" 0 0 0");
        assert!(result.success);
        assert_eq!(
            world
                .get_component::<Transform>(crate_entity)
                .translation
                .to_array(),
            [0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn transform_commands_report_missing_pieces() {
        let mut world = console_world();

        let result = execute_console_command(&mut world, "move_entity \"ghost\" 1 2 3");
        assert_eq!(result.response, ENTITY_NOT_FOUND);

        world.create_named_entity("bare");
        let result = execute_console_command(&mut world, "move_entity \"bare\" 1 2 3");
        assert_eq!(result.response, ENTITY_NO_TRANSFORM);

        // Unquoted names and malformed numbers fall back to the usage string.
        let result = execute_console_command(&mut world, "move_entity bare 1 2 3");
        assert!(result.response.starts_with("Usage:"));
        let result = execute_console_command(&mut world, "move_entity \"bare\" 1 two 3");
        assert!(result.response.starts_with("Usage:"));
    }

    #[test]
    #[should_panic(expected = "no console state singleton")]
    fn registering_without_console_panics() {
        let mut world = World::new();
        register_console_command(&mut world, "orphan", |_, _| ConsoleCommandResult::ok());
    }
}
