//! Convenience re-exports — `use sindri::prelude::*` for the common items.

pub use crate::console::{
    ConsoleCommandResult, ConsoleState, DebugViewState, execute_console_command,
    register_console_command,
};
pub use crate::ecs::{
    Component, ComponentMask, ComponentSet, EntityId, MAX_COMPONENT_TYPES, Name, System, World,
};
pub use crate::game::{Engine, EngineControl, Game};
pub use crate::math::{Mat4, Quat, Transform, Vec2, Vec3, Vec4};
pub use crate::time::{Clock, Timer};
