//! # Sindri — Headless Simulation Kernel
//!
//! A small real-time engine core built around a mask-based ECS: entities are
//! bags of typed components with a cached bitmask, systems filter the
//! per-frame entity snapshot with one bitwise AND, and the world update
//! protocol makes entity creation and destruction safe while systems are
//! iterating.
//!
//! Rendering, audio, scripting, and asset IO are out of scope on purpose —
//! those belong to front-ends that consume this crate through
//! [`World`](ecs::World), [`Engine`](game::Engine), and the singleton
//! component store.
//!
//! Start with `use sindri::prelude::*`, implement [`Game`](game::Game), and
//! hand it to an [`Engine`](game::Engine).

pub mod console;
pub mod diag;
pub mod ecs;
pub mod game;
pub mod math;
pub mod prelude;
pub mod time;
