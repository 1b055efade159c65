//! Logging setup.
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade everywhere;
//! this module wires up [env_logger](https://docs.rs/env_logger) as the
//! backend. The engine calls [`init_logger`] during startup, and examples or
//! tests can call it themselves — repeat calls are harmless.
//!
//! Control verbosity with the usual `RUST_LOG` variable, e.g.
//! `RUST_LOG=sindri=debug`.

/// Install env_logger as the global logger, defaulting to `info` when
/// `RUST_LOG` is unset. Does nothing if a logger is already installed.
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}
