//! Harvest & Tax library crate — re-exports all modules for integration testing.
//!
//! The binary crate (`main.rs`) is the windowed entry point. The simulation
//! core (`clock`, `economy`, `farming`, `zones`, `simulation`) has no engine
//! dependency beyond math types, so `tests/` can drive it directly; the Bevy
//! host modules can be exercised headlessly with `MinimalPlugins`.

pub mod shared;
pub mod clock;
pub mod config;
pub mod economy;
pub mod farming;
pub mod zones;
pub mod simulation;
pub mod input;
pub mod host;
pub mod render;
