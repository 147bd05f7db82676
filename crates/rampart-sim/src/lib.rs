//! Simulation engine for RAMPART.
//!
//! Owns the hecs ECS world, runs one fixed-order step per tick, and
//! produces GameStateSnapshots for whatever drives it.

pub mod engine;
pub mod guidance;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use rampart_core as core;
