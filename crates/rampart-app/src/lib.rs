//! Headless runner for RAMPART: drives the simulation on its own thread,
//! resolves card choices automatically and records finished runs.

pub mod autopilot;
pub mod config;
pub mod game_loop;
pub mod leaderboard;
pub mod state;

pub use rampart_core as core;
