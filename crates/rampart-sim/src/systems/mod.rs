//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only).
//! Run state they touch outside the world is passed in explicitly.

pub mod attacker_motion;
pub mod cleanup;
pub mod combat;
pub mod defender;
pub mod effects;
pub mod projectile;
pub mod snapshot;
pub mod wave_scheduler;
