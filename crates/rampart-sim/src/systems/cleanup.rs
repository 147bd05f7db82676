//! Cleanup system: removes entities that have finished their lifecycle.

use hecs::{Entity, World};

use rampart_core::components::*;
use rampart_core::enums::{AttackerPhase, ProjectilePhase};

/// Despawn depleted or breaching attackers, retired projectiles, and faded
/// damage numbers. Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (_, state)) in world.query_mut::<(&Attacker, &AttackerState)>() {
        if matches!(
            state.phase,
            AttackerPhase::Depleted | AttackerPhase::ReachedDefender
        ) {
            despawn_buffer.push(entity);
        }
    }

    for (entity, (_, state)) in world.query_mut::<(&Projectile, &ProjectileState)>() {
        if state.phase != ProjectilePhase::InFlight {
            despawn_buffer.push(entity);
        }
    }

    for (entity, number) in world.query_mut::<&DamageNumber>() {
        if number.life <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
