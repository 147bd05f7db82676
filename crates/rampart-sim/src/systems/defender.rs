//! Defender auto-attack.
//!
//! When the cooldown has elapsed and an attacker is advancing, the defender
//! fires a volley at the oldest live attacker. Each projectile in the volley
//! is offset vertically and solves its own lead independently.

use hecs::World;

use rampart_core::components::*;
use rampart_core::constants::{MAX_MULTISHOT, MULTISHOT_SPREAD};
use rampart_core::types::{Position, Size};

use crate::guidance::{self, TargetMotion};
use crate::world_setup;

/// The first live attacker in spawn order, with its motion at this step.
fn first_target(world: &World) -> Option<(AttackerId, TargetMotion)> {
    world
        .query::<(&Attacker, &AttackerId, &Position, &Size, &AttackerState, &Oscillation)>()
        .iter()
        .filter(|(_, (_, _, _, _, state, _))| state.is_alive())
        .min_by_key(|(_, (_, id, _, _, _, _))| **id)
        .map(|(_, (_, id, pos, size, state, osc))| {
            (
                *id,
                TargetMotion {
                    center: Position::new(pos.x + size.width / 2.0, pos.y + size.height / 2.0),
                    lateral_speed: state.lateral_speed,
                    amplitude: osc.amplitude,
                    frequency: osc.phase_step,
                    phase: osc.phase,
                },
            )
        })
}

/// Fire a volley if the cooldown allows it. Returns the number of
/// projectiles launched.
pub fn run(world: &mut World, now_ms: f64) -> u32 {
    let Some((muzzle, stats, last_fire)) = world
        .query::<(&Defender, &Position, &Size, &DefenderStats, &FireControl)>()
        .iter()
        .next()
        .map(|(_, (_, pos, size, stats, fire))| {
            (
                Position::new(pos.x + size.width, pos.y + size.height / 2.0),
                *stats,
                fire.last_fire_ms,
            )
        })
    else {
        return 0;
    };

    if let Some(last) = last_fire {
        if now_ms - last < stats.attack_interval_ms {
            return 0;
        }
    }

    // No target is a no-op; the cooldown stays ready.
    let Some((target_id, motion)) = first_target(world) else {
        return 0;
    };

    let count = stats.multishot.clamp(1, MAX_MULTISHOT);
    for i in 0..count {
        let spread = (i as f64 - (count - 1) as f64 / 2.0) * MULTISHOT_SPREAD;
        let origin = Position::new(muzzle.x, muzzle.y + spread);
        let solution = guidance::lead_aim(&origin, &motion, stats.projectile_speed);
        world_setup::spawn_projectile(world, origin, target_id, &solution);
    }

    for (_, (_, fire)) in world.query_mut::<(&Defender, &mut FireControl)>() {
        fire.last_fire_ms = Some(now_ms);
    }
    count
}
