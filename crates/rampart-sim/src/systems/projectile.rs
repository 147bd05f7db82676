//! Projectile flight.
//!
//! Projectiles fly on their launch vector and never re-track. A projectile
//! whose target is gone keeps flying toward the last aim point and retires
//! once it has passed it, or when it leaves the arena.

use std::collections::HashSet;

use glam::DVec2;
use hecs::World;

use rampart_core::components::*;
use rampart_core::constants::{ARENA_HEIGHT, ARENA_WIDTH, OOB_MARGIN};
use rampart_core::enums::ProjectilePhase;
use rampart_core::types::{Position, Velocity};

fn out_of_bounds(pos: &Position) -> bool {
    pos.x < -OOB_MARGIN
        || pos.x > ARENA_WIDTH + OOB_MARGIN
        || pos.y < -OOB_MARGIN
        || pos.y > ARENA_HEIGHT + OOB_MARGIN
}

/// True once `pos` lies behind `aim_point` along the flight direction.
pub fn passed_aim_point(pos: &Position, aim_point: &Position, velocity: &Velocity) -> bool {
    (DVec2::from(*aim_point) - DVec2::from(*pos)).dot(DVec2::from(*velocity)) < 0.0
}

pub fn run(world: &mut World) {
    let live: HashSet<AttackerId> = world
        .query::<(&Attacker, &AttackerId, &AttackerState)>()
        .iter()
        .filter(|(_, (_, _, state))| state.is_alive())
        .map(|(_, (_, id, _))| *id)
        .collect();

    for (_, (_, pos, vel, state)) in
        world.query_mut::<(&Projectile, &mut Position, &Velocity, &mut ProjectileState)>()
    {
        if state.phase != ProjectilePhase::InFlight {
            continue;
        }

        *pos = pos.advanced(vel);

        if state.target.is_some_and(|id| !live.contains(&id)) {
            state.target = None;
        }

        if out_of_bounds(pos)
            || (state.target.is_none() && passed_aim_point(pos, &state.aim_point, vel))
        {
            state.phase = ProjectilePhase::Overshot;
        }
    }
}
