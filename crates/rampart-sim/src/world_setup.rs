//! Entity spawn factories.
//!
//! Defender, attackers, projectiles, and damage numbers each get their own
//! component bundle here so systems never build bundles by hand.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use rampart_attacker_ai::profiles::AttackerProfile;
use rampart_core::components::*;
use rampart_core::constants::*;
use rampart_core::enums::*;
use rampart_core::tuning::DefenderTuning;
use rampart_core::types::{Position, Size, Velocity};

use crate::guidance::AimSolution;

/// Spawn the defender tower, vertically centered in front of the castle.
pub fn spawn_defender(world: &mut World, tuning: &DefenderTuning) -> Entity {
    let mut stats = tuning.stats;
    stats.clamp();

    world.spawn((
        Defender,
        Position::new(DEFENDER_X, ARENA_HEIGHT / 2.0 - DEFENDER_HEIGHT / 2.0),
        Size::new(DEFENDER_WIDTH, DEFENDER_HEIGHT),
        stats,
        FireControl::default(),
        Fortification::new(tuning.fortification_health),
    ))
}

/// Random top-left y inside the spawn band.
pub fn random_spawn_y(rng: &mut ChaCha8Rng) -> f64 {
    let band = (ARENA_HEIGHT - SPAWN_BAND_MARGIN).max(1.0);
    rng.gen::<f64>() * band + SPAWN_BAND_TOP
}

/// Spawn an attacker at the right arena edge.
pub fn spawn_attacker(
    world: &mut World,
    id: AttackerId,
    profile: &AttackerProfile,
    is_boss: bool,
    base_y: f64,
) -> Entity {
    world.spawn((
        Attacker,
        id,
        Position::new(ARENA_WIDTH - profile.size.width, base_y),
        profile.size,
        AttackerState {
            phase: AttackerPhase::Alive,
            is_boss,
            health: profile.health,
            max_health: profile.health,
            lateral_speed: profile.lateral_speed,
            contact_damage: profile.contact_damage,
            fade_steps_remaining: 0,
            fade_steps_total: profile.fade_steps,
        },
        Oscillation {
            base_y,
            amplitude: profile.amplitude,
            phase: 0.0,
            phase_step: profile.phase_step,
        },
    ))
}

/// Spawn a projectile at `origin` (its center) with a fixed launch vector.
pub fn spawn_projectile(
    world: &mut World,
    origin: Position,
    target: AttackerId,
    solution: &AimSolution,
) -> Entity {
    world.spawn((
        Projectile,
        origin,
        solution.velocity,
        Size::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
        ProjectileState {
            phase: ProjectilePhase::InFlight,
            origin,
            target: Some(target),
            aim_point: solution.aim_point,
            crit: false,
        },
    ))
}

/// Spawn a floating damage readout at `at`.
pub fn spawn_damage_number(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    at: Position,
    value: f64,
    crit: bool,
) -> Entity {
    world.spawn((
        DamageNumber {
            value,
            crit,
            life: 1.0,
        },
        at,
        Velocity::new(rng.gen_range(-1.0..1.0), DAMAGE_NUMBER_RISE),
    ))
}
