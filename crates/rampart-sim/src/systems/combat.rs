//! Combat resolution: projectile/attacker overlap, crits, damage, and
//! kill rewards.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use rampart_attacker_ai::fsm;
use rampart_campaign::ProgressionEngine;
use rampart_core::components::*;
use rampart_core::enums::{CollisionMode, ProjectilePhase};
use rampart_core::events::GameEvent;
use rampart_core::tuning::RewardTuning;
use rampart_core::types::{Aabb, Position, Size};

use crate::world_setup;

/// Score and currency for a kill.
pub fn reward_for(is_boss: bool, rewards: &RewardTuning) -> (u64, u32) {
    if is_boss {
        (rewards.score_per_boss_kill, rewards.currency_per_boss_kill)
    } else {
        (rewards.score_per_kill, rewards.currency_per_kill)
    }
}

/// Damage dealt by one projectile.
pub fn hit_damage(stats: &DefenderStats, crit: bool) -> f64 {
    if crit {
        stats.damage * stats.crit_multiplier
    } else {
        stats.damage
    }
}

struct Target {
    entity: Entity,
    id: AttackerId,
    bounds: Aabb,
}

/// Mutable run state combat writes into.
pub struct CombatContext<'a> {
    pub rng: &'a mut ChaCha8Rng,
    pub progression: &'a mut ProgressionEngine,
    pub score: &'a mut u64,
    pub events: &'a mut Vec<GameEvent>,
}

pub fn run(
    world: &mut World,
    mode: CollisionMode,
    rewards: &RewardTuning,
    ctx: &mut CombatContext<'_>,
) {
    let Some(stats) = world
        .query::<(&Defender, &DefenderStats)>()
        .iter()
        .next()
        .map(|(_, (_, stats))| *stats)
    else {
        return;
    };

    // Hittable attackers in spawn order.
    let mut targets: Vec<Target> = world
        .query::<(&Attacker, &AttackerId, &Position, &Size, &AttackerState)>()
        .iter()
        .filter(|(_, (_, _, _, _, state))| state.is_alive())
        .map(|(entity, (_, id, pos, size, _))| Target {
            entity,
            id: *id,
            bounds: Aabb::from_top_left(*pos, *size),
        })
        .collect();
    targets.sort_by_key(|t| t.id);

    let projectiles: Vec<(Entity, Aabb, Option<AttackerId>)> = world
        .query::<(&Projectile, &Position, &Size, &ProjectileState)>()
        .iter()
        .filter(|(_, (_, _, _, state))| state.phase == ProjectilePhase::InFlight)
        .map(|(entity, (_, pos, size, state))| {
            (entity, Aabb::from_center(*pos, *size), state.target)
        })
        .collect();

    for (projectile, bounds, bound_target) in projectiles {
        let hit = targets.iter().find(|t| {
            let eligible = match mode {
                CollisionMode::BoundTarget => bound_target == Some(t.id),
                CollisionMode::AnyAttacker => true,
            };
            eligible && t.bounds.overlaps(&bounds) && is_alive(world, t.entity)
        });
        let Some(target) = hit else {
            continue;
        };

        let crit = ctx.rng.gen::<f64>() < stats.crit_chance;
        let damage = hit_damage(&stats, crit);
        let impact = bounds.center();

        if let Ok(mut state) = world.get::<&mut ProjectileState>(projectile) {
            state.phase = ProjectilePhase::Impact;
            state.crit = crit;
        }

        let killed = match world.get::<&mut AttackerState>(target.entity) {
            Ok(mut state) => {
                state.health = (state.health - damage).max(0.0);
                if state.health <= 0.0 {
                    let (phase, fade) = fsm::on_depleted(state.is_boss, state.fade_steps_total);
                    state.phase = phase;
                    state.fade_steps_remaining = fade;
                    Some(state.is_boss)
                } else {
                    None
                }
            }
            Err(_) => None,
        };

        world_setup::spawn_damage_number(world, ctx.rng, impact, damage, crit);

        if let Some(is_boss) = killed {
            let (score, currency) = reward_for(is_boss, rewards);
            *ctx.score += score;
            ctx.progression.earn(currency);
            debug!(attacker_id = target.id.0, boss = is_boss, score, currency, "attacker defeated");
            ctx.events.push(GameEvent::AttackerDefeated {
                attacker_id: target.id.0,
                boss: is_boss,
                score,
                currency,
            });
        }
    }
}

fn is_alive(world: &World, entity: Entity) -> bool {
    world
        .get::<&AttackerState>(entity)
        .map(|state| state.is_alive())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crit_damage() {
        let stats = DefenderStats::default();
        assert_eq!(hit_damage(&stats, false), 25.0);
        assert_eq!(hit_damage(&stats, true), 37.5);
    }

    #[test]
    fn test_rewards() {
        let rewards = RewardTuning::default();
        assert_eq!(reward_for(false, &rewards), (10, 10));
        assert_eq!(reward_for(true, &rewards), (100, 50));
    }
}
