//! Penalties for skipping a card choice.
//!
//! A skip always succeeds and always costs something. Penalties are
//! permanent stat changes; only the on-screen notice is time-boxed.

use rand::seq::SliceRandom;
use rand::Rng;

use rampart_core::components::DefenderStats;
use rampart_core::enums::PenaltyKind;

const DAMAGE_FACTOR: f64 = 0.9;
const ATTACK_INTERVAL_FACTOR: f64 = 1.1;
const CRIT_CHANCE_LOSS: f64 = 0.02;
const CRIT_MULTIPLIER_LOSS: f64 = 0.1;
const PROJECTILE_SPEED_FACTOR: f64 = 0.9;

/// Pick a penalty uniformly.
pub fn roll_penalty(rng: &mut impl Rng) -> PenaltyKind {
    *PenaltyKind::ALL
        .choose(rng)
        .unwrap_or(&PenaltyKind::Damage)
}

/// Apply `kind` to the stats, respecting their clamps.
pub fn apply_penalty(stats: &mut DefenderStats, kind: PenaltyKind) {
    match kind {
        PenaltyKind::Damage => stats.damage *= DAMAGE_FACTOR,
        PenaltyKind::AttackSpeed => stats.attack_interval_ms *= ATTACK_INTERVAL_FACTOR,
        PenaltyKind::CritChance => stats.crit_chance -= CRIT_CHANCE_LOSS,
        PenaltyKind::CritDamage => stats.crit_multiplier -= CRIT_MULTIPLIER_LOSS,
        PenaltyKind::ProjectileSpeed => stats.projectile_speed *= PROJECTILE_SPEED_FACTOR,
    }
    stats.clamp();
}

pub fn describe(kind: PenaltyKind) -> &'static str {
    match kind {
        PenaltyKind::Damage => "Damage -10%",
        PenaltyKind::AttackSpeed => "Attack Speed -10%",
        PenaltyKind::CritChance => "Critical Chance -2%",
        PenaltyKind::CritDamage => "Critical Damage -10%",
        PenaltyKind::ProjectileSpeed => "Arrow Speed -10%",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rampart_core::constants::*;

    #[test]
    fn test_each_penalty_weakens_one_stat() {
        for kind in PenaltyKind::ALL {
            let before = DefenderStats::default();
            let mut after = before;
            apply_penalty(&mut after, kind);
            let changed = [
                after.damage < before.damage,
                after.attack_interval_ms > before.attack_interval_ms,
                after.crit_chance < before.crit_chance,
                after.crit_multiplier < before.crit_multiplier,
                after.projectile_speed < before.projectile_speed,
            ];
            assert_eq!(changed.iter().filter(|c| **c).count(), 1, "{kind:?}");
            assert_eq!(after.multishot, before.multishot);
        }
    }

    #[test]
    fn test_penalties_respect_floors() {
        let mut stats = DefenderStats::default();
        for _ in 0..200 {
            for kind in PenaltyKind::ALL {
                apply_penalty(&mut stats, kind);
            }
        }
        assert_eq!(stats.damage, MIN_DAMAGE);
        assert_eq!(stats.attack_interval_ms, MAX_ATTACK_INTERVAL_MS);
        assert_eq!(stats.crit_chance, 0.0);
        assert_eq!(stats.crit_multiplier, MIN_CRIT_MULTIPLIER);
        assert_eq!(stats.projectile_speed, MIN_PROJECTILE_SPEED);
    }
}
