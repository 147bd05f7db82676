//! Applying card effects to defender stats.

use rampart_core::components::DefenderStats;

use crate::cards::CardEffect;

/// Apply one card effect, then bring every stat back inside its clamp.
pub fn apply_effect(stats: &mut DefenderStats, effect: CardEffect) {
    match effect {
        CardEffect::Damage { factor } => stats.damage *= factor,
        CardEffect::AttackSpeed { factor } => {
            if factor > 0.0 {
                stats.attack_interval_ms /= factor;
            }
        }
        CardEffect::MultiShot { extra } => stats.multishot = stats.multishot.saturating_add(extra),
        CardEffect::CritChance { bonus } => stats.crit_chance += bonus,
        CardEffect::CritDamage { bonus } => stats.crit_multiplier += bonus,
        CardEffect::ProjectileSpeed { factor } => stats.projectile_speed *= factor,
    }
    stats.clamp();
}
