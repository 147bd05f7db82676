//! The upgrade card pool.
//!
//! Each upgrade kind carries its own rarity-to-effect table. Multishot has
//! no common card.

use rampart_core::enums::{Rarity, UpgradeKind};

/// What a card does to the defender, tagged by stat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardEffect {
    /// Multiply damage.
    Damage { factor: f64 },
    /// Divide the attack interval (higher is faster).
    AttackSpeed { factor: f64 },
    /// Add projectiles per volley.
    MultiShot { extra: u32 },
    /// Add to crit chance.
    CritChance { bonus: f64 },
    /// Add to the crit damage multiplier.
    CritDamage { bonus: f64 },
    /// Multiply projectile speed.
    ProjectileSpeed { factor: f64 },
}

/// One card in the pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardDef {
    pub kind: UpgradeKind,
    pub rarity: Rarity,
    pub name: &'static str,
    pub effect: CardEffect,
}

// Per-kind tables, indexed common..legendary.
const DAMAGE_FACTORS: [f64; 4] = [1.2, 1.4, 1.6, 2.0];
const ATTACK_SPEED_FACTORS: [f64; 4] = [1.15, 1.3, 1.5, 1.8];
const MULTISHOT_EXTRA: [Option<u32>; 4] = [None, Some(1), Some(2), Some(3)];
const CRIT_CHANCE_BONUS: [f64; 4] = [0.05, 0.10, 0.15, 0.25];
const CRIT_DAMAGE_BONUS: [f64; 4] = [0.05, 0.10, 0.15, 0.20];
const PROJECTILE_SPEED_FACTORS: [f64; 4] = [1.05, 1.10, 1.15, 1.20];

const DAMAGE_NAMES: [&str; 4] = [
    "Sharp Arrows",
    "Reinforced Arrows",
    "Penetrating Arrows",
    "Dragon Slayer Arrows",
];
const ATTACK_SPEED_NAMES: [&str; 4] = [
    "Quick Draw",
    "Swift Shot",
    "Lightning Strike",
    "Time Bender",
];
const MULTISHOT_NAMES: [&str; 4] = ["", "Double Shot", "Triple Shot", "Arrow Storm"];
const CRIT_CHANCE_NAMES: [&str; 4] = [
    "Precision Strike",
    "Deadly Aim",
    "Master Marksman",
    "Eagle Eye",
];
const CRIT_DAMAGE_NAMES: [&str; 4] = [
    "Deadly Strike",
    "Lethal Force",
    "Devastating Blow",
    "Ultimate Impact",
];
const PROJECTILE_SPEED_NAMES: [&str; 4] = [
    "Swift Arrows",
    "Rapid Arrows",
    "Sonic Arrows",
    "Light Speed Arrows",
];

/// The effect of `kind` at `rarity`, if such a card exists.
pub fn effect_for(kind: UpgradeKind, rarity: Rarity) -> Option<CardEffect> {
    let i = rarity.index();
    match kind {
        UpgradeKind::Damage => Some(CardEffect::Damage {
            factor: DAMAGE_FACTORS[i],
        }),
        UpgradeKind::AttackSpeed => Some(CardEffect::AttackSpeed {
            factor: ATTACK_SPEED_FACTORS[i],
        }),
        UpgradeKind::MultiShot => MULTISHOT_EXTRA[i].map(|extra| CardEffect::MultiShot { extra }),
        UpgradeKind::CritChance => Some(CardEffect::CritChance {
            bonus: CRIT_CHANCE_BONUS[i],
        }),
        UpgradeKind::CritDamage => Some(CardEffect::CritDamage {
            bonus: CRIT_DAMAGE_BONUS[i],
        }),
        UpgradeKind::ProjectileSpeed => Some(CardEffect::ProjectileSpeed {
            factor: PROJECTILE_SPEED_FACTORS[i],
        }),
    }
}

fn name_for(kind: UpgradeKind, rarity: Rarity) -> &'static str {
    let i = rarity.index();
    match kind {
        UpgradeKind::Damage => DAMAGE_NAMES[i],
        UpgradeKind::AttackSpeed => ATTACK_SPEED_NAMES[i],
        UpgradeKind::MultiShot => MULTISHOT_NAMES[i],
        UpgradeKind::CritChance => CRIT_CHANCE_NAMES[i],
        UpgradeKind::CritDamage => CRIT_DAMAGE_NAMES[i],
        UpgradeKind::ProjectileSpeed => PROJECTILE_SPEED_NAMES[i],
    }
}

/// Look up the card for `kind` at exactly `rarity`.
pub fn card(kind: UpgradeKind, rarity: Rarity) -> Option<CardDef> {
    effect_for(kind, rarity).map(|effect| CardDef {
        kind,
        rarity,
        name: name_for(kind, rarity),
        effect,
    })
}

/// Every card in the pool.
pub fn pool() -> Vec<CardDef> {
    UpgradeKind::ALL
        .into_iter()
        .flat_map(|kind| Rarity::ALL.into_iter().filter_map(move |r| card(kind, r)))
        .collect()
}

/// Card for `kind` at the rolled rarity, falling back to each lower tier,
/// then to the nearest higher tier. Every kind has at least one card, so
/// this always finds one.
pub fn card_with_fallback(kind: UpgradeKind, rolled: Rarity) -> Option<CardDef> {
    let mut rarity = Some(rolled);
    while let Some(r) = rarity {
        if let Some(def) = card(kind, r) {
            return Some(def);
        }
        rarity = r.lower();
    }

    let mut rarity = rolled.higher();
    while let Some(r) = rarity {
        if let Some(def) = card(kind, r) {
            return Some(def);
        }
        rarity = r.higher();
    }
    None
}

/// Human-readable effect text for the choice screen.
pub fn describe(effect: &CardEffect) -> String {
    match *effect {
        CardEffect::Damage { factor } => format!("Damage +{:.0}%", (factor - 1.0) * 100.0),
        CardEffect::AttackSpeed { factor } => {
            format!("Attack Speed +{:.0}%", (factor - 1.0) * 100.0)
        }
        CardEffect::MultiShot { extra } => format!("Arrows +{extra}"),
        CardEffect::CritChance { bonus } => format!("Critical Chance +{:.0}%", bonus * 100.0),
        CardEffect::CritDamage { bonus } => format!("Critical Damage +{:.0}%", bonus * 100.0),
        CardEffect::ProjectileSpeed { factor } => {
            format!("Arrow Speed +{:.0}%", (factor - 1.0) * 100.0)
        }
    }
}
