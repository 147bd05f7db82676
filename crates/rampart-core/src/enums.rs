//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Active,
    /// Wave cleared, waiting for the player to buy a card or skip.
    /// The simulation step is fully paused.
    ChoosingCard,
    Paused,
    GameOver,
}

/// Attacker lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackerPhase {
    /// Advancing toward the defender.
    #[default]
    Alive,
    /// Boss only: health depleted, fading out. Immobile and not hittable.
    Dying,
    /// Crossed the defense line. Removed this step.
    ReachedDefender,
    /// Destroyed. Removed this step.
    Depleted,
}

/// Projectile flight phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectilePhase {
    #[default]
    InFlight,
    /// Target lost and the projectile flew past its last aim point.
    Overshot,
    /// Hit something.
    Impact,
}

/// Wave scheduler state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    #[default]
    Idle,
    Spawning,
    WaitingForClear,
    Complete,
}

/// Card rarity tier. Ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 4] = [
        Rarity::Common,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    /// Index into per-rarity tables.
    pub fn index(self) -> usize {
        match self {
            Rarity::Common => 0,
            Rarity::Rare => 1,
            Rarity::Epic => 2,
            Rarity::Legendary => 3,
        }
    }

    /// Next tier down, or None for common.
    pub fn lower(self) -> Option<Rarity> {
        match self {
            Rarity::Common => None,
            Rarity::Rare => Some(Rarity::Common),
            Rarity::Epic => Some(Rarity::Rare),
            Rarity::Legendary => Some(Rarity::Epic),
        }
    }

    /// Next tier up, or None for legendary.
    pub fn higher(self) -> Option<Rarity> {
        match self {
            Rarity::Common => Some(Rarity::Rare),
            Rarity::Rare => Some(Rarity::Epic),
            Rarity::Epic => Some(Rarity::Legendary),
            Rarity::Legendary => None,
        }
    }
}

/// Defender stat an upgrade card targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    Damage,
    AttackSpeed,
    MultiShot,
    CritChance,
    CritDamage,
    ProjectileSpeed,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 6] = [
        UpgradeKind::Damage,
        UpgradeKind::AttackSpeed,
        UpgradeKind::MultiShot,
        UpgradeKind::CritChance,
        UpgradeKind::CritDamage,
        UpgradeKind::ProjectileSpeed,
    ];
}

/// Stat hit by a skip penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PenaltyKind {
    Damage,
    AttackSpeed,
    CritChance,
    CritDamage,
    ProjectileSpeed,
}

impl PenaltyKind {
    pub const ALL: [PenaltyKind; 5] = [
        PenaltyKind::Damage,
        PenaltyKind::AttackSpeed,
        PenaltyKind::CritChance,
        PenaltyKind::CritDamage,
        PenaltyKind::ProjectileSpeed,
    ];
}

/// Which attackers a projectile may collide with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionMode {
    /// Only the attacker the projectile was aimed at.
    #[default]
    BoundTarget,
    /// Any attacker that is still advancing.
    AnyAttacker,
}

/// Alert severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}
