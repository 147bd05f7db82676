//! Game state snapshot: the complete visible state sent to the frontend each tick.

use serde::{Deserialize, Serialize};

use crate::components::DefenderStats;
use crate::enums::*;
use crate::events::{Alert, DamageNumberView, GameEvent};
use crate::types::{Position, SimTime, Size};

/// Complete game state broadcast to the frontend after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub nickname: String,
    pub wave: WaveView,
    pub defender: Option<DefenderView>,
    pub attackers: Vec<AttackerView>,
    pub projectiles: Vec<ProjectileView>,
    pub damage_numbers: Vec<DamageNumberView>,
    /// Card choice awaiting the player (only in `ChoosingCard`).
    pub offer: Option<OfferView>,
    pub currency: u32,
    pub score: u64,
    pub penalty_notice: Option<PenaltyNotice>,
    pub alerts: Vec<Alert>,
    pub events: Vec<GameEvent>,
}

/// Wave scheduler status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub number: u32,
    pub boss_wave: bool,
    pub remaining_to_spawn: u32,
    pub spawning: bool,
    pub phase: WavePhase,
}

/// Tower and wall status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefenderView {
    pub position: Position,
    pub size: Size,
    pub stats: DefenderStats,
    pub fortification_health: f64,
    pub fortification_max: f64,
}

/// A visible attacker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackerView {
    pub id: u64,
    pub position: Position,
    pub size: Size,
    pub health: f64,
    pub max_health: f64,
    pub boss: bool,
    pub phase: AttackerPhase,
    pub opacity: f64,
}

/// A visible projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Position,
    /// Flight direction (radians, screen space).
    pub angle: f64,
    pub target: Option<u64>,
}

/// One card on the choice screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardView {
    pub name: String,
    pub kind: UpgradeKind,
    pub rarity: Rarity,
    pub cost: u32,
    pub description: String,
    pub affordable: bool,
}

/// The pending choice screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferView {
    pub wave: u32,
    pub boss_wave: bool,
    pub cards: Vec<CardView>,
}

/// Cosmetic banner shown after a skip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenaltyNotice {
    pub kind: PenaltyKind,
    pub description: String,
    pub expires_at_ms: f64,
}
