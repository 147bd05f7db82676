//! Events emitted by the simulation for UI feedback and external collaborators.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// Something the UI may want to react to. Drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    WaveStarted { wave: u32, boss: bool, enemies: u32 },
    BossSpawned { wave: u32, attacker_id: u64 },
    WaveCleared { wave: u32 },
    AttackerDefeated {
        attacker_id: u64,
        boss: bool,
        score: u64,
        currency: u32,
    },
    FortificationHit {
        attacker_id: u64,
        damage: f64,
        remaining: f64,
    },
    CardPurchased {
        kind: UpgradeKind,
        rarity: Rarity,
        cost: u32,
    },
    PurchaseRejected { cost: u32, balance: u32 },
    CardSkipped { penalty: PenaltyKind },
    RunEnded { record: RunRecord },
}

/// Final result of a run, handed to the leaderboard service exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub nickname: String,
    pub final_score: u64,
    pub final_wave: u32,
}

/// Alert for the UI alert queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    pub tick: u64,
}

/// Transient floating damage readout for the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageNumberView {
    pub position: Position,
    pub value: f64,
    pub crit: bool,
    /// 1.0 at spawn, fades to 0.
    pub opacity: f64,
}
