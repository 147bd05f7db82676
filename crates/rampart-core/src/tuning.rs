//! Tunable gameplay parameters.
//!
//! Every field defaults to the matching constant in [`crate::constants`].
//! All sections are `#[serde(default)]`, so a TOML or JSON document may
//! override any subset.

use serde::{Deserialize, Serialize};

use crate::components::DefenderStats;
use crate::constants::*;

/// Complete tuning set for one simulation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub wave: WaveTuning,
    pub defender: DefenderTuning,
    pub attacker: AttackerTuning,
    pub rewards: RewardTuning,
    pub cards: CardTuning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveTuning {
    pub base_count: u32,
    pub count_increment: u32,
    pub boss_interval: u32,
    pub spawn_interval_ms: f64,
    pub spawn_interval_decay_ms: f64,
    pub spawn_interval_floor_ms: f64,
    pub difficulty_speed_step: f64,
    pub difficulty_speed_cap: f64,
    pub difficulty_health_step: f64,
    pub difficulty_health_cap: f64,
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            base_count: WAVE_BASE_COUNT,
            count_increment: WAVE_COUNT_INCREMENT,
            boss_interval: BOSS_WAVE_INTERVAL,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            spawn_interval_decay_ms: SPAWN_INTERVAL_DECAY_MS,
            spawn_interval_floor_ms: SPAWN_INTERVAL_FLOOR_MS,
            difficulty_speed_step: DIFFICULTY_SPEED_STEP,
            difficulty_speed_cap: DIFFICULTY_SPEED_CAP,
            difficulty_health_step: DIFFICULTY_HEALTH_STEP,
            difficulty_health_cap: DIFFICULTY_HEALTH_CAP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefenderTuning {
    pub stats: DefenderStats,
    pub fortification_health: f64,
}

impl Default for DefenderTuning {
    fn default() -> Self {
        Self {
            stats: DefenderStats::default(),
            fortification_health: FORTIFICATION_MAX_HEALTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackerTuning {
    pub base_width: f64,
    pub base_height: f64,
    pub base_health: f64,
    pub base_damage: f64,
    pub base_speed: f64,
    pub growth_per_wave: f64,
    pub amplitude: f64,
    pub phase_step: f64,
    pub boss_phase_step: f64,
    pub boss_size_multiplier: f64,
    pub boss_health_multiplier: f64,
    pub boss_damage_multiplier: f64,
    pub boss_speed_multiplier: f64,
    pub boss_fade_steps: u32,
}

impl Default for AttackerTuning {
    fn default() -> Self {
        Self {
            base_width: ATTACKER_BASE_WIDTH,
            base_height: ATTACKER_BASE_HEIGHT,
            base_health: ATTACKER_BASE_HEALTH,
            base_damage: ATTACKER_BASE_DAMAGE,
            base_speed: ATTACKER_BASE_SPEED,
            growth_per_wave: ATTACKER_GROWTH_PER_WAVE,
            amplitude: ATTACKER_OSCILLATION_AMPLITUDE,
            phase_step: ATTACKER_PHASE_STEP,
            boss_phase_step: BOSS_PHASE_STEP,
            boss_size_multiplier: BOSS_SIZE_MULTIPLIER,
            boss_health_multiplier: BOSS_HEALTH_MULTIPLIER,
            boss_damage_multiplier: BOSS_DAMAGE_MULTIPLIER,
            boss_speed_multiplier: BOSS_SPEED_MULTIPLIER,
            boss_fade_steps: BOSS_FADE_STEPS,
        }
    }
}

/// Score and currency awarded per kill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardTuning {
    pub score_per_kill: u64,
    pub score_per_boss_kill: u64,
    pub currency_per_kill: u32,
    pub currency_per_boss_kill: u32,
}

impl Default for RewardTuning {
    fn default() -> Self {
        Self {
            score_per_kill: SCORE_PER_KILL,
            score_per_boss_kill: SCORE_PER_BOSS_KILL,
            currency_per_kill: CURRENCY_PER_KILL,
            currency_per_boss_kill: CURRENCY_PER_BOSS_KILL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardTuning {
    /// Cost by rarity, common..legendary.
    pub costs: [u32; 4],
    /// Rarity weights on regular waves, common..legendary.
    pub weights_normal: [f64; 4],
    /// Rarity weights on boss waves, common..legendary.
    pub weights_boss: [f64; 4],
    pub penalty_notice_ms: f64,
}

impl Default for CardTuning {
    fn default() -> Self {
        Self {
            costs: CARD_COSTS,
            weights_normal: RARITY_WEIGHTS_NORMAL,
            weights_boss: RARITY_WEIGHTS_BOSS,
            penalty_notice_ms: PENALTY_NOTICE_MS,
        }
    }
}
