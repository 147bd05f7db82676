//! ECS components for hecs entities.
//!
//! Components are plain data structs with few methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::*;
use crate::types::Position;

/// Marks the player's tower.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Defender;

/// Marks a hostile unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Attacker;

/// Marks a defender projectile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile;

/// Upgradable defender stats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefenderStats {
    /// Damage per projectile before crits.
    pub damage: f64,
    /// Minimum time between volleys (ms).
    pub attack_interval_ms: f64,
    /// Projectiles per volley.
    pub multishot: u32,
    /// Probability of a critical hit, in [0, 1].
    pub crit_chance: f64,
    /// Damage multiplier applied on a critical hit.
    pub crit_multiplier: f64,
    /// Projectile speed (px/step).
    pub projectile_speed: f64,
}

impl Default for DefenderStats {
    fn default() -> Self {
        Self {
            damage: DEFENDER_BASE_DAMAGE,
            attack_interval_ms: DEFENDER_BASE_ATTACK_INTERVAL_MS,
            multishot: DEFENDER_BASE_MULTISHOT,
            crit_chance: DEFENDER_BASE_CRIT_CHANCE,
            crit_multiplier: DEFENDER_BASE_CRIT_MULTIPLIER,
            projectile_speed: DEFENDER_BASE_PROJECTILE_SPEED,
        }
    }
}

impl DefenderStats {
    /// Force every stat back inside its legal range.
    pub fn clamp(&mut self) {
        self.damage = self.damage.max(MIN_DAMAGE);
        self.attack_interval_ms = self
            .attack_interval_ms
            .clamp(MIN_ATTACK_INTERVAL_MS, MAX_ATTACK_INTERVAL_MS);
        self.multishot = self.multishot.clamp(1, MAX_MULTISHOT);
        self.crit_chance = self.crit_chance.clamp(0.0, 1.0);
        self.crit_multiplier = self.crit_multiplier.max(MIN_CRIT_MULTIPLIER);
        self.projectile_speed = self
            .projectile_speed
            .clamp(MIN_PROJECTILE_SPEED, MAX_PROJECTILE_SPEED);
    }
}

/// Auto-attack cooldown bookkeeping.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FireControl {
    /// Clock reading of the last volley. None until the first shot.
    pub last_fire_ms: Option<f64>,
}

/// Castle wall health. Zero ends the run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Fortification {
    pub health: f64,
    pub max_health: f64,
}

impl Fortification {
    pub fn new(max_health: f64) -> Self {
        Self {
            health: max_health,
            max_health,
        }
    }

    pub fn is_breached(&self) -> bool {
        self.health <= 0.0
    }
}

/// Stable attacker identity, assigned in spawn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AttackerId(pub u64);

/// Per-attacker combat and lifecycle state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackerState {
    pub phase: AttackerPhase,
    pub is_boss: bool,
    /// Invariant: 0 <= health <= max_health.
    pub health: f64,
    pub max_health: f64,
    /// Horizontal speed (px/step). Always negative.
    pub lateral_speed: f64,
    /// Damage dealt to the fortification on contact.
    pub contact_damage: f64,
    /// Steps of fade left while Dying.
    pub fade_steps_remaining: u32,
    /// Full fade length, for opacity.
    pub fade_steps_total: u32,
}

impl AttackerState {
    /// Advancing and hittable.
    pub fn is_alive(&self) -> bool {
        self.phase == AttackerPhase::Alive
    }

    /// Render opacity: 1 while alive, fading to 0 while dying.
    pub fn opacity(&self) -> f64 {
        match self.phase {
            AttackerPhase::Dying if self.fade_steps_total > 0 => {
                self.fade_steps_remaining as f64 / self.fade_steps_total as f64
            }
            AttackerPhase::Dying => 0.0,
            _ => 1.0,
        }
    }
}

/// Vertical sine-wave motion around a base line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Oscillation {
    /// Top-left y the wave is centered on.
    pub base_y: f64,
    pub amplitude: f64,
    /// Current phase (rad).
    pub phase: f64,
    /// Phase advance per step (rad/step).
    pub phase_step: f64,
}

/// Flight state for a defender projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileState {
    pub phase: ProjectilePhase,
    /// Launch point.
    pub origin: Position,
    /// The attacker this projectile was aimed at. Cleared once that
    /// attacker is gone or no longer advancing.
    pub target: Option<AttackerId>,
    /// Predicted impact point computed at launch.
    pub aim_point: Position,
    /// Critical roll, set on impact.
    pub crit: bool,
}

/// Floating damage readout. Purely cosmetic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DamageNumber {
    pub value: f64,
    pub crit: bool,
    /// Remaining life in (0, 1]. Drives opacity.
    pub life: f64,
}
