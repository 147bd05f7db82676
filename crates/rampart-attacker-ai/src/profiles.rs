//! Wave-scaled stat profiles for regular attackers and bosses.

use rampart_core::tuning::AttackerTuning;
use rampart_core::types::{Difficulty, Size};

/// Everything needed to spawn one attacker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackerProfile {
    pub size: Size,
    pub health: f64,
    pub contact_damage: f64,
    /// Horizontal speed (px/step), negative.
    pub lateral_speed: f64,
    pub amplitude: f64,
    pub phase_step: f64,
    /// Death fade length. Zero for regular attackers.
    pub fade_steps: u32,
}

/// Size/health/damage growth factor for a wave (+10% per wave by default).
pub fn growth_multiplier(wave: u32, tuning: &AttackerTuning) -> f64 {
    1.0 + wave as f64 * tuning.growth_per_wave
}

/// Regular attacker for `wave`, with the global difficulty applied.
pub fn regular_profile(wave: u32, difficulty: Difficulty, tuning: &AttackerTuning) -> AttackerProfile {
    let growth = growth_multiplier(wave, tuning);
    AttackerProfile {
        size: Size::new(tuning.base_width, tuning.base_height).scaled(growth),
        health: tuning.base_health * growth * difficulty.health,
        contact_damage: tuning.base_damage * growth,
        lateral_speed: -(tuning.base_speed * difficulty.speed),
        amplitude: tuning.amplitude,
        phase_step: tuning.phase_step,
        fade_steps: 0,
    }
}

/// Boss for `wave`: the regular profile of the same wave scaled by the boss
/// multipliers. Bigger, tougher, harder-hitting and slower. The global
/// difficulty never applies to bosses.
pub fn boss_profile(wave: u32, tuning: &AttackerTuning) -> AttackerProfile {
    let base = regular_profile(wave, Difficulty::default(), tuning);
    AttackerProfile {
        size: base.size.scaled(tuning.boss_size_multiplier),
        health: base.health * tuning.boss_health_multiplier,
        contact_damage: base.contact_damage * tuning.boss_damage_multiplier,
        lateral_speed: base.lateral_speed * tuning.boss_speed_multiplier,
        amplitude: tuning.amplitude,
        phase_step: tuning.boss_phase_step,
        fade_steps: tuning.boss_fade_steps,
    }
}

pub fn profile_for(
    wave: u32,
    is_boss: bool,
    difficulty: Difficulty,
    tuning: &AttackerTuning,
) -> AttackerProfile {
    if is_boss {
        boss_profile(wave, tuning)
    } else {
        regular_profile(wave, difficulty, tuning)
    }
}
