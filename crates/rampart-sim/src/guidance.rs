//! Predictive aim for defender projectiles.
//!
//! The launch vector is computed once and never re-tracked. The time to
//! impact is a first-order estimate, `d / (s + target_speed)`, not a true
//! intercept solve, so fast targets are led slightly too far.

use rampart_core::types::{Position, Velocity};

/// Target motion as seen at launch time.
#[derive(Debug, Clone, Copy)]
pub struct TargetMotion {
    /// Target center.
    pub center: Position,
    /// Horizontal speed (px/step).
    pub lateral_speed: f64,
    /// Oscillation amplitude (px).
    pub amplitude: f64,
    /// Oscillation phase step (rad/step).
    pub frequency: f64,
    /// Current oscillation phase (rad).
    pub phase: f64,
}

/// Launch solution for one projectile.
#[derive(Debug, Clone, Copy)]
pub struct AimSolution {
    pub aim_point: Position,
    pub velocity: Velocity,
    /// Estimated steps until impact.
    pub time_to_hit: f64,
}

/// Rough target speed: lateral speed combined with the peak vertical rate
/// of the oscillation.
pub fn target_speed(target: &TargetMotion) -> f64 {
    let vertical_peak = target.amplitude * target.frequency;
    target.lateral_speed.hypot(vertical_peak)
}

/// Lead the target from `origin` with a projectile of speed `speed`.
pub fn lead_aim(origin: &Position, target: &TargetMotion, speed: f64) -> AimSolution {
    let distance = origin.distance_to(&target.center);
    let closing = speed + target_speed(target);
    let time_to_hit = if closing > 0.0 {
        distance / closing
    } else {
        0.0
    };

    let aim_point = Position::new(
        target.center.x + target.lateral_speed * time_to_hit,
        target.center.y + target.amplitude * (target.phase + time_to_hit * target.frequency).sin(),
    );

    let angle = (aim_point.y - origin.y).atan2(aim_point.x - origin.x);
    AimSolution {
        aim_point,
        velocity: Velocity::new(angle.cos() * speed, angle.sin() * speed),
        time_to_hit,
    }
}
