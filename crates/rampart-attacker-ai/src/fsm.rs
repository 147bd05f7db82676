//! Attacker lifecycle finite state machine.
//!
//! Pure functions that compute phase transitions and motion for a single
//! attacker. No ECS dependency: operates on plain data.
//!
//! ```text
//! Alive ──health<=0, boss──▶ Dying ──fade done──▶ Depleted
//!   │ └──health<=0───────────────────────────────▶ Depleted
//!   └──x <= defense line──▶ ReachedDefender
//! ```

use rampart_core::components::Oscillation;
use rampart_core::enums::AttackerPhase;

/// Input to the FSM for one attacker.
pub struct AttackerContext {
    pub phase: AttackerPhase,
    pub is_boss: bool,
    /// Left edge.
    pub x: f64,
    pub lateral_speed: f64,
    pub health: f64,
    pub fade_steps_remaining: u32,
    pub fade_steps_total: u32,
    /// Right edge of the defender. Reaching it breaches the wall.
    pub defense_line_x: f64,
}

/// Output from the FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackerUpdate {
    pub new_phase: AttackerPhase,
    pub new_x: f64,
    pub fade_steps_remaining: u32,
    pub phase_changed: bool,
}

impl AttackerUpdate {
    /// True on the step the attacker crosses the defense line.
    pub fn breached(&self) -> bool {
        self.phase_changed && self.new_phase == AttackerPhase::ReachedDefender
    }
}

/// Advance one attacker by one step.
pub fn evaluate(ctx: &AttackerContext) -> AttackerUpdate {
    let no_change = AttackerUpdate {
        new_phase: ctx.phase,
        new_x: ctx.x,
        fade_steps_remaining: ctx.fade_steps_remaining,
        phase_changed: false,
    };

    match ctx.phase {
        AttackerPhase::ReachedDefender | AttackerPhase::Depleted => no_change,
        AttackerPhase::Dying => evaluate_dying(ctx),
        AttackerPhase::Alive => evaluate_alive(ctx),
    }
}

fn evaluate_alive(ctx: &AttackerContext) -> AttackerUpdate {
    if ctx.health <= 0.0 {
        let (new_phase, fade) = on_depleted(ctx.is_boss, ctx.fade_steps_total);
        return AttackerUpdate {
            new_phase,
            new_x: ctx.x,
            fade_steps_remaining: fade,
            phase_changed: true,
        };
    }

    let new_x = ctx.x + ctx.lateral_speed;
    if new_x <= ctx.defense_line_x {
        return AttackerUpdate {
            new_phase: AttackerPhase::ReachedDefender,
            new_x,
            fade_steps_remaining: 0,
            phase_changed: true,
        };
    }

    AttackerUpdate {
        new_phase: AttackerPhase::Alive,
        new_x,
        fade_steps_remaining: 0,
        phase_changed: false,
    }
}

fn evaluate_dying(ctx: &AttackerContext) -> AttackerUpdate {
    let remaining = ctx.fade_steps_remaining.saturating_sub(1);
    AttackerUpdate {
        new_phase: if remaining == 0 {
            AttackerPhase::Depleted
        } else {
            AttackerPhase::Dying
        },
        new_x: ctx.x,
        fade_steps_remaining: remaining,
        phase_changed: remaining == 0,
    }
}

/// Phase entered when health runs out: bosses fade, everything else is
/// removed immediately. Returns (phase, fade steps).
pub fn on_depleted(is_boss: bool, fade_steps_total: u32) -> (AttackerPhase, u32) {
    if is_boss && fade_steps_total > 0 {
        (AttackerPhase::Dying, fade_steps_total)
    } else {
        (AttackerPhase::Depleted, 0)
    }
}

/// Advance the sine wave by one step. Returns the updated oscillation and
/// the new top-left y.
pub fn oscillate(osc: &Oscillation) -> (Oscillation, f64) {
    let next = Oscillation {
        phase: osc.phase + osc.phase_step,
        ..*osc
    };
    let y = next.base_y + next.amplitude * next.phase.sin();
    (next, y)
}
