//! Attacker motion system.
//!
//! Runs the lifecycle FSM for every attacker, applies lateral motion and
//! oscillation, and charges the fortification when an attacker reaches the
//! defense line.

use hecs::World;
use tracing::debug;

use rampart_attacker_ai::fsm::{self, AttackerContext};
use rampart_core::components::*;
use rampart_core::enums::AttackerPhase;
use rampart_core::events::GameEvent;
use rampart_core::types::{Position, Size};

/// Right edge of the defender, or None if there is no defender.
fn defense_line(world: &World) -> Option<f64> {
    world
        .query::<(&Defender, &Position, &Size)>()
        .iter()
        .next()
        .map(|(_, (_, pos, size))| pos.x + size.width)
}

pub fn run(world: &mut World, events: &mut Vec<GameEvent>) {
    let Some(defense_line_x) = defense_line(world) else {
        return;
    };

    let mut breaches: Vec<(AttackerId, f64)> = Vec::new();

    for (_, (_, id, pos, state, osc)) in world.query_mut::<(
        &Attacker,
        &AttackerId,
        &mut Position,
        &mut AttackerState,
        &mut Oscillation,
    )>() {
        let ctx = AttackerContext {
            phase: state.phase,
            is_boss: state.is_boss,
            x: pos.x,
            lateral_speed: state.lateral_speed,
            health: state.health,
            fade_steps_remaining: state.fade_steps_remaining,
            fade_steps_total: state.fade_steps_total,
            defense_line_x,
        };
        let update = fsm::evaluate(&ctx);

        pos.x = update.new_x;
        state.phase = update.new_phase;
        state.fade_steps_remaining = update.fade_steps_remaining;

        if update.new_phase == AttackerPhase::Alive {
            let (next, y) = fsm::oscillate(osc);
            *osc = next;
            pos.y = y;
        }

        if update.breached() {
            breaches.push((*id, state.contact_damage));
        }
    }

    if breaches.is_empty() {
        return;
    }

    for (_, (_, wall)) in world.query_mut::<(&Defender, &mut Fortification)>() {
        for (id, damage) in &breaches {
            wall.health = (wall.health - damage).max(0.0);
            debug!(attacker_id = id.0, damage = *damage, remaining = wall.health, "fortification hit");
            events.push(GameEvent::FortificationHit {
                attacker_id: id.0,
                damage: *damage,
                remaining: wall.health,
            });
        }
    }
}

/// Attackers that still block wave completion: advancing or fading.
pub fn live_count(world: &World) -> usize {
    world
        .query::<(&Attacker, &AttackerState)>()
        .iter()
        .filter(|(_, (_, state))| matches!(state.phase, AttackerPhase::Alive | AttackerPhase::Dying))
        .count()
}

