//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! Read-only: never modifies the world.

use hecs::World;

use rampart_core::components::*;
use rampart_core::enums::GamePhase;
use rampart_core::events::{Alert, DamageNumberView, GameEvent};
use rampart_core::state::*;
use rampart_core::types::{Position, SimTime, Size, Velocity};

/// Run state that lives outside the world.
pub struct SnapshotHeader {
    pub time: SimTime,
    pub phase: GamePhase,
    pub nickname: String,
    pub wave: WaveView,
    pub offer: Option<OfferView>,
    pub currency: u32,
    pub score: u64,
    pub penalty_notice: Option<PenaltyNotice>,
    pub alerts: Vec<Alert>,
    pub events: Vec<GameEvent>,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(world: &World, header: SnapshotHeader) -> GameStateSnapshot {
    GameStateSnapshot {
        time: header.time,
        phase: header.phase,
        nickname: header.nickname,
        wave: header.wave,
        defender: build_defender(world),
        attackers: build_attackers(world),
        projectiles: build_projectiles(world),
        damage_numbers: build_damage_numbers(world),
        offer: header.offer,
        currency: header.currency,
        score: header.score,
        penalty_notice: header.penalty_notice,
        alerts: header.alerts,
        events: header.events,
    }
}

fn build_defender(world: &World) -> Option<DefenderView> {
    world
        .query::<(&Defender, &Position, &Size, &DefenderStats, &Fortification)>()
        .iter()
        .next()
        .map(|(_, (_, pos, size, stats, wall))| DefenderView {
            position: *pos,
            size: *size,
            stats: *stats,
            fortification_health: wall.health,
            fortification_max: wall.max_health,
        })
}

/// Attackers in spawn order.
fn build_attackers(world: &World) -> Vec<AttackerView> {
    let mut attackers: Vec<AttackerView> = world
        .query::<(&Attacker, &AttackerId, &Position, &Size, &AttackerState)>()
        .iter()
        .map(|(_, (_, id, pos, size, state))| AttackerView {
            id: id.0,
            position: *pos,
            size: *size,
            health: state.health,
            max_health: state.max_health,
            boss: state.is_boss,
            phase: state.phase,
            opacity: state.opacity(),
        })
        .collect();
    attackers.sort_by_key(|a| a.id);
    attackers
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Projectile, &Position, &Velocity, &ProjectileState)>()
        .iter()
        .map(|(_, (_, pos, vel, state))| ProjectileView {
            position: *pos,
            angle: vel.y.atan2(vel.x),
            target: state.target.map(|id| id.0),
        })
        .collect()
}

fn build_damage_numbers(world: &World) -> Vec<DamageNumberView> {
    world
        .query::<(&DamageNumber, &Position)>()
        .iter()
        .map(|(_, (number, pos))| DamageNumberView {
            position: *pos,
            value: number.value,
            crit: number.crit,
            opacity: number.life.clamp(0.0, 1.0),
        })
        .collect()
}
