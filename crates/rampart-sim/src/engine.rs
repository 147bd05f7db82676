//! Simulation engine: owns the world and runs one step per tick.
//!
//! `SimulationEngine` owns the hecs ECS world and all run state, processes
//! player commands, runs every system in a fixed order once per step, and
//! produces `GameStateSnapshot`s. Completely headless, so a seeded run is
//! reproducible in tests.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use rampart_campaign::{penalties, ProgressionEngine, ProgressionError, Purchase};
use rampart_core::commands::PlayerCommand;
use rampart_core::components::{Defender, DefenderStats, Fortification};
use rampart_core::constants::{
    ANONYMOUS_NICKNAME, DT_MS, FORTIFICATION_LOW_FRACTION, MAX_NICKNAME_LEN,
};
use rampart_core::enums::{AlertLevel, CollisionMode, GamePhase, PenaltyKind};
use rampart_core::events::{Alert, GameEvent, RunRecord};
use rampart_core::state::{GameStateSnapshot, PenaltyNotice};
use rampart_core::tuning::Tuning;
use rampart_core::types::SimTime;

use crate::systems;
use crate::systems::combat::CombatContext;
use crate::systems::snapshot::SnapshotHeader;
use crate::systems::wave_scheduler::WaveScheduler;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal). Applied by the driver.
    pub time_scale: f64,
    pub tuning: Tuning,
    pub collision_mode: CollisionMode,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            tuning: Tuning::default(),
            collision_mode: CollisionMode::default(),
        }
    }
}

/// Trimmed, length-limited nickname; blank names become "anonymous".
pub fn sanitize_nickname(raw: &str) -> String {
    let name: String = raw.trim().chars().take(MAX_NICKNAME_LEN).collect();
    let name = name.trim_end().to_string();
    if name.is_empty() {
        ANONYMOUS_NICKNAME.to_string()
    } else {
        name
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,
    alerts: Vec<Alert>,
    tuning: Tuning,
    collision_mode: CollisionMode,

    scheduler: WaveScheduler,
    progression: ProgressionEngine,
    score: u64,
    nickname: String,
    next_attacker_id: u64,
    penalty_notice: Option<PenaltyNotice>,
    run_record: Option<RunRecord>,
    low_fortification_alerted: bool,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            time_scale: config.time_scale.clamp(0.0, 4.0),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            alerts: Vec::new(),
            scheduler: WaveScheduler::new(config.tuning.wave.clone()),
            progression: ProgressionEngine::new(&config.tuning.cards),
            tuning: config.tuning,
            collision_mode: config.collision_mode,
            score: 0,
            nickname: ANONYMOUS_NICKNAME.to_string(),
            next_attacker_id: 0,
            penalty_notice: None,
            run_record: None,
            low_fortification_alerted: false,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one fixed step and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.time.advance(DT_MS);
            self.run_systems();
        }

        self.build_snapshot()
    }

    /// Advance by one step to an external clock reading (ms). Earlier
    /// readings than the current time do not rewind the clock.
    pub fn tick_at(&mut self, now_ms: f64) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.time.advance_to(now_ms);
            self.run_systems();
        }

        self.build_snapshot()
    }

    /// Process queued commands and report state without stepping. Used by
    /// drivers while the time scale is zero.
    pub fn poll(&mut self) -> GameStateSnapshot {
        self.process_commands();
        self.build_snapshot()
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn currency(&self) -> u32 {
        self.progression.balance()
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn scheduler(&self) -> &WaveScheduler {
        &self.scheduler
    }

    pub fn progression(&self) -> &ProgressionEngine {
        &self.progression
    }

    /// The final result, once the run has ended.
    pub fn run_record(&self) -> Option<&RunRecord> {
        self.run_record.as_ref()
    }

    /// Current defender stats, if a session is running.
    pub fn defender_stats(&self) -> Option<DefenderStats> {
        self.world
            .query::<(&Defender, &DefenderStats)>()
            .iter()
            .next()
            .map(|(_, (_, stats))| *stats)
    }

    /// Start a fresh run. Only valid from the main menu or after game over.
    pub fn start_session(&mut self, nickname: &str) -> bool {
        if !matches!(self.phase, GamePhase::MainMenu | GamePhase::GameOver) {
            return false;
        }

        self.world = World::new();
        self.time = SimTime::default();
        self.scheduler = WaveScheduler::new(self.tuning.wave.clone());
        self.progression.reset();
        self.score = 0;
        self.next_attacker_id = 0;
        self.penalty_notice = None;
        self.run_record = None;
        self.low_fortification_alerted = false;
        self.nickname = sanitize_nickname(nickname);

        world_setup::spawn_defender(&mut self.world, &self.tuning.defender);
        self.phase = GamePhase::Active;
        info!(nickname = %self.nickname, "session started");

        self.scheduler.start_wave(1, self.time.now_ms);
        self.announce_wave();
        true
    }

    /// Buy the offered card at `index`. On success the next wave starts.
    pub fn select_card(&mut self, index: usize) -> Result<Purchase, ProgressionError> {
        let Some((_, (_, stats))) = self
            .world
            .query_mut::<(&Defender, &mut DefenderStats)>()
            .into_iter()
            .next()
        else {
            return Err(ProgressionError::NoPendingChoice);
        };

        match self.progression.select_card(index, stats) {
            Ok(purchase) => {
                self.events.push(GameEvent::CardPurchased {
                    kind: purchase.card.kind,
                    rarity: purchase.card.rarity,
                    cost: purchase.cost,
                });
                self.resume_after_choice();
                Ok(purchase)
            }
            Err(err) => {
                if let ProgressionError::CannotAfford { cost, balance } = err {
                    self.events
                        .push(GameEvent::PurchaseRejected { cost, balance });
                }
                Err(err)
            }
        }
    }

    /// Decline the offer and take a random penalty. On success the next
    /// wave starts.
    pub fn skip_card(&mut self) -> Result<PenaltyKind, ProgressionError> {
        let Some((_, (_, stats))) = self
            .world
            .query_mut::<(&Defender, &mut DefenderStats)>()
            .into_iter()
            .next()
        else {
            return Err(ProgressionError::NoPendingChoice);
        };

        let penalty = self.progression.skip(stats, &mut self.rng)?;
        self.penalty_notice = Some(PenaltyNotice {
            kind: penalty,
            description: penalties::describe(penalty).to_string(),
            expires_at_ms: self.time.now_ms + self.tuning.cards.penalty_notice_ms,
        });
        self.events.push(GameEvent::CardSkipped { penalty });
        self.resume_after_choice();
        Ok(penalty)
    }

    /// Spawn an attacker directly (for tests).
    #[cfg(test)]
    pub(crate) fn spawn_test_attacker(
        &mut self,
        profile: &rampart_attacker_ai::profiles::AttackerProfile,
        is_boss: bool,
        base_y: f64,
    ) -> rampart_core::components::AttackerId {
        let id = rampart_core::components::AttackerId(self.next_attacker_id);
        self.next_attacker_id += 1;
        world_setup::spawn_attacker(&mut self.world, id, profile, is_boss, base_y);
        id
    }

    #[cfg(test)]
    pub(crate) fn scheduler_mut(&mut self) -> &mut WaveScheduler {
        &mut self.scheduler
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub(crate) fn earn_for_test(&mut self, amount: u32) {
        self.progression.earn(amount);
    }

    fn resume_after_choice(&mut self) {
        if self.scheduler.start_new_wave(self.time.now_ms) {
            self.phase = GamePhase::Active;
            self.announce_wave();
        }
    }

    fn announce_wave(&mut self) {
        let view = self.scheduler.view();
        info!(
            wave = view.number,
            boss = view.boss_wave,
            enemies = view.remaining_to_spawn,
            "wave started"
        );
        self.events.push(GameEvent::WaveStarted {
            wave: view.number,
            boss: view.boss_wave,
            enemies: view.remaining_to_spawn,
        });
        if view.boss_wave {
            self.alert(AlertLevel::Info, format!("Boss approaching on wave {}", view.number));
        }
    }

    fn alert(&mut self, level: AlertLevel, message: String) {
        self.alerts.push(Alert {
            level,
            message,
            tick: self.time.tick,
        });
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command. Failures become UI alerts.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartSession { nickname } => {
                if !self.start_session(&nickname) {
                    self.alert(
                        AlertLevel::Warning,
                        "A session is already running".to_string(),
                    );
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, 4.0);
            }
            PlayerCommand::SelectCard { index } => {
                if let Err(err) = self.select_card(index) {
                    self.alert(AlertLevel::Warning, err.to_string());
                }
            }
            PlayerCommand::SkipCard => {
                if let Err(err) = self.skip_card() {
                    self.alert(AlertLevel::Warning, err.to_string());
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now_ms = self.time.now_ms;

        // 1. Defender auto-attack
        systems::defender::run(&mut self.world, now_ms);
        // 2. Wave spawning
        systems::wave_scheduler::run(
            &mut self.world,
            &mut self.rng,
            &mut self.scheduler,
            &self.tuning.attacker,
            &mut self.next_attacker_id,
            now_ms,
            &mut self.events,
        );
        // 3. Attacker lifecycle, motion, wall contact
        systems::attacker_motion::run(&mut self.world, &mut self.events);
        // 4. Projectile flight
        systems::projectile::run(&mut self.world);
        // 5. Combat
        let mut combat = CombatContext {
            rng: &mut self.rng,
            progression: &mut self.progression,
            score: &mut self.score,
            events: &mut self.events,
        };
        systems::combat::run(
            &mut self.world,
            self.collision_mode,
            &self.tuning.rewards,
            &mut combat,
        );
        // 6. Damage numbers
        systems::effects::run(&mut self.world);
        // 7. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        // 8. Terminal check
        if self.check_game_over() {
            return;
        }
        self.check_low_fortification();
        // 9. Wave completion and card offer
        self.check_wave_complete();
    }

    fn check_game_over(&mut self) -> bool {
        let breached = self
            .world
            .query::<(&Defender, &Fortification)>()
            .iter()
            .any(|(_, (_, wall))| wall.is_breached());
        if !breached {
            return false;
        }

        let record = RunRecord {
            nickname: self.nickname.clone(),
            final_score: self.score,
            final_wave: self.scheduler.wave,
        };
        warn!(
            nickname = %record.nickname,
            score = record.final_score,
            wave = record.final_wave,
            "fortification breached, run ended"
        );
        self.events.push(GameEvent::RunEnded {
            record: record.clone(),
        });
        self.run_record = Some(record);
        self.phase = GamePhase::GameOver;
        true
    }

    /// Raise one critical alert per run when the wall drops below the low
    /// threshold.
    fn check_low_fortification(&mut self) {
        if self.low_fortification_alerted {
            return;
        }
        let low = self
            .world
            .query::<(&Defender, &Fortification)>()
            .iter()
            .find(|(_, (_, wall))| wall.health < wall.max_health * FORTIFICATION_LOW_FRACTION)
            .map(|(_, (_, wall))| wall.health);
        if let Some(health) = low {
            self.low_fortification_alerted = true;
            warn!(health, "fortification critical");
            self.alert(
                AlertLevel::Critical,
                format!("Fortification critical: {health:.0} left"),
            );
        }
    }

    fn check_wave_complete(&mut self) {
        let live = systems::attacker_motion::live_count(&self.world);
        if !self
            .scheduler
            .check_complete(live, self.progression.is_choice_pending())
        {
            return;
        }

        let wave = self.scheduler.wave;
        let boss_wave = self.scheduler.boss_wave;
        info!(wave, boss_wave, score = self.score, "wave cleared");
        self.events.push(GameEvent::WaveCleared { wave });

        self.progression.offer_choices(wave, boss_wave, &mut self.rng);
        self.phase = GamePhase::ChoosingCard;
    }

    fn build_snapshot(&mut self) -> GameStateSnapshot {
        if self
            .penalty_notice
            .as_ref()
            .is_some_and(|notice| self.time.now_ms >= notice.expires_at_ms)
        {
            self.penalty_notice = None;
        }

        let header = SnapshotHeader {
            time: self.time,
            phase: self.phase,
            nickname: self.nickname.clone(),
            wave: self.scheduler.view(),
            offer: self.progression.offer_view(),
            currency: self.progression.balance(),
            score: self.score,
            penalty_notice: self.penalty_notice.clone(),
            alerts: std::mem::take(&mut self.alerts),
            events: std::mem::take(&mut self.events),
        };
        systems::snapshot::build_snapshot(&self.world, header)
    }
}
