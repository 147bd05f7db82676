//! Wave scheduling: how many attackers a wave holds, when each one spawns,
//! and when the wave counts as cleared.
//!
//! Spawns are driven by a "next spawn due at" timestamp checked every step,
//! so the scheduler needs no timers of its own.

use hecs::World;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use rampart_attacker_ai::profiles;
use rampart_core::components::AttackerId;
use rampart_core::enums::WavePhase;
use rampart_core::events::GameEvent;
use rampart_core::state::WaveView;
use rampart_core::tuning::{AttackerTuning, WaveTuning};
use rampart_core::types::Difficulty;

use crate::world_setup;

/// Scheduler state for the current wave.
#[derive(Debug, Clone)]
pub struct WaveScheduler {
    /// Current wave number. Starts at 1 and only grows.
    pub wave: u32,
    pub boss_wave: bool,
    pub remaining_to_spawn: u32,
    /// Clock reading at which the next spawn is due. None once every
    /// attacker of the wave is out.
    pub next_spawn_at_ms: Option<f64>,
    pub phase: WavePhase,
    /// Boss waves cleared so far. Drives `difficulty`.
    pub bosses_cleared: u32,
    pub difficulty: Difficulty,
    tuning: WaveTuning,
}

/// One attacker the scheduler wants spawned this step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnOrder {
    pub wave: u32,
    pub is_boss: bool,
}

impl WaveScheduler {
    pub fn new(tuning: WaveTuning) -> Self {
        Self {
            wave: 0,
            boss_wave: false,
            remaining_to_spawn: 0,
            next_spawn_at_ms: None,
            phase: WavePhase::Idle,
            bosses_cleared: 0,
            difficulty: Difficulty::default(),
            tuning,
        }
    }

    pub fn is_boss_wave(&self, wave: u32) -> bool {
        self.tuning.boss_interval > 0 && wave > 0 && wave % self.tuning.boss_interval == 0
    }

    /// Attackers in `wave`: exactly one on boss waves, otherwise the base
    /// count plus one increment per boss interval passed.
    pub fn enemy_count(&self, wave: u32) -> u32 {
        if self.is_boss_wave(wave) {
            return 1;
        }
        let intervals = if self.tuning.boss_interval > 0 {
            wave.saturating_sub(1) / self.tuning.boss_interval
        } else {
            0
        };
        self.tuning
            .base_count
            .saturating_add(intervals.saturating_mul(self.tuning.count_increment))
    }

    /// Delay between spawns in `wave`, shrinking linearly to a floor.
    pub fn spawn_interval_ms(&self, wave: u32) -> f64 {
        let shrunk = self.tuning.spawn_interval_ms - wave as f64 * self.tuning.spawn_interval_decay_ms;
        shrunk.max(self.tuning.spawn_interval_floor_ms)
    }

    /// True while attackers of the current wave are still waiting to spawn.
    pub fn is_spawning(&self) -> bool {
        self.remaining_to_spawn > 0
    }

    /// Begin `wave`. The first spawn is due immediately.
    pub fn start_wave(&mut self, wave: u32, now_ms: f64) {
        self.wave = wave;
        self.boss_wave = self.is_boss_wave(wave);
        self.remaining_to_spawn = self.enemy_count(wave);
        if self.remaining_to_spawn > 0 {
            self.next_spawn_at_ms = Some(now_ms);
            self.phase = WavePhase::Spawning;
        } else {
            self.next_spawn_at_ms = None;
            self.phase = WavePhase::WaitingForClear;
        }
    }

    /// Pop the spawn due at `now_ms`, if any. At most one per step.
    pub fn due_spawn(&mut self, now_ms: f64) -> Option<SpawnOrder> {
        let due_at = self.next_spawn_at_ms?;
        if self.remaining_to_spawn == 0 || now_ms < due_at {
            return None;
        }

        self.remaining_to_spawn -= 1;
        if self.remaining_to_spawn > 0 {
            self.next_spawn_at_ms = Some(now_ms + self.spawn_interval_ms(self.wave));
        } else {
            self.next_spawn_at_ms = None;
            self.phase = WavePhase::WaitingForClear;
        }

        Some(SpawnOrder {
            wave: self.wave,
            is_boss: self.boss_wave,
        })
    }

    /// Mark the wave complete once nothing is left to spawn, nothing is
    /// left alive, and no card choice is open. Returns true only on the
    /// step the wave completes.
    pub fn check_complete(&mut self, live_attackers: usize, choice_pending: bool) -> bool {
        if self.phase != WavePhase::WaitingForClear
            || self.is_spawning()
            || live_attackers > 0
            || choice_pending
        {
            return false;
        }
        self.phase = WavePhase::Complete;
        true
    }

    /// Advance to the next wave after a completed one. Raises difficulty if
    /// the completed wave was a boss wave. Does nothing unless the current
    /// wave is complete, so a second call cannot skip a wave.
    pub fn start_new_wave(&mut self, now_ms: f64) -> bool {
        if self.phase != WavePhase::Complete {
            return false;
        }
        if self.boss_wave {
            self.bosses_cleared += 1;
            self.difficulty = self.difficulty_after(self.bosses_cleared);
        }
        self.start_wave(self.wave + 1, now_ms);
        true
    }

    /// Difficulty multipliers after `bosses` boss waves.
    pub fn difficulty_after(&self, bosses: u32) -> Difficulty {
        let n = bosses as f64;
        Difficulty {
            speed: 1.0
                + (n * self.tuning.difficulty_speed_step).min(self.tuning.difficulty_speed_cap),
            health: 1.0
                + (n * self.tuning.difficulty_health_step).min(self.tuning.difficulty_health_cap),
        }
    }

    pub fn view(&self) -> WaveView {
        WaveView {
            number: self.wave,
            boss_wave: self.boss_wave,
            remaining_to_spawn: self.remaining_to_spawn,
            spawning: self.is_spawning(),
            phase: self.phase,
        }
    }
}

/// Spawn the attacker due this step, if any.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    scheduler: &mut WaveScheduler,
    tuning: &AttackerTuning,
    next_attacker_id: &mut u64,
    now_ms: f64,
    events: &mut Vec<GameEvent>,
) {
    let Some(order) = scheduler.due_spawn(now_ms) else {
        return;
    };

    // Difficulty only reaches regular attackers.
    let profile = profiles::profile_for(order.wave, order.is_boss, scheduler.difficulty, tuning);
    let id = AttackerId(*next_attacker_id);
    *next_attacker_id += 1;

    let base_y = world_setup::random_spawn_y(rng);
    world_setup::spawn_attacker(world, id, &profile, order.is_boss, base_y);

    if order.is_boss {
        info!(wave = order.wave, attacker_id = id.0, "boss spawned");
        events.push(GameEvent::BossSpawned {
            wave: order.wave,
            attacker_id: id.0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> WaveScheduler {
        WaveScheduler::new(WaveTuning::default())
    }

    #[test]
    fn test_enemy_count_formula() {
        let s = scheduler();
        assert_eq!(s.enemy_count(1), 3);
        assert_eq!(s.enemy_count(4), 3);
        assert_eq!(s.enemy_count(6), 4);
        assert_eq!(s.enemy_count(9), 4);
        assert_eq!(s.enemy_count(11), 5);
        assert_eq!(s.enemy_count(23), 3 + 22 / 5);
    }

    #[test]
    fn test_boss_waves_have_one_attacker() {
        let s = scheduler();
        for wave in [5, 10, 15, 50, 100] {
            assert!(s.is_boss_wave(wave));
            assert_eq!(s.enemy_count(wave), 1);
        }
        assert!(!s.is_boss_wave(4));
        assert!(!s.is_boss_wave(0));
    }

    #[test]
    fn test_spawn_interval_shrinks_to_floor() {
        let s = scheduler();
        assert_eq!(s.spawn_interval_ms(1), 1950.0);
        assert_eq!(s.spawn_interval_ms(10), 1500.0);
        assert_eq!(s.spawn_interval_ms(20), 1000.0);
        assert_eq!(s.spawn_interval_ms(40), 1000.0);
    }

    #[test]
    fn test_spawn_cadence() {
        let mut s = scheduler();
        s.start_wave(1, 0.0);
        assert!(s.is_spawning());
        assert_eq!(s.phase, WavePhase::Spawning);

        assert!(s.due_spawn(0.0).is_some());
        assert_eq!(s.remaining_to_spawn, 2);
        assert!(s.due_spawn(1000.0).is_none());
        assert!(s.due_spawn(1950.0).is_some());
        assert!(s.due_spawn(3899.0).is_none());
        assert!(s.due_spawn(3900.0).is_some());

        assert!(!s.is_spawning());
        assert_eq!(s.phase, WavePhase::WaitingForClear);
        assert!(s.due_spawn(100_000.0).is_none());
    }

    #[test]
    fn test_completion_waits_for_clear_and_choice() {
        let mut s = scheduler();
        s.start_wave(5, 0.0);
        assert!(!s.check_complete(0, false), "boss not spawned yet");

        let order = s.due_spawn(0.0).unwrap();
        assert!(order.is_boss);
        assert!(!s.check_complete(1, false));
        assert!(!s.check_complete(0, true));
        assert!(s.check_complete(0, false));
        assert!(!s.check_complete(0, false), "fires once");
        assert_eq!(s.phase, WavePhase::Complete);
    }

    #[test]
    fn test_start_new_wave_once() {
        let mut s = scheduler();
        s.start_wave(1, 0.0);
        assert!(!s.start_new_wave(0.0), "wave 1 not complete");

        while s.due_spawn(1e9).is_some() {}
        assert!(s.check_complete(0, false));
        assert!(s.start_new_wave(10.0));
        assert!(!s.start_new_wave(10.0));
        assert_eq!(s.wave, 2);
    }

    #[test]
    fn test_difficulty_rises_after_boss_waves_and_caps() {
        let mut s = scheduler();
        s.start_wave(5, 0.0);
        s.due_spawn(0.0);
        s.check_complete(0, false);
        s.start_new_wave(0.0);
        assert!((s.difficulty.speed - 1.2).abs() < 1e-9);
        assert!((s.difficulty.health - 1.3).abs() < 1e-9);

        let capped = s.difficulty_after(50);
        assert!((capped.speed - 2.0).abs() < 1e-9);
        assert!((capped.health - 3.0).abs() < 1e-9);
    }
}
