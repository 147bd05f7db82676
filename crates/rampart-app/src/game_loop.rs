//! Game loop thread. Runs the simulation engine at the tick rate and
//! publishes snapshots.
//!
//! The engine is created inside this thread and never leaves it.
//! Commands arrive via `mpsc` channel. The latest snapshot is stored in shared
//! state for polling. When the run ends, its record goes to the leaderboard
//! sink exactly once.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{error, info};

use rampart_core::commands::PlayerCommand;
use rampart_core::constants::TICK_RATE;
use rampart_core::enums::GamePhase;
use rampart_core::events::RunRecord;
use rampart_core::state::GameStateSnapshot;
use rampart_sim::{SimConfig, SimulationEngine};

use crate::autopilot::Autopilot;
use crate::leaderboard::LeaderboardSink;
use crate::state::{AppState, GameLoopCommand};

/// Nominal duration of one tick at 1x speed.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// How the loop runs.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub sim: SimConfig,
    pub nickname: String,
    /// Stop after this many loop iterations.
    pub max_ticks: Option<u64>,
    /// Resolve card choices automatically.
    pub autopilot: bool,
    /// Sleep between ticks to hold the tick rate. Off in tests.
    pub paced: bool,
}

/// How a loop ended.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopOutcome {
    pub ticks: u64,
    pub phase: GamePhase,
    pub record: Option<RunRecord>,
    /// True if the record reached the sink.
    pub submitted: bool,
}

/// A running game loop.
pub struct GameLoopHandle {
    pub state: AppState,
    pub thread: JoinHandle<LoopOutcome>,
}

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop(config: LoopConfig, sink: Box<dyn LeaderboardSink>) -> GameLoopHandle {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_snapshot = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    let thread = std::thread::Builder::new()
        .name("rampart-game-loop".into())
        .spawn(move || run_game_loop(config, sink, cmd_rx, &shared))
        .expect("Failed to spawn game loop thread");

    GameLoopHandle {
        state: AppState {
            command_tx: cmd_tx,
            latest_snapshot,
        },
        thread,
    }
}

/// Run until Shutdown, channel disconnect, game over, or the tick limit.
fn run_game_loop(
    config: LoopConfig,
    mut sink: Box<dyn LeaderboardSink>,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) -> LoopOutcome {
    let mut engine = SimulationEngine::new(config.sim.clone());
    engine.queue_command(PlayerCommand::StartSession {
        nickname: config.nickname.clone(),
    });

    let autopilot = Autopilot;
    let mut ticks = 0u64;
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!(ticks, "game loop stopped");
                    return finish(&engine, ticks, false);
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick, unless frozen
        let time_scale = engine.time_scale();
        let snapshot = if time_scale > 0.0 {
            engine.tick()
        } else {
            engine.poll()
        };
        ticks += 1;

        if config.autopilot {
            if let Some(cmd) = autopilot.decide(&snapshot) {
                engine.queue_command(cmd);
            }
        }

        let over = snapshot.phase == GamePhase::GameOver;

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if over {
            let submitted = submit_record(&engine, sink.as_mut());
            return finish(&engine, ticks, submitted);
        }
        if config.max_ticks.is_some_and(|max| ticks >= max) {
            info!(ticks, "tick limit reached");
            return finish(&engine, ticks, false);
        }

        // 4. Sleep until next tick, adjusting for time_scale
        if config.paced {
            let effective_tick_duration = if time_scale > 0.001 {
                TICK_DURATION.div_f64(time_scale)
            } else {
                TICK_DURATION
            };

            next_tick_time += effective_tick_duration;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > effective_tick_duration * 2 {
                // Too far behind, reset instead of catching up
                next_tick_time = now;
            }
        }
    }
}

/// Hand the run record to the sink. Failure is logged, not retried.
fn submit_record(engine: &SimulationEngine, sink: &mut dyn LeaderboardSink) -> bool {
    let Some(record) = engine.run_record() else {
        return false;
    };
    match sink.submit(record) {
        Ok(()) => {
            info!(
                nickname = %record.nickname,
                score = record.final_score,
                wave = record.final_wave,
                "score submitted"
            );
            true
        }
        Err(err) => {
            error!(error = %err, "score submission failed");
            false
        }
    }
}

fn finish(engine: &SimulationEngine, ticks: u64, submitted: bool) -> LoopOutcome {
    LoopOutcome {
        ticks,
        phase: engine.phase(),
        record: engine.run_record().cloned(),
        submitted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    use crate::leaderboard::LeaderboardError;

    /// Sink that remembers what it was given.
    #[derive(Clone, Default)]
    struct RecordingSink(Arc<Mutex<Vec<RunRecord>>>);

    impl LeaderboardSink for RecordingSink {
        fn submit(&mut self, record: &RunRecord) -> Result<(), LeaderboardError> {
            self.0.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    struct FailingSink;

    impl LeaderboardSink for FailingSink {
        fn submit(&mut self, _record: &RunRecord) -> Result<(), LeaderboardError> {
            Err(LeaderboardError::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "leaderboard offline",
            )))
        }
    }

    /// A run that ends quickly: one point of wall and a defender that
    /// barely scratches.
    fn doomed_config() -> LoopConfig {
        let mut sim = SimConfig::default();
        sim.tuning.defender.fortification_health = 1.0;
        sim.tuning.defender.stats.damage = 1.0;
        sim.tuning.defender.stats.attack_interval_ms = 5000.0;
        LoopConfig {
            sim,
            nickname: "loop".into(),
            max_ticks: Some(20_000),
            autopilot: true,
            paced: false,
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Pause))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::SkipCard))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::Pause)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::SkipCard)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }

    #[test]
    fn test_run_ends_with_one_submission() {
        let sink = RecordingSink::default();
        let handle = spawn_game_loop(doomed_config(), Box::new(sink.clone()));
        let outcome = handle.thread.join().unwrap();

        assert_eq!(outcome.phase, GamePhase::GameOver);
        assert!(outcome.submitted);
        let submitted = sink.0.lock().unwrap().clone();
        assert_eq!(submitted.len(), 1);
        assert_eq!(Some(&submitted[0]), outcome.record.as_ref());
        assert_eq!(submitted[0].nickname, "loop");

        let last = handle.state.snapshot().unwrap();
        assert_eq!(last.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_failed_submission_keeps_result() {
        let handle = spawn_game_loop(doomed_config(), Box::new(FailingSink));
        let outcome = handle.thread.join().unwrap();

        assert_eq!(outcome.phase, GamePhase::GameOver);
        assert!(!outcome.submitted);
        assert!(outcome.record.is_some());
    }

    #[test]
    fn test_tick_limit_stops_loop() {
        let config = LoopConfig {
            max_ticks: Some(30),
            ..doomed_config()
        };
        let handle = spawn_game_loop(config, Box::new(RecordingSink::default()));
        let outcome = handle.thread.join().unwrap();

        assert_eq!(outcome.ticks, 30);
        assert_eq!(outcome.phase, GamePhase::Active);
        assert!(outcome.record.is_none());
        assert_eq!(handle.state.snapshot().unwrap().time.tick, 30);
    }

    #[test]
    fn test_shutdown_stops_paced_loop() {
        let config = LoopConfig {
            max_ticks: None,
            paced: true,
            ..doomed_config()
        };
        let handle = spawn_game_loop(config, Box::new(RecordingSink::default()));
        assert!(handle.state.shutdown());
        let outcome = handle.thread.join().unwrap();
        assert!(outcome.record.is_none());
    }

    #[test]
    fn test_zero_time_scale_freezes_clock() {
        let config = LoopConfig {
            max_ticks: Some(10),
            ..doomed_config()
        };
        let mut frozen = config.clone();
        frozen.sim.time_scale = 0.0;
        let handle = spawn_game_loop(frozen, Box::new(RecordingSink::default()));
        let outcome = handle.thread.join().unwrap();

        assert_eq!(outcome.ticks, 10);
        let snap = handle.state.snapshot().unwrap();
        assert_eq!(snap.phase, GamePhase::Active);
        assert_eq!(snap.time.tick, 0);
    }
}
