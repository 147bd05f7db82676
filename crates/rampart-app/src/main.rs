use std::fs::OpenOptions;
use std::io;
use std::process::ExitCode;

use tracing::{error, info};

use rampart_app::config::AppConfig;
use rampart_app::game_loop::spawn_game_loop;
use rampart_app::leaderboard::{JsonLinesSink, LeaderboardSink};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

fn main() -> ExitCode {
    init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "invalid configuration");
            return ExitCode::from(2);
        }
    };

    // Scores go to a JSON-lines file when configured, stdout otherwise.
    let sink: Box<dyn LeaderboardSink> = match &config.scores_path {
        Some(path) => match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Box::new(JsonLinesSink::new(file)),
            Err(err) => {
                error!(path = %path.display(), error = %err, "cannot open score log");
                return ExitCode::from(2);
            }
        },
        None => Box::new(JsonLinesSink::new(io::stdout())),
    };

    info!(
        seed = config.sim.seed,
        nickname = %config.nickname,
        time_scale = config.sim.time_scale,
        "starting run"
    );

    let handle = spawn_game_loop(config.loop_config(), sink);
    match handle.thread.join() {
        Ok(outcome) => {
            info!(
                ticks = outcome.ticks,
                phase = ?outcome.phase,
                submitted = outcome.submitted,
                "run finished"
            );
            ExitCode::SUCCESS
        }
        Err(_) => {
            error!("game loop thread panicked");
            ExitCode::FAILURE
        }
    }
}
