//! Runner configuration from environment variables and an optional TOML
//! tuning file.
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `RAMPART_SEED` | RNG seed | 42 |
//! | `RAMPART_NICKNAME` | Player name | `anonymous` |
//! | `RAMPART_MAX_TICKS` | Stop after this many ticks | unlimited |
//! | `RAMPART_TIME_SCALE` | Speed multiplier, 0 to 4 | 1 |
//! | `RAMPART_TUNING` | Path to a TOML `Tuning` override | none |
//! | `RAMPART_SCORES` | JSON-lines score log path | stdout |

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use rampart_core::constants::ANONYMOUS_NICKNAME;
use rampart_core::tuning::Tuning;
use rampart_sim::SimConfig;

use crate::game_loop::LoopConfig;

#[derive(Debug)]
pub enum ConfigError {
    /// An environment variable held something unparseable.
    InvalidValue { var: &'static str, value: String },
    /// The tuning file could not be read.
    ReadTuning { path: PathBuf, source: std::io::Error },
    /// The tuning file is not valid TOML for `Tuning`.
    ParseTuning { path: PathBuf, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { var, value } => write!(f, "Invalid value for {var}: {value:?}"),
            Self::ReadTuning { path, source } => {
                write!(f, "Cannot read tuning file {}: {source}", path.display())
            }
            Self::ParseTuning { path, message } => {
                write!(f, "Invalid tuning file {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadTuning { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Everything the runner needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub sim: SimConfig,
    pub nickname: String,
    pub max_ticks: Option<u64>,
    pub scores_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            nickname: ANONYMOUS_NICKNAME.to_string(),
            max_ticks: None,
            scores_path: None,
        }
    }
}

impl AppConfig {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source. Unset or blank variables keep their
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(seed) = parse_var::<u64>("RAMPART_SEED", get("RAMPART_SEED"))? {
            config.sim.seed = seed;
        }
        if let Some(scale) = parse_var::<f64>("RAMPART_TIME_SCALE", get("RAMPART_TIME_SCALE"))? {
            if !(0.0..=4.0).contains(&scale) {
                return Err(ConfigError::InvalidValue {
                    var: "RAMPART_TIME_SCALE",
                    value: scale.to_string(),
                });
            }
            config.sim.time_scale = scale;
        }
        config.max_ticks = parse_var::<u64>("RAMPART_MAX_TICKS", get("RAMPART_MAX_TICKS"))?;
        if let Some(nickname) = get("RAMPART_NICKNAME") {
            config.nickname = nickname;
        }
        if let Some(path) = get("RAMPART_TUNING") {
            config.sim.tuning = load_tuning(Path::new(&path))?;
        }
        config.scores_path = get("RAMPART_SCORES").map(PathBuf::from);

        Ok(config)
    }

    /// Loop settings for an unattended, real-time run.
    pub fn loop_config(&self) -> LoopConfig {
        LoopConfig {
            sim: self.sim.clone(),
            nickname: self.nickname.clone(),
            max_ticks: self.max_ticks,
            autopilot: true,
            paced: true,
        }
    }
}

fn parse_var<T: std::str::FromStr>(
    var: &'static str,
    raw: Option<String>,
) -> Result<Option<T>, ConfigError> {
    let Some(value) = raw else {
        return Ok(None);
    };
    match value.trim().parse::<T>() {
        Ok(parsed) => Ok(Some(parsed)),
        Err(_) => Err(ConfigError::InvalidValue { var, value }),
    }
}

/// Parse a TOML tuning override. Missing keys keep their defaults.
pub fn parse_tuning(text: &str, path: &Path) -> Result<Tuning, ConfigError> {
    toml::from_str(text).map_err(|err| ConfigError::ParseTuning {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

pub fn load_tuning(path: &Path) -> Result<Tuning, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadTuning {
        path: path.to_path_buf(),
        source,
    })?;
    parse_tuning(&text, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.sim.seed, 42);
        assert_eq!(config.nickname, ANONYMOUS_NICKNAME);
        assert!(config.max_ticks.is_none());
        assert!(config.scores_path.is_none());
    }

    #[test]
    fn test_env_values() {
        let config = AppConfig::from_lookup(lookup(&[
            ("RAMPART_SEED", "7"),
            ("RAMPART_NICKNAME", "Robin"),
            ("RAMPART_MAX_TICKS", "600"),
            ("RAMPART_TIME_SCALE", "2.5"),
            ("RAMPART_SCORES", "/tmp/scores.jsonl"),
        ]))
        .unwrap();
        assert_eq!(config.sim.seed, 7);
        assert_eq!(config.nickname, "Robin");
        assert_eq!(config.max_ticks, Some(600));
        assert_eq!(config.sim.time_scale, 2.5);
        assert_eq!(config.scores_path, Some(PathBuf::from("/tmp/scores.jsonl")));
    }

    #[test]
    fn test_bad_values_are_errors() {
        let err = AppConfig::from_lookup(lookup(&[("RAMPART_SEED", "many")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                var: "RAMPART_SEED",
                ..
            }
        ));

        let err = AppConfig::from_lookup(lookup(&[("RAMPART_TIME_SCALE", "9")])).unwrap_err();
        assert!(err.to_string().contains("RAMPART_TIME_SCALE"));
    }

    #[test]
    fn test_blank_values_keep_defaults() {
        let config = AppConfig::from_lookup(lookup(&[("RAMPART_SEED", "  ")])).unwrap();
        assert_eq!(config.sim.seed, 42);
    }

    #[test]
    fn test_partial_tuning_override() {
        let text = r#"
            [wave]
            base_count = 5

            [defender.stats]
            damage = 40.0

            [cards]
            costs = [10, 20, 30, 40]
        "#;
        let tuning = parse_tuning(text, Path::new("tuning.toml")).unwrap();
        assert_eq!(tuning.wave.base_count, 5);
        assert_eq!(tuning.wave.boss_interval, 5);
        assert_eq!(tuning.defender.stats.damage, 40.0);
        assert_eq!(tuning.defender.stats.multishot, 1);
        assert_eq!(tuning.cards.costs, [10, 20, 30, 40]);
        assert_eq!(tuning.rewards, Tuning::default().rewards);
    }

    #[test]
    fn test_invalid_tuning_names_the_file() {
        let err = parse_tuning("[wave]\nbase_count = \"lots\"", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseTuning { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_missing_tuning_file() {
        let err = load_tuning(Path::new("/nonexistent/rampart/tuning.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadTuning { .. }));
    }

    #[test]
    fn test_loop_config_runs_paced_with_autopilot() {
        let config = AppConfig::from_lookup(lookup(&[
            ("RAMPART_SEED", "11"),
            ("RAMPART_MAX_TICKS", "500"),
        ]))
        .unwrap();
        let run = config.loop_config();
        assert_eq!(run.sim.seed, 11);
        assert_eq!(run.max_ticks, Some(500));
        assert_eq!(run.nickname, ANONYMOUS_NICKNAME);
        assert!(run.autopilot);
        assert!(run.paced);
    }
}
