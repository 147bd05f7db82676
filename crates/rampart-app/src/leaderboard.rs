//! Leaderboard submission boundary.
//!
//! A finished run produces one `RunRecord`. The runner hands it to a
//! `LeaderboardSink` exactly once; a failed submission is logged and
//! reported but never retried.

use std::fmt;
use std::io::{self, Write};

use rampart_core::events::RunRecord;

#[derive(Debug)]
pub enum LeaderboardError {
    Io(io::Error),
    Encode(serde_json::Error),
}

impl fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "Failed to write score: {err}"),
            Self::Encode(err) => write!(f, "Failed to encode score: {err}"),
        }
    }
}

impl std::error::Error for LeaderboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<io::Error> for LeaderboardError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for LeaderboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode(err)
    }
}

/// Where finished runs go.
pub trait LeaderboardSink: Send {
    fn submit(&mut self, record: &RunRecord) -> Result<(), LeaderboardError>;
}

/// Writes one JSON object per run, one run per line.
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> LeaderboardSink for JsonLinesSink<W> {
    fn submit(&mut self, record: &RunRecord) -> Result<(), LeaderboardError> {
        let line = serde_json::to_string(record)?;
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;
        Ok(())
    }
}
