//! Errors from the card choice screen.

use std::fmt;

/// Recoverable rejections from the card choice screen. None of these
/// mutate state; the choice stays open where it was open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressionError {
    /// No card choice is waiting (already resolved, or never offered).
    NoPendingChoice,
    /// Index outside the offered cards.
    InvalidChoice { index: usize, available: usize },
    /// Not enough currency for the chosen card.
    CannotAfford { cost: u32, balance: u32 },
}

impl fmt::Display for ProgressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPendingChoice => write!(f, "No card choice is pending"),
            Self::InvalidChoice { index, available } => {
                write!(f, "Card {index} does not exist ({available} offered)")
            }
            Self::CannotAfford { cost, balance } => {
                write!(f, "Cannot afford card: costs {cost}, have {balance}")
            }
        }
    }
}

impl std::error::Error for ProgressionError {}
