//! Between-wave progression for RAMPART.
//!
//! Owns the card pool, rarity rolls, the currency wallet, and the rules for
//! applying upgrades and skip penalties to the defender's stats.

pub mod cards;
pub mod economy;
pub mod error;
pub mod penalties;
pub mod progression;
pub mod rarity;
pub mod upgrades;

pub use error::ProgressionError;
pub use progression::{CardOffer, OfferedCard, ProgressionEngine, Purchase};
pub use rampart_core as core;

#[cfg(test)]
mod tests;
