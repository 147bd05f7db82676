//! Attacker behavior for RAMPART.
//!
//! Implements the attacker lifecycle state machine, oscillating approach
//! motion, and the regular/boss stat profiles derived from the wave number.

pub mod fsm;
pub mod profiles;

pub use rampart_core as core;

#[cfg(test)]
mod tests;
