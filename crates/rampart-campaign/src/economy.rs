//! Currency wallet and card prices.

use serde::{Deserialize, Serialize};

use rampart_core::constants::CARD_COSTS;
use rampart_core::enums::Rarity;

use crate::error::ProgressionError;

/// Card price by rarity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostTable {
    pub costs: [u32; 4],
}

impl Default for CostTable {
    fn default() -> Self {
        Self { costs: CARD_COSTS }
    }
}

impl CostTable {
    pub fn cost(&self, rarity: Rarity) -> u32 {
        self.costs[rarity.index()]
    }

    pub fn cheapest(&self) -> u32 {
        self.costs.iter().copied().min().unwrap_or(0)
    }
}

/// The player's currency balance. Never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    balance: u32,
}

impl Wallet {
    pub fn with_balance(balance: u32) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> u32 {
        self.balance
    }

    pub fn earn(&mut self, amount: u32) {
        self.balance = self.balance.saturating_add(amount);
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.balance >= cost
    }

    /// Deduct `cost`, or leave the balance untouched and report why not.
    pub fn try_spend(&mut self, cost: u32) -> Result<u32, ProgressionError> {
        if !self.can_afford(cost) {
            return Err(ProgressionError::CannotAfford {
                cost,
                balance: self.balance,
            });
        }
        self.balance -= cost;
        Ok(self.balance)
    }
}
