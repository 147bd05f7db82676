//! The between-wave card choice.
//!
//! `ProgressionEngine` owns the wallet and at most one pending offer. The
//! simulation asks it for an offer when a wave clears, then resolves the
//! offer with either `select_card` or `skip`. Resolution methods never
//! mutate anything when they return an error.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, warn};

use rampart_core::components::DefenderStats;
use rampart_core::constants::CARDS_PER_OFFER;
use rampart_core::enums::{PenaltyKind, UpgradeKind};
use rampart_core::state::{CardView, OfferView};
use rampart_core::tuning::CardTuning;

use crate::cards::{self, CardDef};
use crate::economy::{CostTable, Wallet};
use crate::error::ProgressionError;
use crate::penalties;
use crate::rarity::RarityWeights;
use crate::upgrades;

/// A card on offer together with its price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OfferedCard {
    pub card: CardDef,
    pub cost: u32,
}

/// Cards offered after clearing `wave`.
#[derive(Debug, Clone, PartialEq)]
pub struct CardOffer {
    pub wave: u32,
    pub boss_wave: bool,
    pub cards: Vec<OfferedCard>,
}

/// A completed purchase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Purchase {
    pub card: CardDef,
    pub cost: u32,
    pub balance_after: u32,
}

#[derive(Debug, Clone)]
pub struct ProgressionEngine {
    wallet: Wallet,
    costs: CostTable,
    weights_normal: RarityWeights,
    weights_boss: RarityWeights,
    pending: Option<CardOffer>,
}

impl ProgressionEngine {
    pub fn new(tuning: &CardTuning) -> Self {
        Self {
            wallet: Wallet::default(),
            costs: CostTable {
                costs: tuning.costs,
            },
            weights_normal: RarityWeights(tuning.weights_normal),
            weights_boss: RarityWeights(tuning.weights_boss),
            pending: None,
        }
    }

    pub fn balance(&self) -> u32 {
        self.wallet.balance()
    }

    pub fn earn(&mut self, amount: u32) {
        self.wallet.earn(amount);
    }

    pub fn costs(&self) -> &CostTable {
        &self.costs
    }

    pub fn is_choice_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_offer(&self) -> Option<&CardOffer> {
        self.pending.as_ref()
    }

    /// Roll the card choice for a cleared wave.
    ///
    /// Boss waves always include a multishot card; otherwise multishot is
    /// left out. Types are drawn without replacement, so the cards are
    /// distinct. If an offer is already pending it is returned unchanged.
    pub fn offer_choices(&mut self, wave: u32, boss_wave: bool, rng: &mut impl Rng) -> &CardOffer {
        let offer = match self.pending.take() {
            Some(existing) => existing,
            None => {
                let offer = self.roll_offer(wave, boss_wave, rng);
                info!(
                    wave,
                    boss_wave,
                    cards = ?offer.cards.iter().map(|c| c.card.name).collect::<Vec<_>>(),
                    "card choice offered"
                );
                offer
            }
        };
        self.pending.insert(offer)
    }

    fn roll_offer(&self, wave: u32, boss_wave: bool, rng: &mut impl Rng) -> CardOffer {
        let mut others: Vec<UpgradeKind> = UpgradeKind::ALL
            .into_iter()
            .filter(|k| *k != UpgradeKind::MultiShot)
            .collect();
        others.shuffle(rng);

        let mut kinds = Vec::with_capacity(CARDS_PER_OFFER);
        if boss_wave {
            kinds.push(UpgradeKind::MultiShot);
        }
        let room = CARDS_PER_OFFER.saturating_sub(kinds.len());
        kinds.extend(others.into_iter().take(room));

        let weights = if boss_wave {
            self.weights_boss
        } else {
            self.weights_normal
        };

        let cards = kinds
            .into_iter()
            .filter_map(|kind| {
                let rolled = weights.roll(rng);
                cards::card_with_fallback(kind, rolled)
            })
            .map(|card| OfferedCard {
                card,
                cost: self.costs.cost(card.rarity),
            })
            .collect();

        CardOffer {
            wave,
            boss_wave,
            cards,
        }
    }

    /// Buy the card at `index` and apply it to `stats`.
    pub fn select_card(
        &mut self,
        index: usize,
        stats: &mut DefenderStats,
    ) -> Result<Purchase, ProgressionError> {
        let offer = self
            .pending
            .as_ref()
            .ok_or(ProgressionError::NoPendingChoice)?;
        let offered = *offer
            .cards
            .get(index)
            .ok_or(ProgressionError::InvalidChoice {
                index,
                available: offer.cards.len(),
            })?;

        let balance_after = match self.wallet.try_spend(offered.cost) {
            Ok(balance) => balance,
            Err(err) => {
                warn!(
                    card = offered.card.name,
                    cost = offered.cost,
                    balance = self.wallet.balance(),
                    "card purchase rejected"
                );
                return Err(err);
            }
        };

        upgrades::apply_effect(stats, offered.card.effect);
        self.pending = None;

        info!(
            card = offered.card.name,
            rarity = ?offered.card.rarity,
            cost = offered.cost,
            balance = balance_after,
            "card purchased"
        );

        Ok(Purchase {
            card: offered.card,
            cost: offered.cost,
            balance_after,
        })
    }

    /// Decline the offer and take one random penalty.
    pub fn skip(
        &mut self,
        stats: &mut DefenderStats,
        rng: &mut impl Rng,
    ) -> Result<PenaltyKind, ProgressionError> {
        if self.pending.is_none() {
            return Err(ProgressionError::NoPendingChoice);
        }
        let penalty = penalties::roll_penalty(rng);
        penalties::apply_penalty(stats, penalty);
        self.pending = None;

        info!(penalty = ?penalty, "card choice skipped");
        Ok(penalty)
    }

    /// Drop any pending offer. Used when a new session starts.
    pub fn reset(&mut self) {
        self.wallet = Wallet::default();
        self.pending = None;
    }

    /// The pending offer as the UI shows it.
    pub fn offer_view(&self) -> Option<OfferView> {
        let offer = self.pending.as_ref()?;
        Some(OfferView {
            wave: offer.wave,
            boss_wave: offer.boss_wave,
            cards: offer
                .cards
                .iter()
                .map(|c| CardView {
                    name: c.card.name.to_string(),
                    kind: c.card.kind,
                    rarity: c.card.rarity,
                    cost: c.cost,
                    description: cards::describe(&c.card.effect),
                    affordable: self.wallet.can_afford(c.cost),
                })
                .collect(),
        })
    }
}
