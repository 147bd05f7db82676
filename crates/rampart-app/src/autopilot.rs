//! Resolves card choices so the headless runner can play unattended.

use rampart_core::commands::PlayerCommand;
use rampart_core::enums::GamePhase;
use rampart_core::state::GameStateSnapshot;

/// Buys the most expensive affordable card, or skips when nothing is
/// affordable.
#[derive(Debug, Default, Clone, Copy)]
pub struct Autopilot;

impl Autopilot {
    pub fn decide(&self, snapshot: &GameStateSnapshot) -> Option<PlayerCommand> {
        if snapshot.phase != GamePhase::ChoosingCard {
            return None;
        }
        let offer = snapshot.offer.as_ref()?;

        let best = offer
            .cards
            .iter()
            .enumerate()
            .filter(|(_, card)| card.affordable)
            .max_by_key(|(index, card)| (card.cost, std::cmp::Reverse(*index)));

        Some(match best {
            Some((index, _)) => PlayerCommand::SelectCard { index },
            None => PlayerCommand::SkipCard,
        })
    }
}
