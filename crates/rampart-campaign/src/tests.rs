use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use rampart_core::components::DefenderStats;
use rampart_core::enums::{Rarity, UpgradeKind};
use rampart_core::tuning::CardTuning;

use crate::cards::{self, CardEffect};
use crate::{ProgressionEngine, ProgressionError};

fn engine() -> ProgressionEngine {
    ProgressionEngine::new(&CardTuning::default())
}

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

#[test]
fn test_normal_offer_has_three_distinct_non_multishot_cards() {
    let mut rng = rng(11);
    for wave in 1..200 {
        let mut progression = engine();
        let offer = progression.offer_choices(wave, false, &mut rng);
        assert_eq!(offer.cards.len(), 3);
        let kinds: HashSet<UpgradeKind> = offer.cards.iter().map(|c| c.card.kind).collect();
        assert_eq!(kinds.len(), 3);
        assert!(!kinds.contains(&UpgradeKind::MultiShot));
    }
}

#[test]
fn test_boss_offer_guarantees_multishot() {
    let mut rng = rng(12);
    for _ in 0..200 {
        let mut progression = engine();
        let offer = progression.offer_choices(5, true, &mut rng);
        assert_eq!(offer.cards.len(), 3);
        let multishot: Vec<_> = offer
            .cards
            .iter()
            .filter(|c| c.card.kind == UpgradeKind::MultiShot)
            .collect();
        assert_eq!(multishot.len(), 1);
        assert_ne!(multishot[0].card.rarity, Rarity::Common);
    }
}

#[test]
fn test_offer_costs_follow_rarity() {
    let mut rng = rng(13);
    let mut progression = engine();
    let offer = progression.offer_choices(5, true, &mut rng).clone();
    for c in &offer.cards {
        assert_eq!(c.cost, progression.costs().cost(c.card.rarity));
    }
}

#[test]
fn test_pending_offer_is_not_rerolled() {
    let mut rng = rng(14);
    let mut progression = engine();
    let first = progression.offer_choices(3, false, &mut rng).clone();
    let second = progression.offer_choices(3, false, &mut rng).clone();
    assert_eq!(first, second);
}

#[test]
fn test_unaffordable_purchase_keeps_choice_open() {
    let mut rng = rng(15);
    let mut progression = engine();
    progression.earn(20);
    progression.offer_choices(1, false, &mut rng);

    let mut stats = DefenderStats::default();
    for index in 0..3 {
        let result = progression.select_card(index, &mut stats);
        assert!(matches!(
            result,
            Err(ProgressionError::CannotAfford { balance: 20, .. })
        ));
    }
    assert_eq!(progression.balance(), 20);
    assert!(progression.is_choice_pending());
    assert_eq!(stats, DefenderStats::default());
}

#[test]
fn test_skip_applies_exactly_one_penalty() {
    let mut rng = rng(16);
    let mut progression = engine();
    progression.earn(20);
    progression.offer_choices(1, false, &mut rng);

    let before = DefenderStats::default();
    let mut stats = before;
    progression.skip(&mut stats, &mut rng).unwrap();

    let changed = [
        stats.damage != before.damage,
        stats.attack_interval_ms != before.attack_interval_ms,
        stats.crit_chance != before.crit_chance,
        stats.crit_multiplier != before.crit_multiplier,
        stats.projectile_speed != before.projectile_speed,
    ];
    assert_eq!(changed.iter().filter(|c| **c).count(), 1);
    assert!(!progression.is_choice_pending());
    assert_eq!(progression.balance(), 20);
}

#[test]
fn test_purchase_deducts_and_applies() {
    let mut rng = rng(17);
    let mut progression = engine();
    progression.earn(1000);
    let offer = progression.offer_choices(5, true, &mut rng).clone();

    let mut stats = DefenderStats::default();
    let purchase = progression.select_card(0, &mut stats).unwrap();
    assert_eq!(purchase.card, offer.cards[0].card);
    assert_eq!(purchase.balance_after, 1000 - offer.cards[0].cost);
    assert_eq!(progression.balance(), purchase.balance_after);
    assert!(stats.multishot > 1);
    assert!(!progression.is_choice_pending());
}

#[test]
fn test_resolution_is_idempotent() {
    let mut rng = rng(18);
    let mut progression = engine();
    progression.earn(1000);
    progression.offer_choices(1, false, &mut rng);

    let mut stats = DefenderStats::default();
    progression.select_card(0, &mut stats).unwrap();
    let after_first = stats;

    assert_eq!(
        progression.select_card(0, &mut stats),
        Err(ProgressionError::NoPendingChoice)
    );
    assert_eq!(
        progression.skip(&mut stats, &mut rng),
        Err(ProgressionError::NoPendingChoice)
    );
    assert_eq!(stats, after_first);
}

#[test]
fn test_invalid_index_rejected() {
    let mut rng = rng(19);
    let mut progression = engine();
    progression.earn(1000);
    progression.offer_choices(1, false, &mut rng);

    let mut stats = DefenderStats::default();
    assert_eq!(
        progression.select_card(7, &mut stats),
        Err(ProgressionError::InvalidChoice {
            index: 7,
            available: 3
        })
    );
    assert_eq!(progression.balance(), 1000);
    assert!(progression.is_choice_pending());
}

#[test]
fn test_offer_view_marks_affordability() {
    let mut rng = rng(20);
    let mut progression = engine();
    progression.earn(30);
    progression.offer_choices(1, false, &mut rng);

    let view = progression.offer_view().unwrap();
    assert_eq!(view.cards.len(), 3);
    for card in &view.cards {
        assert_eq!(card.affordable, card.cost <= 30);
        assert!(!card.description.is_empty());
    }
}

#[test]
fn test_multishot_has_no_common_card() {
    assert!(cards::card(UpgradeKind::MultiShot, Rarity::Common).is_none());
    let fallback = cards::card_with_fallback(UpgradeKind::MultiShot, Rarity::Common).unwrap();
    assert_eq!(fallback.rarity, Rarity::Rare);
    assert_eq!(fallback.effect, CardEffect::MultiShot { extra: 1 });
}

#[test]
fn test_fallback_prefers_rolled_rarity() {
    let epic = cards::card_with_fallback(UpgradeKind::Damage, Rarity::Epic).unwrap();
    assert_eq!(epic.rarity, Rarity::Epic);
    assert_eq!(epic.name, "Penetrating Arrows");
}

#[test]
fn test_pool_size() {
    // Six kinds at four rarities, minus the missing common multishot.
    assert_eq!(cards::pool().len(), 23);
}
