//! Weighted rarity rolls.

use rand::Rng;

use rampart_core::enums::Rarity;

/// Relative weights for common, rare, epic, legendary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RarityWeights(pub [f64; 4]);

impl RarityWeights {
    /// Roll a rarity. Weights need not sum to 1. Negative weights count as
    /// zero; an all-zero table always yields common.
    pub fn roll(&self, rng: &mut impl Rng) -> Rarity {
        let weights = self.0.map(|w| w.max(0.0));
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Rarity::Common;
        }

        let mut pick = rng.gen::<f64>() * total;
        for (rarity, weight) in Rarity::ALL.into_iter().zip(weights) {
            if pick < weight {
                return rarity;
            }
            pick -= weight;
        }
        // Float rounding can leave a sliver past the last bucket.
        Rarity::ALL
            .into_iter()
            .zip(weights)
            .rev()
            .find(|(_, w)| *w > 0.0)
            .map(|(r, _)| r)
            .unwrap_or(Rarity::Common)
    }

    /// Probability of `rarity` under these weights.
    pub fn probability(&self, rarity: Rarity) -> f64 {
        let total: f64 = self.0.iter().map(|w| w.max(0.0)).sum();
        if total <= 0.0 {
            return if rarity == Rarity::Common { 1.0 } else { 0.0 };
        }
        self.0[rarity.index()].max(0.0) / total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_roll_distribution_matches_weights() {
        let weights = RarityWeights([0.65, 0.25, 0.09, 0.01]);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut counts = [0u32; 4];
        let n = 100_000;
        for _ in 0..n {
            counts[weights.roll(&mut rng).index()] += 1;
        }
        for r in Rarity::ALL {
            let observed = counts[r.index()] as f64 / n as f64;
            let expected = weights.probability(r);
            assert!(
                (observed - expected).abs() < 0.01,
                "{r:?}: expected {expected:.3}, observed {observed:.3}"
            );
        }
    }

    #[test]
    fn test_zero_weights_yield_common() {
        let weights = RarityWeights([0.0; 4]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(weights.roll(&mut rng), Rarity::Common);
        }
    }

    #[test]
    fn test_single_bucket() {
        let weights = RarityWeights([0.0, 0.0, 0.0, 3.0]);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..100 {
            assert_eq!(weights.roll(&mut rng), Rarity::Legendary);
        }
    }
}
