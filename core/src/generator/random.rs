use alloc::vec::Vec;

use super::*;

/// Generation strategy that draws each pair's value independently at random
/// from `1..=MAX_CARD_VALUE`. Values are drawn with replacement, so two
/// different pairs can land on the same value; cards match by value alone.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomDeckGenerator {
    seed: u64,
}

impl RandomDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckGenerator for RandomDeckGenerator {
    fn generate(self, config: GameConfig) -> Deck {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(self.seed);

        let pair_count = usize::from(config.pair_count());
        let mut drawn: Vec<CardValue> = Vec::with_capacity(pair_count);
        let mut values: Vec<CardValue> = Vec::with_capacity(pair_count * 2);
        for _ in 0..pair_count {
            let value: CardValue = rng.random_range(1..=MAX_CARD_VALUE);
            drawn.push(value);
            values.push(value);
            values.push(value);
        }

        // Fisher-Yates: walk from the last index down to 1, swapping with a
        // uniform index at or below it, so every permutation is equiprobable
        for i in (1..values.len()).rev() {
            let j = rng.random_range(0..=i);
            values.swap(i, j);
        }

        drawn.sort_unstable();
        drawn.dedup();
        if drawn.len() < pair_count {
            log::debug!(
                "deck has {} distinct values for {} pairs",
                drawn.len(),
                pair_count
            );
        }

        Deck::from_values_unchecked(values)
    }
}
