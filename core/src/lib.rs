#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod card;
mod engine;
mod error;
mod generator;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pair_count: PairCount,
}

impl GameConfig {
    pub const fn new_unchecked(pair_count: PairCount) -> Self {
        Self { pair_count }
    }

    /// Validates a user-supplied total card count: an even integer in
    /// `[MIN_CARD_COUNT, MAX_CARD_COUNT]`. Nothing is mutated on failure.
    pub fn from_card_count(card_count: CardCount) -> Result<Self> {
        if !(MIN_CARD_COUNT..=MAX_CARD_COUNT).contains(&card_count) || card_count % 2 != 0 {
            return Err(GameError::InvalidConfiguration);
        }
        Ok(Self::new_unchecked(card_count / 2))
    }

    pub const fn pair_count(&self) -> PairCount {
        self.pair_count
    }

    pub const fn card_count(&self) -> CardCount {
        self.pair_count * 2
    }
}

/// Immutable value layout of a shuffled deck. The multiset of values is fixed
/// at creation; all mutable per-card state lives in the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    values: Vec<CardValue>,
}

impl Deck {
    /// Builds a deck from an explicit value sequence, validating the same
    /// card-count constraints as `GameConfig::from_card_count`.
    pub fn from_card_values(values: Vec<CardValue>) -> Result<Self> {
        let card_count: CardCount = values
            .len()
            .try_into()
            .map_err(|_| GameError::InvalidConfiguration)?;
        GameConfig::from_card_count(card_count)?;
        Ok(Self { values })
    }

    pub(crate) fn from_values_unchecked(values: Vec<CardValue>) -> Self {
        Self { values }
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.pair_count())
    }

    pub fn validate_index(&self, index: CardIndex) -> Result<CardIndex> {
        if usize::from(index) < self.values.len() {
            Ok(index)
        } else {
            Err(GameError::InvalidIndex)
        }
    }

    pub fn card_count(&self) -> CardCount {
        self.values.len().try_into().unwrap()
    }

    pub fn pair_count(&self) -> PairCount {
        self.card_count() / 2
    }

    pub fn values(&self) -> &[CardValue] {
        &self.values
    }
}

impl Index<CardIndex> for Deck {
    type Output = CardValue;

    fn index(&self, index: CardIndex) -> &Self::Output {
        &self.values[usize::from(index)]
    }
}

/// Final counters reported by the terminal won notification.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub moves: MoveCount,
    pub elapsed_secs: Secs,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlipOutcome {
    NoChange,
    Revealed,
    Matched,
    Mismatch,
    Won(GameResult),
}

impl FlipOutcome {
    pub const fn has_update(self) -> bool {
        use FlipOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            Matched => true,
            Mismatch => true,
            Won(_) => true,
        }
    }

    /// True when the caller must schedule a delayed `resolve_mismatch`.
    pub const fn needs_flip_back(self) -> bool {
        matches!(self, Self::Mismatch)
    }
}
