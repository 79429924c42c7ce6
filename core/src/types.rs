/// Symbol printed on a card face, drawn from `1..=MAX_CARD_VALUE`.
pub type CardValue = u8;

/// Stable identity of a card: its position in the deck, `0..card_count`.
pub type CardIndex = u8;

/// Count type used for total cards in a deck.
pub type CardCount = u8;

/// Count type used for pairs, `card_count / 2`.
pub type PairCount = u8;

/// Counter for completed two-card flip attempts.
pub type MoveCount = u32;

/// Whole seconds elapsed since the session started.
pub type Secs = u32;

/// Smallest playable deck.
pub const MIN_CARD_COUNT: CardCount = 4;

/// Largest playable deck.
pub const MAX_CARD_COUNT: CardCount = 100;

/// Upper bound of the value range cards are drawn from.
pub const MAX_CARD_VALUE: CardValue = 100;
