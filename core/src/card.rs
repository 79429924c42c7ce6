use serde::{Deserialize, Serialize};

use crate::CardValue;

/// Canonical player-visible state of a single card.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CardState {
    FaceDown,
    FaceUp,
    Matched,
}

impl CardState {
    pub const fn is_face_down(self) -> bool {
        matches!(self, Self::FaceDown)
    }

    pub const fn is_face_up(self) -> bool {
        matches!(self, Self::FaceUp)
    }

    pub const fn is_matched(self) -> bool {
        matches!(self, Self::Matched)
    }
}

impl Default for CardState {
    fn default() -> Self {
        Self::FaceDown
    }
}

/// Per-card snapshot handed to the presentation layer: the immutable face
/// value together with the current state.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub value: CardValue,
    pub state: CardState,
}
