use alloc::vec;
use alloc::vec::Vec;
use core::num::Saturating;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    Running,
    Won,
}

impl EngineState {
    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Running
    }
}

/// Flip-resolution state machine for one session. The deck's values are
/// immutable; all mutable state (card faces, counters, the flip lock) lives
/// here. Timers are owned by the caller and drive `tick` and
/// `resolve_mismatch`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    deck: Deck,
    board: Vec<CardState>,
    pending: SmallVec<[CardIndex; 2]>,
    flip_lock: bool,
    move_count: Saturating<MoveCount>,
    matched_pairs: Saturating<PairCount>,
    elapsed_secs: Saturating<Secs>,
    state: EngineState,
}

impl PlayEngine {
    pub fn new(deck: Deck) -> Self {
        let board = vec![CardState::default(); deck.card_count().into()];
        Self {
            deck,
            board,
            pending: SmallVec::new(),
            flip_lock: false,
            move_count: Saturating(0),
            matched_pairs: Saturating(0),
            elapsed_secs: Saturating(0),
            state: Default::default(),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_won(&self) -> bool {
        self.state.is_won()
    }

    pub fn card_count(&self) -> CardCount {
        self.deck.card_count()
    }

    pub fn pair_count(&self) -> PairCount {
        self.deck.pair_count()
    }

    pub fn move_count(&self) -> MoveCount {
        self.move_count.0
    }

    pub fn matched_pairs(&self) -> PairCount {
        self.matched_pairs.0
    }

    pub fn elapsed_secs(&self) -> Secs {
        self.elapsed_secs.0
    }

    pub fn is_locked(&self) -> bool {
        self.flip_lock
    }

    pub fn card_at(&self, index: CardIndex) -> Card {
        Card {
            value: self.deck[index],
            state: self.board[usize::from(index)],
        }
    }

    /// Whether a flip attempt at `index` would currently be accepted. Used by
    /// the presentation layer to render unclickable cards.
    pub fn can_flip_at(&self, index: CardIndex) -> bool {
        !self.state.is_won()
            && !self.flip_lock
            && self
                .deck
                .validate_index(index)
                .map_or(false, |index| self.board[usize::from(index)].is_face_down())
    }

    /// The terminal won notification, once the last pair is matched.
    pub fn game_result(&self) -> Option<GameResult> {
        self.state.is_won().then(|| GameResult {
            moves: self.move_count.0,
            elapsed_secs: self.elapsed_secs.0,
        })
    }

    /// Attempts to flip the card at `index`. Rejected attempts return
    /// `NoChange` and leave every card and counter untouched; they are not
    /// queued. A `Mismatch` outcome keeps both cards face up and locks the
    /// board until the caller invokes `resolve_mismatch` after its cool-down
    /// delay.
    pub fn flip(&mut self, index: CardIndex) -> Result<FlipOutcome> {
        use FlipOutcome::*;

        let index = self.deck.validate_index(index)?;

        if self.state.is_won() || self.flip_lock {
            return Ok(NoChange);
        }

        if !self.board[usize::from(index)].is_face_down() {
            return Ok(NoChange);
        }

        // Re-clicking the lone revealed card is a no-op, not a self-match.
        // Already covered by the face-down check, kept explicit.
        if self.pending.len() == 1 && self.pending[0] == index {
            return Ok(NoChange);
        }

        self.board[usize::from(index)] = CardState::FaceUp;
        self.pending.push(index);

        if self.pending.len() < 2 {
            return Ok(Revealed);
        }

        // A completed two-card attempt counts as a move regardless of outcome.
        self.move_count += 1;

        let (first, second) = (self.pending[0], self.pending[1]);
        if self.deck[first] == self.deck[second] {
            self.board[usize::from(first)] = CardState::Matched;
            self.board[usize::from(second)] = CardState::Matched;
            self.matched_pairs += 1;
            self.pending.clear();

            if self.matched_pairs.0 == self.deck.pair_count() {
                self.state = EngineState::Won;
                log::debug!(
                    "game won in {} moves, {}s",
                    self.move_count.0,
                    self.elapsed_secs.0
                );
                return Ok(Won(GameResult {
                    moves: self.move_count.0,
                    elapsed_secs: self.elapsed_secs.0,
                }));
            }

            Ok(Matched)
        } else {
            self.flip_lock = true;
            Ok(Mismatch)
        }
    }

    /// Turns the mismatched pair back face down and releases the flip lock.
    /// No-op when the lock is not held, so a stale timer callback is safe.
    pub fn resolve_mismatch(&mut self) {
        if !self.flip_lock {
            return;
        }

        for index in self.pending.drain(..) {
            self.board[usize::from(index)] = CardState::FaceDown;
        }
        self.flip_lock = false;
    }

    /// Advances the elapsed-time clock by one second while the game is
    /// running. Driven by the caller's interval timer; no-op once won.
    pub fn tick(&mut self) -> Secs {
        if !self.state.is_won() {
            self.elapsed_secs += 1;
        }
        self.elapsed_secs.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(values: &[CardValue]) -> PlayEngine {
        PlayEngine::new(Deck::from_card_values(values.to_vec()).unwrap())
    }

    #[test]
    fn new_engine_starts_face_down_with_zero_counters() {
        let engine = engine(&[1, 2, 3, 4, 1, 2, 3, 4]);

        assert_eq!(engine.state(), EngineState::Running);
        assert_eq!(engine.move_count(), 0);
        assert_eq!(engine.matched_pairs(), 0);
        assert_eq!(engine.elapsed_secs(), 0);
        assert!(!engine.is_locked());
        for index in 0..engine.card_count() {
            assert_eq!(engine.card_at(index).state, CardState::FaceDown);
        }
    }

    #[test]
    fn single_reveal_moves_no_counters() {
        let mut engine = engine(&[1, 2, 2, 1]);

        assert_eq!(engine.flip(0).unwrap(), FlipOutcome::Revealed);
        assert_eq!(engine.card_at(0).state, CardState::FaceUp);
        assert_eq!(engine.move_count(), 0);
        assert_eq!(engine.matched_pairs(), 0);
    }

    #[test]
    fn mismatch_locks_board_until_resolved() {
        let mut engine = engine(&[1, 2, 2, 1]);

        engine.flip(0).unwrap();
        assert_eq!(engine.flip(1).unwrap(), FlipOutcome::Mismatch);
        assert_eq!(engine.move_count(), 1);
        assert!(engine.is_locked());
        assert_eq!(engine.card_at(0).state, CardState::FaceUp);
        assert_eq!(engine.card_at(1).state, CardState::FaceUp);

        // locked board rejects further attempts without touching state
        assert_eq!(engine.flip(2).unwrap(), FlipOutcome::NoChange);
        assert_eq!(engine.card_at(2).state, CardState::FaceDown);
        assert_eq!(engine.move_count(), 1);

        engine.resolve_mismatch();
        assert!(!engine.is_locked());
        assert_eq!(engine.card_at(0).state, CardState::FaceDown);
        assert_eq!(engine.card_at(1).state, CardState::FaceDown);

        // resolving again is a no-op
        engine.resolve_mismatch();
        assert!(!engine.is_locked());
        assert_eq!(engine.move_count(), 1);
    }

    #[test]
    fn match_transitions_both_cards_and_counts_one_pair() {
        let mut engine = engine(&[1, 2, 2, 1, 3, 3]);

        engine.flip(0).unwrap();
        assert_eq!(engine.flip(3).unwrap(), FlipOutcome::Matched);
        assert_eq!(engine.move_count(), 1);
        assert_eq!(engine.matched_pairs(), 1);
        assert_eq!(engine.card_at(0).state, CardState::Matched);
        assert_eq!(engine.card_at(3).state, CardState::Matched);
        assert!(!engine.is_locked());
    }

    #[test]
    fn rejected_flips_change_nothing() {
        let mut engine = engine(&[1, 2, 2, 1]);

        engine.flip(0).unwrap();
        // sole pending card
        assert_eq!(engine.flip(0).unwrap(), FlipOutcome::NoChange);
        assert_eq!(engine.move_count(), 0);

        engine.flip(3).unwrap();
        assert_eq!(engine.matched_pairs(), 1);
        // matched card
        assert_eq!(engine.flip(0).unwrap(), FlipOutcome::NoChange);
        assert_eq!(engine.move_count(), 1);

        // face-up card
        engine.flip(1).unwrap();
        assert_eq!(engine.flip(1).unwrap(), FlipOutcome::NoChange);
        assert_eq!(engine.move_count(), 1);

        // out-of-range index is classified, not a panic
        assert_eq!(engine.flip(4), Err(GameError::InvalidIndex));
    }

    #[test]
    fn last_pair_wins_with_final_counters() {
        let mut engine = engine(&[1, 2, 2, 1]);

        engine.tick();
        engine.tick();

        engine.flip(0).unwrap();
        engine.flip(3).unwrap();
        engine.flip(1).unwrap();
        let outcome = engine.flip(2).unwrap();

        assert_eq!(
            outcome,
            FlipOutcome::Won(GameResult {
                moves: 2,
                elapsed_secs: 2,
            })
        );
        assert_eq!(engine.state(), EngineState::Won);
        assert_eq!(
            engine.game_result(),
            Some(GameResult {
                moves: 2,
                elapsed_secs: 2,
            })
        );
    }

    #[test]
    fn won_game_ignores_flips_and_ticks() {
        let mut engine = engine(&[7, 7, 9, 9]);

        engine.flip(0).unwrap();
        engine.flip(1).unwrap();
        engine.flip(2).unwrap();
        assert!(matches!(engine.flip(3).unwrap(), FlipOutcome::Won(_)));

        assert_eq!(engine.flip(0).unwrap(), FlipOutcome::NoChange);
        assert_eq!(engine.move_count(), 2);
        assert_eq!(engine.tick(), 0);
        assert_eq!(engine.elapsed_secs(), 0);
    }

    #[test]
    fn tick_advances_while_running() {
        let mut engine = engine(&[1, 2, 2, 1]);

        assert_eq!(engine.tick(), 1);
        assert_eq!(engine.tick(), 2);
        assert_eq!(engine.elapsed_secs(), 2);
    }

    #[test]
    fn pairs_sharing_a_value_match_across_pairs() {
        // values are drawn with replacement, so two pairs can coincide; any
        // two face-up cards with equal values count as a match
        let mut engine = engine(&[5, 5, 5, 5]);

        engine.flip(0).unwrap();
        assert_eq!(engine.flip(2).unwrap(), FlipOutcome::Matched);
        assert_eq!(engine.matched_pairs(), 1);
    }

    #[test]
    fn can_flip_at_reflects_board_and_lock() {
        let mut engine = engine(&[1, 2, 2, 1]);

        assert!(engine.can_flip_at(0));
        assert!(!engine.can_flip_at(4));

        engine.flip(0).unwrap();
        assert!(!engine.can_flip_at(0));
        assert!(engine.can_flip_at(1));

        engine.flip(1).unwrap();
        assert!(engine.is_locked());
        assert!(!engine.can_flip_at(2));

        engine.resolve_mismatch();
        assert!(engine.can_flip_at(2));
    }

    #[test]
    fn serde_round_trips_session_state() {
        let mut engine = engine(&[1, 2, 2, 1]);
        engine.flip(0).unwrap();
        engine.tick();

        let json = serde_json::to_string(&engine).unwrap();
        let restored: PlayEngine = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, engine);
    }
}
