use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// Shuffled source of the 36 Durak cards.
///
/// The deck only lives during setup: the trump is drawn first, the hands are
/// dealt from what is left, and dealing consumes the deck.
#[derive(Debug)]
pub struct Deck {
    /// Top of the deck is the front
    cards: Vec<Card>,
    trump_drawn: bool,
}

impl Deck {
    /// Full deck shuffled with a ChaCha20 stream seeded from `seed`.
    pub fn shuffled(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut cards = full_deck();
        cards.shuffle(&mut rng);
        Self {
            cards,
            trump_drawn: false,
        }
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Takes the top card as the trump. The trump leaves play.
    pub fn draw_trump(&mut self) -> Result<Card, GameError> {
        if self.trump_drawn || self.cards.is_empty() {
            return Err(GameError::DeckExhausted);
        }
        self.trump_drawn = true;
        Ok(self.cards.remove(0))
    }

    /// Deals `hand_size` cards to each of `players` seats, one card per seat
    /// in turn. Cards left over are dropped with the deck.
    pub fn deal_hands(self, players: usize, hand_size: usize) -> Result<Vec<Vec<Card>>, GameError> {
        let needed = players
            .checked_mul(hand_size)
            .ok_or(GameError::DeckExhausted)?;
        if needed > self.cards.len() {
            return Err(GameError::DeckExhausted);
        }
        let mut hands = vec![Vec::with_capacity(hand_size); players];
        for (i, card) in self.cards.into_iter().take(needed).enumerate() {
            hands[i % players].push(card);
        }
        Ok(hands)
    }
}
