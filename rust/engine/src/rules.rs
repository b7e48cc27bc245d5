use serde::{Deserialize, Serialize};

use crate::cards::{Card, Suit};
use crate::errors::GameError;

/// Card comparator for one game, fixed to the trump drawn at setup.
///
/// # Examples
///
/// ```
/// use durak_engine::cards::{Card, Rank, Suit};
/// use durak_engine::rules::Judge;
///
/// let judge = Judge::new(Card::new(Rank::Six, Suit::Hearts));
///
/// // Same suit: higher rank wins
/// let nine = Card::new(Rank::Nine, Suit::Clubs);
/// let ace = Card::new(Rank::Ace, Suit::Clubs);
/// assert_eq!(judge.get_stronger(nine, ace), Ok(ace));
///
/// // Any trump beats any non-trump
/// let seven_hearts = Card::new(Rank::Seven, Suit::Hearts);
/// assert_eq!(judge.get_stronger(ace, seven_hearts), Ok(seven_hearts));
/// ```
///
/// ```
/// use durak_engine::cards::{Card, Rank, Suit};
/// use durak_engine::errors::GameError;
/// use durak_engine::rules::Judge;
///
/// let judge = Judge::new(Card::new(Rank::Six, Suit::Hearts));
///
/// // Two different non-trump suits cannot be compared
/// let result = judge.get_stronger(
///     Card::new(Rank::Ace, Suit::Clubs),
///     Card::new(Rank::Six, Suit::Spades),
/// );
/// assert!(matches!(result, Err(GameError::InvalidComparison { .. })));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judge {
    trump: Card,
}

impl Judge {
    pub fn new(trump: Card) -> Self {
        Self { trump }
    }

    pub fn trump(&self) -> Card {
        self.trump
    }

    pub fn trump_suit(&self) -> Suit {
        self.trump.suit
    }

    pub fn is_trump(&self, card: Card) -> bool {
        card.suit == self.trump.suit
    }

    /// Returns the stronger of two cards under the trump rules.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidComparison`] when neither card is trump and the
    /// suits differ.
    pub fn get_stronger(&self, c1: Card, c2: Card) -> Result<Card, GameError> {
        let (t1, t2) = (self.is_trump(c1), self.is_trump(c2));
        if !t1 && !t2 && c1.suit != c2.suit {
            return Err(GameError::InvalidComparison {
                first: c1,
                second: c2,
            });
        }
        if t1 == t2 {
            return Ok(if c1.rank > c2.rank { c1 } else { c2 });
        }
        Ok(if t1 { c1 } else { c2 })
    }

    /// True when `defending` may cover `attacking`.
    pub fn beats(&self, defending: Card, attacking: Card) -> bool {
        defending != attacking
            && matches!(self.get_stronger(defending, attacking), Ok(c) if c == defending)
    }
}
