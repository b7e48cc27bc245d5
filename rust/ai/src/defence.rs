//! Built-in defence strategies.

use durak_engine::cards::Card;
use durak_engine::player::Hand;
use durak_engine::rules::Judge;

use crate::DefenceStrategy;

/// Never covers. Every attack is taken.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysTake;

impl DefenceStrategy for AlwaysTake {
    fn choose_cover(&self, _hand: &Hand, _attacking: Card, _judge: &Judge) -> Option<Card> {
        None
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Covers with the cheapest card that beats the attack.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheapestCover;

impl DefenceStrategy for CheapestCover {
    fn choose_cover(&self, hand: &Hand, attacking: Card, judge: &Judge) -> Option<Card> {
        cheapest_cover(hand.cards(), attacking, judge)
    }

    fn name(&self) -> &str {
        "cover"
    }
}

/// Weakest card in `cards` that beats `attacking`. Non-trump cards are
/// spent before trumps, lower ranks before higher ones.
pub fn cheapest_cover(cards: &[Card], attacking: Card, judge: &Judge) -> Option<Card> {
    cards
        .iter()
        .copied()
        .filter(|&c| judge.beats(c, attacking))
        .min_by_key(|&c| (judge.is_trump(c), c.rank))
}
