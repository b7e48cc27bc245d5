//! Computer-controlled player.

use std::fmt;

use durak_engine::errors::Rejection;
use durak_engine::player::{GameEndResult, Hand, Intent, Player, Throw, TurnContext};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, trace};

use crate::DefenceStrategy;

/// Bot that attacks with a random card and defends through a
/// [`DefenceStrategy`].
///
/// As attacker it throws one uniformly chosen card to the first free slot
/// when the round opens and passes once that card is covered. As defender it
/// asks its strategy for a cover and passes when there is none.
pub struct BotPlayer {
    name: String,
    hand: Hand,
    rng: ChaCha20Rng,
    strategy: Box<dyn DefenceStrategy>,
}

impl fmt::Debug for BotPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotPlayer")
            .field("name", &self.name)
            .field("hand", &self.hand)
            .field("strategy", &self.strategy.name())
            .finish()
    }
}

impl BotPlayer {
    pub fn new(name: &str, seed: u64, strategy: Box<dyn DefenceStrategy>) -> Self {
        Self {
            name: name.to_string(),
            hand: Hand::new(),
            rng: ChaCha20Rng::seed_from_u64(seed),
            strategy,
        }
    }

    pub fn strategy(&self) -> &str {
        self.strategy.name()
    }

    fn attack(&mut self, ctx: &TurnContext<'_>) -> Option<Intent> {
        if !ctx.attacker_to_move() {
            return None;
        }
        if !ctx.table.is_all_slots_free() || self.hand.is_empty() {
            return Some(Intent::Pass);
        }
        let slot = ctx.table.first_free_slot()?;
        let idx = self.rng.random_range(0..self.hand.len());
        let card = self.hand.get(idx)?;
        debug!(bot = %self.name, %card, slot, "attacking");
        Some(Intent::Throw { card, slot })
    }

    fn defend(&self, ctx: &TurnContext<'_>) -> Option<Intent> {
        let slot = ctx.slot_to_cover()?;
        let attacking = ctx.table.slots().get(slot)?.attacking_card()?;
        match self.strategy.choose_cover(&self.hand, attacking, ctx.judge) {
            Some(card) => {
                debug!(bot = %self.name, %card, %attacking, "covering");
                Some(Intent::Throw { card, slot })
            }
            None => {
                debug!(bot = %self.name, %attacking, "taking");
                Some(Intent::Pass)
            }
        }
    }

    fn act(&mut self, ctx: &TurnContext<'_>) -> Option<Intent> {
        if ctx.is_attacker() {
            self.attack(ctx)
        } else if ctx.is_defender() {
            self.defend(ctx)
        } else {
            None
        }
    }
}

impl Player for BotPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn hand(&self) -> &Hand {
        &self.hand
    }

    fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    fn on_next_round(&mut self, ctx: &TurnContext<'_>) -> Option<Intent> {
        self.act(ctx)
    }

    fn on_card_thrown(&mut self, _throw: &Throw, ctx: &TurnContext<'_>) -> Option<Intent> {
        self.act(ctx)
    }

    fn on_intent_rejected(&mut self, rejection: &Rejection, ctx: &TurnContext<'_>) -> Option<Intent> {
        debug!(bot = %self.name, %rejection, "intent rejected");
        // a refused cover gives up the round instead of stalling it
        if ctx.slot_to_cover().is_some() {
            Some(Intent::Pass)
        } else {
            None
        }
    }

    fn on_game_ended(&mut self, result: &GameEndResult) {
        trace!(bot = %self.name, ?result, "game ended");
    }
}
