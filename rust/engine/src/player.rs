use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::{GameError, Rejection};
use crate::round::{Role, Round};
use crate::rules::Judge;
use crate::table::Table;

/// Seat index of a player inside a game (position in the player list).
pub type PlayerId = usize;

/// Cards held by a player. Order only matters for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Removes `card`, leaving the hand untouched when it is absent.
    pub fn remove(&mut self, card: Card) -> Result<(), GameError> {
        let idx = self
            .cards
            .iter()
            .position(|&c| c == card)
            .ok_or(GameError::CardNotFound(card))?;
        self.cards.remove(idx);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<Card> {
        self.cards.get(index).copied()
    }

    pub fn sort_by_key<K: Ord>(&mut self, key: impl FnMut(&Card) -> K) {
        self.cards.sort_by_key(key);
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

/// What a player asks the game to do. Returned from notifications and
/// dispatched by the game in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Put a card on the given slot (attack or cover, depending on role)
    Throw { card: Card, slot: usize },
    /// Attacker: end a fully covered round. Defender: give up covering.
    Pass,
    /// Defender: pick up everything on the table
    AcceptDefeat,
}

/// A successful throw, broadcast to every player including the thrower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Throw {
    pub thrower: PlayerId,
    pub role: Role,
    pub card: Card,
    pub slot: usize,
}

/// Sent once to each player when the match begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStart {
    /// Seat of the receiving player
    pub seat: PlayerId,
    pub trump: Card,
    /// Names of all players, indexed by seat
    pub players: Vec<String>,
    pub slots: usize,
}

/// Why a match stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// At most one player still holds cards
    HandsEmptied,
    /// The configured round cap was hit
    RoundLimit,
    /// Torn down while still in progress
    Abandoned,
}

/// Terminal notification payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEndResult {
    pub winners: Vec<PlayerId>,
    /// The "durak": last player left holding cards, if any
    pub loser: Option<PlayerId>,
    pub reason: EndReason,
    pub rounds: u32,
}

impl GameEndResult {
    pub fn is_draw(&self) -> bool {
        self.reason == EndReason::HandsEmptied && self.loser.is_none()
    }
}

/// Read-only view of the game handed to a player with each notification.
#[derive(Debug, Clone, Copy)]
pub struct TurnContext<'g> {
    /// Seat of the receiving player
    pub seat: PlayerId,
    pub round: Round,
    pub round_number: u32,
    pub table: &'g Table,
    pub judge: &'g Judge,
}

impl TurnContext<'_> {
    pub fn role(&self) -> Option<Role> {
        self.round.role_of(self.seat)
    }

    pub fn is_attacker(&self) -> bool {
        self.round.attacker() == self.seat
    }

    pub fn is_defender(&self) -> bool {
        self.round.defender() == self.seat
    }

    /// Attacker may act: table empty or every attacking card covered.
    pub fn attacker_to_move(&self) -> bool {
        self.is_attacker() && self.table.is_all_attacking_cards_covered()
    }

    /// Slot the defender should cover next, if the receiver is the defender.
    pub fn slot_to_cover(&self) -> Option<usize> {
        if self.is_defender() {
            self.table.first_uncovered_slot()
        } else {
            None
        }
    }
}

/// Capability set shared by every player variant.
///
/// The game drives players only through these notifications; a player asks
/// for something by returning an [`Intent`]. Only the attacker or defender of
/// the current round should answer, and at most once per notification.
pub trait Player {
    fn name(&self) -> &str;

    fn hand(&self) -> &Hand;

    fn hand_mut(&mut self) -> &mut Hand;

    fn add_card(&mut self, card: Card) {
        self.hand_mut().add(card);
    }

    /// # Errors
    ///
    /// [`GameError::CardNotFound`] when the card is not held.
    fn remove_card(&mut self, card: Card) -> Result<(), GameError> {
        self.hand_mut().remove(card)
    }

    fn on_game_started(&mut self, _start: &GameStart) {}

    fn on_next_round(&mut self, ctx: &TurnContext<'_>) -> Option<Intent>;

    fn on_card_thrown(&mut self, throw: &Throw, ctx: &TurnContext<'_>) -> Option<Intent>;

    /// Called on the acting player only, after its intent was refused.
    fn on_intent_rejected(
        &mut self,
        _rejection: &Rejection,
        _ctx: &TurnContext<'_>,
    ) -> Option<Intent> {
        None
    }

    fn on_game_ended(&mut self, result: &GameEndResult);
}
