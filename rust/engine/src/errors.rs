use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::Card;
use crate::player::PlayerId;

/// Fatal errors: protocol violations and structural misuse of the engine.
/// The operation that raised one is aborted and never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("A game needs at least 2 players, got {count}")]
    NotEnoughPlayers { count: usize },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid deal: {0}")]
    InvalidDeal(String),
    #[error("Game already started")]
    AlreadyStarted,
    #[error("Game not started")]
    NotStarted,
    #[error("Game is over")]
    GameOver,
    #[error("Game has been disposed")]
    Disposed,
    #[error("Unknown player seat {seat}")]
    UnknownPlayer { seat: PlayerId },
    #[error("Player {seat} is neither attacker nor defender of the current round")]
    NotParticipant { seat: PlayerId },
    #[error("Attacker and defender must differ (both are player {seat})")]
    SameAttackerAndDefender { seat: PlayerId },
    #[error("Card {0} is not in the player's hand")]
    CardNotFound(Card),
    #[error("Cards {first} and {second} cannot be compared")]
    InvalidComparison { first: Card, second: Card },
    #[error("Slot already holds an attacking card")]
    SlotOccupied,
    #[error("Slot has no attacking card to cover")]
    SlotNotAttacked,
    #[error("Slot is already covered")]
    SlotAlreadyCovered,
    #[error("Deck ran out of cards while dealing")]
    DeckExhausted,
}

/// Gameplay rejections: the intent is ignored and the actor may try again.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    #[error("There is no slot {slot} on the table")]
    NoSuchSlot { slot: usize },
    #[error("Slot {slot} is not free")]
    SlotTaken { slot: usize },
    #[error("Slot {slot} has no attacking card")]
    NothingToCover { slot: usize },
    #[error("Slot {slot} is already covered")]
    AlreadyCovered { slot: usize },
    #[error("{card} does not beat {attacking}")]
    TooWeak { card: Card, attacking: Card },
    #[error("{0} is not in hand")]
    CardNotInHand(Card),
    #[error("Attacker can only pass once every attacking card is covered")]
    AttackerCannotPass,
    #[error("Defender can only pass while an attacking card is uncovered")]
    DefenderCannotPass,
    #[error("Only the defender can accept defeat, and only with cards on the table")]
    NothingToAccept,
}
