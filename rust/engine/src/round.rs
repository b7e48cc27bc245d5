use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::PlayerId;

/// Part a player takes in the current round.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Places attacking cards
    Attacker,
    /// Covers attacking cards or picks them up
    Defender,
}

/// Attacker/defender assignment for one round. Replaced, never mutated,
/// at each round transition.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    attacker: PlayerId,
    defender: PlayerId,
}

impl Round {
    pub fn new(attacker: PlayerId, defender: PlayerId) -> Result<Self, GameError> {
        if attacker == defender {
            return Err(GameError::SameAttackerAndDefender { seat: attacker });
        }
        Ok(Self { attacker, defender })
    }

    pub fn attacker(&self) -> PlayerId {
        self.attacker
    }

    pub fn defender(&self) -> PlayerId {
        self.defender
    }

    pub fn role_of(&self, seat: PlayerId) -> Option<Role> {
        if seat == self.attacker {
            Some(Role::Attacker)
        } else if seat == self.defender {
            Some(Role::Defender)
        } else {
            None
        }
    }
}

/// How a round was resolved.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    /// Attacker passed with every attacking card covered
    BeatOff,
    /// Defender passed or accepted defeat with cards uncovered
    Taken,
}

/// Role assignment policy applied between rounds.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionRule {
    /// Classic Durak: after a beat-off the defender attacks next; after a
    /// failed defence the defender picks the cards up and the player after
    /// the defender attacks.
    #[default]
    Standard,
    /// Beat-off swaps the two roles; a failed defence keeps both roles and
    /// the table cards are discarded instead of picked up.
    Legacy,
}

impl TransitionRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionRule::Standard => "standard",
            TransitionRule::Legacy => "legacy",
        }
    }

    /// Whether the defender keeps the table cards after a failed defence.
    pub fn defender_picks_up(&self) -> bool {
        matches!(self, TransitionRule::Standard)
    }
}

impl fmt::Display for TransitionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransitionRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(TransitionRule::Standard),
            "legacy" => Ok(TransitionRule::Legacy),
            other => Err(format!(
                "unknown transition rule '{}' (expected standard or legacy)",
                other
            )),
        }
    }
}

/// Seat after `seat` in table order, wrapping around, regardless of activity.
pub fn next_seat(seat: PlayerId, seats: usize) -> PlayerId {
    (seat + 1) % seats
}

/// First seat after `seat` (wrapping) for which `active` holds.
/// May return `seat` itself when it is the only active one.
pub fn next_active_after(
    seat: PlayerId,
    seats: usize,
    active: impl Fn(PlayerId) -> bool,
) -> Option<PlayerId> {
    (1..=seats)
        .map(|offset| (seat + offset) % seats)
        .find(|&s| active(s))
}

/// Computes the round that follows `prev`.
///
/// Returns `None` when fewer than two active players remain.
pub fn next_round(
    rule: TransitionRule,
    prev: Round,
    outcome: RoundOutcome,
    seats: usize,
    active: impl Fn(PlayerId) -> bool,
) -> Option<Round> {
    let both_active = active(prev.attacker) && active(prev.defender);
    if rule == TransitionRule::Legacy && both_active {
        return match outcome {
            RoundOutcome::BeatOff => Round::new(prev.defender, prev.attacker).ok(),
            RoundOutcome::Taken => Some(prev),
        };
    }

    let attacker = match outcome {
        RoundOutcome::BeatOff if active(prev.defender) => prev.defender,
        _ => next_active_after(prev.defender, seats, &active)?,
    };
    let defender = next_active_after(attacker, seats, &active)?;
    Round::new(attacker, defender).ok()
}
