use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::{GameError, Rejection};
use crate::rules::Judge;

/// Default number of slots on the table.
pub const DEFAULT_SLOTS: usize = 6;

/// One table position: an attacking card and, once covered, its defending card.
///
/// Invariant: a defending card is only ever present on top of an attacking card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    attacking: Option<Card>,
    defending: Option<Card>,
}

impl Slot {
    pub fn attacking_card(&self) -> Option<Card> {
        self.attacking
    }

    pub fn defending_card(&self) -> Option<Card> {
        self.defending
    }

    pub fn is_free(&self) -> bool {
        self.attacking.is_none() && self.defending.is_none()
    }

    pub fn is_covered(&self) -> bool {
        self.attacking.is_some() && self.defending.is_some()
    }

    pub fn set_attacking_card(&mut self, card: Card) -> Result<(), GameError> {
        if self.attacking.is_some() {
            return Err(GameError::SlotOccupied);
        }
        self.attacking = Some(card);
        Ok(())
    }

    pub fn set_defending_card(&mut self, card: Card) -> Result<(), GameError> {
        if self.attacking.is_none() {
            return Err(GameError::SlotNotAttacked);
        }
        if self.defending.is_some() {
            return Err(GameError::SlotAlreadyCovered);
        }
        self.defending = Some(card);
        Ok(())
    }

    pub fn free(&mut self) {
        self.attacking = None;
        self.defending = None;
    }
}

/// Fixed-size row of [`Slot`]s owned by the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    slots: Vec<Slot>,
}

impl Default for Table {
    fn default() -> Self {
        Self::new(DEFAULT_SLOTS)
    }
}

impl Table {
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: vec![Slot::default(); slot_count],
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Places an attacking card on a free slot.
    pub fn attack(&mut self, card: Card, slot: usize) -> Result<(), Rejection> {
        let target = self
            .slots
            .get_mut(slot)
            .ok_or(Rejection::NoSuchSlot { slot })?;
        if !target.is_free() {
            return Err(Rejection::SlotTaken { slot });
        }
        target
            .set_attacking_card(card)
            .map_err(|_| Rejection::SlotTaken { slot })
    }

    /// Covers the attacking card of `slot` with a strictly stronger card.
    pub fn defend(&mut self, card: Card, slot: usize, judge: &Judge) -> Result<(), Rejection> {
        let target = self
            .slots
            .get_mut(slot)
            .ok_or(Rejection::NoSuchSlot { slot })?;
        let attacking = target
            .attacking_card()
            .ok_or(Rejection::NothingToCover { slot })?;
        if target.defending_card().is_some() {
            return Err(Rejection::AlreadyCovered { slot });
        }
        if !judge.beats(card, attacking) {
            return Err(Rejection::TooWeak { card, attacking });
        }
        target
            .set_defending_card(card)
            .map_err(|_| Rejection::AlreadyCovered { slot })
    }

    pub fn try_set_attacking_card(&mut self, card: Card, slot: usize) -> bool {
        self.attack(card, slot).is_ok()
    }

    pub fn try_set_defending_card(&mut self, card: Card, slot: usize, judge: &Judge) -> bool {
        self.defend(card, slot, judge).is_ok()
    }

    /// Vacuously true on an all-free table.
    pub fn is_all_attacking_cards_covered(&self) -> bool {
        self.slots
            .iter()
            .all(|s| s.attacking_card().is_none() || s.defending_card().is_some())
    }

    pub fn is_all_slots_free(&self) -> bool {
        self.slots.iter().all(Slot::is_free)
    }

    pub fn first_free_slot(&self) -> Option<usize> {
        self.slots.iter().position(Slot::is_free)
    }

    pub fn first_uncovered_slot(&self) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.attacking_card().is_some() && s.defending_card().is_none())
    }

    /// Every card currently on the table, attacking card first per slot.
    pub fn cards(&self) -> Vec<Card> {
        self.slots
            .iter()
            .flat_map(|s| [s.attacking_card(), s.defending_card()])
            .flatten()
            .collect()
    }

    /// Frees every slot and hands back the cards that were on them.
    pub fn clear(&mut self) -> Vec<Card> {
        let cards = self.cards();
        self.slots.iter_mut().for_each(Slot::free);
        cards
    }
}
