//! Game zones (deck, hand, discard, board lanes, sacrifice and god slots)

use crate::core::CardInstance;
use serde::{Deserialize, Serialize};

/// Number of lanes each player has on the board
pub const BOARD_SLOTS: usize = 4;

/// Different zones where a card can be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Deck,
    Hand,
    Discard,
    Board(usize),
    SacrificeSlot,
    GodSlot,
}

/// A player's four fixed lanes, each empty or holding one instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    slots: [Option<CardInstance>; BOARD_SLOTS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: usize) -> Option<&CardInstance> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut CardInstance> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    pub fn is_occupied(&self, slot: usize) -> bool {
        self.get(slot).is_some()
    }

    /// Put an instance in a lane, returning whatever was there
    ///
    /// Panics if `slot` is outside the board; callers validate lanes first.
    pub fn place(&mut self, slot: usize, instance: CardInstance) -> Option<CardInstance> {
        assert!(slot < BOARD_SLOTS, "board slot {slot} out of range");
        self.slots[slot].replace(instance)
    }

    pub fn take(&mut self, slot: usize) -> Option<CardInstance> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Occupied lanes in slot order
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &CardInstance)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|inst| (i, inst)))
    }

    pub fn len(&self) -> usize {
        self.occupied().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, CardKind, EntityId};

    fn instance(id: u32) -> CardInstance {
        let card = Card::new(EntityId::new(id), "Scout", CardKind::Common).with_stats(1, 2);
        CardInstance::new(EntityId::new(100 + id), card)
    }

    #[test]
    fn test_board_place_and_take() {
        let mut board = Board::new();
        assert!(board.is_empty());
        assert_eq!(board.first_empty(), Some(0));

        assert!(board.place(0, instance(1)).is_none());
        assert!(board.place(2, instance(2)).is_none());

        assert_eq!(board.len(), 2);
        assert_eq!(board.first_empty(), Some(1));
        assert!(board.is_occupied(2));
        assert!(!board.is_occupied(3));
        assert!(!board.is_occupied(BOARD_SLOTS));

        let taken = board.take(0).unwrap();
        assert_eq!(taken.id.as_u32(), 101);
        assert!(!board.is_occupied(0));
        assert!(board.take(0).is_none());
    }

    #[test]
    fn test_occupied_in_slot_order() {
        let mut board = Board::new();
        board.place(3, instance(3));
        board.place(1, instance(1));

        let lanes: Vec<usize> = board.occupied().map(|(i, _)| i).collect();
        assert_eq!(lanes, vec![1, 3]);
    }

    #[test]
    fn test_full_board_has_no_empty_slot() {
        let mut board = Board::new();
        for slot in 0..BOARD_SLOTS {
            board.place(slot, instance(slot as u32));
        }
        assert_eq!(board.first_empty(), None);
        assert_eq!(board.len(), BOARD_SLOTS);
    }
}
