//! Player representation

use crate::core::{Card, CardId, CardInstance};
use crate::zones::{Board, Zone};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Default hit points at match start
pub const STARTING_HP: i32 = 10;

/// A player position. Seat One is the human side and moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    One,
    Two,
}

impl Seat {
    pub fn opponent(self) -> Seat {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Seat::One => 0,
            Seat::Two => 1,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::One => write!(f, "P1"),
            Seat::Two => write!(f, "P2"),
        }
    }
}

/// Per-player mutable match state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,

    /// Hit points, floored at 0
    pub hp: i32,

    /// Draw pile, drawn from the front
    pub deck: Vec<Card>,
    pub hand: Vec<Card>,
    pub discard: Vec<Card>,

    pub board: Board,

    /// Holds the most recent sacrifice this turn (display only)
    pub sacrifice_slot: Option<CardInstance>,
    pub god_slot: Option<CardInstance>,

    pub blood: u32,

    /// Added to the next sacrifice's yield, cleared at end of this player's turn
    pub pending_bonus_blood: u32,
}

impl PlayerState {
    pub fn new(name: impl Into<String>) -> Self {
        PlayerState {
            name: name.into(),
            hp: STARTING_HP,
            deck: Vec::new(),
            hand: Vec::new(),
            discard: Vec::new(),
            board: Board::new(),
            sacrifice_slot: None,
            god_slot: None,
            blood: 0,
            pending_bonus_blood: 0,
        }
    }

    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = deck;
        self
    }

    pub fn with_hp(mut self, hp: i32) -> Self {
        self.hp = hp;
        self
    }

    /// Move up to `n` cards from the front of the deck into hand
    ///
    /// An exhausted deck simply yields fewer cards.
    pub fn draw(&mut self, n: usize) -> SmallVec<[Card; 2]> {
        let count = n.min(self.deck.len());
        let drawn: SmallVec<[Card; 2]> = self.deck.drain(..count).collect();
        self.hand.extend(drawn.iter().cloned());
        drawn
    }

    /// Blood gained by a sacrifice right now; consumes the pending bonus
    pub fn collect_sacrifice_blood(&mut self) -> u32 {
        let gain = 1 + self.pending_bonus_blood;
        self.blood += gain;
        self.pending_bonus_blood = 0;
        gain
    }

    pub fn lose_hp(&mut self, amount: i32) {
        self.hp = (self.hp - amount).max(0);
    }

    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }

    /// Where this player holds the card with `id`
    ///
    /// A sacrificed card sits in the discard pile and, as an instance, in the
    /// sacrifice slot; zones in play are checked first.
    pub fn locate(&self, id: CardId) -> Option<Zone> {
        if let Some((slot, _)) = self.board.occupied().find(|(_, inst)| inst.base.id == id) {
            return Some(Zone::Board(slot));
        }
        if self.god_slot.as_ref().is_some_and(|inst| inst.base.id == id) {
            return Some(Zone::GodSlot);
        }
        if self.sacrifice_slot.as_ref().is_some_and(|inst| inst.base.id == id) {
            return Some(Zone::SacrificeSlot);
        }

        [
            (Zone::Hand, &self.hand),
            (Zone::Deck, &self.deck),
            (Zone::Discard, &self.discard),
        ]
        .into_iter()
        .find(|(_, cards)| cards.iter().any(|c| c.id == id))
        .map(|(zone, _)| zone)
    }
}
