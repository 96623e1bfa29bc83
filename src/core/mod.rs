//! Core game types and entities

pub mod card;
pub mod deck;
pub mod entity;
pub mod player;

pub use card::{ArrivalEffect, Card, CardInstance, CardKind, Rarity, RitualKind};
pub use deck::{Deck, DeckViolation};
pub use entity::{EntityId, IdAllocator};
pub use player::{PlayerState, Seat, STARTING_HP};

/// Id of a card in a deck, hand or discard pile
pub type CardId = EntityId<Card>;

/// Id of a card in play
pub type InstanceId = EntityId<CardInstance>;
