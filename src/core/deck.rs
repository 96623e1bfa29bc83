//! Decks and deck legality

use crate::core::{Card, CardKind};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named, ordered list of cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub name: String,
    pub cards: Vec<Card>,
}

/// Why a deck is not legal for play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeckViolation {
    TooManyCopies {
        name: String,
        kind: CardKind,
        count: usize,
        limit: usize,
    },
}

impl fmt::Display for DeckViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckViolation::TooManyCopies {
                name,
                kind,
                count,
                limit,
            } => write!(
                f,
                "{count} copies of {kind} card '{name}' (limit {limit})"
            ),
        }
    }
}

impl Deck {
    pub fn new(name: impl Into<String>, cards: Vec<Card>) -> Self {
        Deck {
            name: name.into(),
            cards,
        }
    }

    /// Check copy limits: 3 per name, 1 for gods
    ///
    /// Stops at the first name that goes over its limit.
    pub fn validate(&self) -> Result<(), DeckViolation> {
        let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
        for card in &self.cards {
            let count = counts.entry(card.name.as_str()).or_insert(0);
            *count += 1;
            let limit = card.kind.copy_limit();
            if *count > limit {
                return Err(DeckViolation::TooManyCopies {
                    name: card.name.clone(),
                    kind: card.kind,
                    count: *count,
                    limit,
                });
            }
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntityId;

    fn copies(start: u32, n: u32, name: &str, kind: CardKind) -> Vec<Card> {
        (start..start + n)
            .map(|i| Card::new(EntityId::new(i), name, kind))
            .collect()
    }

    #[test]
    fn test_empty_deck_is_valid() {
        assert!(Deck::new("Empty", vec![]).is_valid());
    }

    #[test]
    fn test_violation_names_the_card() {
        let deck = Deck::new("Gods", copies(0, 2, "Chaac", CardKind::God));

        let violation = deck.validate().unwrap_err();
        assert_eq!(
            violation,
            DeckViolation::TooManyCopies {
                name: "Chaac".to_string(),
                kind: CardKind::God,
                count: 2,
                limit: 1,
            }
        );
        assert!(violation.to_string().contains("Chaac"));
    }

    #[test]
    fn test_rituals_share_the_common_limit() {
        let mut cards = copies(0, 3, "Blood Altar", CardKind::Ritual);
        assert!(Deck::new("Rituals", cards.clone()).is_valid());

        cards.extend(copies(10, 1, "Blood Altar", CardKind::Ritual));
        assert!(!Deck::new("Rituals", cards).is_valid());
    }
}
