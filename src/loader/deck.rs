//! Deck file loader (.deck format)
//!
//! ```text
//! [metadata]
//! Name=Starter
//!
//! [Main]
//! 3 Frightened Villager
//! 1 Kukulcan
//! ```

use crate::core::Deck;
use crate::loader::CardCatalog;
use crate::{KukulcanError, Result};
use std::fs;
use std::path::Path;

/// Deck loader for .deck files
pub struct DeckLoader;

impl DeckLoader {
    /// Load a deck from a .deck file
    pub fn load_from_file(path: &Path) -> Result<DeckList> {
        let content = fs::read_to_string(path)?;
        let mut list = Self::parse(&content)?;
        if list.name.is_none() {
            list.name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string);
        }
        Ok(list)
    }

    /// Parse a deck from its text content
    pub fn parse(content: &str) -> Result<DeckList> {
        let mut name = None;
        let mut entries = Vec::new();

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }

            if let Some(value) = line.strip_prefix("Name=") {
                name = Some(value.trim().to_string());
                continue;
            }

            // Format: "3 Card Name"
            let parsed = line
                .split_once(' ')
                .and_then(|(count, rest)| count.parse::<u8>().ok().map(|c| (c, rest.trim())));
            match parsed {
                Some((count, card_name)) if !card_name.is_empty() => entries.push(DeckEntry {
                    card_name: card_name.to_string(),
                    count,
                }),
                _ => {
                    return Err(KukulcanError::InvalidDeckFormat(format!(
                        "line {}: expected '<count> <card name>', got '{line}'",
                        line_no + 1
                    )))
                }
            }
        }

        if entries.is_empty() {
            return Err(KukulcanError::InvalidDeckFormat("Empty deck".to_string()));
        }

        Ok(DeckList { name, entries })
    }
}

/// Represents a deck entry (card name and count)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckEntry {
    pub card_name: String,
    pub count: u8,
}

/// A parsed deck file, not yet resolved against a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckList {
    pub name: Option<String>,
    pub entries: Vec<DeckEntry>,
}

impl DeckList {
    pub fn total_cards(&self) -> usize {
        self.entries.iter().map(|e| e.count as usize).sum()
    }

    /// Resolve every entry into fresh cards from `catalog`
    ///
    /// Copy limits are not checked here; see `Deck::validate`.
    pub fn build(&self, catalog: &mut CardCatalog) -> Result<Deck> {
        let mut cards = Vec::with_capacity(self.total_cards());
        for entry in &self.entries {
            cards.extend(catalog.instantiate_many(&entry.card_name, entry.count as usize)?);
        }
        Ok(Deck::new(
            self.name.clone().unwrap_or_else(|| "Unnamed".to_string()),
            cards,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_deck() {
        let content = r#"
[metadata]
Name=Test Deck

[Main]
# fodder
3 Frightened Villager
1 Kukulcan
"#;

        let deck = DeckLoader::parse(content).unwrap();
        assert_eq!(deck.name.as_deref(), Some("Test Deck"));
        assert_eq!(deck.entries.len(), 2);
        assert_eq!(deck.total_cards(), 4);

        assert_eq!(deck.entries[0].card_name, "Frightened Villager");
        assert_eq!(deck.entries[0].count, 3);
        assert_eq!(deck.entries[1].card_name, "Kukulcan");
        assert_eq!(deck.entries[1].count, 1);
    }

    #[test]
    fn test_malformed_line_is_an_error() {
        let result = DeckLoader::parse("[Main]\nthree Villagers\n");
        assert!(matches!(result, Err(KukulcanError::InvalidDeckFormat(_))));
    }

    #[test]
    fn test_empty_deck_is_an_error() {
        assert!(DeckLoader::parse("[Main]\n# nothing\n").is_err());
    }

    #[test]
    fn test_build_against_catalog() {
        let mut catalog = CardCatalog::builtin().unwrap();
        let list = DeckLoader::parse("[Main]\n2 Lost Scout\n1 Ix Chel\n").unwrap();

        let deck = list.build(&mut catalog).unwrap();
        assert_eq!(deck.name, "Unnamed");
        assert_eq!(deck.len(), 3);
        assert_ne!(deck.cards[0].id, deck.cards[1].id);
        assert!(deck.cards[2].is_god());
    }

    #[test]
    fn test_build_does_not_enforce_limits() {
        let mut catalog = CardCatalog::builtin().unwrap();
        let list = DeckLoader::parse("[Main]\n2 Chaac\n").unwrap();

        let deck = list.build(&mut catalog).unwrap();
        assert!(!deck.is_valid());
    }

    #[test]
    fn test_unknown_card_fails_to_build() {
        let mut catalog = CardCatalog::builtin().unwrap();
        let list = DeckLoader::parse("[Main]\n1 Quetzalcoatl\n").unwrap();
        assert!(matches!(
            list.build(&mut catalog),
            Err(KukulcanError::UnknownCard(_))
        ));
    }
}
