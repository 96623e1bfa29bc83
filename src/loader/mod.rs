//! Card catalog and deck loaders

pub mod catalog;
pub mod deck;

pub use catalog::{normalize_name, CardCatalog, CardDefinition};
pub use deck::{DeckEntry, DeckList, DeckLoader};
