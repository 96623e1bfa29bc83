//! Card catalog
//!
//! Static card definitions plus the deck constructors the rest of the app
//! relies on. The built-in catalog is compiled in from `cards.json`; a custom
//! catalog can be loaded from a file with the same layout.

use crate::core::{
    ArrivalEffect, Card, CardId, CardKind, Deck, IdAllocator, Rarity, RitualKind,
};
use crate::{KukulcanError, Result};
use deunicode::deunicode;
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

const BUILTIN_CARDS: &str = include_str!("cards.json");

/// Starter list as (name, copies)
const STARTER_LIST: &[(&str, usize)] = &[
    ("Frightened Villager", 3),
    ("Young Hunter", 2),
    ("Captive Prisoner", 2),
    ("Wounded Warrior", 1),
    ("Lost Scout", 1),
    ("Clumsy Archer", 1),
    ("Obsidian Knife", 1),
    ("Blood Altar", 1),
    ("Forest Charm", 1),
    ("Ix Chel", 1),
    ("Kukulcan", 1),
];

/// Catalog entry; every `Card` is stamped out of one of these
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub name: String,
    pub kind: CardKind,
    pub rarity: Rarity,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub attack: i32,
    #[serde(default)]
    pub health: i32,
    #[serde(default)]
    pub ritual: Option<RitualKind>,
    #[serde(default)]
    pub blood_cost: u32,
    #[serde(default)]
    pub arrival: ArrivalEffect,
    #[serde(default)]
    pub effect: String,
    #[serde(default)]
    pub lore: Option<String>,
}

impl CardDefinition {
    /// Create a card with the given id from this definition
    pub fn instantiate(&self, id: CardId) -> Card {
        Card {
            id,
            name: self.name.clone(),
            kind: self.kind,
            rarity: self.rarity,
            image: self.image.clone(),
            attack: self.attack,
            health: self.health,
            ritual: self.ritual,
            blood_cost: self.blood_cost,
            arrival: self.arrival,
            effect: self.effect.clone(),
            lore: self.lore.clone(),
        }
    }

    fn check(&self) -> Result<()> {
        if self.attack < 0 || self.health < 0 {
            return Err(KukulcanError::InvalidCardFormat(format!(
                "'{}' has negative stats {}/{}",
                self.name, self.attack, self.health
            )));
        }
        if let ArrivalEffect::DamageEnemyBoard(amount) = self.arrival {
            if amount < 0 {
                return Err(KukulcanError::InvalidCardFormat(format!(
                    "'{}' deals negative arrival damage {amount}",
                    self.name
                )));
            }
        }

        match (self.kind, self.ritual) {
            (CardKind::Ritual, None) => Err(KukulcanError::InvalidCardFormat(format!(
                "ritual '{}' has no ritual kind",
                self.name
            ))),
            (CardKind::Common | CardKind::God, Some(_)) => {
                Err(KukulcanError::InvalidCardFormat(format!(
                    "{} card '{}' carries a ritual kind",
                    self.kind, self.name
                )))
            }
            _ if self.kind != CardKind::God && self.arrival != ArrivalEffect::None => {
                Err(KukulcanError::InvalidCardFormat(format!(
                    "only gods have arrival effects ('{}')",
                    self.name
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Lowercased ASCII form of a card name, whitespace collapsed
pub fn normalize_name(name: &str) -> String {
    deunicode(name)
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Card database with id allocation
///
/// Every card handed out gets a fresh `CardId`, so two copies of the same
/// definition are still distinct cards.
#[derive(Debug, Clone)]
pub struct CardCatalog {
    definitions: Vec<CardDefinition>,
    index: FxHashMap<String, usize>,
    ids: IdAllocator,
}

impl CardCatalog {
    /// The catalog compiled into the crate
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CARDS)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let definitions: Vec<CardDefinition> = serde_json::from_str(json)
            .map_err(|e| KukulcanError::InvalidCardFormat(e.to_string()))?;
        Self::from_definitions(definitions)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_definitions(definitions: Vec<CardDefinition>) -> Result<Self> {
        let mut index = FxHashMap::default();
        for (i, def) in definitions.iter().enumerate() {
            def.check()?;
            if index.insert(normalize_name(&def.name), i).is_some() {
                return Err(KukulcanError::InvalidCardFormat(format!(
                    "duplicate card name '{}'",
                    def.name
                )));
            }
        }
        Ok(CardCatalog {
            definitions,
            index,
            ids: IdAllocator::new(),
        })
    }

    /// Look up a definition by name (case and accent insensitive)
    pub fn get(&self, name: &str) -> Option<&CardDefinition> {
        self.index
            .get(&normalize_name(name))
            .map(|&i| &self.definitions[i])
    }

    pub fn definitions(&self) -> &[CardDefinition] {
        &self.definitions
    }

    pub fn of_kind(&self, kind: CardKind) -> impl Iterator<Item = &CardDefinition> {
        self.definitions.iter().filter(move |d| d.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Stamp out a new card by name
    pub fn instantiate(&mut self, name: &str) -> Result<Card> {
        let idx = *self
            .index
            .get(&normalize_name(name))
            .ok_or_else(|| KukulcanError::UnknownCard(name.to_string()))?;
        let id = self.ids.next_id();
        Ok(self.definitions[idx].instantiate(id))
    }

    /// Stamp out `copies` cards of one name
    pub fn instantiate_many(&mut self, name: &str, copies: usize) -> Result<Vec<Card>> {
        (0..copies).map(|_| self.instantiate(name)).collect()
    }

    /// The fixed deck a new player starts with
    pub fn starter_deck(&mut self) -> Result<Deck> {
        let mut cards = Vec::new();
        for &(name, copies) in STARTER_LIST {
            cards.extend(self.instantiate_many(name, copies)?);
        }
        Ok(Deck::new("Starter", cards))
    }

    /// One copy of every common and every god, shuffled
    pub fn battle_deck<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Deck {
        let mut cards = self.stamp_where(|d| d.kind != CardKind::Ritual);
        cards.shuffle(rng);
        Deck::new("Battle", cards)
    }

    /// One copy of every card in the catalog, shuffled
    pub fn base_deck<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Deck {
        let mut cards = self.stamp_where(|_| true);
        cards.shuffle(rng);
        Deck::new("Base", cards)
    }

    fn stamp_where(&mut self, keep: impl Fn(&CardDefinition) -> bool) -> Vec<Card> {
        let ids = &mut self.ids;
        self.definitions
            .iter()
            .filter(|&d| keep(d))
            .map(|d| d.instantiate(ids.next_id()))
            .collect()
    }
}
