//! Match configuration

use crate::core::STARTING_HP;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What a draw does when the deck is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyDeckPolicy {
    /// Draw fewer cards than asked
    #[default]
    DrawNothing,
    /// Shuffle the discard pile back into the deck, then draw
    RecycleDiscard,
}

/// Tunable match parameters
///
/// Every field has a default, so a JSON config only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub starting_hp: i32,
    /// Cards drawn into each hand by `start`
    pub opening_hand: usize,
    /// Engine RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
    pub empty_deck: EmptyDeckPolicy,
    /// Turn limit for `GameLoop` before the match is called a draw
    pub max_turns: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            starting_hp: STARTING_HP,
            opening_hand: 5,
            seed: None,
            empty_deck: EmptyDeckPolicy::default(),
            max_turns: 200,
        }
    }
}

impl MatchConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_empty_deck(mut self, policy: EmptyDeckPolicy) -> Self {
        self.empty_deck = policy;
        self
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&json)?)
    }
}
