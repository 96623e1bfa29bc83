//! Match snapshots
//!
//! A snapshot is a plain-data copy of everything visible about a match:
//! phase, turn, both players and the rendered log. It is written as pretty
//! JSON and keeps card and instance ids intact.

use crate::core::{PlayerState, Seat};
use crate::game::MatchPhase;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub phase: MatchPhase,
    pub active: Seat,
    pub turn_number: u32,
    /// Indexed by `Seat::index`
    pub players: [PlayerState; 2],
    pub log: Vec<String>,
}

impl MatchSnapshot {
    pub fn player(&self, seat: Seat) -> &PlayerState {
        &self.players[seat.index()]
    }

    pub fn winner(&self) -> Option<Seat> {
        self.phase.winner()
    }

    /// Save this snapshot to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SnapshotError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::Serialization(e.to_string()))?;

        std::fs::write(path.as_ref(), json).map_err(|e| SnapshotError::Io(e.to_string()))?;

        Ok(())
    }

    /// Load a snapshot from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let json =
            std::fs::read_to_string(path.as_ref()).map_err(|e| SnapshotError::Io(e.to_string()))?;

        let snapshot = serde_json::from_str(&json)
            .map_err(|e| SnapshotError::Deserialization(e.to_string()))?;

        Ok(snapshot)
    }
}

/// Errors that can occur during snapshot operations
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Failed to serialize snapshot: {0}")]
    Serialization(String),

    #[error("Failed to deserialize snapshot: {0}")]
    Deserialization(String),

    #[error("I/O error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameState, MatchConfig};
    use crate::loader::CardCatalog;

    fn started_match() -> GameState {
        let mut catalog = CardCatalog::builtin().unwrap();
        let d1 = catalog.starter_deck().unwrap();
        let d2 = catalog.starter_deck().unwrap();
        let mut game =
            GameState::new("Ana", d1, "Ixchel", d2, MatchConfig::default().with_seed(4)).unwrap();
        game.start(5);
        game
    }

    #[test]
    fn test_snapshot_file_round_trip() {
        let mut game = started_match();
        let slot_card = game
            .current()
            .hand
            .iter()
            .position(|c| c.is_common())
            .unwrap();
        game.play_common_to_board(slot_card, 1).unwrap();

        let snapshot = game.snapshot();
        let path = std::env::temp_dir().join(format!("kukulcan_snapshot_{}.json", std::process::id()));
        snapshot.save_to_file(&path).unwrap();
        let loaded = MatchSnapshot::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, snapshot);
        let original = snapshot.player(Seat::One).board.get(1).unwrap();
        let restored = loaded.player(Seat::One).board.get(1).unwrap();
        assert_eq!(restored.id, original.id);
        assert_eq!(restored.base.id, original.base.id);
    }

    #[test]
    fn test_missing_file() {
        let result = MatchSnapshot::load_from_file("/nonexistent/kukulcan/snapshot.json");
        assert!(matches!(result, Err(SnapshotError::Io(_))));
    }

    #[test]
    fn test_garbage_file() {
        let path = std::env::temp_dir().join(format!("kukulcan_garbage_{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        let result = MatchSnapshot::load_from_file(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(SnapshotError::Deserialization(_))));
    }
}
