//! Match phases

use crate::core::Seat;
use serde::{Deserialize, Serialize};

/// Where a match is in its lifecycle
///
/// `Setup` until `start`, `InProgress` while turns alternate, and
/// `MatchOver` once a player's hit points reach 0. There is no way out of
/// `MatchOver` short of restarting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    Setup,
    InProgress,
    MatchOver { winner: Seat },
}

impl MatchPhase {
    pub fn is_over(&self) -> bool {
        matches!(self, MatchPhase::MatchOver { .. })
    }

    pub fn winner(&self) -> Option<Seat> {
        match self {
            MatchPhase::MatchOver { winner } => Some(*winner),
            _ => None,
        }
    }
}
