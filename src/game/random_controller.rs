//! Random AI controller for testing and baseline gameplay
//!
//! Picks uniformly among the legal actions and ends its turn one time in
//! five, or when nothing is left to do.

use crate::core::Seat;
use crate::game::controller::{GameStateView, PlayerController};
use crate::game::GameAction;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct RandomController {
    seat: Seat,
    rng: StdRng,
}

impl RandomController {
    /// Create a random controller seeded from entropy
    pub fn new(seat: Seat) -> Self {
        RandomController {
            seat,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a random controller with a seeded RNG (for deterministic testing)
    pub fn with_seed(seat: Seat, seed: u64) -> Self {
        RandomController {
            seat,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl PlayerController for RandomController {
    fn seat(&self) -> Seat {
        self.seat
    }

    fn choose_action(
        &mut self,
        _view: &GameStateView,
        available: &[GameAction],
    ) -> Option<GameAction> {
        if available.is_empty() || self.rng.gen_ratio(1, 5) {
            return None;
        }
        let index = self.rng.gen_range(0..available.len());
        Some(available[index])
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
