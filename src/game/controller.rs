//! Player controller trait and game state view
//!
//! The game loop asks the active seat's controller for one action at a
//! time. Controllers inspect a read-only view of the match from their own
//! seat and answer with a `GameAction`, or `None` to end the turn.

use crate::core::{Card, CardInstance, PlayerState, Seat};
use crate::game::{GameAction, GameState, GreedyController, MatchPhase, RandomController};
use crate::zones::Board;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Read-only view of a match from one seat
pub struct GameStateView<'a> {
    game: &'a GameState,
    seat: Seat,
}

impl<'a> GameStateView<'a> {
    pub fn new(game: &'a GameState, seat: Seat) -> Self {
        GameStateView { game, seat }
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn me(&self) -> &'a PlayerState {
        self.game.player(self.seat)
    }

    pub fn enemy(&self) -> &'a PlayerState {
        self.game.player(self.seat.opponent())
    }

    pub fn hand(&self) -> &'a [Card] {
        &self.me().hand
    }

    pub fn board(&self) -> &'a Board {
        &self.me().board
    }

    pub fn god(&self) -> Option<&'a CardInstance> {
        self.me().god_slot.as_ref()
    }

    pub fn blood(&self) -> u32 {
        self.me().blood
    }

    pub fn hp(&self) -> i32 {
        self.me().hp
    }

    pub fn enemy_board(&self) -> &'a Board {
        &self.enemy().board
    }

    pub fn enemy_god(&self) -> Option<&'a CardInstance> {
        self.enemy().god_slot.as_ref()
    }

    pub fn enemy_hp(&self) -> i32 {
        self.enemy().hp
    }

    pub fn is_my_turn(&self) -> bool {
        self.game.active_seat() == self.seat
    }

    pub fn turn_number(&self) -> u32 {
        self.game.turn_number()
    }

    pub fn phase(&self) -> MatchPhase {
        self.game.phase()
    }
}

/// Player controller trait
///
/// Implement this trait to create AI players or connect a UI.
pub trait PlayerController {
    /// The seat this controller plays
    fn seat(&self) -> Seat;

    /// Called once before the first choice of each of this seat's turns
    fn on_turn_start(&mut self, _view: &GameStateView) {}

    /// Choose the next action, or `None` to end the turn
    ///
    /// `available` is what the engine would accept right now (without
    /// `EndTurn`). Controllers may also return actions not in the list;
    /// the engine rejects anything illegal.
    fn choose_action(
        &mut self,
        view: &GameStateView,
        available: &[GameAction],
    ) -> Option<GameAction>;

    fn on_match_end(&mut self, _view: &GameStateView, _won: bool) {}

    /// Name used in choice logs
    fn name(&self) -> &'static str {
        "controller"
    }
}

/// Built-in controller kinds, selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ControllerType {
    #[default]
    Greedy,
    Random,
}

impl ControllerType {
    /// Build a controller for `seat`; `seed` only matters for random play
    pub fn build(self, seat: Seat, seed: u64) -> Box<dyn PlayerController + Send> {
        match self {
            ControllerType::Greedy => Box::new(GreedyController::new(seat)),
            ControllerType::Random => Box::new(RandomController::with_seed(seat, seed)),
        }
    }
}

impl fmt::Display for ControllerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerType::Greedy => write!(f, "greedy"),
            ControllerType::Random => write!(f, "random"),
        }
    }
}
