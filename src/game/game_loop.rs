//! Game loop implementation
//!
//! Drives a match between two controllers: the active seat's controller
//! acts until it passes, then the loop ends the turn for it.

use crate::core::Seat;
use crate::game::controller::{GameStateView, PlayerController};
use crate::game::{ActionOutcome, GameState, MatchPhase};
use crate::{KukulcanError, Result};

/// Upper bound on actions a controller may take in one turn
pub const MAX_ACTIONS_PER_TURN: usize = 64;

/// Verbosity level for game output
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum VerbosityLevel {
    /// Silent - no output during game
    Silent = 0,
    /// Minimal - match start and outcome
    Minimal = 1,
    /// Normal - every match event (default)
    #[default]
    Normal = 2,
    /// Verbose - draws, controller choices and rejected actions
    Verbose = 3,
}

/// Result of running a match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    /// None if the match hit the turn limit
    pub winner: Option<Seat>,
    pub turns_played: u32,
    pub end_reason: GameEndReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEndReason {
    /// The other seat's hit points reached 0
    PlayerDefeated(Seat),
    TurnLimit,
    /// `run_turns` finished its budget with the match still open
    Manual,
}

/// Game loop manager
pub struct GameLoop<'a> {
    pub game: &'a mut GameState,
    max_turns: u32,
    turns_elapsed: u32,
    pub verbosity: VerbosityLevel,
}

impl<'a> GameLoop<'a> {
    pub fn new(game: &'a mut GameState) -> Self {
        let verbosity = game.logger.verbosity();
        let max_turns = game.config().max_turns;
        GameLoop {
            game,
            max_turns,
            turns_elapsed: 0,
            verbosity,
        }
    }

    /// Set maximum turns before the match is called a draw
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Set verbosity on the loop and on the match logger
    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.verbosity = verbosity;
        self.game.logger.set_verbosity(verbosity);
        self
    }

    /// Play until one side is defeated or the turn limit is reached
    pub fn run_match(
        &mut self,
        controller1: &mut dyn PlayerController,
        controller2: &mut dyn PlayerController,
    ) -> Result<GameResult> {
        self.setup_match(controller1, controller2)?;

        loop {
            if let Some(result) = self.run_turn_once(controller1, controller2)? {
                self.notify_match_end(controller1, controller2, result.winner);
                return Ok(result);
            }
        }
    }

    /// Run at most `turns_to_run` turns, stopping early if the match ends
    pub fn run_turns(
        &mut self,
        controller1: &mut dyn PlayerController,
        controller2: &mut dyn PlayerController,
        turns_to_run: u32,
    ) -> Result<GameResult> {
        self.setup_match(controller1, controller2)?;

        for _ in 0..turns_to_run {
            if let Some(result) = self.run_turn_once(controller1, controller2)? {
                return Ok(result);
            }
        }

        Ok(GameResult {
            winner: None,
            turns_played: self.turns_elapsed,
            end_reason: GameEndReason::Manual,
        })
    }

    fn setup_match(
        &mut self,
        controller1: &dyn PlayerController,
        controller2: &dyn PlayerController,
    ) -> Result<()> {
        if controller1.seat() != Seat::One || controller2.seat() != Seat::Two {
            return Err(KukulcanError::InvalidAction(format!(
                "controllers must play seats P1 and P2, got {} and {}",
                controller1.seat(),
                controller2.seat()
            )));
        }
        if self.game.phase() == MatchPhase::Setup {
            let opening_hand = self.game.config().opening_hand;
            self.game.start(opening_hand);
        }
        Ok(())
    }

    /// Play the active seat's turn; `Some` once the match is decided
    fn run_turn_once(
        &mut self,
        controller1: &mut dyn PlayerController,
        controller2: &mut dyn PlayerController,
    ) -> Result<Option<GameResult>> {
        if let Some(result) = self.check_finished() {
            return Ok(Some(result));
        }

        let seat = self.game.active_seat();
        let controller: &mut dyn PlayerController = match seat {
            Seat::One => controller1,
            Seat::Two => controller2,
        };

        controller.on_turn_start(&GameStateView::new(self.game, seat));
        for _ in 0..MAX_ACTIONS_PER_TURN {
            let available = self.game.legal_actions();
            let choice = {
                let view = GameStateView::new(self.game, seat);
                controller.choose_action(&view, &available)
            };
            let Some(action) = choice else { break };

            self.game
                .logger
                .controller_choice(controller.name(), &action.to_string());
            if let Ok(ActionOutcome::MatchEnded { .. }) = self.game.apply(&action) {
                break;
            }
        }

        if !self.game.is_over() {
            self.game.end_turn()?;
        }
        self.turns_elapsed += 1;

        Ok(self.check_finished())
    }

    fn check_finished(&self) -> Option<GameResult> {
        if let Some(winner) = self.game.winner() {
            return Some(GameResult {
                winner: Some(winner),
                turns_played: self.turns_elapsed,
                end_reason: GameEndReason::PlayerDefeated(winner.opponent()),
            });
        }
        if self.turns_elapsed >= self.max_turns {
            self.game.logger.minimal(&format!(
                "Turn limit of {} reached; the match is a draw.",
                self.max_turns
            ));
            return Some(GameResult {
                winner: None,
                turns_played: self.turns_elapsed,
                end_reason: GameEndReason::TurnLimit,
            });
        }
        None
    }

    fn notify_match_end(
        &self,
        controller1: &mut dyn PlayerController,
        controller2: &mut dyn PlayerController,
        winner: Option<Seat>,
    ) {
        let game: &GameState = self.game;
        controller1.on_match_end(&GameStateView::new(game, Seat::One), winner == Some(Seat::One));
        controller2.on_match_end(&GameStateView::new(game, Seat::Two), winner == Some(Seat::Two));
    }
}
