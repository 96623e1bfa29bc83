//! Match engine: state, actions, combat and the controllers that drive them

pub mod actions;
pub mod combat;
pub mod config;
pub mod controller;
pub mod effects;
pub mod events;
pub mod game_loop;
pub mod greedy_controller;
pub mod logger;
pub mod phase;
pub mod random_controller;
pub mod snapshot;
pub mod state;

pub use actions::{ActionOutcome, ActionResult, GameAction, Rejection};
pub use combat::{AttackSource, Target};
pub use config::{EmptyDeckPolicy, MatchConfig};
pub use controller::{ControllerType, GameStateView, PlayerController};
pub use events::GameEvent;
pub use game_loop::{GameEndReason, GameLoop, GameResult, VerbosityLevel, MAX_ACTIONS_PER_TURN};
pub use greedy_controller::GreedyController;
pub use logger::{GameLogger, LogEntry, OutputFormat, OutputMode};
pub use phase::MatchPhase;
pub use random_controller::RandomController;
pub use snapshot::{MatchSnapshot, SnapshotError};
pub use state::GameState;
