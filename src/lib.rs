//! Kukulcan - turn-based combat rules engine for a blood-sacrifice card game
//!
//! Two players trade common cards across four board lanes, sacrifice them for
//! blood, and spend that blood to invoke gods. The engine owns the match state
//! and exposes it read-only; all mutation goes through the action API.

pub mod core;
pub mod error;
pub mod game;
pub mod loader;
pub mod tournament;
pub mod zones;

pub use error::{KukulcanError, Result};
