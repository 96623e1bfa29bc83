//! Tournament mode: many seeded matches in parallel
//!
//! Matches run concurrently with rayon. Each match owns its own
//! `GameState`, picks its decks with a per-game `Xoshiro256PlusPlus` and
//! derives its engine seed from the tournament seed, so a tournament is
//! reproducible regardless of thread scheduling.

use crate::core::{Deck, Seat};
use crate::game::{ControllerType, GameLoop, GameState, MatchConfig, VerbosityLevel};
use crate::{KukulcanError, Result};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::fmt;

/// Outcome of one tournament match
#[derive(Debug, Clone, PartialEq, Eq)]
struct MatchRecord {
    deck1: String,
    deck2: String,
    winner: Option<Seat>,
    turns: u32,
}

/// Aggregated tournament results
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TournamentStats {
    pub games: usize,
    pub p1_wins: usize,
    pub p2_wins: usize,
    pub draws: usize,
    /// Matches that could not be set up (e.g. an illegal deck)
    pub failed: usize,
    pub total_turns: u64,
    pub deck_wins: FxHashMap<String, usize>,
    pub deck_games: FxHashMap<String, usize>,
}

impl TournamentStats {
    fn record(&mut self, record: MatchRecord) {
        self.games += 1;
        self.total_turns += u64::from(record.turns);
        *self.deck_games.entry(record.deck1.clone()).or_insert(0) += 1;
        *self.deck_games.entry(record.deck2.clone()).or_insert(0) += 1;

        match record.winner {
            Some(Seat::One) => {
                self.p1_wins += 1;
                *self.deck_wins.entry(record.deck1).or_insert(0) += 1;
            }
            Some(Seat::Two) => {
                self.p2_wins += 1;
                *self.deck_wins.entry(record.deck2).or_insert(0) += 1;
            }
            None => self.draws += 1,
        }
    }

    pub fn average_turns(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_turns as f64 / self.games as f64
        }
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * part as f64 / total as f64
    }
}

impl fmt::Display for TournamentStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Player Position Statistics ===")?;
        writeln!(f, "Games played: {} ({} failed)", self.games, self.failed)?;
        writeln!(
            f,
            "P1 wins: {} ({:.1}%)",
            self.p1_wins,
            percent(self.p1_wins, self.games)
        )?;
        writeln!(
            f,
            "P2 wins: {} ({:.1}%)",
            self.p2_wins,
            percent(self.p2_wins, self.games)
        )?;
        writeln!(f, "Draws: {} ({:.1}%)", self.draws, percent(self.draws, self.games))?;
        writeln!(f, "Average turns: {:.1}", self.average_turns())?;

        writeln!(f, "\n=== Deck Win Rates ===")?;
        let mut decks: Vec<_> = self.deck_games.iter().collect();
        decks.sort_by_key(|(name, _)| *name);
        for (deck, games) in decks {
            let wins = self.deck_wins.get(deck).copied().unwrap_or(0);
            writeln!(f, "  {deck}: {wins}/{games} ({:.1}%)", percent(wins, *games))?;
        }
        Ok(())
    }
}

/// Engine seed for game `index` of a tournament seeded with `seed`
pub fn game_seed(seed: u64, index: usize) -> u64 {
    seed.wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Play `games` matches between random pairs of `decks`
///
/// Every match runs silently. Matches that fail to set up are counted in
/// `failed` rather than aborting the tournament.
pub fn run_tourney(
    decks: &[Deck],
    games: usize,
    p1: ControllerType,
    p2: ControllerType,
    seed: u64,
) -> Result<TournamentStats> {
    if decks.is_empty() {
        return Err(KukulcanError::InvalidAction(
            "Tournament requires at least 1 deck".to_string(),
        ));
    }

    let results: Vec<Result<MatchRecord>> = (0..games)
        .into_par_iter()
        .map(|index| play_one(decks, index, p1, p2, seed))
        .collect();

    let mut stats = TournamentStats::default();
    for result in results {
        match result {
            Ok(record) => stats.record(record),
            Err(_) => stats.failed += 1,
        }
    }
    Ok(stats)
}

fn play_one(
    decks: &[Deck],
    index: usize,
    p1: ControllerType,
    p2: ControllerType,
    seed: u64,
) -> Result<MatchRecord> {
    let mut deck_rng = Xoshiro256PlusPlus::seed_from_u64(seed.wrapping_add(index as u64));
    let deck1 = &decks[deck_rng.gen_range(0..decks.len())];
    let deck2 = &decks[deck_rng.gen_range(0..decks.len())];

    let engine_seed = game_seed(seed, index);
    let config = MatchConfig::default().with_seed(engine_seed);
    let mut game = GameState::new("Player 1", deck1.clone(), "Player 2", deck2.clone(), config)?;

    let mut controller1 = p1.build(Seat::One, engine_seed.wrapping_add(0x1234_5678_9ABC_DEF0));
    let mut controller2 = p2.build(Seat::Two, engine_seed.wrapping_add(0xFEDC_BA98_7654_3210));

    let result = GameLoop::new(&mut game)
        .with_verbosity(VerbosityLevel::Silent)
        .run_match(&mut *controller1, &mut *controller2)?;

    Ok(MatchRecord {
        deck1: deck1.name.clone(),
        deck2: deck2.name.clone(),
        winner: result.winner,
        turns: result.turns_played,
    })
}
