//! Kukulcan - command line front end
//!
//! Plays matches between built-in controllers, validates deck files, lists
//! the card catalog and runs parallel tournaments.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use kukulcan_engine::{
    core::{CardKind, Deck, Seat},
    game::{
        ControllerType, EmptyDeckPolicy, GameEndReason, GameLoop, GameState, MatchConfig,
        OutputFormat, VerbosityLevel,
    },
    loader::{CardCatalog, DeckLoader},
    tournament::run_tourney,
};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::path::{Path, PathBuf};

/// Verbosity level for game output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

/// Log line format
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser)]
#[command(name = "kukulcan")]
#[command(about = "Kukulcan - a blood-and-sacrifice card battle engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one match between two controllers
    Play {
        /// Deck file (.deck) for player 1 (default: the starter deck)
        #[arg(long, value_name = "DECK")]
        deck1: Option<PathBuf>,

        /// Deck file (.deck) for player 2 (default: a shuffled battle deck)
        #[arg(long, value_name = "DECK")]
        deck2: Option<PathBuf>,

        /// Custom card catalog (JSON) instead of the built-in one
        #[arg(long, value_name = "CATALOG")]
        catalog: Option<PathBuf>,

        /// Player 1 controller type
        #[arg(long, value_enum, default_value = "greedy")]
        p1: ControllerType,

        /// Player 2 controller type
        #[arg(long, value_enum, default_value = "greedy")]
        p2: ControllerType,

        #[arg(long, default_value = "Player 1")]
        p1_name: String,

        #[arg(long, default_value = "Player 2")]
        p2_name: String,

        /// Set random seed for deterministic matches (overrides the config file)
        #[arg(long)]
        seed: Option<u64>,

        /// Match configuration file (JSON)
        #[arg(long, value_name = "CONFIG")]
        config: Option<PathBuf>,

        /// Stop after this many turns and call the match a draw
        #[arg(long)]
        max_turns: Option<u32>,

        /// Shuffle the discard pile back in when a deck runs out
        #[arg(long)]
        recycle_discard: bool,

        /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,

        /// Log line format
        #[arg(long, value_enum, default_value = "text")]
        format: FormatArg,

        /// Write the final match snapshot to this file
        #[arg(long, value_name = "FILE")]
        snapshot_output: Option<PathBuf>,
    },

    /// Check deck files against the catalog and the copy limits
    Validate {
        #[arg(value_name = "DECK", required = true)]
        decks: Vec<PathBuf>,

        #[arg(long, value_name = "CATALOG")]
        catalog: Option<PathBuf>,
    },

    /// List every card in the catalog
    Catalog {
        #[arg(long, value_name = "CATALOG")]
        catalog: Option<PathBuf>,
    },

    /// Play many matches in parallel and report statistics
    Tourney {
        /// Deck files to draw pairings from (default: starter and battle decks)
        #[arg(value_name = "DECK")]
        decks: Vec<PathBuf>,

        #[arg(long, short = 'g', default_value_t = 100)]
        games: usize,

        #[arg(long, value_enum, default_value = "greedy")]
        p1: ControllerType,

        #[arg(long, value_enum, default_value = "random")]
        p2: ControllerType,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long, value_name = "CATALOG")]
        catalog: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            deck1,
            deck2,
            catalog,
            p1,
            p2,
            p1_name,
            p2_name,
            seed,
            config,
            max_turns,
            recycle_discard,
            verbosity,
            format,
            snapshot_output,
        } => {
            let mut config = match config {
                Some(path) => MatchConfig::load_from_file(&path)
                    .with_context(|| format!("failed to read config {}", path.display()))?,
                None => MatchConfig::default(),
            };
            if let Some(seed) = seed {
                config.seed = Some(seed);
            }
            if let Some(max_turns) = max_turns {
                config.max_turns = max_turns;
            }
            if recycle_discard {
                config.empty_deck = EmptyDeckPolicy::RecycleDiscard;
            }

            let options = PlayOptions {
                deck1,
                deck2,
                catalog,
                p1,
                p2,
                p1_name,
                p2_name,
                config,
                verbosity: verbosity.into(),
                format: format.into(),
                snapshot_output,
            };
            run_play(options)?
        }
        Commands::Validate { decks, catalog } => run_validate(&decks, catalog.as_deref())?,
        Commands::Catalog { catalog } => run_catalog(catalog.as_deref())?,
        Commands::Tourney {
            decks,
            games,
            p1,
            p2,
            seed,
            catalog,
        } => run_tournament(&decks, games, p1, p2, seed, catalog.as_deref())?,
    }

    Ok(())
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<CardCatalog> {
    match path {
        Some(path) => CardCatalog::load_from_file(path)
            .with_context(|| format!("failed to load card catalog {}", path.display())),
        None => CardCatalog::builtin().context("built-in card catalog is malformed"),
    }
}

fn load_deck(catalog: &mut CardCatalog, path: &Path) -> anyhow::Result<Deck> {
    let list = DeckLoader::load_from_file(path)
        .with_context(|| format!("failed to read deck {}", path.display()))?;
    list.build(catalog)
        .with_context(|| format!("failed to build deck {}", path.display()))
}

struct PlayOptions {
    deck1: Option<PathBuf>,
    deck2: Option<PathBuf>,
    catalog: Option<PathBuf>,
    p1: ControllerType,
    p2: ControllerType,
    p1_name: String,
    p2_name: String,
    config: MatchConfig,
    verbosity: VerbosityLevel,
    format: OutputFormat,
    snapshot_output: Option<PathBuf>,
}

fn run_play(mut options: PlayOptions) -> anyhow::Result<()> {
    let seed = *options.config.seed.get_or_insert_with(rand::random);
    let text = matches!(options.format, OutputFormat::Text);
    let chatty = text && options.verbosity >= VerbosityLevel::Minimal;

    let mut catalog = load_catalog(options.catalog.as_deref())?;
    let mut deck_rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let deck1 = match &options.deck1 {
        Some(path) => load_deck(&mut catalog, path)?,
        None => catalog.starter_deck()?,
    };
    let deck2 = match &options.deck2 {
        Some(path) => load_deck(&mut catalog, path)?,
        None => catalog.battle_deck(&mut deck_rng),
    };

    if chatty {
        println!("=== Kukulcan ===");
        println!("Seed: {seed}");
        println!(
            "{} ({}, {} cards) vs {} ({}, {} cards)\n",
            options.p1_name,
            deck1.name,
            deck1.len(),
            options.p2_name,
            deck2.name,
            deck2.len()
        );
    }

    let mut game = GameState::new(options.p1_name, deck1, options.p2_name, deck2, options.config)?;
    game.logger.set_output_format(options.format);

    let mut controller1 = options.p1.build(Seat::One, seed.wrapping_add(0x1234_5678_9ABC_DEF0));
    let mut controller2 = options.p2.build(Seat::Two, seed.wrapping_add(0xFEDC_BA98_7654_3210));

    let result = GameLoop::new(&mut game)
        .with_verbosity(options.verbosity)
        .run_match(&mut *controller1, &mut *controller2)?;

    if chatty {
        println!("\n=== Match Over ===");
        match result.end_reason {
            GameEndReason::PlayerDefeated(loser) => {
                let winner = loser.opponent();
                println!(
                    "Winner: {} ({winner}) after {} turns",
                    game.player(winner).name,
                    result.turns_played
                );
            }
            GameEndReason::TurnLimit | GameEndReason::Manual => {
                println!("Draw after {} turns", result.turns_played);
            }
        }
        for seat in [Seat::One, Seat::Two] {
            let player = game.player(seat);
            println!(
                "  {}: {} HP, {} blood, {} cards left in deck",
                player.name,
                player.hp,
                player.blood,
                player.deck.len()
            );
        }
    }

    if let Some(path) = options.snapshot_output {
        game.snapshot()
            .save_to_file(&path)
            .with_context(|| format!("failed to write snapshot {}", path.display()))?;
        if chatty {
            println!("Snapshot written to {}", path.display());
        }
    }

    Ok(())
}

fn run_validate(paths: &[PathBuf], catalog: Option<&Path>) -> anyhow::Result<()> {
    let mut catalog = load_catalog(catalog)?;
    let mut invalid = 0;

    for path in paths {
        let deck = load_deck(&mut catalog, path)?;
        match deck.validate() {
            Ok(()) => println!("ok       {} ({}, {} cards)", path.display(), deck.name, deck.len()),
            Err(violation) => {
                invalid += 1;
                println!("invalid  {} ({}): {violation}", path.display(), deck.name);
            }
        }
    }

    if invalid > 0 {
        bail!("{invalid} of {} decks failed validation", paths.len());
    }
    Ok(())
}

fn run_catalog(catalog: Option<&Path>) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog)?;

    for kind in [CardKind::Common, CardKind::Ritual, CardKind::God] {
        println!("== {kind} ==");
        for def in catalog.of_kind(kind) {
            match kind {
                CardKind::God => println!(
                    "  {:<20} {}/{}  cost {}  {}",
                    def.name, def.attack, def.health, def.blood_cost, def.effect
                ),
                CardKind::Common => {
                    println!("  {:<20} {}/{}  {}", def.name, def.attack, def.health, def.effect)
                }
                CardKind::Ritual => println!("  {:<20} {}", def.name, def.effect),
            }
        }
    }
    Ok(())
}

fn run_tournament(
    paths: &[PathBuf],
    games: usize,
    p1: ControllerType,
    p2: ControllerType,
    seed: u64,
    catalog: Option<&Path>,
) -> anyhow::Result<()> {
    println!("=== Kukulcan - Tournament Mode ===\n");
    let mut catalog = load_catalog(catalog)?;

    let decks = if paths.is_empty() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        vec![catalog.starter_deck()?, catalog.battle_deck(&mut rng)]
    } else {
        paths
            .iter()
            .map(|path| load_deck(&mut catalog, path))
            .collect::<anyhow::Result<Vec<_>>>()?
    };

    for deck in &decks {
        println!("  {}: {} cards", deck.name, deck.len());
    }
    println!("Running {games} games, P1={p1}, P2={p2}, seed {seed}\n");

    let start = std::time::Instant::now();
    let stats = run_tourney(&decks, games, p1, p2, seed)?;
    let elapsed = start.elapsed();

    println!("{stats}");
    println!(
        "Elapsed time: {:.2}s ({:.1} games/s)",
        elapsed.as_secs_f64(),
        stats.games as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );
    Ok(())
}
