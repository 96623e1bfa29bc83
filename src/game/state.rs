//! Main match state structure

use crate::core::{Card, CardInstance, Deck, IdAllocator, InstanceId, PlayerState, Seat};
use crate::game::{
    EmptyDeckPolicy, GameEvent, GameLogger, MatchConfig, MatchPhase, MatchSnapshot, Rejection,
    VerbosityLevel,
};
use crate::{KukulcanError, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// Complete match state
///
/// Owns both players, the turn model, the append-only event log and the
/// engine RNG. All mutation goes through the action methods.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Indexed by `Seat::index`
    pub(crate) players: [PlayerState; 2],

    pub(crate) active: Seat,
    pub(crate) phase: MatchPhase,
    pub(crate) turn_number: u32,

    /// Every state change, in order. Rejections never land here.
    pub(crate) log: Vec<GameEvent>,

    pub(crate) config: MatchConfig,

    /// Shuffles and recycles; seeded from the config for reproducible matches
    pub(crate) rng: ChaCha12Rng,

    /// Ids for instances put into play
    pub(crate) instance_ids: IdAllocator,

    /// Ambient output; defaults to Silent so library users see nothing
    pub logger: GameLogger,
}

impl GameState {
    /// Create a match in `Setup` from two decks
    ///
    /// Fails if either deck breaks the copy limits.
    pub fn new(
        p1_name: impl Into<String>,
        p1_deck: Deck,
        p2_name: impl Into<String>,
        p2_deck: Deck,
        config: MatchConfig,
    ) -> Result<Self> {
        for deck in [&p1_deck, &p2_deck] {
            deck.validate().map_err(|violation| KukulcanError::InvalidDeck {
                deck: deck.name.clone(),
                violation,
            })?;
        }

        let p1 = PlayerState::new(p1_name)
            .with_hp(config.starting_hp)
            .with_deck(p1_deck.cards);
        let p2 = PlayerState::new(p2_name)
            .with_hp(config.starting_hp)
            .with_deck(p2_deck.cards);

        Ok(Self::assemble([p1, p2], config, MatchPhase::Setup))
    }

    /// Build an in-progress match from prepared players, Seat One to act
    ///
    /// Hit points and zones are taken as given.
    pub fn from_players(p1: PlayerState, p2: PlayerState, config: MatchConfig) -> Self {
        Self::assemble([p1, p2], config, MatchPhase::InProgress)
    }

    fn assemble(players: [PlayerState; 2], config: MatchConfig, phase: MatchPhase) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha12Rng::seed_from_u64(seed),
            None => ChaCha12Rng::from_entropy(),
        };
        let first_free = players
            .iter()
            .flat_map(in_play)
            .map(|inst| inst.id.as_u32() + 1)
            .max()
            .unwrap_or(0);

        GameState {
            players,
            active: Seat::One,
            phase,
            turn_number: 1,
            log: Vec::new(),
            config,
            rng,
            instance_ids: IdAllocator::starting_at(first_free),
            logger: GameLogger::with_verbosity(VerbosityLevel::Silent),
        }
    }

    /// Reseed the engine RNG
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = ChaCha12Rng::seed_from_u64(seed);
    }

    /// Shuffle both decks, deal `mulligan` cards each and open the match
    ///
    /// Calling it again reshuffles and redeals whatever the decks hold.
    pub fn start(&mut self, mulligan: usize) {
        for player in self.players.iter_mut() {
            player.deck.shuffle(&mut self.rng);
            player.draw(mulligan);
        }

        self.log.clear();
        self.active = Seat::One;
        self.phase = MatchPhase::InProgress;
        self.turn_number = 1;

        let first_player = self.player(Seat::One).name.clone();
        self.record_at(VerbosityLevel::Minimal, GameEvent::MatchStarted { first_player });
    }

    /// Rebuild both players from fresh card lists (names kept) and start over
    pub fn restart(
        &mut self,
        p1_cards: Vec<Card>,
        p2_cards: Vec<Card>,
        mulligan: usize,
    ) {
        let hp = self.config.starting_hp;
        for (player, cards) in self.players.iter_mut().zip([p1_cards, p2_cards]) {
            *player = PlayerState::new(std::mem::take(&mut player.name))
                .with_hp(hp)
                .with_deck(cards);
        }
        self.instance_ids = IdAllocator::new();
        self.start(mulligan);
    }

    pub fn player(&self, seat: Seat) -> &PlayerState {
        &self.players[seat.index()]
    }

    /// The player whose turn it is
    pub fn current(&self) -> &PlayerState {
        self.player(self.active)
    }

    pub fn opponent(&self) -> &PlayerState {
        self.player(self.active.opponent())
    }

    pub fn active_seat(&self) -> Seat {
        self.active
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_over()
    }

    pub fn winner(&self) -> Option<Seat> {
        self.phase.winner()
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn log(&self) -> &[GameEvent] {
        &self.log
    }

    /// The match log rendered for display
    pub fn log_lines(&self) -> Vec<String> {
        self.log.iter().map(ToString::to_string).collect()
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            phase: self.phase,
            active: self.active,
            turn_number: self.turn_number,
            players: self.players.clone(),
            log: self.log_lines(),
        }
    }

    pub(crate) fn player_mut(&mut self, seat: Seat) -> &mut PlayerState {
        &mut self.players[seat.index()]
    }

    pub(crate) fn current_mut(&mut self) -> &mut PlayerState {
        self.player_mut(self.active)
    }

    /// Both players of `seat`'s perspective, mutably: (own, opposing)
    pub(crate) fn sides_mut(&mut self, seat: Seat) -> (&mut PlayerState, &mut PlayerState) {
        let [p1, p2] = &mut self.players;
        match seat {
            Seat::One => (p1, p2),
            Seat::Two => (p2, p1),
        }
    }

    pub(crate) fn next_instance_id(&mut self) -> InstanceId {
        self.instance_ids.next_id()
    }

    pub(crate) fn ensure_in_progress(&self) -> std::result::Result<(), Rejection> {
        match self.phase {
            MatchPhase::Setup => Err(Rejection::MatchNotStarted),
            MatchPhase::MatchOver { .. } => Err(Rejection::MatchOver),
            MatchPhase::InProgress => Ok(()),
        }
    }

    pub(crate) fn record(&mut self, event: GameEvent) {
        self.record_at(VerbosityLevel::Normal, event);
    }

    pub(crate) fn record_at(&mut self, level: VerbosityLevel, event: GameEvent) {
        self.logger.event(level, &event);
        self.log.push(event);
    }

    /// Close the match in favor of `winner`
    pub(crate) fn finish(&mut self, winner: Seat) {
        self.phase = MatchPhase::MatchOver { winner };
        let name = self.player(winner).name.clone();
        self.record_at(VerbosityLevel::Minimal, GameEvent::MatchOver { winner: name });
    }

    /// Draw up to `n` cards for `seat`, honoring the empty-deck policy
    pub(crate) fn draw_for(&mut self, seat: Seat, n: usize) -> usize {
        let mut drawn = 0;
        for _ in 0..n {
            let player = &mut self.players[seat.index()];
            if player.deck.is_empty()
                && self.config.empty_deck == EmptyDeckPolicy::RecycleDiscard
                && !player.discard.is_empty()
            {
                player.deck = std::mem::take(&mut player.discard);
                player.deck.shuffle(&mut self.rng);
                let event = GameEvent::DiscardRecycled {
                    player: player.name.clone(),
                    count: player.deck.len(),
                };
                self.record(event);
            }
            if self.players[seat.index()].draw(1).is_empty() {
                break;
            }
            drawn += 1;
        }

        if drawn > 0 {
            let player = self.player(seat).name.clone();
            self.record_at(
                VerbosityLevel::Verbose,
                GameEvent::CardsDrawn {
                    player,
                    count: drawn,
                },
            );
        }
        drawn
    }
}

/// Every instance a player has in play
fn in_play(player: &PlayerState) -> impl Iterator<Item = &CardInstance> {
    player
        .board
        .occupied()
        .map(|(_, inst)| inst)
        .chain(player.sacrifice_slot.iter())
        .chain(player.god_slot.iter())
}
