//! Greedy opponent AI
//!
//! Each turn: deploy the first common from hand into the first empty lane,
//! attack straight ahead from every occupied lane, then send the god (if
//! any) at the opposing player.

use crate::core::{CardKind, Seat};
use crate::game::controller::{GameStateView, PlayerController};
use crate::game::{ActionOutcome, ActionResult, AttackSource, GameAction, GameState, Rejection, Target};
use crate::zones::BOARD_SLOTS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Deploy,
    Attack(usize),
    God,
    Done,
}

#[derive(Debug, Clone)]
pub struct GreedyController {
    seat: Seat,
    step: Step,
}

impl GreedyController {
    pub fn new(seat: Seat) -> Self {
        GreedyController {
            seat,
            step: Step::Deploy,
        }
    }
}

impl PlayerController for GreedyController {
    fn seat(&self) -> Seat {
        self.seat
    }

    fn on_turn_start(&mut self, _view: &GameStateView) {
        self.step = Step::Deploy;
    }

    fn choose_action(
        &mut self,
        view: &GameStateView,
        _available: &[GameAction],
    ) -> Option<GameAction> {
        loop {
            match self.step {
                Step::Deploy => {
                    self.step = Step::Attack(0);
                    let common = view.hand().iter().position(|c| c.kind == CardKind::Common);
                    if let (Some(hand_index), Some(slot)) = (common, view.board().first_empty()) {
                        return Some(GameAction::PlayCommon { hand_index, slot });
                    }
                }
                Step::Attack(slot) if slot < BOARD_SLOTS => {
                    self.step = Step::Attack(slot + 1);
                    if view.board().is_occupied(slot) {
                        return Some(GameAction::Attack {
                            from: AttackSource::Board(slot),
                            to: Target::BoardSlot(slot),
                        });
                    }
                }
                Step::Attack(_) => self.step = Step::God,
                Step::God => {
                    self.step = Step::Done;
                    if view.god().is_some() {
                        return Some(GameAction::Attack {
                            from: AttackSource::God,
                            to: Target::Player,
                        });
                    }
                }
                Step::Done => return None,
            }
        }
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}

impl GameState {
    /// Play Seat Two's whole turn with the greedy policy
    ///
    /// Does nothing unless it is Seat Two's turn. The turn is ended
    /// afterwards unless an attack won the match.
    pub fn perform_ai_turn(&mut self) -> ActionResult {
        self.ensure_in_progress()?;
        if self.active_seat() != Seat::Two {
            return Err(Rejection::NotOpponentsTurn);
        }

        let mut ai = GreedyController::new(Seat::Two);
        ai.on_turn_start(&GameStateView::new(self, Seat::Two));
        loop {
            let choice = ai.choose_action(&GameStateView::new(self, Seat::Two), &[]);
            let Some(action) = choice else { break };
            if let Ok(ActionOutcome::MatchEnded { winner }) = self.apply(&action) {
                return Ok(ActionOutcome::MatchEnded { winner });
            }
        }
        self.end_turn()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, CardInstance, EntityId, PlayerState};
    use crate::game::MatchConfig;

    fn common(id: u32, attack: i32, health: i32) -> Card {
        Card::new(EntityId::new(id), format!("Common {id}"), CardKind::Common).with_stats(attack, health)
    }

    fn on_board(id: u32, attack: i32, health: i32) -> CardInstance {
        CardInstance::new(EntityId::new(id), common(id, attack, health))
    }

    #[test]
    fn test_greedy_step_order() {
        let mut me = PlayerState::new("Ana");
        me.hand = vec![common(0, 1, 1)];
        me.board.place(0, on_board(1, 1, 1));
        me.board.place(2, on_board(2, 1, 1));
        let game = GameState::from_players(me, PlayerState::new("Ixchel"), MatchConfig::default());

        let mut ai = GreedyController::new(Seat::One);
        let view = GameStateView::new(&game, Seat::One);
        ai.on_turn_start(&view);

        assert_eq!(
            ai.choose_action(&view, &[]),
            Some(GameAction::PlayCommon { hand_index: 0, slot: 1 })
        );
        // The view is stale, so lane 1 still looks empty
        let attacks: Vec<_> = std::iter::from_fn(|| ai.choose_action(&view, &[])).collect();
        assert_eq!(
            attacks,
            vec![
                GameAction::Attack { from: AttackSource::Board(0), to: Target::BoardSlot(0) },
                GameAction::Attack { from: AttackSource::Board(2), to: Target::BoardSlot(2) },
            ]
        );
    }

    #[test]
    fn test_ai_turn_requires_seat_two() {
        let mut game = GameState::from_players(
            PlayerState::new("Ana"),
            PlayerState::new("Ixchel"),
            MatchConfig::default(),
        );
        let before = game.snapshot();

        assert_eq!(game.perform_ai_turn(), Err(Rejection::NotOpponentsTurn));
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_ai_turn_deploys_attacks_and_passes() {
        let mut ana = PlayerState::new("Ana");
        ana.deck = vec![common(20, 1, 1)];
        let mut ixchel = PlayerState::new("Ixchel");
        ixchel.hand = vec![common(10, 2, 2)];

        let mut game = GameState::from_players(ana, ixchel, MatchConfig::default().with_seed(8));
        game.end_turn().unwrap();

        assert_eq!(game.perform_ai_turn(), Ok(ActionOutcome::Applied));
        assert_eq!(game.active_seat(), Seat::One);
        assert_eq!(game.player(Seat::One).hp, 8);
        assert!(game.player(Seat::Two).board.is_occupied(0));
    }

    #[test]
    fn test_ai_god_can_win() {
        let mut ixchel = PlayerState::new("Ixchel");
        let god = Card::new(EntityId::new(30), "Chaac", CardKind::God).with_stats(6, 7);
        ixchel.god_slot = Some(CardInstance::new(EntityId::new(30), god));

        let ana = PlayerState::new("Ana").with_hp(5);
        let mut game = GameState::from_players(ana, ixchel, MatchConfig::default());
        game.end_turn().unwrap();

        assert_eq!(
            game.perform_ai_turn(),
            Ok(ActionOutcome::MatchEnded { winner: Seat::Two })
        );
        assert_eq!(game.player(Seat::One).hp, 0);
        assert_eq!(game.active_seat(), Seat::Two);
        assert_eq!(game.end_turn(), Err(Rejection::MatchOver));
    }
}
