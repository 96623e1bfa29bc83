//! Player actions
//!
//! Every action validates first and mutates second: a `Rejection` means
//! nothing changed.

use crate::core::{Card, CardInstance, CardKind, RitualKind, Seat};
use crate::game::effects::resolve_arrival;
use crate::game::{AttackSource, GameEvent, GameState, Target};
use crate::zones::BOARD_SLOTS;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Everything the active player can ask the engine to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    /// Put a common from hand into an empty lane
    PlayCommon { hand_index: usize, slot: usize },

    /// Sacrifice a common from hand for blood
    Sacrifice { hand_index: usize },

    /// Play a ritual, optionally aimed at an own lane
    PlayRitual {
        hand_index: usize,
        target: Option<usize>,
    },

    /// Pay blood to put a god into the god slot
    InvokeGod { hand_index: usize },

    Attack { from: AttackSource, to: Target },

    EndTurn,
}

impl fmt::Display for GameAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameAction::PlayCommon { hand_index, slot } => {
                write!(f, "play common #{hand_index} into slot {slot}")
            }
            GameAction::Sacrifice { hand_index } => write!(f, "sacrifice #{hand_index}"),
            GameAction::PlayRitual {
                hand_index,
                target: Some(slot),
            } => write!(f, "ritual #{hand_index} on slot {slot}"),
            GameAction::PlayRitual {
                hand_index,
                target: None,
            } => write!(f, "ritual #{hand_index}"),
            GameAction::InvokeGod { hand_index } => write!(f, "invoke god #{hand_index}"),
            GameAction::Attack { from, to } => write!(f, "attack {to} from {from}"),
            GameAction::EndTurn => write!(f, "end turn"),
        }
    }
}

/// What an accepted action did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    Applied,
    /// Accepted and paid for, but had no target to act on
    Fizzled,
    /// The action brought a player to 0 hit points
    MatchEnded { winner: Seat },
}

/// Why an action was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("the match has not started")]
    MatchNotStarted,

    #[error("the match is over")]
    MatchOver,

    #[error("it is not the opponent's turn")]
    NotOpponentsTurn,

    #[error("hand index {index} out of range (hand holds {hand_size})")]
    HandIndexOutOfRange { index: usize, hand_size: usize },

    #[error("expected a {expected} card, found {found} '{name}'")]
    WrongCardKind {
        expected: CardKind,
        found: CardKind,
        name: String,
    },

    #[error("ritual '{0}' has no ritual kind")]
    MissingRitualKind(String),

    #[error("board slot {0} out of range")]
    SlotOutOfRange(usize),

    #[error("board slot {0} is occupied")]
    SlotOccupied(usize),

    #[error("god slot is occupied")]
    GodSlotOccupied,

    #[error("not enough blood: need {needed}, have {available}")]
    NotEnoughBlood { needed: u32, available: u32 },

    #[error("no attacker in {0}")]
    NoAttacker(AttackSource),

    #[error("the opponent has no god")]
    NoOpposingGod,
}

pub type ActionResult = std::result::Result<ActionOutcome, Rejection>;

impl GameState {
    /// Place the common at `hand_index` into the empty lane `slot`
    pub fn play_common_to_board(&mut self, hand_index: usize, slot: usize) -> ActionResult {
        self.apply(&GameAction::PlayCommon { hand_index, slot })
    }

    /// Sacrifice the common at `hand_index` for `1 + pending bonus` blood
    pub fn sacrifice_common(&mut self, hand_index: usize) -> ActionResult {
        self.apply(&GameAction::Sacrifice { hand_index })
    }

    pub fn play_ritual(&mut self, hand_index: usize, target: Option<usize>) -> ActionResult {
        self.apply(&GameAction::PlayRitual { hand_index, target })
    }

    pub fn invoke_god(&mut self, hand_index: usize) -> ActionResult {
        self.apply(&GameAction::InvokeGod { hand_index })
    }

    pub fn attack(&mut self, from: AttackSource, to: Target) -> ActionResult {
        self.apply(&GameAction::Attack { from, to })
    }

    /// Close the active player's turn and hand over to the other seat
    pub fn end_turn(&mut self) -> ActionResult {
        self.apply(&GameAction::EndTurn)
    }

    /// Run an action against the active player
    pub fn apply(&mut self, action: &GameAction) -> ActionResult {
        let result = match *action {
            GameAction::PlayCommon { hand_index, slot } => self.resolve_play_common(hand_index, slot),
            GameAction::Sacrifice { hand_index } => self.resolve_sacrifice(hand_index),
            GameAction::PlayRitual { hand_index, target } => {
                self.resolve_ritual(hand_index, target)
            }
            GameAction::InvokeGod { hand_index } => self.resolve_invoke(hand_index),
            GameAction::Attack { from, to } => self.resolve_attack(from, to),
            GameAction::EndTurn => self.resolve_end_turn(),
        };

        if let Err(rejection) = &result {
            self.logger
                .rejection(&format!("{} rejected ({action}): {rejection}", self.active));
        }
        result
    }

    /// Check an action without applying it
    pub fn validate(&self, action: &GameAction) -> Result<(), Rejection> {
        match *action {
            GameAction::PlayCommon { hand_index, slot } => self.check_play_common(hand_index, slot),
            GameAction::Sacrifice { hand_index } => {
                self.check_hand_card(hand_index, CardKind::Common).map(|_| ())
            }
            GameAction::PlayRitual { hand_index, .. } => self.check_ritual(hand_index).map(|_| ()),
            GameAction::InvokeGod { hand_index } => self.check_invoke(hand_index),
            GameAction::Attack { from, to } => self.check_attack(from, to),
            GameAction::EndTurn => self.ensure_in_progress(),
        }
    }

    /// Every action the active player could take right now, `EndTurn` aside
    ///
    /// Rituals are offered untargeted and on each occupied own lane.
    pub fn legal_actions(&self) -> Vec<GameAction> {
        let mut actions = Vec::new();
        if self.ensure_in_progress().is_err() {
            return actions;
        }

        let player = self.current();
        let occupied: Vec<usize> = player.board.occupied().map(|(slot, _)| slot).collect();

        for (hand_index, card) in player.hand.iter().enumerate() {
            match card.kind {
                CardKind::Common => {
                    for slot in 0..BOARD_SLOTS {
                        if !player.board.is_occupied(slot) {
                            actions.push(GameAction::PlayCommon { hand_index, slot });
                        }
                    }
                    actions.push(GameAction::Sacrifice { hand_index });
                }
                CardKind::Ritual if card.ritual.is_some() => {
                    actions.push(GameAction::PlayRitual {
                        hand_index,
                        target: None,
                    });
                    for &slot in &occupied {
                        actions.push(GameAction::PlayRitual {
                            hand_index,
                            target: Some(slot),
                        });
                    }
                }
                CardKind::Ritual => {}
                CardKind::God => {
                    if self.check_invoke(hand_index).is_ok() {
                        actions.push(GameAction::InvokeGod { hand_index });
                    }
                }
            }
        }

        let attackers = occupied
            .iter()
            .map(|&slot| AttackSource::Board(slot))
            .chain(player.god_slot.as_ref().map(|_| AttackSource::God));
        for from in attackers {
            actions.push(GameAction::Attack {
                from,
                to: Target::Player,
            });
            if self.opponent().god_slot.is_some() {
                actions.push(GameAction::Attack {
                    from,
                    to: Target::God,
                });
            }
            for slot in 0..BOARD_SLOTS {
                actions.push(GameAction::Attack {
                    from,
                    to: Target::BoardSlot(slot),
                });
            }
        }

        actions
    }

    fn check_hand_card(&self, hand_index: usize, expected: CardKind) -> Result<&Card, Rejection> {
        self.ensure_in_progress()?;
        let hand = &self.current().hand;
        let card = hand.get(hand_index).ok_or(Rejection::HandIndexOutOfRange {
            index: hand_index,
            hand_size: hand.len(),
        })?;
        if card.kind != expected {
            return Err(Rejection::WrongCardKind {
                expected,
                found: card.kind,
                name: card.name.clone(),
            });
        }
        Ok(card)
    }

    fn check_play_common(&self, hand_index: usize, slot: usize) -> Result<(), Rejection> {
        self.ensure_in_progress()?;
        if slot >= BOARD_SLOTS {
            return Err(Rejection::SlotOutOfRange(slot));
        }
        self.check_hand_card(hand_index, CardKind::Common)?;
        if self.current().board.is_occupied(slot) {
            return Err(Rejection::SlotOccupied(slot));
        }
        Ok(())
    }

    /// Only the card itself is checked; a bad target makes the ritual fizzle
    fn check_ritual(&self, hand_index: usize) -> Result<RitualKind, Rejection> {
        let card = self.check_hand_card(hand_index, CardKind::Ritual)?;
        card.ritual
            .ok_or_else(|| Rejection::MissingRitualKind(card.name.clone()))
    }

    fn check_invoke(&self, hand_index: usize) -> Result<(), Rejection> {
        let card = self.check_hand_card(hand_index, CardKind::God)?;
        let player = self.current();
        if player.god_slot.is_some() {
            return Err(Rejection::GodSlotOccupied);
        }
        if player.blood < card.blood_cost {
            return Err(Rejection::NotEnoughBlood {
                needed: card.blood_cost,
                available: player.blood,
            });
        }
        Ok(())
    }

    fn resolve_play_common(&mut self, hand_index: usize, slot: usize) -> ActionResult {
        self.check_play_common(hand_index, slot)?;

        let id = self.next_instance_id();
        let player = self.current_mut();
        let card = player.hand.remove(hand_index);
        let event = GameEvent::CommonPlaced {
            player: player.name.clone(),
            card: card.name.clone(),
            slot,
        };
        player.board.place(slot, CardInstance::new(id, card));

        self.record(event);
        Ok(ActionOutcome::Applied)
    }

    fn resolve_sacrifice(&mut self, hand_index: usize) -> ActionResult {
        self.check_hand_card(hand_index, CardKind::Common)?;

        let id = self.next_instance_id();
        let player = self.current_mut();
        let card = player.hand.remove(hand_index);
        let gained = player.collect_sacrifice_blood();
        let event = GameEvent::CommonSacrificed {
            player: player.name.clone(),
            card: card.name.clone(),
            gained,
            total: player.blood,
        };
        // A second sacrifice in the same turn replaces the first
        player.sacrifice_slot = Some(CardInstance::new(id, card.clone()));
        player.discard.push(card);

        self.record(event);
        Ok(ActionOutcome::Applied)
    }

    fn resolve_ritual(&mut self, hand_index: usize, target: Option<usize>) -> ActionResult {
        let kind = self.check_ritual(hand_index)?;

        let player = self.current_mut();
        let ritual = player.hand.remove(hand_index);
        let name = player.name.clone();
        let ritual_name = ritual.name.clone();
        player.discard.push(ritual);

        let fizzled = GameEvent::RitualFizzled {
            player: name.clone(),
            ritual: ritual_name.clone(),
        };

        match kind {
            RitualKind::SacrificeForCards => {
                let Some(victim) = target.and_then(|slot| player.board.take(slot)) else {
                    self.record(fizzled);
                    return Ok(ActionOutcome::Fizzled);
                };
                let gained = player.collect_sacrifice_blood();
                let event = GameEvent::RitualSacrifice {
                    player: name,
                    ritual: ritual_name,
                    card: victim.base.name.clone(),
                    gained,
                    total: player.blood,
                };
                player.discard.push(victim.base.clone());
                player.sacrifice_slot = Some(victim);

                self.record(event);
                self.draw_for(self.active, 2);
                Ok(ActionOutcome::Applied)
            }
            RitualKind::BloodBonus => {
                player.pending_bonus_blood = 1;
                self.record(GameEvent::BloodBonusPrepared {
                    player: name,
                    ritual: ritual_name,
                });
                Ok(ActionOutcome::Applied)
            }
            RitualKind::StatBuff => {
                let buffed = match target {
                    Some(slot) => player.board.get_mut(slot),
                    None => None,
                };
                let Some(inst) = buffed else {
                    self.record(fizzled);
                    return Ok(ActionOutcome::Fizzled);
                };
                inst.buff(1, 1);
                let event = GameEvent::CardBuffed {
                    player: name,
                    ritual: ritual_name,
                    card: inst.base.name.clone(),
                    attack: inst.current_attack,
                    hp: inst.current_hp,
                };
                self.record(event);
                Ok(ActionOutcome::Applied)
            }
        }
    }

    fn resolve_invoke(&mut self, hand_index: usize) -> ActionResult {
        self.check_invoke(hand_index)?;

        let id = self.next_instance_id();
        let seat = self.active;
        let (own, enemy) = self.sides_mut(seat);
        let god = own.hand.remove(hand_index);
        own.blood -= god.blood_cost;

        let invoked = GameEvent::GodInvoked {
            player: own.name.clone(),
            god: god.name.clone(),
            cost: god.blood_cost,
        };
        let aftermath = resolve_arrival(god.arrival, &god.name, enemy);
        own.god_slot = Some(CardInstance::new(id, god));

        self.record(invoked);
        for event in aftermath {
            self.record(event);
        }
        Ok(ActionOutcome::Applied)
    }

    fn resolve_end_turn(&mut self) -> ActionResult {
        self.ensure_in_progress()?;

        let player = self.current_mut();
        player.sacrifice_slot = None;
        player.pending_bonus_blood = 0;

        self.active = self.active.opponent();
        self.turn_number += 1;
        self.record(GameEvent::TurnEnded {
            next_player: self.current().name.clone(),
            turn: self.turn_number,
        });
        self.draw_for(self.active, 1);
        Ok(ActionOutcome::Applied)
    }
}
