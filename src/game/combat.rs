//! Combat resolution
//!
//! Attacks happen one at a time and resolve immediately. Both sides of an
//! exchange deal their `current_attack` simultaneously; each is checked for
//! destruction on its own.

use crate::core::{CardInstance, PlayerState};
use crate::game::{ActionOutcome, ActionResult, GameEvent, GameState, Rejection};
use crate::zones::BOARD_SLOTS;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Which of the active player's cards attacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackSource {
    Board(usize),
    God,
}

/// What an attack is aimed at on the opposing side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    Player,
    God,
    BoardSlot(usize),
}

impl fmt::Display for AttackSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttackSource::Board(slot) => write!(f, "board slot {slot}"),
            AttackSource::God => write!(f, "god slot"),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Player => write!(f, "player"),
            Target::God => write!(f, "god"),
            Target::BoardSlot(slot) => write!(f, "board slot {slot}"),
        }
    }
}

/// How an instance came out of an exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fate {
    Survived(CardInstance),
    Destroyed(CardInstance),
}

impl Fate {
    fn of(instance: CardInstance) -> Self {
        if instance.is_destroyed() {
            Fate::Destroyed(instance)
        } else {
            Fate::Survived(instance)
        }
    }
}

/// Both instances deal their current attack to each other
pub fn trade_blows(mut attacker: CardInstance, mut defender: CardInstance) -> (Fate, Fate) {
    let dealt = attacker.current_attack;
    let taken = defender.current_attack;
    defender.take_damage(dealt);
    attacker.take_damage(taken);
    (Fate::of(attacker), Fate::of(defender))
}

fn take_attacker(owner: &mut PlayerState, from: AttackSource) -> Option<CardInstance> {
    match from {
        AttackSource::Board(slot) if slot < BOARD_SLOTS => owner.board.take(slot),
        AttackSource::Board(_) => None,
        AttackSource::God => owner.god_slot.take(),
    }
}

fn return_attacker(owner: &mut PlayerState, from: AttackSource, instance: CardInstance) {
    match from {
        AttackSource::Board(slot) => {
            owner.board.place(slot, instance);
        }
        AttackSource::God => owner.god_slot = Some(instance),
    }
}

fn bury(owner: &mut PlayerState, instance: CardInstance, events: &mut SmallVec<[GameEvent; 4]>) {
    events.push(GameEvent::CardDestroyed {
        owner: owner.name.clone(),
        card: instance.base.name.clone(),
    });
    owner.discard.push(instance.base);
}

impl GameState {
    pub(crate) fn check_attack(&self, from: AttackSource, to: Target) -> Result<(), Rejection> {
        self.ensure_in_progress()?;

        let attacker = self.current();
        let present = match from {
            AttackSource::Board(slot) => attacker.board.get(slot).is_some(),
            AttackSource::God => attacker.god_slot.is_some(),
        };
        if !present {
            return Err(Rejection::NoAttacker(from));
        }

        match to {
            Target::Player => Ok(()),
            Target::God if self.opponent().god_slot.is_none() => Err(Rejection::NoOpposingGod),
            Target::God => Ok(()),
            Target::BoardSlot(slot) if slot >= BOARD_SLOTS => Err(Rejection::SlotOutOfRange(slot)),
            Target::BoardSlot(_) => Ok(()),
        }
    }

    pub(crate) fn resolve_attack(&mut self, from: AttackSource, to: Target) -> ActionResult {
        self.check_attack(from, to)?;

        let seat = self.active;
        let mut events: SmallVec<[GameEvent; 4]> = SmallVec::new();
        let (own, enemy) = self.sides_mut(seat);
        let attacker = take_attacker(own, from).ok_or(Rejection::NoAttacker(from))?;

        let defender = match to {
            Target::Player => None,
            Target::God => enemy.god_slot.take(),
            Target::BoardSlot(slot) => enemy.board.take(slot),
        };

        match defender {
            None => {
                let damage = attacker.current_attack;
                enemy.lose_hp(damage);
                events.push(match to {
                    Target::BoardSlot(slot) => GameEvent::UndefendedLane {
                        player: own.name.clone(),
                        attacker: attacker.base.name.clone(),
                        defender: enemy.name.clone(),
                        slot,
                        damage,
                        remaining_hp: enemy.hp,
                    },
                    _ => GameEvent::DirectAttack {
                        player: own.name.clone(),
                        attacker: attacker.base.name.clone(),
                        defender: enemy.name.clone(),
                        damage,
                        remaining_hp: enemy.hp,
                    },
                });
                return_attacker(own, from, attacker);
            }
            Some(defender) => {
                events.push(GameEvent::Clash {
                    player: own.name.clone(),
                    attacker: attacker.base.name.clone(),
                    attacker_power: attacker.current_attack,
                    defender: defender.base.name.clone(),
                    defender_power: defender.current_attack,
                });

                let (attacker_fate, defender_fate) = trade_blows(attacker, defender);
                match attacker_fate {
                    Fate::Survived(inst) => return_attacker(own, from, inst),
                    Fate::Destroyed(inst) => bury(own, inst, &mut events),
                }
                match defender_fate {
                    Fate::Survived(inst) => match to {
                        Target::BoardSlot(slot) => {
                            enemy.board.place(slot, inst);
                        }
                        _ => enemy.god_slot = Some(inst),
                    },
                    Fate::Destroyed(inst) => bury(enemy, inst, &mut events),
                }
            }
        }

        let defeated = enemy.is_defeated();
        for event in events {
            self.record(event);
        }

        if defeated {
            self.finish(seat);
            return Ok(ActionOutcome::MatchEnded { winner: seat });
        }
        Ok(ActionOutcome::Applied)
    }
}
