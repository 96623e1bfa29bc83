//! Structured match events
//!
//! The engine records one `GameEvent` per state change. Strings are only
//! produced at the boundary through `Display` (or JSON via serde).

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    MatchStarted {
        first_player: String,
    },
    CommonPlaced {
        player: String,
        card: String,
        slot: usize,
    },
    CommonSacrificed {
        player: String,
        card: String,
        gained: u32,
        total: u32,
    },
    RitualSacrifice {
        player: String,
        ritual: String,
        card: String,
        gained: u32,
        total: u32,
    },
    RitualFizzled {
        player: String,
        ritual: String,
    },
    BloodBonusPrepared {
        player: String,
        ritual: String,
    },
    CardBuffed {
        player: String,
        ritual: String,
        card: String,
        attack: i32,
        hp: i32,
    },
    GodInvoked {
        player: String,
        god: String,
        cost: u32,
    },
    EnemyLineStruck {
        god: String,
        damage: i32,
    },
    LunarVeil {
        god: String,
    },
    DirectAttack {
        player: String,
        attacker: String,
        defender: String,
        damage: i32,
        remaining_hp: i32,
    },
    UndefendedLane {
        player: String,
        attacker: String,
        defender: String,
        slot: usize,
        damage: i32,
        remaining_hp: i32,
    },
    Clash {
        player: String,
        attacker: String,
        attacker_power: i32,
        defender: String,
        defender_power: i32,
    },
    CardDestroyed {
        owner: String,
        card: String,
    },
    TurnEnded {
        next_player: String,
        turn: u32,
    },
    CardsDrawn {
        player: String,
        count: usize,
    },
    DiscardRecycled {
        player: String,
        count: usize,
    },
    MatchOver {
        winner: String,
    },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::MatchStarted { first_player } => {
                write!(f, "The match begins. {first_player} plays first.")
            }
            GameEvent::CommonPlaced { player, card, slot } => {
                write!(f, "{player} places {card} in slot {}.", slot + 1)
            }
            GameEvent::CommonSacrificed {
                player,
                card,
                gained,
                total,
            } => write!(
                f,
                "{player} sacrifices {card} -> +{gained} blood (total {total})."
            ),
            GameEvent::RitualSacrifice {
                player,
                ritual,
                card,
                gained,
                total,
            } => write!(
                f,
                "{player} uses {ritual} on {card} -> +{gained} blood (total {total})."
            ),
            GameEvent::RitualFizzled { player, ritual } => {
                write!(f, "{player} plays {ritual} without a target.")
            }
            GameEvent::BloodBonusPrepared { player, ritual } => {
                write!(f, "{player} raises {ritual} -> next sacrifice +2 blood.")
            }
            GameEvent::CardBuffed {
                player,
                ritual,
                card,
                attack,
                hp,
            } => write!(
                f,
                "{player} casts {ritual} on {card} -> +1/+1 (now {attack}/{hp})."
            ),
            GameEvent::GodInvoked { player, god, cost } => {
                write!(f, "{player} invokes {god} (cost {cost} blood).")
            }
            GameEvent::EnemyLineStruck { god, damage } => {
                write!(f, "{god} strikes the enemy line for {damage}.")
            }
            GameEvent::LunarVeil { god } => {
                write!(f, "{god} draws a lunar veil over the battlefield.")
            }
            GameEvent::DirectAttack {
                player,
                attacker,
                defender,
                damage,
                remaining_hp,
            } => write!(
                f,
                "{player}'s {attacker} attacks directly -> {defender} loses {damage} HP ({remaining_hp} left)."
            ),
            GameEvent::UndefendedLane {
                player,
                attacker,
                defender,
                slot,
                damage,
                remaining_hp,
            } => write!(
                f,
                "{player}'s {attacker} finds lane {} open and hits {defender} for {damage} HP ({remaining_hp} left).",
                slot + 1
            ),
            GameEvent::Clash {
                player,
                attacker,
                attacker_power,
                defender,
                defender_power,
            } => write!(
                f,
                "{player}'s {attacker} ({attacker_power}) clashes with {defender} ({defender_power})."
            ),
            GameEvent::CardDestroyed { owner, card } => {
                write!(f, "{owner}'s {card} is destroyed.")
            }
            GameEvent::TurnEnded { next_player, turn } => {
                write!(f, "-- Turn over. {next_player} to play (turn {turn}).")
            }
            GameEvent::CardsDrawn { player, count } => {
                let plural = if *count == 1 { "" } else { "s" };
                write!(f, "{player} draws {count} card{plural}.")
            }
            GameEvent::DiscardRecycled { player, count } => write!(
                f,
                "{player} shuffles {count} discarded cards back into the deck."
            ),
            GameEvent::MatchOver { winner } => write!(f, "{winner} wins the match."),
        }
    }
}
