//! God arrival effects
//!
//! Effects are keyed by `ArrivalEffect`, never by card name, and only touch
//! the opposing player's side.

use crate::core::{ArrivalEffect, PlayerState};
use crate::game::GameEvent;
use smallvec::SmallVec;

/// Apply `effect` for a god named `god` to the opposing player
///
/// Returns the events describing what happened, in order.
pub fn resolve_arrival(
    effect: ArrivalEffect,
    god: &str,
    enemy: &mut PlayerState,
) -> SmallVec<[GameEvent; 4]> {
    let mut events = SmallVec::new();
    match effect {
        ArrivalEffect::None => {}
        ArrivalEffect::DamageEnemyBoard(damage) => {
            events.push(GameEvent::EnemyLineStruck {
                god: god.to_string(),
                damage,
            });
            let struck: SmallVec<[usize; 4]> = enemy.board.occupied().map(|(slot, _)| slot).collect();
            for slot in struck {
                let Some(inst) = enemy.board.get_mut(slot) else {
                    continue;
                };
                inst.take_damage(damage);
                if !inst.is_destroyed() {
                    continue;
                }
                if let Some(inst) = enemy.board.take(slot) {
                    events.push(GameEvent::CardDestroyed {
                        owner: enemy.name.clone(),
                        card: inst.base.name.clone(),
                    });
                    enemy.discard.push(inst.base);
                }
            }
        }
        ArrivalEffect::LunarVeil => events.push(GameEvent::LunarVeil {
            god: god.to_string(),
        }),
    }
    events
}
