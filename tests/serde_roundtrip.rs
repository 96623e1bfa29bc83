//! Serialization fidelity
//!
//! Cards and instances keep their ids through JSON, and a match snapshot
//! survives a full encode/decode unchanged.

use kukulcan_engine::core::{ArrivalEffect, Card, CardInstance, CardKind, EntityId, RitualKind};
use kukulcan_engine::game::{GameEvent, GameState, MatchConfig, MatchSnapshot};
use kukulcan_engine::loader::CardCatalog;

#[test]
fn test_card_keeps_identity() {
    let card = Card::new(EntityId::new(42), "Kukulcan", CardKind::God)
        .with_stats(7, 8)
        .with_blood_cost(7)
        .with_arrival(ArrivalEffect::DamageEnemyBoard(1));

    let json = serde_json::to_string(&card).unwrap();
    let back: Card = serde_json::from_str(&json).unwrap();

    assert_eq!(back.id, card.id);
    assert_eq!(back.arrival, ArrivalEffect::DamageEnemyBoard(1));
    assert_eq!(back.blood_cost, 7);
}

#[test]
fn test_instance_keeps_identity_and_damage() {
    let base = Card::new(EntityId::new(3), "Forest Charm", CardKind::Ritual)
        .with_ritual(RitualKind::StatBuff);
    let mut inst = CardInstance::new(EntityId::new(9), base);
    inst.take_damage(1);

    let json = serde_json::to_string(&inst).unwrap();
    let back: CardInstance = serde_json::from_str(&json).unwrap();

    assert_eq!(back, inst);
    assert_eq!(back.id.as_u32(), 9);
    assert_eq!(back.base.id.as_u32(), 3);
}

#[test]
fn test_ids_are_bare_integers_on_the_wire() {
    let card = Card::new(EntityId::new(7), "Lost Scout", CardKind::Common);
    let value = serde_json::to_value(&card).unwrap();
    assert_eq!(value["id"], serde_json::json!(7));
    assert_eq!(value["kind"], serde_json::json!("common"));
}

#[test]
fn test_events_are_tagged() {
    let event = GameEvent::LunarVeil {
        god: "Ix Chel".to_string(),
    };
    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["event"], serde_json::json!("lunar_veil"));

    let back: GameEvent = serde_json::from_value(value).unwrap();
    assert_eq!(back, event);
}

#[test]
fn test_snapshot_round_trip_mid_match() {
    let mut catalog = CardCatalog::builtin().unwrap();
    let d1 = catalog.starter_deck().unwrap();
    let d2 = catalog.starter_deck().unwrap();
    let mut game =
        GameState::new("Ana", d1, "Ixchel", d2, MatchConfig::default().with_seed(21)).unwrap();
    game.start(5);
    let fodder = game
        .current()
        .hand
        .iter()
        .position(|c| c.is_common())
        .unwrap();
    game.sacrifice_common(fodder).unwrap();
    game.end_turn().unwrap();

    let snapshot = game.snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: MatchSnapshot = serde_json::from_str(&json).unwrap();

    assert_eq!(back, snapshot);
    assert_eq!(back.log, game.log_lines());
}
